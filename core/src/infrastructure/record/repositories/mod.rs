pub mod json_record_repository;
pub mod sql_record_repository;

pub use json_record_repository::JsonRecordRepository;
pub use sql_record_repository::SqlRecordRepository;
