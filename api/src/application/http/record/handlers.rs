pub mod get_record;
pub mod search_records;
