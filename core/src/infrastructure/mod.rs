pub mod db;
pub mod record;
