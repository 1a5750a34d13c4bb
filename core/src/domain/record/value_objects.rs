use serde::Serialize;

use crate::domain::{
    filter::value_objects::{RejectedParam, SearchParams},
    record::entities::Record,
};

#[derive(Debug, Clone)]
pub struct SearchRecordsInput {
    pub entity: String,
    pub params: SearchParams,
}

#[derive(Debug, Clone)]
pub struct GetRecordInput {
    pub entity: String,
    pub id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub records: Vec<Record>,
    pub rejected: Vec<RejectedParam>,
}
