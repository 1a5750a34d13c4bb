use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::entities::CompiledQuery,
    record::{
        entities::{EntityDescriptor, Record},
        value_objects::{GetRecordInput, SearchOutcome, SearchRecordsInput},
    },
};

#[cfg_attr(test, mockall::automock)]
pub trait RecordService: Send + Sync {
    fn search_records(
        &self,
        input: SearchRecordsInput,
    ) -> impl Future<Output = Result<SearchOutcome, CoreError>> + Send;

    fn get_record(
        &self,
        input: GetRecordInput,
    ) -> impl Future<Output = Result<Option<Record>, CoreError>> + Send;
}

/// Persistence side of a search: runs a compiled query against one entity's
/// records. Unknown columns are the store's business.
#[cfg_attr(test, mockall::automock)]
pub trait RecordRepository: Send + Sync {
    fn search(
        &self,
        entity: EntityDescriptor,
        query: CompiledQuery,
    ) -> impl Future<Output = Result<Vec<Record>, CoreError>> + Send;

    fn find_by_id(
        &self,
        entity: EntityDescriptor,
        id: i64,
    ) -> impl Future<Output = Result<Option<Record>, CoreError>> + Send;
}
