use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::entities::CompiledQuery,
    record::{
        entities::{EntityDescriptor, Record},
        ports::RecordRepository,
    },
};

pub mod condition;
pub mod repositories;

pub use repositories::{JsonRecordRepository, SqlRecordRepository};

/// The record store selected at startup.
#[derive(Debug, Clone)]
pub enum DataSource {
    Sql(SqlRecordRepository),
    Json(JsonRecordRepository),
}

impl RecordRepository for DataSource {
    async fn search(
        &self,
        entity: EntityDescriptor,
        query: CompiledQuery,
    ) -> Result<Vec<Record>, CoreError> {
        match self {
            DataSource::Sql(repository) => repository.search(entity, query).await,
            DataSource::Json(repository) => repository.search(entity, query).await,
        }
    }

    async fn find_by_id(
        &self,
        entity: EntityDescriptor,
        id: i64,
    ) -> Result<Option<Record>, CoreError> {
        match self {
            DataSource::Sql(repository) => repository.find_by_id(entity, id).await,
            DataSource::Json(repository) => repository.find_by_id(entity, id).await,
        }
    }
}
