use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, JsonValue};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        filter::entities::CompiledQuery,
        record::{
            entities::{EntityDescriptor, Record},
            ports::RecordRepository,
        },
    },
    infrastructure::record::condition::{find_by_id_statement, search_statement},
};

#[derive(Debug, Clone)]
pub struct SqlRecordRepository {
    pub db: DatabaseConnection,
}

impl SqlRecordRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn into_record(value: JsonValue) -> Option<Record> {
    match value {
        JsonValue::Object(map) => Some(map),
        _ => None,
    }
}

impl RecordRepository for SqlRecordRepository {
    async fn search(
        &self,
        entity: EntityDescriptor,
        query: CompiledQuery,
    ) -> Result<Vec<Record>, CoreError> {
        let statement = search_statement(entity.table, &query)?;
        let statement = self.db.get_database_backend().build(&statement);

        let records = JsonValue::find_by_statement(statement)
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to search {}: {}", entity.table, e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .filter_map(into_record)
            .collect::<Vec<Record>>();

        Ok(records)
    }

    async fn find_by_id(
        &self,
        entity: EntityDescriptor,
        id: i64,
    ) -> Result<Option<Record>, CoreError> {
        let statement = find_by_id_statement(entity.table, entity.primary_key, id);
        let statement = self.db.get_database_backend().build(&statement);

        let record = JsonValue::find_by_statement(statement)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get {} by id: {}", entity.table, e);
                CoreError::InternalServerError
            })?
            .and_then(into_record);

        Ok(record)
    }
}
