use tracing::{debug, instrument};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    filter::services::FilterCompiler,
    record::{
        catalog,
        entities::{EntityDescriptor, Record},
        ports::{RecordRepository, RecordService},
        value_objects::{GetRecordInput, SearchOutcome, SearchRecordsInput},
    },
};

fn resolve_entity(name: &str) -> Result<EntityDescriptor, CoreError> {
    catalog::lookup(name).ok_or_else(|| CoreError::UnknownEntity(name.to_string()))
}

impl<RR> RecordService for Service<RR>
where
    RR: RecordRepository,
{
    #[instrument(skip(self, input), fields(entity = %input.entity))]
    async fn search_records(&self, input: SearchRecordsInput) -> Result<SearchOutcome, CoreError> {
        let entity = resolve_entity(&input.entity)?;

        let compiled = FilterCompiler::with_schema(&entity.schema)
            .strict(self.filter_config.strict_fields)
            .compile(&input.params);
        let rejected = compiled.rejected.clone();

        let records = self
            .record_repository
            .search(entity, compiled)
            .await?
            .into_iter()
            .map(|record| entity.redact(record))
            .collect::<Vec<Record>>();

        debug!(count = records.len(), "search completed");

        Ok(SearchOutcome { records, rejected })
    }

    #[instrument(skip(self, input), fields(entity = %input.entity, id = input.id))]
    async fn get_record(&self, input: GetRecordInput) -> Result<Option<Record>, CoreError> {
        let entity = resolve_entity(&input.entity)?;

        let record = self
            .record_repository
            .find_by_id(entity, input.id)
            .await?
            .map(|record| entity.redact(record));

        Ok(record)
    }
}
