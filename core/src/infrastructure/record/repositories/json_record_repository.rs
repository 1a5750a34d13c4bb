use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde_json::Value;
use tracing::{error, warn};

use crate::domain::{
    common::entities::app_errors::CoreError,
    filter::{entities::CompiledQuery, matching::compare_records, value_objects::SortDirection},
    record::{
        entities::{EntityDescriptor, Record},
        ports::RecordRepository,
    },
};

#[derive(Debug, Clone)]
enum JsonSource {
    /// `<dir>/<entity>.json`, re-read on every call.
    Directory(PathBuf),
    Memory(Arc<HashMap<String, Vec<Record>>>),
}

/// File-backed record store: each entity is a JSON array of objects.
#[derive(Debug, Clone)]
pub struct JsonRecordRepository {
    source: JsonSource,
}

impl JsonRecordRepository {
    pub fn from_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            source: JsonSource::Directory(directory.into()),
        }
    }

    /// Records keyed by entity name.
    pub fn from_records(records: HashMap<String, Vec<Record>>) -> Self {
        Self {
            source: JsonSource::Memory(Arc::new(records)),
        }
    }

    async fn load(&self, entity: &EntityDescriptor) -> Result<Vec<Record>, CoreError> {
        match &self.source {
            JsonSource::Memory(records) => Ok(records.get(entity.name).cloned().unwrap_or_default()),
            JsonSource::Directory(directory) => read_entity_file(directory, entity.name).await,
        }
    }
}

async fn read_entity_file(directory: &Path, entity: &str) -> Result<Vec<Record>, CoreError> {
    let path = directory.join(format!("{entity}.json"));

    let content = match tokio::fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("No data file for {} at {}", entity, path.display());
            return Ok(Vec::new());
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return Err(CoreError::DataSourceUnavailable(path.display().to_string()));
        }
    };

    let rows: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
        error!("Failed to parse {}: {}", path.display(), e);
        CoreError::InternalServerError
    })?;

    Ok(rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect())
}

impl RecordRepository for JsonRecordRepository {
    async fn search(
        &self,
        entity: EntityDescriptor,
        query: CompiledQuery,
    ) -> Result<Vec<Record>, CoreError> {
        if let Some(sort) = &query.sort
            && let SortDirection::Other(raw) = &sort.direction
        {
            return Err(CoreError::InvalidSortDirection(raw.clone()));
        }

        let mut records = self
            .load(&entity)
            .await?
            .into_iter()
            .filter(|record| query.predicate.matches(record))
            .collect::<Vec<Record>>();

        if let Some(sort) = &query.sort {
            records.sort_by(|left, right| compare_records(left, right, sort));
        }

        Ok(records)
    }

    async fn find_by_id(
        &self,
        entity: EntityDescriptor,
        id: i64,
    ) -> Result<Option<Record>, CoreError> {
        let record = self.load(&entity).await?.into_iter().find(|record| {
            record
                .get(entity.primary_key)
                .and_then(Value::as_i64)
                .is_some_and(|key| key == id)
        });

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{
        filter::{services::FilterCompiler, value_objects::SearchParams},
        record::catalog,
    };

    fn citizens() -> Vec<Record> {
        json!([
            { "id": 1, "first_name": "Anna", "birth_date": "2101-03-04", "status": "alive" },
            { "id": 2, "first_name": "Bram", "birth_date": "2098-11-20", "status": "deceased" },
            { "id": 3, "first_name": "Susanna", "birth_date": "2110-07-01", "status": "alive" },
        ])
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row.as_object().unwrap().clone())
        .collect()
    }

    fn repository() -> JsonRecordRepository {
        JsonRecordRepository::from_records(HashMap::from([(
            "citizens".to_string(),
            citizens(),
        )]))
    }

    fn compile(pairs: &[(&str, &str)]) -> CompiledQuery {
        let params: SearchParams = pairs.iter().copied().collect();
        FilterCompiler::with_schema(&catalog::CITIZEN.schema).compile(&params)
    }

    fn ids(records: &[Record]) -> Vec<i64> {
        records
            .iter()
            .filter_map(|record| record.get("id").and_then(Value::as_i64))
            .collect()
    }

    #[tokio::test]
    async fn test_search_filters_and_sorts() {
        let records = repository()
            .search(
                catalog::CITIZEN,
                compile(&[
                    ("status", "alive"),
                    ("birth_dateMin", "2100-01-01"),
                    ("sortBy", "birth_date"),
                    ("order", "DESC"),
                ]),
            )
            .await
            .unwrap();

        assert_eq!(ids(&records), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_search_substring_matches() {
        let records = repository()
            .search(catalog::CITIZEN, compile(&[("first_name", "ann")]))
            .await
            .unwrap();

        assert_eq!(ids(&records), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_unpadded_date_bound_compares_chronologically() {
        let repository = repository();

        let records = repository
            .search(catalog::CITIZEN, compile(&[("birth_dateMin", "2101-3-4")]))
            .await
            .unwrap();
        assert_eq!(ids(&records), vec![1, 3]);

        let records = repository
            .search(catalog::CITIZEN, compile(&[("birth_dateMin", " 2100-01-05")]))
            .await
            .unwrap();
        assert_eq!(ids(&records), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_search_rejects_unrecognised_direction() {
        let error = repository()
            .search(
                catalog::CITIZEN,
                compile(&[("sortBy", "id"), ("order", "random")]),
            )
            .await
            .unwrap_err();

        assert_eq!(error, CoreError::InvalidSortDirection("RANDOM".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repository = repository();

        let found = repository.find_by_id(catalog::CITIZEN, 2).await.unwrap();
        assert_eq!(
            found.and_then(|record| record.get("first_name").cloned()),
            Some(json!("Bram"))
        );
        assert!(
            repository
                .find_by_id(catalog::CITIZEN, 42)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_directory_source_reads_entity_files() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join("citizens.json"),
            serde_json::to_string(&citizens()).unwrap(),
        )
        .unwrap();

        let repository = JsonRecordRepository::from_directory(directory.path());
        let records = repository
            .search(catalog::CITIZEN, CompiledQuery::default())
            .await
            .unwrap();
        assert_eq!(records.len(), 3);

        let events = repository
            .search(catalog::EVENT, CompiledQuery::default())
            .await
            .unwrap();
        assert!(events.is_empty());
    }

    #[tokio::test]
    async fn test_directory_source_reports_malformed_files() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(directory.path().join("citizens.json"), "{ not json").unwrap();

        let error = JsonRecordRepository::from_directory(directory.path())
            .search(catalog::CITIZEN, CompiledQuery::default())
            .await
            .unwrap_err();

        assert_eq!(error, CoreError::InternalServerError);
    }
}
