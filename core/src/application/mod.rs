use tracing::info;

use crate::{
    domain::common::{
        DataSourceConfig, PopulusConfig, entities::app_errors::CoreError, services::Service,
    },
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        record::{DataSource, JsonRecordRepository, SqlRecordRepository},
    },
};

pub type PopulusService = Service<DataSource>;

pub async fn create_service(config: PopulusConfig) -> Result<PopulusService, CoreError> {
    let data_source = match config.data_source {
        DataSourceConfig::Postgres(database) => {
            let postgres = Postgres::new(PostgresConfig {
                database_url: database.url(),
            })
            .await?;
            DataSource::Sql(SqlRecordRepository::new(postgres.get_db()))
        }
        DataSourceConfig::Json(store) => {
            info!("serving records from {}", store.directory.display());
            DataSource::Json(JsonRecordRepository::from_directory(store.directory))
        }
    };

    Ok(Service::new(data_source, config.filter))
}

#[cfg(test)]
mod tests {
    use crate::domain::{
        common::{FilterConfig, JsonStoreConfig},
        filter::value_objects::SearchParams,
        record::{ports::RecordService, value_objects::SearchRecordsInput},
    };

    use super::*;

    #[tokio::test]
    async fn test_json_config_builds_a_working_service() {
        let directory = tempfile::tempdir().unwrap();
        std::fs::write(
            directory.path().join("roles.json"),
            r#"[{"id":1,"name":"citizen"},{"id":2,"name":"admin"}]"#,
        )
        .unwrap();

        let service = create_service(PopulusConfig {
            data_source: DataSourceConfig::Json(JsonStoreConfig {
                directory: directory.path().to_path_buf(),
            }),
            filter: FilterConfig::default(),
        })
        .await
        .unwrap();

        let params: SearchParams = [("name", "admin")].into_iter().collect();
        let outcome = service
            .search_records(SearchRecordsInput {
                entity: "roles".to_string(),
                params,
            })
            .await
            .unwrap();

        assert_eq!(outcome.records.len(), 1);
    }
}
