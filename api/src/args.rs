use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use populus_core::domain::common::{
    DataSourceConfig, DatabaseConfig, FilterConfig, JsonStoreConfig, PopulusConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Prefix for every route, e.g. `/v1`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataSourceKind {
    Postgres,
    Json,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DataArgs {
    #[arg(long = "data-source", env = "DATA_SOURCE", value_enum, default_value_t = DataSourceKind::Json)]
    pub source: DataSourceKind,

    /// Directory with one `<entity>.json` file per entity.
    #[arg(long = "json-directory", env = "JSON_DIRECTORY", default_value = "data")]
    pub json_directory: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct DatabaseArgs {
    #[arg(id = "database_host", long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(id = "database_port", long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        default_value = "postgres",
        hide_env_values = true
    )]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "populus")]
    pub name: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct FilterArgs {
    /// Ignore filters on fields an entity does not declare.
    #[arg(long = "strict-fields", env = "STRICT_FIELDS")]
    pub strict_fields: bool,
}

#[derive(clap::Args, Debug, Clone)]
pub struct LogArgs {
    /// Used when RUST_LOG is unset.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<Args> for PopulusConfig {
    fn from(args: Args) -> Self {
        let data_source = match args.data.source {
            DataSourceKind::Postgres => DataSourceConfig::Postgres(DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            }),
            DataSourceKind::Json => DataSourceConfig::Json(JsonStoreConfig {
                directory: args.data.json_directory,
            }),
        };

        Self {
            data_source,
            filter: FilterConfig {
                strict_fields: args.filter.strict_fields,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_source_carries_database_settings() {
        let args = Args::try_parse_from([
            "populus-api",
            "--data-source",
            "postgres",
            "--database-host",
            "db.internal",
            "--database-name",
            "colony",
            "--strict-fields",
        ])
        .unwrap();

        let config = PopulusConfig::from(args);
        match config.data_source {
            DataSourceConfig::Postgres(database) => {
                assert_eq!(database.host, "db.internal");
                assert_eq!(database.name, "colony");
            }
            other => panic!("expected postgres, got {other:?}"),
        }
        assert!(config.filter.strict_fields);
    }

    #[test]
    fn test_json_source_uses_directory() {
        let args = Args::try_parse_from([
            "populus-api",
            "--data-source",
            "json",
            "--json-directory",
            "/srv/populus",
        ])
        .unwrap();

        match PopulusConfig::from(args).data_source {
            DataSourceConfig::Json(store) => {
                assert_eq!(store.directory, PathBuf::from("/srv/populus"))
            }
            other => panic!("expected json, got {other:?}"),
        }
    }
}
