use std::path::PathBuf;

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct PopulusConfig {
    pub data_source: DataSourceConfig,
    pub filter: FilterConfig,
}

#[derive(Clone, Debug)]
pub enum DataSourceConfig {
    Postgres(DatabaseConfig),
    Json(JsonStoreConfig),
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct JsonStoreConfig {
    /// Directory holding one `<entity>.json` array per catalog entry.
    pub directory: PathBuf,
}

#[derive(Clone, Debug, Default)]
pub struct FilterConfig {
    /// Drop filters on fields the entity does not declare instead of
    /// forwarding them to the store.
    pub strict_fields: bool,
}
