use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Internal server error")]
    InternalServerError,
}
