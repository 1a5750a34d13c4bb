use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use populus_core::domain::common::entities::app_errors::CoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            success: false,
            message: self.to_string(),
            status_code: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::UnknownEntity(name) => {
                ApiError::NotFound(format!("Unknown entity '{name}'"))
            }
            CoreError::InvalidSortDirection(direction) => ApiError::BadRequest(format!(
                "Invalid sort direction '{direction}', expected ASC or DESC"
            )),
            CoreError::DataSourceUnavailable(_) | CoreError::InternalServerError => {
                error!("Request failed: {}", error);
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}
