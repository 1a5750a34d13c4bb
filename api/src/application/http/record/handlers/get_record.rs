use axum::extract::{Path, State};
use populus_core::domain::record::{
    entities::Record, ports::RecordService, value_objects::GetRecordInput,
};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

pub async fn get_record(
    Path((entity, id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response<Record>, ApiError> {
    // Ids are integers, so a non-numeric id names no record.
    let id = id
        .parse::<i64>()
        .map_err(|_| ApiError::NotFound(format!("Record {id} not found")))?;

    let record = state
        .service
        .get_record(GetRecordInput { entity, id })
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Record {id} not found")))?;

    Ok(Response::OK(record))
}
