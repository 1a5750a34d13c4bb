use axum::extract::{Path, State};
use populus_core::domain::{
    filter::value_objects::RejectedParam,
    record::{entities::Record, ports::RecordService, value_objects::SearchRecordsInput},
};
use serde::Serialize;

use crate::application::http::{
    query_extractor::SearchQueryExtractor,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

/// A query parameter that did not become a filter.
#[derive(Debug, Serialize, PartialEq)]
pub struct IgnoredParam {
    pub key: String,
    pub value: String,
    pub reason: String,
}

impl From<RejectedParam> for IgnoredParam {
    fn from(rejected: RejectedParam) -> Self {
        Self {
            key: rejected.key,
            value: rejected.value,
            reason: rejected.reason.to_string(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct SearchRecordsResponse {
    pub data: Vec<Record>,
    pub count: usize,
    pub ignored: Vec<IgnoredParam>,
}

pub async fn search_records(
    Path(entity): Path<String>,
    State(state): State<AppState>,
    SearchQueryExtractor(query): SearchQueryExtractor,
) -> Result<Response<SearchRecordsResponse>, ApiError> {
    let outcome = state
        .service
        .search_records(SearchRecordsInput {
            entity,
            params: query.params,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(SearchRecordsResponse {
        count: outcome.records.len(),
        data: outcome.records,
        ignored: outcome.rejected.into_iter().map(IgnoredParam::from).collect(),
    }))
}
