use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use super::{query_params::SearchQuery, server::api_entities::api_error::ApiError};

/// Extractor for the filter parameters of a search request.
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     SearchQueryExtractor(query): SearchQueryExtractor,
/// ) -> Result<Response<SearchRecordsResponse>, ApiError> {
///     // Use query.params
/// }
/// ```
#[derive(Debug, Clone)]
pub struct SearchQueryExtractor(pub SearchQuery);

impl<S> FromRequestParts<S> for SearchQueryExtractor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");

        let query = SearchQuery::from_query_string(query_string).map_err(|e| {
            debug!("Malformed query string {:?}: {}", query_string, e);
            ApiError::BadRequest("Malformed query string".to_string())
        })?;

        Ok(SearchQueryExtractor(query))
    }
}
