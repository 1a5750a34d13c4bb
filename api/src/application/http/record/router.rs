use axum::{Router, routing::get};

use super::handlers::get_record::get_record;
use super::handlers::search_records::search_records;
use crate::application::http::server::app_state::AppState;

pub fn record_routes(root_path: &str) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/api/{{entity}}/search", root_path),
            get(search_records),
        )
        .route(&format!("{}/api/{{entity}}/{{id}}", root_path), get(get_record))
}
