//! Web server adapter.
//!
//! Axum dashboard that fetches the market chart on every request, runs the
//! analysis and renders the summary with an inline chart. Requests sent by
//! htmx (`HX-Request` header) get only the summary fragment.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{Router, routing::get};
use std::sync::Arc;

use crate::domain::params::{AnalysisParams, MarketQuery};
use crate::ports::market_data_port::MarketDataPort;

pub struct AppState {
    pub market_data: Arc<dyn MarketDataPort + Send + Sync>,
    pub query: MarketQuery,
    pub params: AnalysisParams,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/api/summary", get(handlers::api_summary))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
