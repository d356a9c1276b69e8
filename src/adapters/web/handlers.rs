//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::adapters::chart_svg::generate_market_svg;
use crate::domain::params::{MarketQuery, normalize_coin_id};
use crate::domain::pipeline::{Analysis, analyze};

use super::templates::{DashboardTemplate, SummaryTemplate, SummaryView};
use super::{AppState, WebError, is_htmx_request};

#[derive(Debug, Default, Deserialize)]
pub struct CoinParams {
    pub coin: Option<String>,
}

/// Apply the `coin` override; a malformed id is a 400.
pub fn resolve_query(base: &MarketQuery, coin: Option<&str>) -> Result<MarketQuery, WebError> {
    let mut query = base.clone();
    let Some(coin) = coin.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(query);
    };
    query.coin_id = normalize_coin_id(coin)?;
    Ok(query)
}

/// Fetch and analyse on the blocking pool; adapters do synchronous I/O.
async fn run_analysis(state: &Arc<AppState>, query: MarketQuery) -> Result<Analysis, WebError> {
    let state = Arc::clone(state);
    let coin = query.coin_id.clone();
    let result = tokio::task::spawn_blocking(move || {
        let chart = state.market_data.fetch_market_chart(&query)?;
        analyze(&chart, &state.params, Utc::now())
    })
    .await
    .map_err(|e| WebError::internal(format!("analysis task failed: {}", e)))?;

    match result {
        Ok(analysis) => {
            info!(coin = %coin, signal = %analysis.summary.signal, "analysis served");
            Ok(analysis)
        }
        Err(e) => {
            warn!(coin = %coin, error = %e, "analysis failed");
            Err(WebError::from(e))
        }
    }
}

fn render<T: Template>(template: &T) -> Result<Response, WebError> {
    template
        .render()
        .map(|html| Html(html).into_response())
        .map_err(|e| WebError::internal(format!("template error: {}", e)))
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoinParams>,
    headers: HeaderMap,
) -> Result<Response, WebError> {
    let query = resolve_query(&state.query, params.coin.as_deref())?;
    let analysis = run_analysis(&state, query.clone()).await?;
    let view = SummaryView::new(&query.coin_id, &analysis.summary, &state.params);

    if is_htmx_request(&headers) {
        render(&SummaryTemplate { view: &view })
    } else {
        let chart_svg = generate_market_svg(&analysis.table, &state.params);
        render(&DashboardTemplate {
            view: &view,
            chart_svg: &chart_svg,
        })
    }
}

pub async fn api_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CoinParams>,
) -> Response {
    let query = match resolve_query(&state.query, params.coin.as_deref()) {
        Ok(q) => q,
        Err(e) => return e.into_json_response(),
    };

    match run_analysis(&state, query).await {
        Ok(analysis) => Json(analysis.summary).into_response(),
        Err(e) => e.into_json_response(),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found() -> WebError {
    WebError::not_found("page not found")
}
