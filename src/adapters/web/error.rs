//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;

use crate::domain::error::AnalysisError;

#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// JSON body `{"error": ..., "status": ...}` for API routes.
    pub fn into_json_response(self) -> Response {
        let body = json!({ "error": self.message, "status": self.status.as_u16() });
        (self.status, Json(body)).into_response()
    }
}

pub fn status_from_error(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::ConfigInvalid { .. } | AnalysisError::ConfigParse { .. } => {
            StatusCode::BAD_REQUEST
        }
        AnalysisError::InvalidInput { .. } | AnalysisError::Computation { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AnalysisError::DataSource { .. } => StatusCode::BAD_GATEWAY,
        AnalysisError::Report { .. } | AnalysisError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<AnalysisError> for WebError {
    fn from(err: AnalysisError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let template = super::templates::ErrorTemplate {
            message: &self.message,
            status: self.status.as_u16(),
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_bad_request() {
        let err = AnalysisError::config_invalid("signal", "oversold", "out of range");
        assert_eq!(status_from_error(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn input_and_computation_errors_are_unprocessable() {
        assert_eq!(
            status_from_error(&AnalysisError::invalid_input("empty")),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let err = AnalysisError::Computation {
            reason: "rsi is NaN".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn data_source_error_is_bad_gateway() {
        let web: WebError = AnalysisError::data_source("rate limit").into();
        assert_eq!(web.status, StatusCode::BAD_GATEWAY);
        assert!(web.message.contains("rate limit"));
    }

    #[test]
    fn report_error_is_internal() {
        let err = AnalysisError::Report {
            reason: "disk full".into(),
        };
        assert_eq!(status_from_error(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
