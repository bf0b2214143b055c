//! Mapping of [`Error`] onto HTTP responses.
//!
//! API routes answer with a `{"error": ...}` JSON body; HTML routes with a small error
//! page. Both use the same status table, except that pages report a missing record as
//! 404.

use crate::errors::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{DOCTYPE, html};
use serde_json::json;
use tracing::{debug, error};

#[must_use]
pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::Validation { .. } | Error::Json(_) | Error::NotFound { .. } => {
            StatusCode::BAD_REQUEST
        }
        Error::Unauthorized => StatusCode::UNAUTHORIZED,
        Error::Forbidden => StatusCode::FORBIDDEN,
        Error::Config { .. } | Error::Database(_) | Error::Io(_) | Error::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn log_error(status: StatusCode, error: &Error) {
    if status.is_server_error() {
        error!(%error, "Request failed");
    } else {
        debug!(%error, %status, "Request rejected");
    }
}

/// Error returned by JSON handlers.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        log_error(status, &self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Error returned by HTML handlers.
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

/// Status for an HTML route.
#[must_use]
pub fn page_status_for(error: &Error) -> StatusCode {
    match error {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        other => status_for(other),
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = page_status_for(&self.0);
        log_error(status, &self.0);
        let message = if status.is_server_error() {
            "Something went wrong. Please try again.".to_string()
        } else {
            self.0.to_string()
        };
        let body = html! {
            (DOCTYPE)
            html lang="en" {
                head { meta charset="UTF-8"; title { (status.as_str()) } }
                body {
                    h1 { (status.as_str()) " " (status.canonical_reason().unwrap_or("Error")) }
                    p { (message) }
                    p { a href="/admin" { "Back to admin" } }
                }
            }
        };
        (status, Html(body.into_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        assert_eq!(status_for(&Error::validation("x")), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&Error::not_found("article", 1)), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&Error::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&Error::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(&Error::Storage { message: "disk".to_string() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_pages_report_missing_records_as_not_found() {
        let missing = Error::not_found("section", "hero:42");
        assert_eq!(page_status_for(&missing), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&missing), StatusCode::BAD_REQUEST);
        assert_eq!(page_status_for(&Error::Forbidden), StatusCode::FORBIDDEN);

        let response = PageError(missing).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
