//
//  atlassian-rest
//  api/errors.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Error Normalization
//!
//! Turns failed HTTP responses into [`ApiError`]s with two levels of fidelity.
//!
//! Atlassian Cloud APIs return standardized error bodies:
//!
//! ```json
//! {"type": "error", "error": {"message": "Bad request", "detail": "Field 'x' is required"}}
//! ```
//!
//! When such an envelope is present the caller gets [`ApiError::Http`] with
//! `message` followed by `detail` on a new line. Anything else (HTML error
//! pages, empty bodies, classic Jira bodies) degrades to the generic
//! [`ApiError::HttpStatus`], which carries only the status and URL. Both keep
//! the original response attached.
//!
//! ```rust
//! use atlassian_rest::api::{raise_for_status, HttpResponse};
//! use reqwest::StatusCode;
//!
//! let response = HttpResponse::new(
//!     StatusCode::BAD_REQUEST,
//!     "https://api.bitbucket.org/2.0/repositories/ws",
//!     r#"{"error": {"message": "Bad", "detail": "extra"}}"#,
//! );
//!
//! let err = raise_for_status(response).unwrap_err();
//! assert_eq!(err.to_string(), "Bad\nextra");
//! assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
//! ```

use serde::Deserialize;
use serde_json::Value;

use super::common::ApiError;
use super::transport::HttpResponse;

/// Standardized Atlassian Cloud error body.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    /// The error object.
    pub error: ErrorDetail,
}

/// Inner object of an [`ErrorEnvelope`].
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable summary.
    pub message: Value,
    /// Optional longer explanation. May be a string or structured JSON.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorEnvelope {
    /// Composes the user-facing message, or `None` when `message` is null.
    pub fn compose(&self) -> Option<String> {
        let message = render(&self.error.message)?;
        match self.error.detail.as_ref().filter(|d| is_present(d)).and_then(render) {
            Some(detail) => Some(format!("{message}\n{detail}")),
            None => Some(message),
        }
    }
}

/// JSON truthiness: null, `false`, zero and empty strings, arrays or objects
/// count as absent.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn render(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Outcome of reading an error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorBody {
    /// The body held a usable envelope; this is the composed message.
    Normalized(String),
    /// The body could not be used; this is why.
    Fallback(String),
}

/// Reads an error body without ever failing.
///
/// # Example
///
/// ```rust
/// use atlassian_rest::api::{parse_error_body, ErrorBody};
///
/// assert_eq!(
///     parse_error_body(r#"{"error": {"message": "Repository not found"}}"#),
///     ErrorBody::Normalized("Repository not found".to_string())
/// );
/// assert!(matches!(parse_error_body("<html>502</html>"), ErrorBody::Fallback(_)));
/// ```
pub fn parse_error_body(body: &str) -> ErrorBody {
    let envelope: ErrorEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) => return ErrorBody::Fallback(format!("no error envelope in body: {e}")),
    };

    match envelope.compose() {
        Some(message) => ErrorBody::Normalized(message),
        None => ErrorBody::Fallback("error envelope has a null message".to_string()),
    }
}

/// Checks a completed response and converts failures into [`ApiError`]s.
///
/// Responses outside `400..600` pass through unchanged. Failed responses
/// become [`ApiError::Http`] when the body carries an error envelope, and
/// [`ApiError::HttpStatus`] otherwise. A body that cannot be read is logged
/// and never replaces the HTTP error.
pub fn raise_for_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    let code = response.status.as_u16();
    if !(400..600).contains(&code) {
        return Ok(response);
    }

    match parse_error_body(&response.body) {
        ErrorBody::Normalized(message) => Err(ApiError::Http {
            message,
            response: Box::new(response),
        }),
        ErrorBody::Fallback(reason) => {
            tracing::error!(status = code, url = %response.url, "{}", reason);
            Err(ApiError::HttpStatus {
                status: response.status,
                url: response.url.clone(),
                response: Box::new(response),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    fn response(status: StatusCode, body: &str) -> HttpResponse {
        HttpResponse::new(status, "https://api.bitbucket.org/2.0/repositories/ws", body)
    }

    #[test]
    fn test_message_and_detail() {
        let err = raise_for_status(response(
            StatusCode::BAD_REQUEST,
            r#"{"type": "error", "error": {"message": "Bad", "detail": "extra"}}"#,
        ))
        .unwrap_err();

        assert!(err.is_normalized());
        assert_eq!(err.to_string(), "Bad\nextra");
        let attached = err.response().unwrap();
        assert_eq!(attached.status, StatusCode::BAD_REQUEST);
        assert!(attached.body.contains("extra"));
    }

    #[test]
    fn test_message_only() {
        let err = raise_for_status(response(
            StatusCode::NOT_FOUND,
            r#"{"error": {"message": "Repository not found"}}"#,
        ))
        .unwrap_err();
        assert_eq!(err.to_string(), "Repository not found");
    }

    #[test]
    fn test_structured_detail_is_rendered() {
        let body = r#"{"error": {"message": "Invalid", "detail": {"name": "required"}}}"#;
        assert_eq!(
            parse_error_body(body),
            ErrorBody::Normalized("Invalid\n{\"name\":\"required\"}".to_string())
        );
    }

    #[test]
    fn test_empty_or_null_detail_is_skipped() {
        let body = r#"{"error": {"message": "Gone", "detail": ""}}"#;
        assert_eq!(parse_error_body(body), ErrorBody::Normalized("Gone".to_string()));
        let body = r#"{"error": {"message": "Gone", "detail": null}}"#;
        assert_eq!(parse_error_body(body), ErrorBody::Normalized("Gone".to_string()));
    }

    #[test]
    fn test_falsy_detail_is_skipped() {
        for detail in ["{}", "[]", "false", "0", "0.0"] {
            let body = format!(r#"{{"error": {{"message": "Bad", "detail": {detail}}}}}"#);
            assert_eq!(
                parse_error_body(&body),
                ErrorBody::Normalized("Bad".to_string()),
                "detail {detail}"
            );
        }

        let body = r#"{"error": {"message": "Bad", "detail": 7}}"#;
        assert_eq!(parse_error_body(body), ErrorBody::Normalized("Bad\n7".to_string()));
    }

    #[test]
    fn test_non_json_falls_back_to_status() {
        let err = raise_for_status(response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>",
        ))
        .unwrap_err();

        assert!(!err.is_normalized());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(matches!(err, ApiError::HttpStatus { .. }));
    }

    #[test]
    fn test_missing_keys_fall_back() {
        // classic Jira error body
        let body = r#"{"errorMessages": ["Issue does not exist"], "errors": {}}"#;
        assert!(matches!(parse_error_body(body), ErrorBody::Fallback(_)));
        assert!(matches!(parse_error_body(r#"{"error": {}}"#), ErrorBody::Fallback(_)));
        assert!(matches!(
            parse_error_body(r#"{"error": {"message": null}}"#),
            ErrorBody::Fallback(_)
        ));
        assert!(matches!(parse_error_body(""), ErrorBody::Fallback(_)));
    }

    #[test]
    fn test_success_passes_through() {
        let ok = raise_for_status(response(StatusCode::OK, "{}")).unwrap();
        assert_eq!(ok.status, StatusCode::OK);
        let redirect = raise_for_status(response(StatusCode::NOT_MODIFIED, "")).unwrap();
        assert_eq!(redirect.status, StatusCode::NOT_MODIFIED);
    }
}
