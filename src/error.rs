//! Error types for the Rhapsody SDK.

use thiserror::Error;

/// Status reported for failures that never produced an HTTP response.
pub const NO_HTTP_STATUS: i32 = -1;

/// Result alias used throughout the SDK.
pub type Result<T> = std::result::Result<T, SdkError>;

/// Everything an SDK operation can fail with.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {reason}")]
    Http { status: u16, reason: String },

    /// No response reached us (DNS, connection reset, TLS, timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body does not match the expected record.
    #[error("Cannot decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// An authenticated operation was called without an access token.
    #[error("Not authorized, call authorize() first")]
    NotAuthorized,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The authorization store could not be read or written.
    #[error("Authorization store error: {0}")]
    Store(String),
}

impl SdkError {
    /// Builds an HTTP error from a status code and the raw response body.
    ///
    /// The reason is the canonical reason phrase of the status; when the body
    /// is a JSON object with a `message` field it is appended to it.
    pub fn from_response(status: u16, body: &str) -> Self {
        let mut reason = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown status")
            .to_string();

        if let Some(message) = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(|m| m.as_str()).map(String::from))
        {
            reason = format!("{reason} - {message}");
        }

        Self::Http { status, reason }
    }

    /// The HTTP status, if the failure was an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The HTTP status, or [`NO_HTTP_STATUS`] when no response was involved.
    pub fn http_code(&self) -> i32 {
        self.status().map_or(NO_HTTP_STATUS, i32::from)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SdkError::NotAuthorized) || self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_appends_server_message() {
        let err = SdkError::from_response(
            401,
            r#"{"code":"UnauthorizedError","message":"Invalid Access Token"}"#,
        );
        match &err {
            SdkError::Http { status, reason } => {
                assert_eq!(*status, 401);
                assert_eq!(reason, "Unauthorized - Invalid Access Token");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_unauthorized());
    }

    #[test]
    fn http_error_without_json_body_keeps_reason() {
        let err = SdkError::from_response(503, "<html>down</html>");
        match &err {
            SdkError::Http { status, reason } => {
                assert_eq!(*status, 503);
                assert_eq!(reason, "Service Unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.http_code(), 503);
    }

    #[test]
    fn non_http_errors_report_sentinel() {
        assert_eq!(SdkError::NotAuthorized.http_code(), NO_HTTP_STATUS);
        assert_eq!(SdkError::NotAuthorized.status(), None);
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(SdkError::from(decode).http_code(), -1);
    }
}
