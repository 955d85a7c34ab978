//! Shared plumbing for outbound HTTP calls to Notion and GitHub.
//!
//! Both services are reached through one `reqwest::Client` built at startup
//! with a bounded timeout. There is no automatic retry anywhere: a failed call
//! is reported once and the caller decides what to do.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// User agent sent on every outbound request. GitHub rejects requests without one.
pub const USER_AGENT: &str = concat!("git-tion/", env!("CARGO_PKG_VERSION"));

/// Builds the HTTP client shared by all outbound calls.
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// A failed call to a remote service.
///
/// Carries the HTTP status and the response body when the service answered
/// with an unexpected status, so both end up in the 500 response and in logs.
#[derive(Debug, Error)]
pub struct RemoteError {
    /// What was being attempted, e.g. "create Notion page".
    pub operation: &'static str,

    /// The HTTP status code, if the service responded at all.
    pub status_code: Option<u16>,

    /// Response body, or a description of the transport/decoding failure.
    pub message: String,

    /// The underlying reqwest error, if available.
    #[source]
    pub source: Option<reqwest::Error>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(
                f,
                "failed to {} (HTTP {}): {}",
                self.operation, code, self.message
            ),
            None => write!(f, "failed to {}: {}", self.operation, self.message),
        }
    }
}

impl RemoteError {
    /// The service answered with a status other than the one expected.
    pub fn unexpected_status(operation: &'static str, status: StatusCode, body: String) -> Self {
        Self {
            operation,
            status_code: Some(status.as_u16()),
            message: body,
            source: None,
        }
    }

    /// The request could not be sent or the response could not be read.
    pub fn transport(operation: &'static str, source: reqwest::Error) -> Self {
        Self {
            operation,
            status_code: source.status().map(|s| s.as_u16()),
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// The response had the expected status but an unusable body.
    pub fn decode(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            status_code: None,
            message: message.into(),
            source: None,
        }
    }
}

/// Sends a request and checks for exactly `expected` status.
///
/// Any other status is turned into a [`RemoteError`] carrying the response text.
pub async fn send_expecting(
    request: reqwest::RequestBuilder,
    expected: StatusCode,
    operation: &'static str,
) -> Result<reqwest::Response, RemoteError> {
    let response = request
        .send()
        .await
        .map_err(|e| RemoteError::transport(operation, e))?;

    let status = response.status();
    if status != expected {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable response body>".to_string());
        return Err(RemoteError::unexpected_status(operation, status, body));
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_status_includes_code_and_body() {
        let err = RemoteError::unexpected_status(
            "create Notion page",
            StatusCode::BAD_REQUEST,
            "validation_error".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "failed to create Notion page (HTTP 400): validation_error"
        );
    }

    #[test]
    fn display_without_status() {
        let err = RemoteError::decode("create Notion page", "response has no id");
        assert_eq!(
            err.to_string(),
            "failed to create Notion page: response has no id"
        );
    }

    #[test]
    fn user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("git-tion/"));
    }
}
