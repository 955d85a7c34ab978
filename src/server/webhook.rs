//! Webhook endpoint handler.
//!
//! Each delivery walks a short, linear pipeline:
//!
//! 1. Verify the HMAC signature (401 on failure)
//! 2. Ignore anything that is not an `issue_comment` event
//! 3. Ignore comments that were not just created
//! 4. Ignore comments without the trigger literal
//! 5. Create the Notion ticket, then comment back on the issue
//!
//! Steps 1-4 have no side effects, so redelivering a filtered payload is
//! harmless. Step 5 is not idempotent: a redelivered trigger creates a second
//! ticket and comment.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::AppState;
use crate::github::AcknowledgeError;
use crate::outbound::RemoteError;
use crate::types::{InstallationContext, IssueRef, PageId, RecordRef};
use crate::webhooks::{MissingField, ParseError, contains_trigger, parse_webhook, verify_signature};

/// Header name for GitHub event type.
const HEADER_EVENT: &str = "x-github-event";
/// Header name for GitHub signature.
const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// A delivery that was handled without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Not an `issue_comment` event.
    Ignored,
    /// The comment was edited or deleted rather than created.
    NotNewComment,
    /// The comment does not contain the trigger.
    NoCommand,
    /// A ticket was created and the issue was commented on.
    Success { record_id: PageId },
}

#[derive(Debug, Serialize)]
struct StatusBody<'a> {
    status: &'a str,
    #[serde(rename = "recordId", skip_serializing_if = "Option::is_none")]
    record_id: Option<&'a str>,
}

impl IntoResponse for WebhookOutcome {
    fn into_response(self) -> Response {
        let body = match &self {
            WebhookOutcome::Ignored => StatusBody {
                status: "ignored",
                record_id: None,
            },
            WebhookOutcome::NotNewComment => StatusBody {
                status: "not a new comment",
                record_id: None,
            },
            WebhookOutcome::NoCommand => StatusBody {
                status: "no command found",
                record_id: None,
            },
            WebhookOutcome::Success { record_id } => StatusBody {
                status: "success",
                record_id: Some(record_id.as_str()),
            },
        };

        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Failure while relaying a trigger comment.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The Notion page could not be created. Nothing was written anywhere.
    #[error(transparent)]
    CreateRecord(RemoteError),

    /// The page exists but the confirmation comment could not be posted.
    /// The page is left in place.
    #[error(transparent)]
    Acknowledge(AcknowledgeError),
}

/// Errors that can occur when processing a webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Signature missing or wrong.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Body is not a valid `issue_comment` payload.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] ParseError),

    /// A trigger comment arrived without the issue data needed to relay it.
    #[error("invalid payload: {0}")]
    MissingField(#[from] MissingField),

    /// A downstream call failed.
    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match &self {
            WebhookError::InvalidSignature => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": self.to_string() })),
            )
                .into_response(),
            WebhookError::InvalidPayload(_) | WebhookError::MissingField(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "status": "error", "message": self.to_string() })),
            )
                .into_response(),
            WebhookError::Process(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": self.to_string() })),
            )
                .into_response(),
        }
    }
}

/// Webhook handler.
///
/// # Request
///
/// - Method: POST
/// - Headers:
///   - `X-Hub-Signature-256`: HMAC-SHA256 signature of the body
///   - `X-GitHub-Event`: event type; only `issue_comment` is acted on
/// - Body: JSON webhook payload
///
/// # Response
///
/// - 200 `{"status": "ignored" | "not a new comment" | "no command found"}`
/// - 200 `{"status": "success", "recordId": "<notion page id>"}`
/// - 400 `{"status": "error", "message": ...}`: malformed payload
/// - 401 `{"error": "Invalid signature"}`
/// - 500 `{"status": "error", "message": ...}`: Notion or GitHub call failed
pub async fn webhook_handler(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<WebhookOutcome, WebhookError> {
    // Verify before looking at anything else in the request.
    let signature = header_value(&headers, HEADER_SIGNATURE);
    if !verify_signature(&body, signature, app_state.webhook_secret()) {
        warn!("Invalid webhook signature");
        return Err(WebhookError::InvalidSignature);
    }

    let event_type = header_value(&headers, HEADER_EVENT).unwrap_or_default();
    let Some(event) = parse_webhook(event_type, &body)? else {
        debug!(event_type = %event_type, "Ignoring event");
        return Ok(WebhookOutcome::Ignored);
    };

    if !event.is_new_comment() {
        debug!(action = ?event.action, "Ignoring comment action");
        return Ok(WebhookOutcome::NotNewComment);
    }

    if !contains_trigger(&event.comment_body) {
        debug!("No command in comment");
        return Ok(WebhookOutcome::NoCommand);
    }

    let issue = event.issue_ref()?;

    info!(
        issue = %issue.number,
        repo = %issue.repo_full_name,
        "Processing command"
    );

    match relay_issue(&app_state, &issue, event.installation).await {
        Ok(record) => Ok(WebhookOutcome::Success {
            record_id: record.id().clone(),
        }),
        Err(e) => {
            error!(
                issue = %issue.number,
                repo = %issue.repo_full_name,
                error = %e,
                "Error processing issue"
            );
            Err(e.into())
        }
    }
}

/// Creates the Notion ticket for `issue`, then comments back on the issue.
pub async fn relay_issue(
    app_state: &AppState,
    issue: &IssueRef,
    installation: Option<InstallationContext>,
) -> Result<RecordRef, ProcessError> {
    // Without a usable credential the comment cannot be posted; stop before creating a page.
    app_state
        .poster()
        .check_installation(installation)
        .map_err(|e| ProcessError::Acknowledge(e.into()))?;

    let record = app_state
        .notion()
        .create_record(issue)
        .await
        .map_err(ProcessError::CreateRecord)?;

    if let Err(e) = app_state
        .poster()
        .post_acknowledgement(&issue.repo_full_name, issue.number, &record, installation)
        .await
    {
        warn!(
            page_id = %record.id(),
            issue = %issue.number,
            repo = %issue.repo_full_name,
            "Notion page created but issue comment failed; page left without back-link"
        );
        return Err(ProcessError::Acknowledge(e));
    }

    Ok(record)
}

/// Returns a header value if present and valid UTF-8.
fn header_value<'a>(headers: &'a HeaderMap, name: &'static str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
