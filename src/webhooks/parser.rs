//! Webhook payload parser.
//!
//! Parses raw `issue_comment` JSON into an [`IssueCommentEvent`]. The raw
//! structures use `Option` liberally so that deliveries missing fields the
//! filtering steps don't need are still accepted.
//!
//! # Headers
//!
//! - `X-GitHub-Event` - Event type; only `issue_comment` is parsed
//! - `X-Hub-Signature-256` - HMAC-SHA256 signature (verified before parsing)

use serde::Deserialize;
use thiserror::Error;

use crate::types::{InstallationContext, InstallationId};

use super::events::{CommentAction, ISSUE_COMMENT_EVENT, IssueCommentEvent, IssueFields};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The body is not JSON, or a present field has the wrong type.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Parses a webhook payload.
///
/// Returns `Ok(None)` for every event type other than `issue_comment`.
///
/// # Examples
///
/// ```
/// use git_tion::webhooks::parse_webhook;
///
/// let payload = br#"{
///     "action": "created",
///     "comment": { "body": "@git-tion !send" },
///     "issue": { "number": 42, "title": "Bug", "body": null, "html_url": "https://github.com/o/r/issues/42" },
///     "repository": { "full_name": "o/r" },
///     "installation": { "id": 7 }
/// }"#;
///
/// let event = parse_webhook("issue_comment", payload).unwrap().unwrap();
/// assert!(event.is_new_comment());
/// assert!(parse_webhook("push", payload).unwrap().is_none());
/// ```
pub fn parse_webhook(
    event_type: &str,
    payload: &[u8],
) -> Result<Option<IssueCommentEvent>, ParseError> {
    match event_type {
        ISSUE_COMMENT_EVENT => parse_issue_comment(payload).map(Some),
        _ => Ok(None),
    }
}

// ============================================================================
// Raw payload structures for deserialization
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssueCommentPayload {
    action: Option<String>,
    comment: Option<RawComment>,
    issue: Option<RawIssue>,
    repository: Option<RawRepository>,
    installation: Option<RawInstallation>,
}

#[derive(Debug, Deserialize)]
struct RawComment {
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawIssue {
    number: Option<u64>,
    title: Option<String>,
    body: Option<String>,
    html_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawRepository {
    full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawInstallation {
    id: Option<u64>,
}

pub(crate) fn parse_issue_comment(payload: &[u8]) -> Result<IssueCommentEvent, ParseError> {
    let raw: RawIssueCommentPayload = serde_json::from_slice(payload)?;

    let issue = raw
        .issue
        .map(|i| IssueFields {
            number: i.number,
            title: i.title,
            body: i.body,
            html_url: i.html_url,
        })
        .unwrap_or_default();

    Ok(IssueCommentEvent {
        action: CommentAction::from_api_str(raw.action.as_deref().unwrap_or_default()),
        comment_body: raw.comment.and_then(|c| c.body).unwrap_or_default(),
        issue,
        repo_full_name: raw.repository.and_then(|r| r.full_name),
        installation: raw
            .installation
            .and_then(|i| i.id)
            .map(|id| InstallationContext {
                installation_id: InstallationId(id),
            }),
    })
}
