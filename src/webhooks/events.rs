//! Typed view of the `issue_comment` webhook event.
//!
//! Only the fields the bridge needs are kept. Everything except the action and
//! the comment body is optional at this stage: deliveries that get filtered out
//! before processing never need an issue or repository, so their absence is
//! only an error once a trigger comment has been found (see
//! [`IssueCommentEvent::issue_ref`]).

use thiserror::Error;

use crate::types::{InstallationContext, IssueNumber, IssueRef};

/// The `X-GitHub-Event` value this bridge acts on.
pub const ISSUE_COMMENT_EVENT: &str = "issue_comment";

/// Action performed on an issue comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CommentAction {
    /// Comment was created.
    Created,
    /// Comment was edited.
    Edited,
    /// Comment was deleted.
    Deleted,
    /// Anything else GitHub may send (including a missing action).
    Other(String),
}

impl CommentAction {
    pub fn from_api_str(action: &str) -> Self {
        match action {
            "created" => CommentAction::Created,
            "edited" => CommentAction::Edited,
            "deleted" => CommentAction::Deleted,
            other => CommentAction::Other(other.to_string()),
        }
    }
}

/// Issue fields as delivered, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFields {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
}

/// An issue comment event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    /// The action that triggered this event.
    pub action: CommentAction,

    /// The comment body text. Empty when GitHub sends none.
    pub comment_body: String,

    /// The issue the comment belongs to.
    pub issue: IssueFields,

    /// `repository.full_name` (`owner/name`).
    pub repo_full_name: Option<String>,

    /// Present when the delivery came through an installed GitHub App.
    pub installation: Option<InstallationContext>,
}

/// A field required to process a trigger comment was missing from the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required field in payload: {0}")]
pub struct MissingField(pub &'static str);

impl IssueCommentEvent {
    /// Returns true if this is a newly created comment.
    pub fn is_new_comment(&self) -> bool {
        self.action == CommentAction::Created
    }

    /// Builds the issue view used to create the Notion ticket.
    ///
    /// A `null` or absent issue description is normalized to the empty string.
    pub fn issue_ref(&self) -> Result<IssueRef, MissingField> {
        let number = self.issue.number.ok_or(MissingField("issue.number"))?;
        let title = self
            .issue
            .title
            .clone()
            .ok_or(MissingField("issue.title"))?;
        let url = self
            .issue
            .html_url
            .clone()
            .ok_or(MissingField("issue.html_url"))?;
        let repo_full_name = self
            .repo_full_name
            .clone()
            .ok_or(MissingField("repository.full_name"))?;

        Ok(IssueRef {
            number: IssueNumber(number),
            title,
            body: self.issue.body.clone().unwrap_or_default(),
            url,
            repo_full_name,
        })
    }
}
