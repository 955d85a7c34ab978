//! Confirmation comments on the source issue.

use reqwest::StatusCode;
use serde::Serialize;
use tracing::info;

use crate::outbound::send_expecting;
use crate::types::{InstallationContext, IssueNumber, RecordRef};

use super::auth::AuthProvider;
use super::error::{AcknowledgeError, AuthError};

const OPERATION: &str = "post GitHub comment";

/// Builds the confirmation comment linking to the Notion page.
pub fn acknowledgement_body(record: &RecordRef) -> String {
    format!(
        "✅ Created Notion ticket: [View in Notion]({})",
        record.canonical_url()
    )
}

#[derive(Debug, Serialize)]
struct CreateComment<'a> {
    body: &'a str,
}

/// Posts confirmation comments, authenticating through `A`.
///
/// Every call obtains its own credential. Nothing is retried and no
/// idempotency key is sent, so a redelivered webhook produces a second comment.
#[derive(Debug)]
pub struct CommentPoster<A> {
    http: reqwest::Client,
    api_base_url: String,
    auth: A,
}

impl<A: AuthProvider> CommentPoster<A> {
    pub fn new(http: reqwest::Client, api_base_url: impl Into<String>, auth: A) -> Self {
        Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            auth,
        }
    }

    /// Checks that a credential can be obtained for `installation` without
    /// calling GitHub.
    pub fn check_installation(
        &self,
        installation: Option<InstallationContext>,
    ) -> Result<(), AuthError> {
        self.auth.check_installation(installation)
    }

    /// Comments on `repo_full_name#issue` with a link to the created record.
    pub async fn post_acknowledgement(
        &self,
        repo_full_name: &str,
        issue: IssueNumber,
        record: &RecordRef,
        installation: Option<InstallationContext>,
    ) -> Result<(), AcknowledgeError> {
        info!(issue = %issue, repo = %repo_full_name, "Adding comment to GitHub issue");

        let token = self.auth.access_token(installation).await?;
        let body = acknowledgement_body(record);

        let request = self
            .http
            .post(format!(
                "{}/repos/{}/issues/{}/comments",
                self.api_base_url, repo_full_name, issue.0
            ))
            .header("Authorization", format!("token {}", token.expose()))
            .header("Accept", "application/vnd.github.v3+json")
            .json(&CreateComment { body: &body });

        send_expecting(request, StatusCode::CREATED, OPERATION).await?;

        info!(issue = %issue, repo = %repo_full_name, "Added comment to GitHub issue");
        Ok(())
    }
}
