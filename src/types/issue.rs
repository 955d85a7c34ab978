//! Issue and installation data extracted from an `issue_comment` delivery.

use super::ids::{InstallationId, IssueNumber};

/// Read-only view of the issue a trigger comment was posted on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueRef {
    pub number: IssueNumber,
    pub title: String,
    /// Issue description. GitHub sends `null` for an empty description; that
    /// becomes the empty string here.
    pub body: String,
    /// Browser URL of the issue (`html_url`).
    pub url: String,
    /// Repository in `owner/name` form.
    pub repo_full_name: String,
}

/// The GitHub App installation a delivery came from.
///
/// Only present when the webhook was sent on behalf of an installed App.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallationContext {
    pub installation_id: InstallationId,
}
