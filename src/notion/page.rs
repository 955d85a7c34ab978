//! Request body for creating a ticket page.
//!
//! The target database is expected to have these properties:
//!
//! | Property       | Type      | Value                         |
//! |----------------|-----------|-------------------------------|
//! | `Task name`    | title     | `[#<number>] <issue title>`   |
//! | `Status`       | status    | `Icebox`                      |
//! | `GitHub Issue` | url       | issue `html_url`              |
//! | `Repository`   | rich_text | `owner/name`                  |
//!
//! The page body is three paragraphs: an import note, the issue description,
//! and a link back to the issue.

use serde_json::{Value, json};

use crate::types::{IssueNumber, IssueRef};

/// Status every new ticket starts in.
pub const INITIAL_STATUS: &str = "Icebox";

/// Paragraph used when the issue has no description.
pub const NO_DESCRIPTION: &str = "No description provided.";

/// Formats the ticket title: `[#<number>] <title>`.
///
/// # Examples
///
/// ```
/// use git_tion::notion::record_title;
/// use git_tion::types::IssueNumber;
///
/// assert_eq!(record_title(IssueNumber(42), "Crash on startup"), "[#42] Crash on startup");
/// ```
pub fn record_title(number: IssueNumber, title: &str) -> String {
    format!("[#{}] {}", number.0, title)
}

/// Returns the description paragraph text, falling back for empty descriptions.
pub fn description_text(body: &str) -> &str {
    if body.is_empty() { NO_DESCRIPTION } else { body }
}

/// Database properties for the ticket.
pub fn page_properties(issue: &IssueRef) -> Value {
    json!({
        "Task name": {
            "title": [
                { "text": { "content": record_title(issue.number, &issue.title) } }
            ]
        },
        "Status": {
            "status": { "name": INITIAL_STATUS }
        },
        "GitHub Issue": {
            "url": issue.url
        },
        "Repository": {
            "rich_text": [
                { "text": { "content": issue.repo_full_name } }
            ]
        }
    })
}

/// The three paragraph blocks that make up the page content, in order.
pub fn page_children(issue: &IssueRef) -> Value {
    json!([
        paragraph(json!({
            "type": "text",
            "text": { "content": format!("Imported from GitHub Issue #{}", issue.number.0) }
        })),
        paragraph(json!({
            "type": "text",
            "text": { "content": description_text(&issue.body) }
        })),
        paragraph(json!({
            "type": "text",
            "text": { "content": format!("GitHub Issue: {}", issue.url) },
            "href": issue.url
        })),
    ])
}

/// Full body for `POST /v1/pages`.
pub fn create_page_request(database_id: &str, issue: &IssueRef) -> Value {
    json!({
        "parent": { "database_id": database_id },
        "properties": page_properties(issue),
        "children": page_children(issue)
    })
}

fn paragraph(rich_text: Value) -> Value {
    json!({
        "object": "block",
        "type": "paragraph",
        "paragraph": { "rich_text": [rich_text] }
    })
}
