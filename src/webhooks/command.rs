//! Trigger detection for issue comments.
//!
//! The bridge responds to exactly one command. Detection is plain substring
//! containment: case, position and surrounding text do not matter, and nothing
//! after the trigger is parsed.

/// The literal that must appear in a comment to create a Notion ticket.
pub const TRIGGER: &str = "@git-tion !send";

/// Returns true if the comment body contains the trigger literal.
///
/// # Examples
///
/// ```
/// use git_tion::webhooks::contains_trigger;
///
/// assert!(contains_trigger("Let's create a Notion ticket @git-tion !send"));
/// assert!(!contains_trigger("This is a regular comment"));
/// assert!(!contains_trigger("@git-tion send"));
/// ```
pub fn contains_trigger(comment_body: &str) -> bool {
    comment_body.contains(TRIGGER)
}
