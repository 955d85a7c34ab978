//! Inbound GitHub webhook handling.
//!
//! This module provides:
//! - Signature verification for webhook payloads (HMAC-SHA256)
//! - Parsing of `issue_comment` payloads
//! - Detection of the `@git-tion !send` trigger

pub mod command;
pub mod events;
pub mod parser;
pub mod signature;

pub use command::{TRIGGER, contains_trigger};
pub use events::{CommentAction, ISSUE_COMMENT_EVENT, IssueCommentEvent, IssueFields, MissingField};
pub use parser::{ParseError, parse_webhook};
pub use signature::{
    compute_signature, format_signature_header, parse_signature_header, verify_signature,
};
