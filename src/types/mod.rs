//! Core domain types for the bridge.
//!
//! Everything here is request-scoped: built from one webhook delivery and
//! dropped when the response is sent.

pub mod ids;
pub mod issue;
pub mod record;
pub mod token;

pub use ids::{InstallationId, IssueNumber, PageId};
pub use issue::{InstallationContext, IssueRef};
pub use record::{NOTION_PAGE_BASE_URL, RecordRef};
pub use token::AccessToken;
