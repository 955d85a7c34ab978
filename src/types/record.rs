//! A ticket created in the Notion database.

use super::ids::PageId;

/// Base URL for browser links to Notion pages.
pub const NOTION_PAGE_BASE_URL: &str = "https://notion.so/";

/// Reference to a Notion page created for an issue.
///
/// The canonical URL is derived from the page ID by dropping its dashes. This
/// mirrors how Notion currently formats page links but is not a documented
/// guarantee of their URL scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRef {
    id: PageId,
    canonical_url: String,
}

impl RecordRef {
    pub fn new(id: impl Into<PageId>) -> Self {
        let id = id.into();
        let canonical_url = format!("{}{}", NOTION_PAGE_BASE_URL, id.compact());
        RecordRef { id, canonical_url }
    }

    pub fn id(&self) -> &PageId {
        &self.id
    }

    pub fn canonical_url(&self) -> &str {
        &self.canonical_url
    }
}
