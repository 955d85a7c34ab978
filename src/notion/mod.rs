//! Notion integration: creating ticket pages in the configured database.
//!
//! - `page` builds the request body (pure, no I/O)
//! - `client` talks to the Notion REST API

mod client;
pub mod page;

pub use client::{NOTION_VERSION, NotionClient, PropertySchema};
pub use page::{INITIAL_STATUS, NO_DESCRIPTION, record_title};
