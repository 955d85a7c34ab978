//! git-tion - A GitHub App that turns `@git-tion !send` issue comments into Notion tickets.
//!
//! The library holds the webhook pipeline, the Notion and GitHub clients, and
//! the HTTP server; the binary only wires configuration and logging to it.

pub mod clock;
pub mod config;
pub mod github;
pub mod notion;
pub mod outbound;
pub mod server;
pub mod types;
pub mod webhooks;
