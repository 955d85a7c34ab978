//! GitHub side of the bridge: App authentication and confirmation comments.
//!
//! Key features:
//! - RS256 App assertions exchanged for per-call installation tokens
//! - Pluggable credential strategy (static token or installation token)
//! - Exact status checks on every call, no retries

pub mod app_token;
mod auth;
mod comments;
mod error;

pub use app_token::{ASSERTION_LIFETIME_SECS, AppClaims, AppTokenIssuer, sign_app_assertion};
pub use auth::{AuthProvider, GitHubAuth, InstallationTokenAuth, StaticTokenAuth};
pub use comments::{CommentPoster, acknowledgement_body};
pub use error::{AcknowledgeError, AuthError};
