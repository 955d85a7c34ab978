//! GitHub authentication and acknowledgement errors.

use thiserror::Error;

use crate::outbound::RemoteError;

/// Failure to obtain a credential for a GitHub API call.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The App private key could not be parsed or the assertion could not be signed.
    #[error("failed to sign GitHub App assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Installation tokens need the installation the delivery came from.
    #[error("delivery has no installation id; cannot request an installation token")]
    MissingInstallation,

    /// GitHub did not issue the installation token (non-201, transport failure,
    /// or a response without a token).
    #[error(transparent)]
    Exchange(#[from] RemoteError),
}

impl AuthError {
    /// The HTTP status GitHub answered the token exchange with, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AuthError::Exchange(e) => e.status_code,
            AuthError::Jwt(_) | AuthError::MissingInstallation => None,
        }
    }
}

/// Failure to post the confirmation comment.
#[derive(Debug, Error)]
pub enum AcknowledgeError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Post(#[from] RemoteError),
}
