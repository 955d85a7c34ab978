//! Credentials for posting comments.
//!
//! The poster does not care where its token comes from. Two strategies exist:
//!
//! - [`StaticTokenAuth`]: a fixed token from configuration (personal access
//!   token or similar)
//! - [`InstallationTokenAuth`]: a fresh installation token minted through the
//!   App for every call
//!
//! [`GitHubAuth`] selects between them based on configuration.

use std::future::Future;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::clock::Clock;
use crate::types::{AccessToken, InstallationContext};

use super::app_token::AppTokenIssuer;
use super::error::AuthError;

/// Supplies the token for one GitHub API call.
pub trait AuthProvider {
    /// Returns a credential usable for the repository the delivery came from.
    fn access_token(
        &self,
        installation: Option<InstallationContext>,
    ) -> impl Future<Output = Result<AccessToken, AuthError>> + Send;

    /// Fails fast when `access_token` is certain to fail for this delivery.
    fn check_installation(
        &self,
        _installation: Option<InstallationContext>,
    ) -> Result<(), AuthError> {
        Ok(())
    }
}

/// A token fixed at startup.
pub struct StaticTokenAuth {
    token: SecretString,
    clock: Arc<dyn Clock>,
}

impl StaticTokenAuth {
    pub fn new(token: SecretString, clock: Arc<dyn Clock>) -> Self {
        Self { token, clock }
    }
}

impl AuthProvider for StaticTokenAuth {
    async fn access_token(
        &self,
        _installation: Option<InstallationContext>,
    ) -> Result<AccessToken, AuthError> {
        Ok(AccessToken::new(
            self.token.expose_secret(),
            self.clock.now(),
            None,
        ))
    }
}

/// Installation tokens minted through the GitHub App, one per call.
pub struct InstallationTokenAuth {
    issuer: AppTokenIssuer,
    clock: Arc<dyn Clock>,
}

impl InstallationTokenAuth {
    pub fn new(issuer: AppTokenIssuer, clock: Arc<dyn Clock>) -> Self {
        Self { issuer, clock }
    }
}

impl AuthProvider for InstallationTokenAuth {
    async fn access_token(
        &self,
        installation: Option<InstallationContext>,
    ) -> Result<AccessToken, AuthError> {
        let installation = installation.ok_or(AuthError::MissingInstallation)?;
        self.issuer
            .issue_installation_token(installation.installation_id, self.clock.now())
            .await
    }

    fn check_installation(
        &self,
        installation: Option<InstallationContext>,
    ) -> Result<(), AuthError> {
        installation
            .map(|_| ())
            .ok_or(AuthError::MissingInstallation)
    }
}

/// The configured authentication strategy.
pub enum GitHubAuth {
    Static(StaticTokenAuth),
    Installation(InstallationTokenAuth),
}

impl AuthProvider for GitHubAuth {
    async fn access_token(
        &self,
        installation: Option<InstallationContext>,
    ) -> Result<AccessToken, AuthError> {
        match self {
            GitHubAuth::Static(auth) => auth.access_token(installation).await,
            GitHubAuth::Installation(auth) => auth.access_token(installation).await,
        }
    }

    fn check_installation(
        &self,
        installation: Option<InstallationContext>,
    ) -> Result<(), AuthError> {
        match self {
            GitHubAuth::Static(auth) => auth.check_installation(installation),
            GitHubAuth::Installation(auth) => auth.check_installation(installation),
        }
    }
}

impl std::fmt::Debug for GitHubAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitHubAuth::Static(_) => f.write_str("GitHubAuth::Static"),
            GitHubAuth::Installation(auth) => f
                .debug_tuple("GitHubAuth::Installation")
                .field(&auth.issuer)
                .finish(),
        }
    }
}
