//! GitHub App installation tokens.
//!
//! An App authenticates as itself with a short-lived RS256 JWT signed by its
//! private key, then exchanges that JWT for a token scoped to one installation:
//!
//! ```text
//! POST /app/installations/{installation_id}/access_tokens
//! Authorization: Bearer <jwt>
//!
//! 201 Created
//! {"token": "ghs_...", "expires_at": "2024-01-01T00:10:00Z"}
//! ```
//!
//! Tokens are minted per acknowledgement and never cached. There is a single
//! attempt per call.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::outbound::{RemoteError, send_expecting};
use crate::types::{AccessToken, InstallationId};

use super::error::AuthError;

/// Lifetime of the App assertion in seconds. GitHub rejects anything over ten minutes.
pub const ASSERTION_LIFETIME_SECS: i64 = 600;

const OPERATION: &str = "exchange GitHub installation token";

/// Claims of the App assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppClaims {
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiry (Unix seconds).
    pub exp: i64,
    /// The App ID.
    pub iss: String,
}

impl AppClaims {
    pub fn new(app_id: &str, now: DateTime<Utc>) -> Self {
        Self {
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
            iss: app_id.to_string(),
        }
    }
}

/// Signs an App assertion for `now`.
pub fn sign_app_assertion(
    app_id: &str,
    key: &EncodingKey,
    now: DateTime<Utc>,
) -> Result<String, AuthError> {
    let claims = AppClaims::new(app_id, now);
    Ok(jsonwebtoken::encode(
        &Header::new(Algorithm::RS256),
        &claims,
        key,
    )?)
}

#[derive(Debug, Deserialize)]
struct InstallationTokenResponse {
    token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

/// Exchanges App assertions for installation access tokens.
#[derive(Clone)]
pub struct AppTokenIssuer {
    http: reqwest::Client,
    api_base_url: String,
    app_id: String,
    signing_key: EncodingKey,
}

impl AppTokenIssuer {
    /// Creates an issuer from the App's PEM-encoded RSA private key.
    ///
    /// The key is parsed once here so a bad key fails at startup rather than
    /// on the first trigger comment.
    pub fn new(
        http: reqwest::Client,
        api_base_url: impl Into<String>,
        app_id: impl Into<String>,
        private_key_pem: &SecretString,
    ) -> Result<Self, AuthError> {
        let signing_key = EncodingKey::from_rsa_pem(private_key_pem.expose_secret().as_bytes())?;
        Ok(Self {
            http,
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            app_id: app_id.into(),
            signing_key,
        })
    }

    /// Mints a fresh installation access token.
    ///
    /// `now` stamps the assertion; callers pass it from an injected clock.
    pub async fn issue_installation_token(
        &self,
        installation_id: InstallationId,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let assertion = sign_app_assertion(&self.app_id, &self.signing_key, now)?;

        debug!(installation_id = %installation_id, "Requesting installation token");

        let request = self
            .http
            .post(format!(
                "{}/app/installations/{}/access_tokens",
                self.api_base_url, installation_id
            ))
            .bearer_auth(assertion)
            .header("Accept", "application/vnd.github+json");

        let response = send_expecting(request, StatusCode::CREATED, OPERATION).await?;
        let payload: InstallationTokenResponse = response
            .json()
            .await
            .map_err(|e| RemoteError::transport(OPERATION, e))?;
        let token = payload
            .token
            .ok_or_else(|| RemoteError::decode(OPERATION, "response has no token"))?;

        info!(installation_id = %installation_id, "Obtained installation token");
        Ok(AccessToken::new(token, now, payload.expires_at))
    }
}

impl std::fmt::Debug for AppTokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppTokenIssuer")
            .field("api_base_url", &self.api_base_url)
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
