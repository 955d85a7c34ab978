//! Short-lived credentials for outbound GitHub calls.

use std::fmt;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

/// A credential used for exactly one outbound request.
///
/// Never cached, persisted, or returned to webhook callers. `Debug` redacts
/// the value so it cannot leak through logging.
pub struct AccessToken {
    value: SecretString,
    issued_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn new(
        value: impl Into<String>,
        issued_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        AccessToken {
            value: SecretString::from(value.into()),
            issued_at,
            expires_at,
        }
    }

    /// Returns the raw token for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Expiry reported by the issuer, if any. Static tokens have none.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
