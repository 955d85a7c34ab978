//! Runtime configuration.
//!
//! All settings come from environment variables and are read once at startup
//! into a [`Config`]. Components receive the pieces they need at construction;
//! nothing reads the environment afterwards.

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_NOTION_API_URL: &str = "https://api.notion.com";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// A required variable is set but empty.
    #[error("environment variable {0} must not be empty")]
    Empty(&'static str),

    /// A variable could not be parsed.
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Neither App credentials nor a static token were provided.
    #[error("no GitHub credentials: set GITHUB_APP_ID and GITHUB_PRIVATE_KEY, or GITHUB_TOKEN")]
    NoGitHubAuth,
}

/// How comments are authenticated against GitHub.
#[derive(Debug)]
pub enum GitHubAuthConfig {
    /// GitHub App: installation tokens minted per comment.
    App {
        app_id: String,
        private_key: SecretString,
    },
    /// A fixed token.
    StaticToken(SecretString),
}

#[derive(Debug)]
pub struct GitHubConfig {
    pub api_base_url: String,
    pub auth: GitHubAuthConfig,
}

#[derive(Debug)]
pub struct NotionConfig {
    pub api_base_url: String,
    pub token: SecretString,
    pub database_id: String,
}

/// Process-wide configuration. Read-only after startup.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub webhook_secret: SecretString,
    pub github: GitHubConfig,
    pub notion: NotionConfig,
    /// Upper bound for every outbound HTTP call.
    pub http_timeout: Duration,
    /// Log the Notion database schema once at startup.
    pub inspect_schema_on_start: bool,
}

impl Config {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Tests use this to supply variables without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            let value = lookup(name).ok_or(ConfigError::Missing(name))?;
            if value.trim().is_empty() {
                return Err(ConfigError::Empty(name));
            }
            Ok(value)
        };
        let optional = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let webhook_secret = SecretString::from(required("GITHUB_SECRET")?);

        let notion = NotionConfig {
            api_base_url: optional("NOTION_API_URL")
                .unwrap_or_else(|| DEFAULT_NOTION_API_URL.to_string()),
            token: SecretString::from(required("NOTION_TOKEN")?),
            database_id: required("NOTION_DATABASE_ID")?,
        };

        let auth = match (
            optional("GITHUB_APP_ID"),
            optional("GITHUB_PRIVATE_KEY"),
            optional("GITHUB_TOKEN"),
        ) {
            (Some(app_id), Some(private_key), _) => GitHubAuthConfig::App {
                app_id,
                private_key: SecretString::from(unescape_private_key(&private_key)),
            },
            (_, _, Some(token)) => GitHubAuthConfig::StaticToken(SecretString::from(token)),
            _ => return Err(ConfigError::NoGitHubAuth),
        };

        let github = GitHubConfig {
            api_base_url: optional("GITHUB_API_URL")
                .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string()),
            auth,
        };

        let port = match optional("PORT") {
            Some(value) => parse_number("PORT", &value)?,
            None => DEFAULT_PORT,
        };

        let http_timeout = match optional("GITTION_HTTP_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_number("GITTION_HTTP_TIMEOUT_SECS", &value)?),
            None => DEFAULT_HTTP_TIMEOUT,
        };

        let inspect_schema_on_start = optional("GITTION_INSPECT_SCHEMA")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(Config {
            port,
            webhook_secret,
            github,
            notion,
            http_timeout,
            inspect_schema_on_start,
        })
    }
}

/// Turns literal `\n` sequences into newlines.
///
/// PEM keys are usually stored in `.env` files on a single line with escaped
/// newlines.
pub fn unescape_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

fn parse_number<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
