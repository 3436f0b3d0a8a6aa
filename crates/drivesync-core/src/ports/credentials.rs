//! Credential source port (driven/secondary port)
//!
//! Interface to the external secret holding the OAuth2 material needed to
//! mint short-lived Drive access tokens. The engine consumes this secret
//! strictly read-only; acquisition and rotation of the refresh token are
//! deployment-time concerns outside this codebase.

use serde::{Deserialize, Serialize};

/// Default Google OAuth2 token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Default scope requested for the mirror (read-only Drive access)
pub const DEFAULT_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";

/// OAuth2 material for the refresh-token grant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveCredentials {
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Token endpoint; defaults to Google's
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    /// Scopes the refresh token was granted for
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

fn default_scopes() -> Vec<String> {
    vec![DEFAULT_SCOPE.to_string()]
}

/// Port trait for reading the credential secret
#[async_trait::async_trait]
pub trait ICredentialSource: Send + Sync {
    /// Loads the OAuth2 material
    ///
    /// A missing or malformed secret is a configuration failure for the
    /// whole invocation; no partial progress is claimed.
    async fn load(&self) -> anyhow::Result<DriveCredentials>;
}
