//! OAuth2 refresh-token grant for the Drive API
//!
//! The engine runs unattended, so there is no interactive consent flow
//! here: a long-lived refresh token (provisioned once, out of band) is
//! exchanged for a short-lived access token at the start of each
//! invocation.
//!
//! ## Components
//!
//! - [`RefreshGrant`] - wraps the `oauth2` client configured from the
//!   credential secret and mints access tokens

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use oauth2::{
    basic::BasicClient, ClientId, ClientSecret, EndpointNotSet, EndpointSet, RefreshToken,
    TokenResponse, TokenUrl,
};
use tracing::{debug, info};

use drivesync_core::ports::credentials::DriveCredentials;

/// A short-lived access token minted from the refresh grant
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Bearer token for authenticating API requests
    pub token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

/// OAuth2 refresh-token grant using the `oauth2` crate
///
/// Only the token endpoint is configured; authorization endpoints are
/// never used because consent happened at provisioning time.
pub struct RefreshGrant {
    client: BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>,
    refresh_token: RefreshToken,
}

impl RefreshGrant {
    /// Creates a new RefreshGrant from the credential secret
    ///
    /// # Errors
    /// Returns an error if the secret's token endpoint is not a valid URL
    pub fn new(credentials: &DriveCredentials) -> Result<Self> {
        let client = BasicClient::new(ClientId::new(credentials.client_id.clone()))
            .set_client_secret(ClientSecret::new(credentials.client_secret.clone()))
            .set_token_uri(
                TokenUrl::new(credentials.token_uri.clone())
                    .context("Invalid token endpoint URL in credential secret")?,
            );

        Ok(Self {
            client,
            refresh_token: RefreshToken::new(credentials.refresh_token.clone()),
        })
    }

    /// Mints a fresh access token
    ///
    /// # Returns
    /// An [`AccessToken`] valid for roughly an hour (the endpoint's
    /// `expires_in` is honored when present)
    pub async fn mint(&self) -> Result<AccessToken> {
        debug!("Exchanging refresh token for access token");

        let http_client = reqwest::Client::new();
        let token_result = self
            .client
            .exchange_refresh_token(&self.refresh_token)
            .request_async(&http_client)
            .await
            .context("Refresh-token exchange failed")?;

        let expires_at = token_result
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64))
            .unwrap_or_else(|| Utc::now() + Duration::hours(1));

        info!("Minted Drive access token");
        Ok(AccessToken {
            token: token_result.access_token().secret().to_string(),
            expires_at,
        })
    }
}
