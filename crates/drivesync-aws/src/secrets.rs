//! Secrets Manager adapter for the credential source port.

use anyhow::Context;
use aws_sdk_secretsmanager::Client;
use drivesync_core::ports::{DriveCredentials, ICredentialSource};

/// Secrets-Manager-backed implementation of [`ICredentialSource`].
pub struct SecretsManagerCredentials {
    client: Client,
    secret_id: String,
}

impl SecretsManagerCredentials {
    /// Create a new source reading `secret_id`.
    pub fn new(config: &aws_config::SdkConfig, secret_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(config),
            secret_id: secret_id.into(),
        }
    }
}

/// Parse the secret payload into [`DriveCredentials`].
///
/// Accepts both the flat shape (`client_id` at the top level) and the shape
/// produced by Google's OAuth tooling, where the grant material sits under a
/// `token` key.
fn parse_secret(secret_string: &str) -> anyhow::Result<DriveCredentials> {
    let value: serde_json::Value =
        serde_json::from_str(secret_string).context("credential secret is not valid JSON")?;

    let material = match value.get("token") {
        Some(nested) if nested.is_object() => nested.clone(),
        _ => value,
    };

    serde_json::from_value(material).context("credential secret is missing required OAuth fields")
}

#[async_trait::async_trait]
impl ICredentialSource for SecretsManagerCredentials {
    async fn load(&self) -> anyhow::Result<DriveCredentials> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_id)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("{:?}", err))
            .with_context(|| format!("failed to read secret {}", self.secret_id))?;

        let secret_string = output
            .secret_string()
            .ok_or_else(|| anyhow::anyhow!("secret {} has no string payload", self.secret_id))?;

        parse_secret(secret_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_secret() {
        let creds = parse_secret(
            r#"{"client_id": "cid", "client_secret": "cs", "refresh_token": "rt"}"#,
        )
        .unwrap();
        assert_eq!(creds.client_id, "cid");
        assert_eq!(creds.refresh_token, "rt");
    }

    #[test]
    fn test_parse_nested_token_secret() {
        let creds = parse_secret(
            r#"{"token": {
                "client_id": "cid",
                "client_secret": "cs",
                "refresh_token": "rt",
                "token_uri": "https://example.com/token"
            }}"#,
        )
        .unwrap();
        assert_eq!(creds.client_id, "cid");
        assert_eq!(creds.token_uri, "https://example.com/token");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(parse_secret(r#"{"client_id": "cid"}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(parse_secret("not json").is_err());
    }
}
