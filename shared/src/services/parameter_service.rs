use aws_sdk_ssm::Client as SsmClient;
use secrecy::SecretString;
use serde::Deserialize;

use crate::{AuthError, AuthResult};

/// Exotel API key and token. The token never leaves `SecretString`.
#[derive(Debug)]
pub struct ExotelCredentials {
    pub api_key: String,
    pub api_token: SecretString,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCredentials {
    api_key: String,
    api_token: String,
}

impl ExotelCredentials {
    /// Parse the JSON document stored in the SecureString parameter:
    /// `{"apiKey": "...", "apiToken": "..."}`
    pub fn from_json(raw: &str) -> AuthResult<Self> {
        let stored: StoredCredentials = serde_json::from_str(raw).map_err(|e| {
            AuthError::ConfigurationError(format!("Malformed Exotel credentials: {}", e))
        })?;

        if stored.api_key.is_empty() || stored.api_token.is_empty() {
            return Err(AuthError::ConfigurationError(
                "Exotel credentials contain an empty key or token".to_string(),
            ));
        }

        Ok(Self {
            api_key: stored.api_key,
            api_token: SecretString::from(stored.api_token),
        })
    }
}

/// Fetch and decrypt the Exotel credentials parameter
pub async fn load_exotel_credentials(
    client: &SsmClient,
    parameter_name: &str,
) -> AuthResult<ExotelCredentials> {
    tracing::info!("Loading Exotel credentials from parameter: {}", parameter_name);

    let response = client
        .get_parameter()
        .name(parameter_name)
        .with_decryption(true)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Failed to read parameter {}: {}", parameter_name, e);
            AuthError::SSMError(format!(
                "Failed to read parameter {}: {}",
                parameter_name,
                aws_sdk_ssm::error::DisplayErrorContext(&e)
            ))
        })?;

    let raw = response
        .parameter
        .and_then(|p| p.value)
        .ok_or_else(|| AuthError::SSMError(format!("Parameter {} has no value", parameter_name)))?;

    ExotelCredentials::from_json(&raw)
}
