use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing user attribute: {0}")]
    MissingAttribute(String),

    #[error("Invalid challenge metadata: {0}")]
    InvalidChallengeMetadata(String),

    #[error("{provider} error: {message}")]
    SmsProviderError { provider: String, message: String },

    #[error("SMS delivery failed (primary: {primary}; fallback: {fallback})")]
    SmsDeliveryFailed { primary: String, fallback: String },

    #[error("SSM error: {0}")]
    SSMError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AuthError {
    pub fn provider(provider: &str, message: impl Into<String>) -> Self {
        AuthError::SmsProviderError {
            provider: provider.to_string(),
            message: message.into(),
        }
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
