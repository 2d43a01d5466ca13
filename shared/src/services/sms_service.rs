use async_trait::async_trait;

use crate::{AuthResult, SmsConfig};

/// Anything that can deliver a text message to a phone number.
///
/// Implemented by the Exotel and SNS providers and by the fallback pair that
/// chains them. Returns the provider's message ID on success.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_sms(&self, phone_number: &str, message: &str) -> AuthResult<String>;

    fn provider_name(&self) -> &str;
}

/// Text of the OTP message. Both providers send the exact same body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsTemplate {
    brand_name: String,
    app_hash: Option<String>,
}

impl SmsTemplate {
    pub fn new(brand_name: impl Into<String>, app_hash: Option<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
            app_hash,
        }
    }

    pub fn from_config(config: &SmsConfig) -> Self {
        Self::new(config.brand_name.clone(), config.app_hash.clone())
    }

    /// The trailing app hash lets the Android SMS Retriever API match the message
    pub fn render(&self, pass_code: &str) -> String {
        let body = format!(
            "{brand}: Your OTP is {code}, you have requested this OTP for completing your registration with {brand}. PLEASE DO NOT SHARE THIS OTP WITH ANYONE.",
            brand = self.brand_name,
            code = pass_code
        );
        match &self.app_hash {
            Some(hash) => format!("{} {}", body, hash),
            None => body,
        }
    }
}
