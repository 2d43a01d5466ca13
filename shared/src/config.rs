use crate::{AuthError, RuntimeConfig};

const DEFAULT_EXOTEL_BASE_URL: &str = "https://api.exotel.in";
const DEFAULT_CREDENTIALS_PARAMETER: &str = "exotel-credentials";
/// Test account number; its pass code is issued but never texted
pub const DEFAULT_TEST_PHONE_NUMBER: &str = "+919999999999";

/// DLT registration identifiers required on transactional SMS sent to Indian numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DltRegistration {
    pub entity_id: String,
    pub template_id: String,
}

/// SMS delivery settings for the create-auth-challenge trigger.
///
/// Everything here is non-secret. Exotel API credentials live in SSM under
/// `credentials_parameter` and are loaded separately.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub exotel_base_url: String,
    pub exotel_account_sid: String,
    pub exotel_sender_id: String,
    pub sns_sender_id: String,
    pub dlt: DltRegistration,
    pub brand_name: String,
    pub app_hash: Option<String>,
    pub test_phone_number: String,
    pub credentials_parameter: String,
}

impl SmsConfig {
    pub fn from_env() -> Result<Self, AuthError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| {
                    tracing::error!("{} environment variable not set", key);
                    AuthError::ConfigurationError(format!("{} not set", key))
                })
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let credentials_parameter = match optional("EXOTEL_CREDENTIALS_PARAMETER") {
            Some(name) => name,
            None => RuntimeConfig::from_lookup(&lookup)?.parameter_name(DEFAULT_CREDENTIALS_PARAMETER),
        };

        let brand_name = required("SMS_BRAND_NAME")?;
        let sns_sender_id = optional("SMS_SENDER_ID").unwrap_or_else(|| brand_name.clone());

        Ok(Self {
            exotel_base_url: optional("EXOTEL_BASE_URL")
                .unwrap_or_else(|| DEFAULT_EXOTEL_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            exotel_account_sid: required("EXOTEL_ACCOUNT_SID")?,
            exotel_sender_id: required("EXOTEL_SENDER_ID")?,
            sns_sender_id,
            dlt: DltRegistration {
                entity_id: required("DLT_ENTITY_ID")?,
                template_id: required("DLT_TEMPLATE_ID")?,
            },
            brand_name,
            app_hash: optional("SMS_APP_HASH"),
            test_phone_number: optional("SMS_TEST_PHONE_NUMBER")
                .unwrap_or_else(|| DEFAULT_TEST_PHONE_NUMBER.to_string()),
            credentials_parameter,
        })
    }
}
