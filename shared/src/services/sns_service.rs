use async_trait::async_trait;
use aws_sdk_sns::{types::MessageAttributeValue, Client as SnsClient};
use std::collections::HashMap;

use crate::{mask_phone_number, AuthError, AuthResult, DltRegistration, SmsConfig, SmsSender};

const PROVIDER: &str = "SNS";
const SMS_TYPE: &str = "Transactional";

/// Fallback SMS provider: direct-to-phone publish through Amazon SNS
pub struct SnsSmsService {
    client: SnsClient,
    sender_id: String,
    dlt: DltRegistration,
}

impl SnsSmsService {
    pub fn new(client: SnsClient, config: &SmsConfig) -> Self {
        Self {
            client,
            sender_id: config.sns_sender_id.clone(),
            dlt: config.dlt.clone(),
        }
    }

    /// Sender ID and SMS type plus the DLT identifiers SNS forwards to Indian carriers
    fn message_attributes(&self) -> AuthResult<HashMap<String, MessageAttributeValue>> {
        let attributes = [
            ("AWS.SNS.SMS.SenderID", self.sender_id.as_str()),
            ("AWS.SNS.SMS.SMSType", SMS_TYPE),
            ("AWS.MM.SMS.EntityId", self.dlt.entity_id.as_str()),
            ("AWS.MM.SMS.TemplateId", self.dlt.template_id.as_str()),
        ];

        attributes
            .into_iter()
            .map(|(name, value)| -> AuthResult<(String, MessageAttributeValue)> {
                let attribute = MessageAttributeValue::builder()
                    .data_type("String")
                    .string_value(value)
                    .build()
                    .map_err(|e| AuthError::provider(PROVIDER, e.to_string()))?;
                Ok((name.to_string(), attribute))
            })
            .collect()
    }
}

#[async_trait]
impl SmsSender for SnsSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> AuthResult<String> {
        tracing::info!(
            "Sending SMS via {} to {}",
            PROVIDER,
            mask_phone_number(phone_number)
        );

        let response = self
            .client
            .publish()
            .phone_number(phone_number)
            .message(message)
            .set_message_attributes(Some(self.message_attributes()?))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{} publish failed: {}", PROVIDER, e);
                AuthError::provider(
                    PROVIDER,
                    aws_sdk_sns::error::DisplayErrorContext(&e).to_string(),
                )
            })?;

        let message_id = response.message_id().unwrap_or("unknown").to_string();
        tracing::info!(
            "SMS published via {} for {} with message ID: {}",
            PROVIDER,
            mask_phone_number(phone_number),
            message_id
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        PROVIDER
    }
}
