use async_trait::async_trait;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::{
    mask_phone_number, AuthError, AuthResult, DltRegistration, ExotelCredentials, SmsConfig,
    SmsSender,
};

const PROVIDER: &str = "Exotel";
const SMS_TYPE: &str = "transactional";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExotelSendResponse {
    #[serde(rename = "SMSMessage")]
    sms_message: Option<ExotelSmsMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExotelSmsMessage {
    sid: Option<String>,
}

/// Primary SMS provider: Exotel's Sms/send REST endpoint
pub struct ExotelSmsService {
    client: Client,
    base_url: String,
    account_sid: String,
    sender_id: String,
    dlt: DltRegistration,
    credentials: ExotelCredentials,
}

impl ExotelSmsService {
    pub fn new(client: Client, config: &SmsConfig, credentials: ExotelCredentials) -> Self {
        Self {
            client,
            base_url: config.exotel_base_url.clone(),
            account_sid: config.exotel_account_sid.clone(),
            sender_id: config.exotel_sender_id.clone(),
            dlt: config.dlt.clone(),
            credentials,
        }
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/Accounts/{}/Sms/send.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for ExotelSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> AuthResult<String> {
        let form = [
            ("From", self.sender_id.as_str()),
            ("To", phone_number),
            ("Body", message),
            ("DltEntityId", self.dlt.entity_id.as_str()),
            ("DltTemplateId", self.dlt.template_id.as_str()),
            ("SmsType", SMS_TYPE),
        ];

        tracing::info!(
            "Sending SMS via {} to {}",
            PROVIDER,
            mask_phone_number(phone_number)
        );

        let response = self
            .client
            .post(self.send_url())
            .basic_auth(
                &self.credentials.api_key,
                Some(self.credentials.api_token.expose_secret()),
            )
            .header(header::ACCEPT, "application/json")
            .form(&form[..])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("{} request failed: {}", PROVIDER, e);
                AuthError::provider(PROVIDER, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            tracing::error!("{} returned {}: {}", PROVIDER, status, error_body);
            return Err(AuthError::provider(
                PROVIDER,
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        // A 2xx without a parseable body still means the message was accepted
        let message_id = response
            .json::<ExotelSendResponse>()
            .await
            .ok()
            .and_then(|body| body.sms_message)
            .and_then(|sms| sms.sid)
            .unwrap_or_else(|| "unknown".to_string());

        tracing::info!(
            "SMS accepted by {} for {} with message ID: {}",
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
