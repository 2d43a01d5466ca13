use async_trait::async_trait;

use crate::{mask_phone_number, AuthError, AuthResult, SmsSender};

/// Tries `primary` once and, on any failure, `fallback` once.
///
/// Both attempts carry the same phone number and message. The second call
/// only starts after the first has failed; there is no retry beyond it.
pub struct FallbackSmsSender<P, F> {
    primary: P,
    fallback: F,
    name: String,
}

impl<P: SmsSender, F: SmsSender> FallbackSmsSender<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        let name = format!("{}+{}", primary.provider_name(), fallback.provider_name());
        Self {
            primary,
            fallback,
            name,
        }
    }
}

#[async_trait]
impl<P: SmsSender, F: SmsSender> SmsSender for FallbackSmsSender<P, F> {
    async fn send_sms(&self, phone_number: &str, message: &str) -> AuthResult<String> {
        let primary_error = match self.primary.send_sms(phone_number, message).await {
            Ok(message_id) => return Ok(message_id),
            Err(e) => e,
        };

        tracing::warn!(
            "{} failed for {}: {}. Falling back to {}",
            self.primary.provider_name(),
            mask_phone_number(phone_number),
            primary_error,
            self.fallback.provider_name()
        );

        self.fallback
            .send_sms(phone_number, message)
            .await
            .map_err(|fallback_error| {
                tracing::error!(
                    "{} fallback also failed for {}: {}",
                    self.fallback.provider_name(),
                    mask_phone_number(phone_number),
                    fallback_error
                );
                AuthError::SmsDeliveryFailed {
                    primary: primary_error.to_string(),
                    fallback: fallback_error.to_string(),
                }
            })
    }

    fn provider_name(&self) -> &str {
        &self.name
    }
}
