use crate::{
    challenge_metadata, extract_pass_code, generate_pass_code, mask_phone_number, AuthError,
    AuthResult, ChallengeResult, CreateAuthChallengeEvent, SmsSender, SmsTemplate,
};

/// Challenge name some client SDKs (iOS AWSMobileClient) report for the first
/// custom challenge round
pub const SRP_CHALLENGE_NAME: &str = "SRP_A";

pub const PHONE_NUMBER_ATTRIBUTE: &str = "phone_number";
pub const PHONE_PARAMETER: &str = "phone";
pub const PASS_CODE_PARAMETER: &str = "passCode";

/// Where this invocation sits in the challenge flow, decided from the session
/// history Cognito echoes back on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeStep<'a> {
    /// Empty session: first round from web clients
    NoHistory,
    /// Last round was `SRP_A`: first round from clients that start with SRP
    SrpQuirk,
    /// A code was already issued; recover it from the last round's metadata
    Retry { challenge_metadata: Option<&'a str> },
}

impl<'a> ChallengeStep<'a> {
    pub fn from_session(session: &'a [Option<ChallengeResult>]) -> Self {
        match session.last() {
            None => ChallengeStep::NoHistory,
            Some(Some(last)) if last.challenge_name.as_deref() == Some(SRP_CHALLENGE_NAME) => {
                ChallengeStep::SrpQuirk
            }
            Some(last) => ChallengeStep::Retry {
                challenge_metadata: last
                    .as_ref()
                    .and_then(|entry| entry.challenge_metadata.as_deref()),
            },
        }
    }
}

/// Source of fresh pass codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_pass_code()
    }
}

/// Issues (or re-surfaces) the SMS pass code for a create-auth-challenge event
pub struct ChallengeIssuer<S, G = RandomCodeGenerator> {
    sms: S,
    codes: G,
    template: SmsTemplate,
    test_phone_number: Option<String>,
}

impl<S: SmsSender, G: CodeGenerator> ChallengeIssuer<S, G> {
    pub fn new(sms: S, codes: G, template: SmsTemplate, test_phone_number: Option<String>) -> Self {
        Self {
            sms,
            codes,
            template,
            test_phone_number,
        }
    }

    pub async fn create_challenge(&self, event: &mut CreateAuthChallengeEvent) -> AuthResult<()> {
        let phone_number = event
            .request
            .user_attributes
            .get(PHONE_NUMBER_ATTRIBUTE)
            .cloned()
            .ok_or_else(|| AuthError::MissingAttribute(PHONE_NUMBER_ATTRIBUTE.to_string()))?;

        let step = ChallengeStep::from_session(&event.request.session);
        tracing::info!(
            "Creating challenge for {} (session length {}, step {:?})",
            mask_phone_number(&phone_number),
            event.request.session.len(),
            step
        );

        let pass_code = match step {
            ChallengeStep::NoHistory | ChallengeStep::SrpQuirk => {
                let pass_code = self.codes.generate();
                self.deliver(&phone_number, &pass_code).await?;
                pass_code
            }
            ChallengeStep::Retry {
                challenge_metadata: previous,
            } => {
                let metadata = previous.ok_or_else(|| {
                    AuthError::InvalidChallengeMetadata(
                        "previous challenge carries no metadata".to_string(),
                    )
                })?;
                extract_pass_code(metadata)?
            }
        };

        let response = &mut event.response;
        response
            .public_challenge_parameters
            .insert(PHONE_PARAMETER.to_string(), phone_number);
        response
            .private_challenge_parameters
            .insert(PASS_CODE_PARAMETER.to_string(), pass_code.clone());
        response.challenge_metadata = Some(challenge_metadata(&pass_code));

        Ok(())
    }

    async fn deliver(&self, phone_number: &str, pass_code: &str) -> AuthResult<()> {
        if self.test_phone_number.as_deref() == Some(phone_number) {
            tracing::info!(
                "Skipping SMS delivery for test phone number {}",
                mask_phone_number(phone_number)
            );
            return Ok(());
        }

        let message_id = self
            .sms
            .send_sms(phone_number, &self.template.render(pass_code))
            .await?;
        tracing::info!(
            "Pass code delivered to {} (message ID: {})",
            mask_phone_number(phone_number),
            message_id
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mock_sms_service::MockSmsService;
    use crate::FallbackSmsSender;
    use serde_json::json;

    const PHONE: &str = "+15551234567";
    const TEST_PHONE: &str = "+919999999999";

    struct FixedCode(&'static str);

    impl CodeGenerator for FixedCode {
        fn generate(&self) -> String {
            self.0.to_string()
        }
    }

    fn event(session: serde_json::Value, phone: &str) -> CreateAuthChallengeEvent {
        serde_json::from_value(json!({
            "request": {
                "session": session,
                "userAttributes": { "phone_number": phone }
            }
        }))
        .unwrap()
    }

    fn issuer<S: SmsSender>(sms: S) -> ChallengeIssuer<S, FixedCode> {
        ChallengeIssuer::new(
            sms,
            FixedCode("004821"),
            SmsTemplate::new("Cookr", None),
            Some(TEST_PHONE.to_string()),
        )
    }

    #[test]
    fn test_step_from_empty_session() {
        assert_eq!(ChallengeStep::from_session(&[]), ChallengeStep::NoHistory);
    }

    #[test]
    fn test_step_from_srp_session() {
        let session = vec![Some(ChallengeResult {
            challenge_name: Some("SRP_A".to_string()),
            ..Default::default()
        })];
        assert_eq!(ChallengeStep::from_session(&session), ChallengeStep::SrpQuirk);
    }

    #[test]
    fn test_step_from_custom_challenge_session() {
        let session = vec![
            Some(ChallengeResult {
                challenge_name: Some("SRP_A".to_string()),
                ..Default::default()
            }),
            Some(ChallengeResult {
                challenge_name: Some("CUSTOM_CHALLENGE".to_string()),
                challenge_result: false,
                challenge_metadata: Some("CODE-123456".to_string()),
            }),
        ];
        assert_eq!(
            ChallengeStep::from_session(&session),
            ChallengeStep::Retry {
                challenge_metadata: Some("CODE-123456")
            }
        );
    }

    #[test]
    fn test_step_from_null_last_entry() {
        let session = vec![None];

        assert_eq!(
            ChallengeStep::from_session(&session),
            ChallengeStep::Retry {
                challenge_metadata: None
            }
        );
    }

    #[tokio::test]
    async fn test_first_step_issues_and_delivers_code() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(json!([]), PHONE);

        issuer(sms.clone()).create_challenge(&mut event).await.unwrap();

        assert_eq!(event.response.private_challenge_parameters["passCode"], "004821");
        assert_eq!(event.response.public_challenge_parameters["phone"], PHONE);
        assert_eq!(event.response.challenge_metadata.as_deref(), Some("CODE-004821"));

        let attempts = sms.attempts();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].phone_number, PHONE);
        assert!(attempts[0].message.contains("Your OTP is 004821"));
    }

    #[tokio::test]
    async fn test_random_code_scenario() {
        let sms = MockSmsService::new("Exotel");
        let issuer = ChallengeIssuer::new(
            sms.clone(),
            RandomCodeGenerator,
            SmsTemplate::new("Cookr", None),
            None,
        );
        let mut event = event(json!([]), PHONE);

        issuer.create_challenge(&mut event).await.unwrap();

        let pass_code = event.response.private_challenge_parameters["passCode"].clone();
        assert_eq!(pass_code.len(), 6);
        assert!(pass_code.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(
            event.response.challenge_metadata,
            Some(format!("CODE-{}", pass_code))
        );
        assert_eq!(event.response.public_challenge_parameters["phone"], PHONE);
        assert_eq!(sms.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_srp_quirk_issues_new_code() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(json!([{ "challengeName": "SRP_A", "challengeResult": true }]), PHONE);

        issuer(sms.clone()).create_challenge(&mut event).await.unwrap();

        assert_eq!(event.response.private_challenge_parameters["passCode"], "004821");
        assert_eq!(sms.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_test_phone_number_skips_delivery() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(json!([]), TEST_PHONE);

        issuer(sms.clone()).create_challenge(&mut event).await.unwrap();

        assert!(sms.attempts().is_empty());
        assert_eq!(event.response.private_challenge_parameters["passCode"], "004821");
        assert_eq!(event.response.challenge_metadata.as_deref(), Some("CODE-004821"));
    }

    #[tokio::test]
    async fn test_retry_recovers_previous_code_without_delivery() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(
            json!([{
                "challengeName": "CUSTOM_CHALLENGE",
                "challengeResult": false,
                "challengeMetadata": "CODE-123456"
            }]),
            PHONE,
        );

        issuer(sms.clone()).create_challenge(&mut event).await.unwrap();

        assert_eq!(event.response.private_challenge_parameters["passCode"], "123456");
        assert_eq!(event.response.challenge_metadata.as_deref(), Some("CODE-123456"));
        assert!(sms.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_retry_is_stable_across_rounds() {
        let sms = MockSmsService::new("Exotel");
        let issuer = issuer(sms.clone());

        let mut first = event(json!([]), PHONE);
        issuer.create_challenge(&mut first).await.unwrap();

        let mut second = event(
            json!([{
                "challengeName": "CUSTOM_CHALLENGE",
                "challengeResult": false,
                "challengeMetadata": first.response.challenge_metadata
            }]),
            PHONE,
        );
        issuer.create_challenge(&mut second).await.unwrap();

        assert_eq!(
            second.response.private_challenge_parameters["passCode"],
            first.response.private_challenge_parameters["passCode"]
        );
        assert_eq!(sms.attempts().len(), 1);
    }

    #[tokio::test]
    async fn test_retry_with_malformed_metadata_fails() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(
            json!([{ "challengeName": "CUSTOM_CHALLENGE", "challengeMetadata": "OTP_SENT" }]),
            PHONE,
        );

        let result = issuer(sms.clone()).create_challenge(&mut event).await;

        assert!(matches!(result, Err(AuthError::InvalidChallengeMetadata(_))));
        assert!(event.response.private_challenge_parameters.is_empty());
        assert!(sms.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_retry_without_metadata_fails() {
        let sms = MockSmsService::new("Exotel");
        let mut event = event(json!([{ "challengeName": "CUSTOM_CHALLENGE" }]), PHONE);

        let result = issuer(sms).create_challenge(&mut event).await;

        assert!(matches!(result, Err(AuthError::InvalidChallengeMetadata(_))));
    }

    #[tokio::test]
    async fn test_missing_phone_number_fails() {
        let sms = MockSmsService::new("Exotel");
        let mut event: CreateAuthChallengeEvent =
            serde_json::from_value(json!({ "request": { "session": [] } })).unwrap();

        let result = issuer(sms.clone()).create_challenge(&mut event).await;

        assert!(matches!(result, Err(AuthError::MissingAttribute(_))));
        assert!(sms.attempts().is_empty());
    }

    #[tokio::test]
    async fn test_primary_failure_falls_back_with_identical_message() {
        let primary = MockSmsService::failing("Exotel");
        let fallback = MockSmsService::new("SNS");
        let issuer = issuer(FallbackSmsSender::new(primary.clone(), fallback.clone()));
        let mut event = event(json!([]), PHONE);

        issuer.create_challenge(&mut event).await.unwrap();

        assert_eq!(primary.attempts().len(), 1);
        assert_eq!(fallback.attempts(), primary.attempts());
        assert_eq!(event.response.private_challenge_parameters["passCode"], "004821");
    }

    #[tokio::test]
    async fn test_delivery_failure_propagates() {
        let issuer = issuer(FallbackSmsSender::new(
            MockSmsService::failing("Exotel"),
            MockSmsService::failing("SNS"),
        ));
        let mut event = event(json!([]), PHONE);

        let result = issuer.create_challenge(&mut event).await;

        assert!(matches!(result, Err(AuthError::SmsDeliveryFailed { .. })));
        assert!(event.response.challenge_metadata.is_none());
    }
}
