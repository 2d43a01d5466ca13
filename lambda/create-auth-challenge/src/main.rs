use aws_config::BehaviorVersion;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use std::sync::Arc;
use tracing::{error, info};

use auth_shared::{
    load_exotel_credentials, ChallengeIssuer, CreateAuthChallengeEvent, ExotelSmsService,
    FallbackSmsSender, RandomCodeGenerator, SmsConfig, SmsTemplate, SnsSmsService,
};

type SmsChallengeIssuer =
    ChallengeIssuer<FallbackSmsSender<ExotelSmsService, SnsSmsService>, RandomCodeGenerator>;

async fn function_handler(
    issuer: &SmsChallengeIssuer,
    event: LambdaEvent<CreateAuthChallengeEvent>,
) -> Result<CreateAuthChallengeEvent, Error> {
    let mut response_event = event.payload;

    // Any failure fails the invocation so Cognito never sees a fabricated code
    match issuer.create_challenge(&mut response_event).await {
        Ok(_) => {
            info!("Successfully created auth challenge");
            Ok(response_event)
        }
        Err(e) => {
            error!("Failed to create auth challenge: {}", e);
            Err(e.into())
        }
    }
}

async fn build_issuer() -> Result<SmsChallengeIssuer, Error> {
    let sms_config = SmsConfig::from_env()?;

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let ssm_client = aws_sdk_ssm::Client::new(&config);
    let sns_client = aws_sdk_sns::Client::new(&config);

    let credentials =
        load_exotel_credentials(&ssm_client, &sms_config.credentials_parameter).await?;

    let exotel = ExotelSmsService::new(reqwest::Client::new(), &sms_config, credentials);
    let sns = SnsSmsService::new(sns_client, &sms_config);

    info!(
        "SMS delivery configured: Exotel account {} with SNS fallback",
        sms_config.exotel_account_sid
    );

    Ok(ChallengeIssuer::new(
        FallbackSmsSender::new(exotel, sns),
        RandomCodeGenerator,
        SmsTemplate::from_config(&sms_config),
        Some(sms_config.test_phone_number.clone()),
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let issuer = Arc::new(build_issuer().await?);

    run(service_fn(move |event| {
        let issuer = issuer.clone();
        async move { function_handler(&issuer, event).await }
    }))
    .await
}
