use auth_shared::{mask_phone_number, PHONE_NUMBER_ATTRIBUTE};
use aws_lambda_events::event::cognito::CognitoEventUserPoolsPreSignup;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

async fn function_handler(
    event: LambdaEvent<CognitoEventUserPoolsPreSignup>,
) -> Result<CognitoEventUserPoolsPreSignup, Error> {
    let mut response_event = event.payload;
    confirm_sign_up(&mut response_event);
    Ok(response_event)
}

/// Every sign-up is confirmed immediately; the phone number stays unverified
/// until the SMS challenge proves possession.
fn confirm_sign_up(event: &mut CognitoEventUserPoolsPreSignup) {
    let phone_number = event
        .request
        .user_attributes
        .get(PHONE_NUMBER_ATTRIBUTE)
        .map(|phone| mask_phone_number(phone))
        .unwrap_or_else(|| "<none>".to_string());

    event.response.auto_confirm_user = true;
    event.response.auto_verify_phone = false;

    info!("Auto-confirmed sign-up for phone number: {}", phone_number);
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}
