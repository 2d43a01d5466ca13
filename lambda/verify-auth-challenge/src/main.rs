use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{info, warn};

use auth_shared::{
    mask_phone_number, pass_codes_match, VerifyAuthChallengeEvent, PASS_CODE_PARAMETER,
    PHONE_NUMBER_ATTRIBUTE,
};

async fn function_handler(
    event: LambdaEvent<VerifyAuthChallengeEvent>,
) -> Result<VerifyAuthChallengeEvent, Error> {
    let mut response_event = event.payload;
    verify_challenge_answer(&mut response_event);
    Ok(response_event)
}

/// Compare the user's answer with the pass code create-auth-challenge stored
/// in `privateChallengeParameters`
fn verify_challenge_answer(event: &mut VerifyAuthChallengeEvent) {
    let phone_number = event
        .request
        .user_attributes
        .get(PHONE_NUMBER_ATTRIBUTE)
        .map(|phone| mask_phone_number(phone))
        .unwrap_or_else(|| "<none>".to_string());

    let expected = event
        .request
        .private_challenge_parameters
        .get(PASS_CODE_PARAMETER);

    let answer_correct = match (event.request.challenge_answer.as_deref(), expected) {
        (Some(answer), Some(expected)) => pass_codes_match(answer, expected),
        (None, _) => {
            warn!("No challenge answer provided for {}", phone_number);
            false
        }
        (_, None) => {
            warn!("No pass code in private challenge parameters for {}", phone_number);
            false
        }
    };

    info!(
        "Challenge answer for {} is {}",
        phone_number,
        if answer_correct { "correct" } else { "incorrect" }
    );
    event.response.answer_correct = answer_correct;
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
