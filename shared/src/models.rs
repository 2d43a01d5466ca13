use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

// Cognito sends `null` for empty maps and lists, so these fields fall back to Default
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fields shared by every Cognito user pool trigger payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitoTriggerHeader {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_pool_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caller_context: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_source: Option<String>,
}

/// One prior challenge round echoed back by Cognito in `request.session`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResult {
    #[serde(default)]
    pub challenge_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub challenge_result: bool,
    #[serde(default)]
    pub challenge_metadata: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthChallengeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: HashMap<String, String>,
    #[serde(default)]
    pub challenge_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub session: Vec<Option<ChallengeResult>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthChallengeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub public_challenge_parameters: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub private_challenge_parameters: HashMap<String, String>,
    #[serde(default)]
    pub challenge_metadata: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAuthChallengeEvent {
    #[serde(flatten)]
    pub header: CognitoTriggerHeader,
    #[serde(default)]
    pub request: CreateAuthChallengeRequest,
    #[serde(default)]
    pub response: CreateAuthChallengeResponse,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAuthChallengeRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_attributes: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub private_challenge_parameters: HashMap<String, String>,
    #[serde(default)]
    pub challenge_answer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub client_metadata: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyAuthChallengeResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub answer_correct: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyAuthChallengeEvent {
    #[serde(flatten)]
    pub header: CognitoTriggerHeader,
    #[serde(default)]
    pub request: VerifyAuthChallengeRequest,
    #[serde(default)]
    pub response: VerifyAuthChallengeResponse,
}
