use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

use crate::{AuthError, AuthResult};

pub const PASS_CODE_LENGTH: usize = 6;

const CHALLENGE_METADATA_PREFIX: &str = "CODE-";

fn pass_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"CODE-(\d+)").expect("pass code pattern is valid"))
}

/// Generate a 6-digit pass code, one uniformly random digit at a time.
/// Leading zeros are kept.
pub fn generate_pass_code() -> String {
    let mut rng = rand::thread_rng();
    (0..PASS_CODE_LENGTH)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Marker stored in `challengeMetadata` so the next invocation can recover the code
pub fn challenge_metadata(pass_code: &str) -> String {
    format!("{}{}", CHALLENGE_METADATA_PREFIX, pass_code)
}

/// Recover the pass code embedded in a previous `challengeMetadata` value
pub fn extract_pass_code(metadata: &str) -> AuthResult<String> {
    pass_code_pattern()
        .captures(metadata)
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().to_string())
        .ok_or_else(|| {
            AuthError::InvalidChallengeMetadata(format!(
                "no {}<digits> marker in {:?}",
                CHALLENGE_METADATA_PREFIX, metadata
            ))
        })
}

/// Compare a submitted answer with the issued pass code in constant time.
/// The answer must match exactly; surrounding whitespace is a mismatch.
pub fn pass_codes_match(answer: &str, expected: &str) -> bool {
    constant_time_eq(answer, expected)
}

/// Constant-time string comparison to prevent timing attacks
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (a_byte, b_byte) in a.bytes().zip(b.bytes()) {
        result |= a_byte ^ b_byte;
    }
    result == 0
}

/// Mask a phone number for logging, keeping the last 4 digits
pub fn mask_phone_number(phone: &str) -> String {
    let visible = 4;
    let len = phone.chars().count();
    if len <= visible {
        return "*".repeat(len);
    }

    let last_digits: String = phone.chars().skip(len - visible).collect();
    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(len - visible - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(len - visible), last_digits)
    }
}
