use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::{AuthError, AuthResult, SmsSender};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentSms {
    pub phone_number: String,
    pub message: String,
}

/// Records every send attempt and optionally fails them
#[derive(Clone)]
pub struct MockSmsService {
    name: &'static str,
    simulate_failure: bool,
    attempts: Arc<Mutex<Vec<SentSms>>>,
}

impl MockSmsService {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            simulate_failure: false,
            attempts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            simulate_failure: true,
            ..Self::new(name)
        }
    }

    pub fn attempts(&self) -> Vec<SentSms> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsSender for MockSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> AuthResult<String> {
        let count = {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(SentSms {
                phone_number: phone_number.to_string(),
                message: message.to_string(),
            });
            attempts.len()
        };

        if self.simulate_failure {
            return Err(AuthError::provider(self.name, "simulated failure"));
        }
        Ok(format!("{}-{}", self.name, count))
    }

    fn provider_name(&self) -> &str {
        self.name
    }
}
