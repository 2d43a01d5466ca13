use crate::AuthError;

/// Configuration for resource naming at runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub app_name: String,
    pub environment: String,
}

impl RuntimeConfig {
    /// APP_NAME and ENVIRONMENT are set on the Lambda at deploy time
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_name = lookup("APP_NAME")
            .ok_or_else(|| AuthError::ConfigurationError("APP_NAME not set".to_string()))?;
        let environment = lookup("ENVIRONMENT")
            .ok_or_else(|| AuthError::ConfigurationError("ENVIRONMENT not set".to_string()))?;

        Ok(Self {
            app_name,
            environment,
        })
    }

    /// SSM parameter path following the /{APP_NAME}/{ENVIRONMENT}/{NAME} pattern
    pub fn parameter_name(&self, name: &str) -> String {
        format!("/{}/{}/{}", self.app_name, self.environment, name)
    }
}
