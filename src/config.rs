use std::env;
use std::time::Duration;

use crate::food::config::timeout_from_env;

pub const RECOMMENDATION_MAX_TOKENS: u16 = 700;
pub const DETAILS_MAX_TOKENS: u16 = 500;

const DEFAULT_SYSTEM_MESSAGE: &str =
    "You are a helpful cooking assistant who knows nutrition and writes practical home recipes.";

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub model: String,
    pub api_url: String,
    pub temperature: f32,
    pub system_message: String,
    pub request_timeout: Duration,
}

impl ProviderConfig {
    pub fn from_env(provider: &str) -> Self {
        let prefix = provider.to_uppercase();

        // Get model from env or use default
        let model = env::var(format!("{}_MODEL", prefix)).unwrap_or_else(|_| match provider {
            "deepseek" => "deepseek-chat".to_string(),
            _ => "gpt-3.5-turbo".to_string(),
        });

        // Get API base URL from env or use default
        let api_url = env::var(format!("{}_API_URL", prefix)).unwrap_or_else(|_| match provider {
            "deepseek" => "https://api.deepseek.com/v1".to_string(),
            _ => "https://api.openai.com/v1".to_string(),
        });

        // Get temperature from env or use default
        let temperature = env::var(format!("{}_TEMPERATURE", prefix))
            .ok()
            .and_then(|t| t.parse().ok())
            .unwrap_or(0.7);

        Self {
            model,
            api_url,
            temperature,
            system_message: DEFAULT_SYSTEM_MESSAGE.to_string(),
            request_timeout: timeout_from_env(),
        }
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        if let Some(timeout) = timeout {
            self.request_timeout = timeout;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides() {
        let config = ProviderConfig::from_env("deepseek")
            .with_model(Some("custom-model".to_string()))
            .with_timeout(Some(Duration::from_secs(3)));
        assert_eq!(config.model, "custom-model");
        assert_eq!(config.request_timeout, Duration::from_secs(3));

        let unchanged = config.clone().with_model(None).with_timeout(None);
        assert_eq!(unchanged.model, "custom-model");
        assert_eq!(unchanged.request_timeout, Duration::from_secs(3));
    }
}
