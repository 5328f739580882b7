use async_trait::async_trait;
use anyhow::{Result, anyhow};
use crate::config::ProviderConfig;
use crate::providers::traits::CompletionProvider;
use reqwest::Client;
use serde_json::{json, Value};

#[derive(Clone)]
pub struct DeepSeekProvider {
    api_key: String,
    client: Client,
    config: ProviderConfig,
}

#[async_trait]
impl CompletionProvider for DeepSeekProvider {
    async fn new(api_key: String, config: ProviderConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(anyhow!("DeepSeek API key is empty"));
        }
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            api_key,
            client,
            config,
        })
    }

    async fn complete(&self, prompt: &str, max_tokens: u16) -> Result<String> {
        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));

        let response = self.client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "model": self.config.model,
                "messages": [
                    {
                        "role": "system",
                        "content": self.config.system_message
                    },
                    {
                        "role": "user",
                        "content": prompt
                    }
                ],
                "temperature": self.config.temperature,
                "max_tokens": max_tokens
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(anyhow!("API request failed: Status {}, Body: {}", status, error_text));
        }

        let response_json: Value = response.json().await?;

        // Check for API-level errors
        if let Some(error) = response_json.get("error") {
            return Err(anyhow!("API returned error: {}", error));
        }

        response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(|s| s.trim().to_string())
            .ok_or_else(|| {
                let debug_json = serde_json::to_string_pretty(&response_json).unwrap_or_default();
                anyhow!("Invalid response format. Response JSON: {}", debug_json)
            })
    }

    async fn get_model_info(&self) -> Result<String> {
        Ok(self.config.model.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(api_url: String) -> ProviderConfig {
        ProviderConfig {
            model: "deepseek-chat".to_string(),
            api_url,
            temperature: 0.2,
            system_message: "You are a cook.".to_string(),
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn test_complete() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "  Kale Soup  "}}]
            })))
            .mount(&mock_server)
            .await;

        let provider = DeepSeekProvider::new("test-key".to_string(), test_config(mock_server.uri()))
            .await
            .unwrap();
        assert_eq!(provider.complete("soup?", 100).await.unwrap(), "Kale Soup");
        assert_eq!(provider.get_model_info().await.unwrap(), "deepseek-chat");
    }

    #[tokio::test]
    async fn test_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let provider = DeepSeekProvider::new("test-key".to_string(), test_config(mock_server.uri()))
            .await
            .unwrap();
        let err = provider.complete("soup?", 100).await.unwrap_err();
        assert!(err.to_string().contains("overloaded"));
    }

    #[tokio::test]
    async fn test_empty_key_is_rejected() {
        let result = DeepSeekProvider::new(" ".to_string(), test_config("http://127.0.0.1:9".to_string())).await;
        assert!(result.is_err());
    }
}
