use anyhow::Result;
use async_trait::async_trait;

use crate::config::ProviderConfig;

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn new(api_key: String, config: ProviderConfig) -> Result<Self>
    where
        Self: Sized;

    async fn complete(&self, prompt: &str, max_tokens: u16) -> Result<String>;

    async fn get_model_info(&self) -> Result<String>;
}
