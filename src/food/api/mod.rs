pub mod usda;
pub mod youtube;

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;

use crate::food::error::FoodError;

// Re-export common types
pub use usda::UsdaClient;
pub use youtube::{format_suggestions, VideoSuggestion, YoutubeClient};

/// Source of raw food descriptions for a nutrient, best matches first.
#[async_trait]
pub trait FoodSearch: Send + Sync {
    async fn search_foods(&self, nutrient: &str) -> Result<Vec<String>, FoodError>;
}

/// Source of cooking videos for a recipe name.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search_videos(&self, recipe_name: &str) -> Result<Vec<VideoSuggestion>, FoodError>;
}

/// Bounds `call` by `limit`, reporting expiry as the named service being unavailable.
pub async fn with_timeout<T, F>(service: &str, limit: Duration, call: F) -> Result<T, FoodError>
where
    F: Future<Output = Result<T, FoodError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| FoodError::unavailable(service, format!("no response within {:?}", limit)))?
}

pub(crate) fn http_client(limit: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(limit)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
