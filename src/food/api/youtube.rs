use async_trait::async_trait;
use log::info;

use super::{http_client, VideoSearch};
use crate::food::config::FoodConfig;
use crate::food::error::FoodError;

const SERVICE: &str = "YouTube search";
const MAX_RESULTS: &str = "3";
const NOT_FOUND_MESSAGE: &str = "No specific tutorial found. Try searching YouTube for more options.";

#[derive(Debug, Clone, PartialEq)]
pub struct VideoSuggestion {
    pub title: String,
    pub url: String,
}

#[derive(Debug)]
pub struct YoutubeClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl YoutubeClient {
    pub fn new(config: &FoodConfig) -> Self {
        Self {
            api_key: config.youtube_api_key.clone(),
            base_url: config.youtube_api_url.trim_end_matches('/').to_string(),
            client: http_client(config.request_timeout),
        }
    }

    pub async fn tutorials(&self, recipe_name: &str) -> Result<Vec<VideoSuggestion>, FoodError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FoodError::unavailable(SERVICE, "YOUTUBE_API_KEY not set"))?;

        let url = format!("{}/search", self.base_url);
        let search_query = format!("{} recipe", recipe_name);
        info!("Searching YouTube for '{}'", search_query);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", search_query.as_str()),
                ("type", "video"),
                ("key", api_key),
                ("maxResults", MAX_RESULTS),
            ])
            .send()
            .await
            .map_err(|e| FoodError::unavailable(SERVICE, format!("Failed to send request: {}", e)))?;

        if !response.status().is_success() {
            return Err(FoodError::unavailable(
                SERVICE,
                format!("API request failed with status: {}", response.status()),
            ));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FoodError::unavailable(SERVICE, format!("Failed to parse response: {}", e)))?;

        let suggestions = data
            .get("items")
            .and_then(|i| i.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| {
                        let video_id = item.get("id")?.get("videoId")?.as_str()?;
                        let title = item.get("snippet")?.get("title")?.as_str()?;
                        Some(VideoSuggestion {
                            title: title.to_string(),
                            url: format!("https://www.youtube.com/watch?v={}", video_id),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(suggestions)
    }
}

#[async_trait]
impl VideoSearch for YoutubeClient {
    async fn search_videos(&self, recipe_name: &str) -> Result<Vec<VideoSuggestion>, FoodError> {
        self.tutorials(recipe_name).await
    }
}

/// Text block listing the suggestions, or the fixed "not found" line when there are none.
pub fn format_suggestions(suggestions: &[VideoSuggestion]) -> String {
    if suggestions.is_empty() {
        return NOT_FOUND_MESSAGE.to_string();
    }
    let entries: Vec<String> = suggestions
        .iter()
        .map(|s| format!("{}\nWatch here: {}", s.title, s.url))
        .collect();
    format!("Suggested YouTube Tutorials:\n{}", entries.join("\n\n"))
}
