use async_trait::async_trait;
use log::{debug, info};

use super::{http_client, FoodSearch};
use crate::food::config::FoodConfig;
use crate::food::error::FoodError;

const SERVICE: &str = "USDA FoodData Central";
const DATA_TYPE: &str = "Survey (FNDDS)";

#[derive(Debug)]
pub struct UsdaClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl UsdaClient {
    pub fn new(config: &FoodConfig) -> Self {
        Self {
            api_key: config.usda_api_key.clone(),
            base_url: config.usda_api_url.trim_end_matches('/').to_string(),
            client: http_client(config.request_timeout),
        }
    }

    /// Food descriptions matching `nutrient`, in the order the database ranks them.
    pub async fn food_descriptions(&self, nutrient: &str) -> Result<Vec<String>, FoodError> {
        let url = format!("{}/foods/search", self.base_url);
        info!("Searching {} for '{}'", SERVICE, nutrient);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("query", nutrient),
                ("api_key", self.api_key.as_str()),
                ("dataType", DATA_TYPE),
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

        let descriptions: Vec<String> = data
            .get("foods")
            .and_then(|f| f.as_array())
            .map(|foods| {
                foods
                    .iter()
                    .filter_map(|food| food.get("description").and_then(|d| d.as_str()))
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        debug!("{} returned {} foods", SERVICE, descriptions.len());
        Ok(descriptions)
    }
}

#[async_trait]
impl FoodSearch for UsdaClient {
    async fn search_foods(&self, nutrient: &str) -> Result<Vec<String>, FoodError> {
        self.food_descriptions(nutrient).await
    }
}
