use std::time::Duration;

use log::{info, warn};

use crate::config::{DETAILS_MAX_TOKENS, RECOMMENDATION_MAX_TOKENS};
use crate::food::api::with_timeout;
use crate::food::error::FoodError;
use crate::food::recipe::{self, RecipeResponse};
use crate::providers::traits::CompletionProvider;

const SERVICE: &str = "Recipe generation";

/// Asks a completion provider for recipes and cooking instructions.
pub struct RecipeAdvisor {
    provider: Box<dyn CompletionProvider + Send + Sync>,
    timeout: Duration,
}

impl RecipeAdvisor {
    pub fn new(provider: Box<dyn CompletionProvider + Send + Sync>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn recommend(
        &self,
        nutrient: &str,
        foods: &[String],
        preference: Option<&str>,
    ) -> Result<RecipeResponse, FoodError> {
        let prompt = recommendation_prompt(nutrient, foods, preference);
        let raw = self.ask(&prompt, RECOMMENDATION_MAX_TOKENS).await?;
        let response = recipe::parse(&raw)?;
        info!(
            "Parsed {} recipes ({} segments rejected)",
            response.records().len(),
            response.failures().len()
        );
        Ok(response)
    }

    pub async fn details(&self, recipe_name: &str) -> Result<String, FoodError> {
        self.ask(&details_prompt(recipe_name), DETAILS_MAX_TOKENS).await
    }

    async fn ask(&self, prompt: &str, max_tokens: u16) -> Result<String, FoodError> {
        with_timeout(SERVICE, self.timeout, async {
            self.provider.complete(prompt, max_tokens).await.map_err(|e| {
                warn!("Completion request failed: {}", e);
                FoodError::unavailable(SERVICE, e)
            })
        })
        .await
    }
}

pub fn recommendation_prompt(nutrient: &str, foods: &[String], preference: Option<&str>) -> String {
    let foods_list = foods.join(", ");
    let mut prompt = format!(
        "I am deficient in {nutrient}. Suggest a variety of recipes rich in {nutrient}, such as baked dishes, soups, salads, or other foods, \
         using ingredients like {foods_list}. Only include recipes that contain {nutrient}. \
         Prioritize food items, but if relevant, include up to 2 drinks or smoothies that also contain {nutrient}. \
         Each recipe should be structured as JSON with fields: 'name', 'ingredients', and 'daily_intake_percentage'. \
         Please avoid including the phrase '{nutrient}-rich' or similar nutrient-specific terms in the recipe names."
    );
    if let Some(preference) = preference.map(str::trim).filter(|p| !p.is_empty()) {
        prompt.push_str(&format!(" Every recipe must suit this dietary preference: {}.", preference));
    }
    prompt
}

pub fn details_prompt(recipe_name: &str) -> String {
    format!(
        "Provide a summary of ingredients, cooking instructions, and how to check if {} is done. \
         Include recommended internal temperatures if applicable, as in an actual internal temperature \
         (for instance, specifying 165 degrees for an example).",
        recipe_name
    )
}
