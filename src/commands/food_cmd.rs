use std::time::Duration;

use log::{info, warn};

use crate::food::advisor::RecipeAdvisor;
use crate::food::api::{format_suggestions, with_timeout, FoodSearch, VideoSearch};
use crate::food::error::FoodError;
use crate::food::filter::filter_candidates;
use crate::food::nutrient;
use crate::food::recipe::{arrange, select, RecipeRecord, Selection};

const NUTRIENT_PROMPT: &str = "Enter the nutrient you're deficient in (e.g., Iron, Calcium, Vitamin C): ";
const PREFERENCE_PROMPT: &str = "Any dietary preference? (e.g., vegetarian, dairy-free; press Enter to skip): ";
const SELECTION_PROMPT: &str = "\nEnter the number of the recipe you want to use, or type the recipe name: ";
const NO_RECIPES_MESSAGE: &str = "No recipes found with the specified nutrient.";
const NO_MATCH_MESSAGE: &str = "No close match found. Please enter a valid recipe name or number.";

/// Terminal surface the session talks through. `read_line` returns `None`
/// once the user ends input.
pub trait Console {
    fn read_line(&mut self, prompt: &str) -> Option<String>;
    fn heading(&mut self, text: &str);
    fn say(&mut self, text: &str);
    fn warn(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    Completed { recipe: String },
    NoFoods,
    NoRecipes,
    Cancelled,
}

/// One pass of nutrient → foods → recipes → chosen recipe → details and videos.
pub struct FoodSession {
    foods: Box<dyn FoodSearch>,
    advisor: RecipeAdvisor,
    videos: Box<dyn VideoSearch>,
    timeout: Duration,
}

impl FoodSession {
    pub fn new(
        foods: Box<dyn FoodSearch>,
        advisor: RecipeAdvisor,
        videos: Box<dyn VideoSearch>,
        timeout: Duration,
    ) -> Self {
        Self {
            foods,
            advisor,
            videos,
            timeout,
        }
    }

    pub async fn run(&self, console: &mut dyn Console, nutrient: Option<String>) -> SessionOutcome {
        let nutrient = match nutrient.filter(|n| !n.trim().is_empty()) {
            Some(nutrient) => nutrient.trim().to_string(),
            None => match ask_nutrient(console) {
                Some(nutrient) => nutrient,
                None => return SessionOutcome::Cancelled,
            },
        };
        let canonical = nutrient::normalize(&nutrient);
        info!("Session started for '{}' (searching as '{}')", nutrient, canonical);

        console.say("\nFinding foods rich in that nutrient...");
        let foods = match self.find_foods(&canonical).await {
            Ok(foods) => foods,
            Err(e) => {
                info!("Food lookup ended the session: {}", e);
                console.warn(&format!(
                    "No specific foods found for {}. Please try a different nutrient or check the USDA database.",
                    nutrient
                ));
                return SessionOutcome::NoFoods;
            }
        };
        console.heading(&format!("Foods rich in {}:", nutrient));
        for food in &foods {
            console.say(&format!("- {}", food));
        }

        let preference = match console.read_line(PREFERENCE_PROMPT) {
            Some(preference) => preference.trim().to_string(),
            None => return SessionOutcome::Cancelled,
        };
        let preference = Some(preference.as_str()).filter(|p| !p.is_empty());

        console.say("\nFetching recipe recommendations...");
        let recipes = match self.advisor.recommend(&nutrient, &foods, preference).await {
            Ok(response) => arrange(response),
            Err(e) => {
                info!("Recommendation ended the session: {}", e);
                Vec::new()
            }
        };
        if recipes.is_empty() {
            console.warn(NO_RECIPES_MESSAGE);
            return SessionOutcome::NoRecipes;
        }

        console.heading("Recipe Recommendations:");
        for (index, recipe) in recipes.iter().enumerate() {
            console.say(&format_recipe(index + 1, recipe));
        }

        let chosen = match choose_recipe(console, &recipes) {
            Some(recipe) => recipe,
            None => return SessionOutcome::Cancelled,
        };

        console.say("\nFetching recipe details and a YouTube tutorial...");
        let (details, videos) = tokio::join!(
            self.advisor.details(&chosen.name),
            with_timeout("YouTube search", self.timeout, self.videos.search_videos(&chosen.name)),
        );

        console.heading("Recipe Details:");
        match details {
            Ok(details) => console.say(&details),
            Err(e) => {
                warn!("Recipe details unavailable: {}", e);
                console.warn("Could not fetch recipe details right now. Please try again later.");
            }
        }

        let videos = videos.unwrap_or_else(|e| {
            warn!("Video lookup failed: {}", e);
            Vec::new()
        });
        console.say(&format!("\n{}", format_suggestions(&videos)));

        SessionOutcome::Completed {
            recipe: chosen.name.clone(),
        }
    }

    async fn find_foods(&self, nutrient: &str) -> Result<Vec<String>, FoodError> {
        let raw = with_timeout("USDA FoodData Central", self.timeout, self.foods.search_foods(nutrient)).await?;
        let foods = filter_candidates(&raw);
        info!("Kept {} of {} foods for '{}'", foods.len(), raw.len(), nutrient);
        if foods.is_empty() {
            return Err(FoodError::NoFoodsFound(nutrient.to_string()));
        }
        Ok(foods)
    }
}

fn ask_nutrient(console: &mut dyn Console) -> Option<String> {
    loop {
        let answer = console.read_line(NUTRIENT_PROMPT)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            return Some(answer.to_string());
        }
    }
}

fn choose_recipe<'a>(console: &mut dyn Console, recipes: &'a [RecipeRecord]) -> Option<&'a RecipeRecord> {
    loop {
        let token = console.read_line(SELECTION_PROMPT)?;
        match select(recipes, &token) {
            Ok(selection) => {
                if let Selection::Fuzzy { record, score } = selection {
                    info!("'{}' matched '{}' ({:.2})", token.trim(), record.name, score);
                    console.say(&format!("Using closest match: {}", record.name));
                }
                return Some(selection.record());
            }
            Err(_) => console.warn(NO_MATCH_MESSAGE),
        }
    }
}

pub fn format_recipe(number: usize, recipe: &RecipeRecord) -> String {
    if let Some(raw) = &recipe.raw_text {
        return format!("{}. {}\n", number, raw);
    }
    format!(
        "{}. {}\n   Ingredients: {}\n   Daily Intake Percentage: {}\n",
        number,
        recipe.name,
        recipe.ingredients.join(", "),
        recipe.daily_intake_percentage.as_deref().unwrap_or("unknown")
    )
}
