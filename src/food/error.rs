use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FoodError {
    #[error("No foods found for {0}")]
    NoFoodsFound(String),
    #[error("No recipes found in the response")]
    NoRecipesFound,
    #[error("Failed to parse recipe segment {segment}: {reason}")]
    RecipeParseFailure { segment: usize, reason: String },
    #[error("No recipe matches '{0}'")]
    SelectionNotFound(String),
    #[error("{service} unavailable: {reason}")]
    ServiceUnavailable { service: String, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FoodError {
    pub fn unavailable(service: &str, reason: impl ToString) -> Self {
        FoodError::ServiceUnavailable {
            service: service.to_string(),
            reason: reason.to_string(),
        }
    }
}
