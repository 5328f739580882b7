pub mod commands;
pub mod config;
pub mod food;
pub mod providers;

// Re-export commonly used items
pub use commands::{FoodSession, SessionOutcome};
pub use food::{FoodConfig, FoodError, RecipeAdvisor, RecipeRecord};
