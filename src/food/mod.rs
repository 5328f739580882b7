pub mod advisor;
pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod nutrient;
pub mod recipe;

pub use advisor::RecipeAdvisor;
pub use config::FoodConfig;
pub use error::FoodError;
pub use recipe::{RecipeRecord, RecipeResponse};
