pub mod parser;
pub mod ranking;

use crate::food::error::FoodError;

pub use parser::parse;
pub use ranking::{arrange, cap_beverages, rank, select, Selection};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeRecord {
    pub name: String,
    pub ingredients: Vec<String>,
    pub daily_intake_percentage: Option<String>,
    /// Original block for records recovered from free text.
    pub raw_text: Option<String>,
}

impl RecipeRecord {
    pub fn new(name: &str, ingredients: &[&str], daily_intake_percentage: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            daily_intake_percentage: Some(daily_intake_percentage.to_string()),
            raw_text: None,
        }
    }

    /// Integer value of the daily intake percentage, `None` when absent or not an integer.
    pub fn percentage_value(&self) -> Option<i64> {
        let text = self.daily_intake_percentage.as_deref()?.trim();
        let number = text.strip_suffix('%').unwrap_or(text);
        number.trim().parse().ok()
    }
}

/// Recipes recovered from a generated response, tagged with the shape that produced them.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeResponse {
    /// The whole response was a JSON array of recipe objects.
    JsonArray {
        records: Vec<RecipeRecord>,
        failures: Vec<FoodError>,
    },
    /// Blank-line separated JSON objects.
    JsonObjects {
        records: Vec<RecipeRecord>,
        failures: Vec<FoodError>,
    },
    /// Plain text blocks, kept in presentation order.
    FreeText(Vec<RecipeRecord>),
}

impl RecipeResponse {
    pub fn records(&self) -> &[RecipeRecord] {
        match self {
            RecipeResponse::JsonArray { records, .. } => records,
            RecipeResponse::JsonObjects { records, .. } => records,
            RecipeResponse::FreeText(records) => records,
        }
    }

    pub fn failures(&self) -> &[FoodError] {
        match self {
            RecipeResponse::JsonArray { failures, .. } => failures,
            RecipeResponse::JsonObjects { failures, .. } => failures,
            RecipeResponse::FreeText(_) => &[],
        }
    }

    /// Whether the records carry structured percentages worth ranking.
    pub fn is_structured(&self) -> bool {
        !matches!(self, RecipeResponse::FreeText(_))
    }

    pub fn into_records(self) -> Vec<RecipeRecord> {
        match self {
            RecipeResponse::JsonArray { records, .. } => records,
            RecipeResponse::JsonObjects { records, .. } => records,
            RecipeResponse::FreeText(records) => records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_value() {
        assert_eq!(RecipeRecord::new("a", &["x"], "40%").percentage_value(), Some(40));
        assert_eq!(RecipeRecord::new("a", &["x"], " 15 % ").percentage_value(), Some(15));
        assert_eq!(RecipeRecord::new("a", &["x"], "25").percentage_value(), Some(25));
        assert_eq!(RecipeRecord::new("a", &["x"], "x%").percentage_value(), None);
        assert_eq!(RecipeRecord::new("a", &["x"], "12.5%").percentage_value(), None);

        let free_text = RecipeRecord {
            name: "Stew".to_string(),
            ..Default::default()
        };
        assert_eq!(free_text.percentage_value(), None);
    }
}
