use std::cmp::Reverse;

use similar::TextDiff;

use super::{RecipeRecord, RecipeResponse};
use crate::food::error::FoodError;

pub const MAX_RECIPES: usize = 10;
pub const MAX_BEVERAGE_RECIPES: usize = 2;
pub const FUZZY_CUTOFF: f32 = 0.5;

const BEVERAGE_KEYWORDS: &[&str] = &["smoothie", "drink", "juice"];

/// How a selection token was resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    Index(&'a RecipeRecord),
    Fuzzy { record: &'a RecipeRecord, score: f32 },
}

impl<'a> Selection<'a> {
    pub fn record(&self) -> &'a RecipeRecord {
        match self {
            Selection::Index(record) => record,
            Selection::Fuzzy { record, .. } => record,
        }
    }
}

/// Sorts by daily intake percentage, highest first. Records without an integer
/// percentage go last; the sort is stable so ties keep their relative order.
pub fn rank(mut records: Vec<RecipeRecord>) -> Vec<RecipeRecord> {
    records.sort_by_key(|record| Reverse(record.percentage_value()));
    records
}

pub fn is_beverage(record: &RecipeRecord) -> bool {
    let name = record.name.to_lowercase();
    BEVERAGE_KEYWORDS.iter().any(|k| name.contains(k))
}

/// Keeps at most [`MAX_RECIPES`] dishes and lets up to [`MAX_BEVERAGE_RECIPES`]
/// drinks fill whatever room is left. Survivors keep their relative order.
pub fn cap_beverages(records: Vec<RecipeRecord>) -> Vec<RecipeRecord> {
    let dishes = records.iter().filter(|r| !is_beverage(r)).count().min(MAX_RECIPES);
    let mut drink_room = MAX_BEVERAGE_RECIPES.min(MAX_RECIPES - dishes);
    let mut dish_room = dishes;

    records
        .into_iter()
        .filter(|record| {
            let room = if is_beverage(record) {
                &mut drink_room
            } else {
                &mut dish_room
            };
            if *room == 0 {
                return false;
            }
            *room -= 1;
            true
        })
        .collect()
}

/// Produces the list shown to the user: beverages capped, structured
/// responses ranked, free text left in presentation order.
pub fn arrange(response: RecipeResponse) -> Vec<RecipeRecord> {
    let structured = response.is_structured();
    let records = cap_beverages(response.into_records());
    if structured {
        rank(records)
    } else {
        records
    }
}

/// Resolves a 1-based index or a recipe name to one of `records`.
///
/// Numbers in range win outright. Anything else is compared against every name,
/// ignoring case, and the best match at or above [`FUZZY_CUTOFF`] is returned.
pub fn select<'a>(records: &'a [RecipeRecord], token: &str) -> Result<Selection<'a>, FoodError> {
    let token = token.trim();

    if let Ok(index) = token.parse::<usize>() {
        if (1..=records.len()).contains(&index) {
            return Ok(Selection::Index(&records[index - 1]));
        }
    }

    let wanted = token.to_lowercase();
    let mut best: Option<(&RecipeRecord, f32)> = None;
    if !wanted.is_empty() {
        for record in records {
            let score = similarity(&wanted, &record.name.to_lowercase());
            if score < FUZZY_CUTOFF {
                continue;
            }
            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((record, score));
            }
        }
    }

    best.map(|(record, score)| Selection::Fuzzy { record, score })
        .ok_or_else(|| FoodError::SelectionNotFound(token.to_string()))
}

fn similarity(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(records: &[RecipeRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn sample() -> Vec<RecipeRecord> {
        vec![
            RecipeRecord::new("Kale Soup", &["kale"], "40%"),
            RecipeRecord::new("Lentil Curry", &["lentils"], "35%"),
            RecipeRecord::new("Spinach Frittata", &["spinach", "eggs"], "20%"),
        ]
    }

    #[test]
    fn test_rank_puts_unparsable_last() {
        let records = vec![
            RecipeRecord::new("a", &["x"], "10%"),
            RecipeRecord::new("b", &["x"], "50%"),
            RecipeRecord::new("c", &["x"], "x%"),
        ];
        let ranked = rank(records);
        let percentages: Vec<&str> = ranked
            .iter()
            .filter_map(|r| r.daily_intake_percentage.as_deref())
            .collect();
        assert_eq!(percentages, vec!["50%", "10%", "x%"]);
    }

    #[test]
    fn test_rank_is_stable() {
        let records = vec![
            RecipeRecord::new("first bad", &["x"], "n/a"),
            RecipeRecord::new("tie one", &["x"], "30%"),
            RecipeRecord::new("second bad", &["x"], "lots"),
            RecipeRecord::new("tie two", &["x"], "30%"),
            RecipeRecord::new("top", &["x"], "45%"),
        ];
        assert_eq!(
            names(&rank(records)),
            vec!["top", "tie one", "tie two", "first bad", "second bad"]
        );
    }

    #[test]
    fn test_cap_beverages() {
        let records = vec![
            RecipeRecord::new("Green Smoothie", &["kale"], "20%"),
            RecipeRecord::new("Bean Salad", &["beans"], "30%"),
            RecipeRecord::new("Orange Juice", &["orange"], "90%"),
            RecipeRecord::new("Chocolate Drink", &["cocoa"], "10%"),
            RecipeRecord::new("Tofu Bowl", &["tofu"], "25%"),
        ];
        assert_eq!(
            names(&cap_beverages(records)),
            vec!["Green Smoothie", "Bean Salad", "Orange Juice", "Tofu Bowl"]
        );
    }

    #[test]
    fn test_cap_beverages_prefers_dishes_when_full() {
        let mut records = vec![RecipeRecord::new("Berry Smoothie", &["berries"], "5%")];
        records.extend((1..=11).map(|i| RecipeRecord::new(&format!("Dish {}", i), &["x"], "1%")));

        let capped = cap_beverages(records);
        assert_eq!(capped.len(), MAX_RECIPES);
        assert!(capped.iter().all(|r| !is_beverage(r)));
        assert_eq!(capped.last().map(|r| r.name.as_str()), Some("Dish 10"));
    }

    #[test]
    fn test_arrange_leaves_free_text_order() {
        let free_text = RecipeResponse::FreeText(vec![
            RecipeRecord { name: "Stew".to_string(), ..Default::default() },
            RecipeRecord { name: "Salad".to_string(), ..Default::default() },
        ]);
        assert_eq!(names(&arrange(free_text)), vec!["Stew", "Salad"]);

        let structured = RecipeResponse::JsonObjects {
            records: vec![
                RecipeRecord::new("Low", &["x"], "5%"),
                RecipeRecord::new("High", &["x"], "60%"),
            ],
            failures: Vec::new(),
        };
        assert_eq!(names(&arrange(structured)), vec!["High", "Low"]);
    }

    #[test]
    fn test_select_by_index() {
        let records = sample();
        assert_eq!(select(&records, "1").unwrap(), Selection::Index(&records[0]));
        assert_eq!(select(&records, " 3 ").unwrap().record(), &records[2]);
    }

    #[test]
    fn test_select_by_fuzzy_name() {
        let records = sample();
        let selection = select(&records, "Kale Soupp").unwrap();
        assert!(matches!(selection, Selection::Fuzzy { .. }));
        assert_eq!(selection.record(), &records[0]);
        assert_eq!(select(&records, "lentil curry").unwrap().record(), &records[1]);
        assert_eq!(select(&records, "spinach fritata").unwrap().record(), &records[2]);
    }

    #[test]
    fn test_select_not_found() {
        let records = sample();
        assert_eq!(
            select(&records, "Nonexistent"),
            Err(FoodError::SelectionNotFound("Nonexistent".to_string()))
        );
        assert!(select(&records, "").is_err());
        assert!(select(&records, "0").is_err());
        assert!(select(&records, "4").is_err());
        assert!(select(&[], "1").is_err());
    }
}
