use std::collections::HashSet;

pub const MAX_FOODS: usize = 10;
pub const MAX_BEVERAGES: usize = 2;

const EXCLUDED_KEYWORDS: &[&str] = &["formula", "powder", "supplement", "infant", "baby"];
const BEVERAGE_KEYWORDS: &[&str] = &["smoothie", "drink"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodCategory {
    Excluded,
    Beverage,
    Standard,
}

pub fn categorize(description: &str) -> FoodCategory {
    let description = description.to_lowercase();
    if EXCLUDED_KEYWORDS.iter().any(|k| description.contains(k)) {
        FoodCategory::Excluded
    } else if BEVERAGE_KEYWORDS.iter().any(|k| description.contains(k)) {
        FoodCategory::Beverage
    } else {
        FoodCategory::Standard
    }
}

/// Builds the food shortlist from ranked search results, keeping first-seen order.
///
/// Non-food entries are skipped, beverages are capped at [`MAX_BEVERAGES`] and
/// duplicates (compared case-insensitively) are dropped. Stops at [`MAX_FOODS`].
/// A beverage slot is spent as soon as a beverage passes the cap check, even
/// when it then turns out to be a duplicate.
pub fn filter_candidates<S: AsRef<str>>(raw_candidates: &[S]) -> Vec<String> {
    let mut foods = Vec::new();
    let mut seen = HashSet::new();
    let mut beverage_count = 0;

    for candidate in raw_candidates {
        let description = candidate.as_ref();
        match categorize(description) {
            FoodCategory::Excluded => continue,
            FoodCategory::Beverage => {
                if beverage_count >= MAX_BEVERAGES {
                    continue;
                }
                beverage_count += 1;
            }
            FoodCategory::Standard => {}
        }

        if seen.insert(description.to_lowercase()) {
            foods.push(description.to_string());
        }

        if foods.len() >= MAX_FOODS {
            break;
        }
    }

    foods
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("Infant formula, powder"), FoodCategory::Excluded);
        assert_eq!(categorize("Baby food, spinach"), FoodCategory::Excluded);
        assert_eq!(categorize("Fruit smoothie, with yogurt"), FoodCategory::Beverage);
        assert_eq!(categorize("Energy DRINK"), FoodCategory::Beverage);
        assert_eq!(categorize("Spinach, raw"), FoodCategory::Standard);
    }

    #[test]
    fn test_excluded_and_duplicates_are_removed() {
        let raw = [
            "Spinach, raw",
            "Protein powder",
            "SPINACH, RAW",
            "Lentils, cooked",
            "Iron supplement",
            "Infant cereal",
            "Lentils, cooked",
        ];
        assert_eq!(filter_candidates(&raw), vec!["Spinach, raw", "Lentils, cooked"]);
    }

    #[test]
    fn test_beverages_are_capped_in_first_seen_order() {
        let raw = [
            "Orange juice drink",
            "Kale",
            "Berry smoothie",
            "Mango smoothie",
            "Chocolate milk drink",
            "Beans",
        ];
        assert_eq!(
            filter_candidates(&raw),
            vec!["Orange juice drink", "Kale", "Berry smoothie", "Beans"]
        );
    }

    #[test]
    fn test_duplicate_beverage_spends_a_slot() {
        let raw = ["Berry smoothie", "berry smoothie", "Mango smoothie", "Kale"];
        assert_eq!(filter_candidates(&raw), vec!["Berry smoothie", "Kale"]);
    }

    #[test]
    fn test_result_is_capped_at_ten() {
        let raw: Vec<String> = (1..=25).map(|i| format!("Food {}", i)).collect();
        let foods = filter_candidates(&raw);
        assert_eq!(foods.len(), MAX_FOODS);
        assert_eq!(foods.first().map(String::as_str), Some("Food 1"));
        assert_eq!(foods.last().map(String::as_str), Some("Food 10"));
    }

    #[test]
    fn test_properties_hold_on_mixed_input() {
        let raw = [
            "Milk drink", "Milk Drink", "Soy drink", "Oat drink", "Tofu", "tofu",
            "Sardines", "Baby formula", "Kale", "Yogurt", "Almonds", "Cheese",
            "Broccoli", "Figs", "Salmon", "Okra", "Bok choy",
        ];
        let foods = filter_candidates(&raw);
        assert!(foods.len() <= MAX_FOODS);

        let lowered: HashSet<String> = foods.iter().map(|f| f.to_lowercase()).collect();
        assert_eq!(lowered.len(), foods.len());
        assert!(foods.iter().all(|f| categorize(f) != FoodCategory::Excluded));
        let beverages = foods
            .iter()
            .filter(|f| categorize(f) == FoodCategory::Beverage)
            .count();
        assert!(beverages <= MAX_BEVERAGES);
    }

    #[test]
    fn test_empty_input_gives_empty_list() {
        let raw: [&str; 0] = [];
        assert!(filter_candidates(&raw).is_empty());
    }
}
