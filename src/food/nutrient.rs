// Nutrient name variants and the label the food search is queried with
const NUTRIENT_VARIANTS: &[(&str, &str)] = &[
    ("vitamin d3", "vitamin d"),
    ("vitamin d2", "vitamin d"),
    ("vitamin d", "vitamin d"),
    ("cholecalciferol", "vitamin d"),
    ("vitamin c", "vitamin c"),
    ("ascorbic acid", "vitamin c"),
    ("iron", "iron"),
    ("heme iron", "iron"),
    ("non-heme iron", "iron"),
    ("fe", "iron"),
    ("calcium", "calcium"),
    ("ca", "calcium"),
    ("vitamin b12", "vitamin b12"),
    ("cobalamin", "vitamin b12"),
    ("cyanocobalamin", "vitamin b12"),
    ("vitamin b9", "folate"),
    ("folic acid", "folate"),
    ("folate", "folate"),
    ("magnesium", "magnesium"),
    ("mg", "magnesium"),
    ("zinc", "zinc"),
    ("zn", "zinc"),
    ("potassium", "potassium"),
    ("omega 3", "omega-3 fatty acids"),
    ("omega-3", "omega-3 fatty acids"),
];

/// Maps a nutrient name to its canonical label. Lookup ignores case and
/// surrounding whitespace; unknown names come back exactly as given.
pub fn normalize(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    NUTRIENT_VARIANTS
        .iter()
        .find(|(variant, _)| *variant == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_map_to_canonical() {
        assert_eq!(normalize("vitamin d3"), "vitamin d");
        assert_eq!(normalize("Vitamin D2"), "vitamin d");
        assert_eq!(normalize("ASCORBIC ACID"), "vitamin c");
        assert_eq!(normalize("Non-Heme Iron"), "iron");
        assert_eq!(normalize("ca"), "calcium");
    }

    #[test]
    fn test_every_table_entry_resolves() {
        for (variant, canonical) in NUTRIENT_VARIANTS {
            assert_eq!(normalize(variant), *canonical);
            assert_eq!(normalize(&variant.to_uppercase()), *canonical);
        }
    }

    #[test]
    fn test_unknown_name_is_returned_unchanged() {
        assert_eq!(normalize("Selenium"), "Selenium");
        assert_eq!(normalize("Vitamin K2 "), "Vitamin K2 ");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_variant_keys_are_unique() {
        let mut keys: Vec<&str> = NUTRIENT_VARIANTS.iter().map(|(k, _)| *k).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), NUTRIENT_VARIANTS.len());
    }
}
