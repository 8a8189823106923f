//! Keyword-based extraction of meal candidates from raw menu text.
//!
//! Menu text arrives from scrapers as loosely formatted lines. A line is
//! treated as a dish when it mentions a food keyword, or when it carries a
//! price and is long enough to hold a name. Extracted dishes get a price,
//! dietary tags and an estimated nutrition profile; ranking is left to the
//! pipeline.

use crate::estimate::estimate_nutrition;
use crate::model::MealCandidate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Stored as Option so a bad pattern degrades to "no price" instead of panicking
static PRICE_PATTERN: Lazy<Option<Regex>> = Lazy::new(|| {
    // Matches: $12, $12.99, $1,250.00
    Regex::new(r"\$[\d,]+\.?\d*").ok()
});

const MEAL_KEYWORDS: &[&str] = &[
    "chicken", "beef", "salmon", "pasta", "salad", "soup", "burger", "pizza", "steak", "fish",
    "vegetable", "rice", "quinoa", "tofu", "bowl", "wrap", "sandwich", "entree", "main", "dish",
];

const TAG_RULES: &[(&str, &[&str])] = &[
    ("high protein", &["chicken", "beef", "steak", "fish", "salmon", "tuna"]),
    ("vegetarian", &["vegetarian", "veggie"]),
    ("vegan", &["vegan"]),
    ("gluten-free", &["gluten"]),
    ("keto", &["avocado", "olive", "cheese", "butter"]),
];

const HIGH_CARB: &[&str] = &["pasta", "rice", "bread", "potato"];
const LOW_CARB: &[&str] = &["salad", "vegetable", "quinoa"];

/// Splits menu text into meal candidates.
#[derive(Debug, Clone)]
pub struct MenuParser {
    max_items: usize,
    min_text_len: usize,
}

impl Default for MenuParser {
    fn default() -> Self {
        Self {
            max_items: 10,
            min_text_len: 50,
        }
    }
}

impl MenuParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap on dishes returned per menu.
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = max_items;
        self
    }

    /// Parse `text` into candidates for `restaurant_name`, in menu order.
    ///
    /// Text shorter than 50 characters after trimming yields nothing.
    pub fn parse(
        &self,
        text: &str,
        restaurant_name: &str,
        cuisine: Option<&str>,
    ) -> Vec<MealCandidate> {
        if text.trim().chars().count() < self.min_text_len {
            warn!(restaurant = restaurant_name, "Menu text too short to parse");
            return Vec::new();
        }

        let source_id = slug(restaurant_name);
        let meals: Vec<MealCandidate> = text
            .lines()
            .map(str::trim)
            .filter(|line| line.chars().count() >= 5)
            .filter(|line| is_meal_line(line))
            .filter_map(|line| {
                let mut meal = extract_meal(line, restaurant_name)?;
                meal.source_restaurant_id.clone_from(&source_id);
                meal.cuisine = cuisine.map(str::to_string);
                Some(meal)
            })
            .take(self.max_items)
            .collect();

        debug!(
            restaurant = restaurant_name,
            found = meals.len(),
            "Parsed menu text"
        );
        meals
    }
}

/// Parse a price like `"$12.99"` or `"1,250"` into dollars.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().filter(|p| p.is_finite() && *p >= 0.0)
}

fn find_price(line: &str) -> Option<regex::Match<'_>> {
    PRICE_PATTERN.as_ref()?.find(line)
}

fn is_meal_line(line: &str) -> bool {
    let has_price = find_price(line).is_some();
    // all-caps lines without a price are section headers
    if !has_price && !line.chars().any(char::is_lowercase) {
        return false;
    }
    let lower = line.to_lowercase();
    let has_keyword = MEAL_KEYWORDS.iter().any(|kw| lower.contains(kw));
    has_keyword || (has_price && line.chars().count() > 10)
}

fn extract_meal(line: &str, restaurant_name: &str) -> Option<MealCandidate> {
    let price_match = find_price(line);

    let (name, description) = match price_match {
        Some(m) => (
            line[..m.start()].trim().to_string(),
            format!("{} {}", &line[..m.start()], &line[m.end()..])
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        ),
        None => (line.chars().take(50).collect::<String>().trim().to_string(), line.to_string()),
    };

    let name = if name.is_empty() {
        description.chars().take(50).collect::<String>().trim().to_string()
    } else {
        name
    };
    if name.is_empty() {
        return None;
    }

    let mut meal = MealCandidate::new(restaurant_name, name)
        .with_nutrition(estimate_nutrition(line))
        .with_description(description);
    meal.price = price_match.and_then(|m| parse_price(m.as_str()));
    meal.tags = extract_tags(line);
    Some(meal)
}

fn extract_tags(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    let mut tags: BTreeSet<String> = TAG_RULES
        .iter()
        .filter(|(_, words)| mentions(words))
        .map(|(tag, _)| (*tag).to_string())
        .collect();

    if mentions(HIGH_CARB) {
        tags.insert("high carb".to_string());
    } else if mentions(LOW_CARB) {
        tags.insert("low carb".to_string());
    }
    tags
}

pub(crate) fn slug(name: &str) -> String {
    mealfinder_search::normalize(name).replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = "\
BOWLS
Grilled Chicken Quinoa Bowl $13.50
Crispy Tofu Rice Bowl with avocado $12.00
Drinks
Tea $3
House Special Plate of the Day $18.75
Ok
";

    #[test]
    fn test_short_text_yields_nothing() {
        assert!(MenuParser::new().parse("Chicken bowl $12", "Dig", None).is_empty());
    }

    #[test]
    fn test_parses_meal_lines() {
        let meals = MenuParser::new().parse(MENU, "Dig - Park Ave", Some("American"));
        let names: Vec<_> = meals.iter().map(|m| m.dish_name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Grilled Chicken Quinoa Bowl",
                "Crispy Tofu Rice Bowl with avocado",
                "House Special Plate of the Day",
            ]
        );

        let chicken = &meals[0];
        assert_eq!(chicken.price, Some(13.5));
        assert_eq!(chicken.restaurant_name, "Dig - Park Ave");
        assert_eq!(chicken.source_restaurant_id, "dig-park-ave");
        assert_eq!(chicken.cuisine.as_deref(), Some("American"));
        assert!(chicken.tags.contains("high protein"));
        assert!(chicken.tags.contains("low carb"));
        assert!(chicken.nutrition.is_some());
    }

    #[test]
    fn test_section_headers_skipped() {
        assert!(!is_meal_line("BOWLS"));
        assert!(is_meal_line("Chicken bowl"));
    }

    #[test]
    fn test_tags() {
        let tags = extract_tags("Crispy Tofu Rice Bowl with avocado");
        assert!(tags.contains("high carb"));
        assert!(tags.contains("keto"));
        assert!(!tags.contains("low carb"));
    }

    #[test]
    fn test_max_items() {
        let meals = MenuParser::new().with_max_items(2).parse(MENU, "Dig", None);
        assert_eq!(meals.len(), 2);
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$12.99"), Some(12.99));
        assert_eq!(parse_price("$1,250.00"), Some(1250.0));
        assert_eq!(parse_price("12"), Some(12.0));
        assert_eq!(parse_price("$"), None);
    }

    #[test]
    fn test_leading_price_uses_description_as_name() {
        let meal = extract_meal("$9.50 chicken wrap", "Cafe").unwrap();
        assert_eq!(meal.dish_name, "chicken wrap");
        assert_eq!(meal.price, Some(9.5));
    }
}
