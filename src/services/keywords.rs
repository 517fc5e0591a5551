//! Keyword tables used to infer signals from meal names
//!
//! Rating history only stores names, and catalogs rotate, so cuisines, categories
//! and ingredients of past meals are guessed from substrings of those names.
//! Tables are ordered; whether the first or every match counts is decided by the
//! caller in `services::preferences`.

/// A label and the lower-case name fragments that imply it
pub type KeywordGroup = (&'static str, &'static [&'static str]);

pub const CUISINE_KEYWORDS: &[KeywordGroup] = &[
    ("italian", &["pizza", "pasta", "margherita", "primavera"]),
    ("mexican", &["burrito", "tacos", "salsa", "guacamole"]),
    ("asian", &["stir fry", "pad thai", "sushi", "rice"]),
    ("american", &["burger", "sandwich", "caesar", "bbq"]),
    ("mediterranean", &["gyro", "bowl", "quinoa", "feta"]),
    ("indian", &["curry", "tikka", "masala"]),
    ("thai", &["pad thai", "curry"]),
    ("greek", &["gyro", "tzatziki", "olives"]),
];

pub const CATEGORY_KEYWORDS: &[KeywordGroup] = &[
    ("salad", &["salad", "bowl", "quinoa"]),
    ("pizza", &["pizza", "margherita"]),
    ("pasta", &["pasta", "primavera"]),
    ("sandwich", &["sandwich", "burger", "gyro"]),
    ("bowl", &["bowl", "burrito"]),
    ("seafood", &["salmon", "fish", "sushi"]),
    ("curry", &["curry", "tikka", "masala"]),
];

pub const INGREDIENT_VOCABULARY: &[&str] = &[
    "chicken",
    "beef",
    "salmon",
    "fish",
    "cheese",
    "avocado",
    "tomato",
    "lettuce",
    "pasta",
    "rice",
    "quinoa",
    "vegetables",
    "beans",
    "peppers",
    "onion",
    "garlic",
    "herbs",
    "spices",
];

/// Liked-name fragments that mark a user as healthy-leaning
pub const HEALTHY_LEANING_KEYWORDS: &[&str] =
    &["salad", "quinoa", "bowl", "vegetarian", "salmon", "vegetables"];

/// Liked-name fragments that mark a user as comfort-leaning
pub const COMFORT_LEANING_KEYWORDS: &[&str] =
    &["pizza", "burger", "pasta", "sandwich", "bbq", "cheese"];

/// Fragments rewarded in candidate meals for healthy-leaning users
pub const HEALTHY_BONUS_KEYWORDS: &[&str] = &["quinoa", "avocado", "salmon", "vegetables", "salad"];

/// Fragments rewarded in candidate meals for comfort-leaning users
pub const COMFORT_BONUS_KEYWORDS: &[&str] = &["cheese", "pasta", "pizza", "burger", "fries"];

/// Share of liked meals that must match a leaning set
pub const LEANING_THRESHOLD: f64 = 0.3;

/// Estimated price per tier, checked in order
pub const PRICE_TIERS: &[(f64, &[&str])] = &[
    (18.0, &["salmon", "steak", "premium"]),
    (12.0, &["pizza", "pasta", "sandwich"]),
    (10.0, &["salad", "bowl", "soup"]),
];

pub const DEFAULT_ESTIMATED_PRICE: f64 = 13.0;

/// Preferred price band edges as multiples of the estimated average
pub const PRICE_BAND_FACTORS: (f64, f64) = (0.7, 1.3);

/// Cuisines pushed to users without any history
pub const POPULAR_CUISINES: &[&str] = &["italian", "american", "mexican"];

/// True when any keyword is a substring of `text` (expected lower-case)
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Label of the first group with a keyword inside `text`
pub fn first_match(text: &str, table: &[KeywordGroup]) -> Option<&'static str> {
    table
        .iter()
        .find(|(_, keywords)| contains_any(text, keywords))
        .map(|(label, _)| *label)
}
