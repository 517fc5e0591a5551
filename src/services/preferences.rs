//! Preference extraction
//!
//! Turns raw rating history into plain names plus the secondary signals the
//! scorer consumes. Signals for past meals come from `services::keywords`, never
//! from the live catalog.

use crate::models::{PreferenceEntry, PreferenceSet};
use crate::services::keywords::{
    contains_any, first_match, KeywordGroup, CATEGORY_KEYWORDS, COMFORT_LEANING_KEYWORDS,
    CUISINE_KEYWORDS, DEFAULT_ESTIMATED_PRICE, HEALTHY_LEANING_KEYWORDS, INGREDIENT_VOCABULARY,
    LEANING_THRESHOLD, PRICE_BAND_FACTORS, PRICE_TIERS,
};

/// Inclusive price range a user tends to order in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: f64,
}

impl PriceBand {
    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }

    /// Gap to the nearer band edge
    pub fn distance(&self, price: f64) -> f64 {
        (price - self.min).abs().min((price - self.max).abs())
    }
}

/// Normalized view of a `PreferenceSet`, built once per request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceProfile {
    pub liked: Vec<String>,
    pub disliked: Vec<String>,
    pub neutral: Vec<String>,
    pub liked_cuisines: Vec<&'static str>,
    pub disliked_cuisines: Vec<&'static str>,
    pub liked_categories: Vec<&'static str>,
    pub disliked_categories: Vec<&'static str>,
    pub liked_ingredients: Vec<&'static str>,
    pub disliked_ingredients: Vec<&'static str>,
    pub healthy_leaning: bool,
    pub comfort_leaning: bool,
    pub price_band: Option<PriceBand>,
    /// Whether any like or dislike was ever recorded
    pub has_history: bool,
}

impl PreferenceProfile {
    pub fn from_preferences(preferences: &PreferenceSet) -> Self {
        let liked = names(&preferences.liked);
        let disliked = names(&preferences.disliked);

        Self {
            liked_cuisines: label_names(&liked, CUISINE_KEYWORDS),
            disliked_cuisines: label_names(&disliked, CUISINE_KEYWORDS),
            liked_categories: label_names(&liked, CATEGORY_KEYWORDS),
            disliked_categories: label_names(&disliked, CATEGORY_KEYWORDS),
            liked_ingredients: ingredient_names(&liked),
            disliked_ingredients: ingredient_names(&disliked),
            healthy_leaning: leans_towards(&liked, HEALTHY_LEANING_KEYWORDS),
            comfort_leaning: leans_towards(&liked, COMFORT_LEANING_KEYWORDS),
            price_band: price_band_for(&liked),
            has_history: !preferences.liked.is_empty() || !preferences.disliked.is_empty(),
            neutral: names(&preferences.neutral),
            liked,
            disliked,
        }
    }

    pub fn is_liked(&self, meal_name: &str) -> bool {
        self.liked.iter().any(|name| name == meal_name)
    }

    pub fn is_disliked(&self, meal_name: &str) -> bool {
        self.disliked.iter().any(|name| name == meal_name)
    }

    pub fn is_neutral(&self, meal_name: &str) -> bool {
        self.neutral.iter().any(|name| name == meal_name)
    }
}

/// Plain meal names of a rating list, skipping entries without a name
pub fn names(list: &[PreferenceEntry]) -> Vec<String> {
    list.iter()
        .map(PreferenceEntry::name)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// One cuisine per recognizable meal, first table match wins
pub fn cuisines(list: &[PreferenceEntry]) -> Vec<&'static str> {
    label_names(&names(list), CUISINE_KEYWORDS)
}

/// One category per recognizable meal, first table match wins
pub fn categories(list: &[PreferenceEntry]) -> Vec<&'static str> {
    label_names(&names(list), CATEGORY_KEYWORDS)
}

/// Every vocabulary ingredient mentioned in each meal name
pub fn ingredients(list: &[PreferenceEntry]) -> Vec<&'static str> {
    ingredient_names(&names(list))
}

pub fn is_healthy_leaning(preferences: &PreferenceSet) -> bool {
    leans_towards(&names(&preferences.liked), HEALTHY_LEANING_KEYWORDS)
}

pub fn is_comfort_leaning(preferences: &PreferenceSet) -> bool {
    leans_towards(&names(&preferences.liked), COMFORT_LEANING_KEYWORDS)
}

/// Band of ±30% around the estimated average price of liked meals
pub fn preferred_price_band(preferences: &PreferenceSet) -> Option<PriceBand> {
    price_band_for(&names(&preferences.liked))
}

fn label_names(names: &[String], table: &[KeywordGroup]) -> Vec<&'static str> {
    names
        .iter()
        .filter_map(|name| first_match(&name.to_lowercase(), table))
        .collect()
}

fn ingredient_names(names: &[String]) -> Vec<&'static str> {
    names
        .iter()
        .flat_map(|name| {
            let lower = name.to_lowercase();
            INGREDIENT_VOCABULARY
                .iter()
                .copied()
                .filter(move |ingredient| lower.contains(ingredient))
        })
        .collect()
}

fn leans_towards(liked: &[String], keywords: &[&str]) -> bool {
    if liked.is_empty() {
        return false;
    }

    let matching = liked
        .iter()
        .filter(|name| contains_any(&name.to_lowercase(), keywords))
        .count();

    matching as f64 >= liked.len() as f64 * LEANING_THRESHOLD
}

fn estimated_price(name: &str) -> f64 {
    let lower = name.to_lowercase();
    PRICE_TIERS
        .iter()
        .find(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(price, _)| *price)
        .unwrap_or(DEFAULT_ESTIMATED_PRICE)
}

fn price_band_for(liked: &[String]) -> Option<PriceBand> {
    if liked.is_empty() {
        return None;
    }

    let total: f64 = liked.iter().map(|name| estimated_price(name)).sum();
    let average = total / liked.len() as f64;

    let (low, high) = PRICE_BAND_FACTORS;
    Some(PriceBand {
        min: average * low,
        max: average * high,
    })
}
