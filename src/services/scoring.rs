//! Meal/preference compatibility scoring
//!
//! Weights are additive and unbounded, except that a meal the user already liked
//! or disliked short-circuits to a fixed extreme.

use crate::models::{Meal, PreferenceSet};
use crate::services::keywords::{COMFORT_BONUS_KEYWORDS, HEALTHY_BONUS_KEYWORDS, POPULAR_CUISINES};
use crate::services::preferences::PreferenceProfile;

pub const LIKED_MEAL_SCORE: f64 = 1000.0;
pub const DISLIKED_MEAL_SCORE: f64 = -1000.0;

const NEUTRAL_MEAL_BONUS: f64 = 10.0;
const LIKED_CUISINE_WEIGHT: f64 = 50.0;
const DISLIKED_CUISINE_WEIGHT: f64 = 30.0;
const LIKED_CATEGORY_WEIGHT: f64 = 30.0;
const DISLIKED_CATEGORY_WEIGHT: f64 = 20.0;
const LIKED_INGREDIENT_WEIGHT: f64 = 15.0;
const DISLIKED_INGREDIENT_WEIGHT: f64 = 10.0;
const HEALTHY_KEYWORD_BONUS: f64 = 20.0;
const COMFORT_KEYWORD_BONUS: f64 = 15.0;
const PRICE_BAND_BONUS: f64 = 25.0;
const PRICE_DISTANCE_PENALTY: f64 = 2.0;
const POPULAR_CUISINE_BONUS: f64 = 40.0;
const NEW_CUISINE_BONUS: f64 = 10.0;

/// Scores one meal against a raw rating history
pub fn score(meal: &Meal, preferences: &PreferenceSet) -> f64 {
    score_with_profile(meal, &PreferenceProfile::from_preferences(preferences))
}

/// Scores one meal against an already extracted profile
pub fn score_with_profile(meal: &Meal, profile: &PreferenceProfile) -> f64 {
    if profile.is_liked(&meal.name) {
        return LIKED_MEAL_SCORE;
    }
    if profile.is_disliked(&meal.name) {
        return DISLIKED_MEAL_SCORE;
    }

    let mut score = if profile.is_neutral(&meal.name) {
        NEUTRAL_MEAL_BONUS
    } else {
        0.0
    };

    let cuisine = meal.cuisine_type.to_lowercase();
    let category = meal.category.to_lowercase();
    let ingredients: Vec<String> = meal.ingredients.iter().map(|i| i.to_lowercase()).collect();

    score += LIKED_CUISINE_WEIGHT * occurrences(&profile.liked_cuisines, &cuisine);
    score -= DISLIKED_CUISINE_WEIGHT * occurrences(&profile.disliked_cuisines, &cuisine);

    score += LIKED_CATEGORY_WEIGHT * occurrences(&profile.liked_categories, &category);
    score -= DISLIKED_CATEGORY_WEIGHT * occurrences(&profile.disliked_categories, &category);

    score += LIKED_INGREDIENT_WEIGHT * shared_ingredients(&ingredients, &profile.liked_ingredients);
    score -=
        DISLIKED_INGREDIENT_WEIGHT * shared_ingredients(&ingredients, &profile.disliked_ingredients);

    let name = meal.name.to_lowercase();
    if profile.healthy_leaning {
        score += HEALTHY_KEYWORD_BONUS * keyword_hits(HEALTHY_BONUS_KEYWORDS, &ingredients, &name);
    }
    if profile.comfort_leaning {
        score += COMFORT_KEYWORD_BONUS * keyword_hits(COMFORT_BONUS_KEYWORDS, &ingredients, &name);
    }

    if let Some(band) = profile.price_band {
        if band.contains(meal.price) {
            score += PRICE_BAND_BONUS;
        } else {
            score -= PRICE_DISTANCE_PENALTY * band.distance(meal.price);
        }
    }

    if !profile.has_history {
        if POPULAR_CUISINES.contains(&cuisine.as_str()) {
            score += POPULAR_CUISINE_BONUS;
        }
    } else if !profile.liked_cuisines.contains(&cuisine.as_str())
        && !profile.disliked_cuisines.contains(&cuisine.as_str())
    {
        score += NEW_CUISINE_BONUS;
    }

    score
}

/// How often `label` occurs in an extracted signal list
fn occurrences(labels: &[&str], label: &str) -> f64 {
    labels.iter().filter(|l| **l == label).count() as f64
}

/// Meal ingredients that also appear in the extracted ingredient list
fn shared_ingredients(ingredients: &[String], known: &[&str]) -> f64 {
    ingredients
        .iter()
        .filter(|ingredient| known.contains(&ingredient.as_str()))
        .count() as f64
}

/// Distinct keywords found in any ingredient or in the meal name
fn keyword_hits(keywords: &[&str], ingredients: &[String], name: &str) -> f64 {
    keywords
        .iter()
        .filter(|keyword| {
            name.contains(*keyword) || ingredients.iter().any(|i| i.contains(*keyword))
        })
        .count() as f64
}
