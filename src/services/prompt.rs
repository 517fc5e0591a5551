//! Text summaries handed to the oracle
//!
//! The oracle only sees what these functions render: a one-line analysis of the
//! user's history and a numbered block describing each shortlisted meal.

use std::fmt::Write;

use crate::models::ScoredCandidate;
use crate::services::preferences::PreferenceProfile;

const TOP_CUISINE_COUNT: usize = 3;

/// Summarizes rating history as `" | "`-separated facts
pub fn preference_analysis(profile: &PreferenceProfile) -> String {
    let mut parts = Vec::new();

    if profile.liked.is_empty() {
        parts.push("New user with no previous likes".to_string());
    } else {
        parts.push(format!("Previously liked meals: {}", profile.liked.join(", ")));
    }

    if !profile.disliked.is_empty() {
        parts.push(format!(
            "Previously disliked meals: {}",
            profile.disliked.join(", ")
        ));
    }

    if !profile.neutral.is_empty() {
        parts.push(format!("Neutral about: {}", profile.neutral.join(", ")));
    }

    let top_cuisines = most_common(&profile.liked_cuisines, TOP_CUISINE_COUNT);
    if !top_cuisines.is_empty() {
        let rendered: Vec<String> = top_cuisines
            .iter()
            .map(|(cuisine, count)| format!("{cuisine} ({count}x)"))
            .collect();
        parts.push(format!("Preferred cuisines: {}", rendered.join(", ")));
    }

    if profile.healthy_leaning {
        parts.push("Shows preference for healthy/nutritious options".to_string());
    }

    if profile.comfort_leaning {
        parts.push("Shows preference for comfort food".to_string());
    }

    if let Some(band) = profile.price_band {
        parts.push(format!(
            "Typical price range: ${:.2} - ${:.2}",
            band.min, band.max
        ));
    }

    parts.join(" | ")
}

/// Numbered description of each shortlisted meal with its score
pub fn meals_context(shortlist: &[&ScoredCandidate]) -> String {
    let mut context = String::from("TOP RECOMMENDED MEALS based on user's preference analysis:\n");

    for (index, candidate) in shortlist.iter().enumerate() {
        let meal = &candidate.meal;
        // Writing to a String cannot fail
        let _ = write!(
            context,
            "\n{}. {} (Compatibility Score: {:.1})\n   Price: ${} | Cuisine: {}\n   Description: {}\n   Ingredients: {}\n   Category: {}\n",
            index + 1,
            meal.name,
            candidate.score,
            meal.price,
            or_unknown(&meal.cuisine_type),
            meal.description,
            meal.ingredients.join(", "),
            or_unknown(&meal.category),
        );
    }

    context
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        "Unknown"
    } else {
        value
    }
}

/// Labels by descending frequency; ties keep first-seen order
fn most_common<'a>(labels: &[&'a str], limit: usize) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for label in labels {
        match counts.iter().position(|(seen, _)| seen == label) {
            Some(index) => counts[index].1 += 1,
            None => counts.push((*label, 1)),
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}
