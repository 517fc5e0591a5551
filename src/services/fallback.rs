//! Oracle-free recommendation path

use crate::models::{Meal, PreferenceSet};
use crate::services::ranking::rank;

/// Meals served when no catalog is available at all
pub fn predefined_meals() -> [Meal; 3] {
    [
        Meal {
            id: Some(999),
            name: "Grilled Chicken Caesar Salad".to_string(),
            description: "Fresh romaine lettuce, grilled chicken breast, parmesan cheese, croutons, \
                and caesar dressing. A healthy and satisfying meal perfect for your budget."
                .to_string(),
            price: 12.99,
            cuisine_type: "American".to_string(),
            ingredients: vec![
                "Chicken Breast".to_string(),
                "Romaine Lettuce".to_string(),
                "Parmesan Cheese".to_string(),
                "Croutons".to_string(),
                "Caesar Dressing".to_string(),
            ],
            category: "Salad".to_string(),
        },
        Meal {
            id: Some(998),
            name: "Vegetarian Pasta Primavera".to_string(),
            description: "Fresh seasonal vegetables including bell peppers, zucchini, and cherry \
                tomatoes tossed with pasta in a light herb olive oil sauce."
                .to_string(),
            price: 10.25,
            cuisine_type: "Italian".to_string(),
            ingredients: vec![
                "Pasta".to_string(),
                "Bell Peppers".to_string(),
                "Zucchini".to_string(),
                "Cherry Tomatoes".to_string(),
                "Olive Oil".to_string(),
                "Herbs".to_string(),
            ],
            category: "Pasta".to_string(),
        },
        Meal {
            id: Some(997),
            name: "Quinoa Buddha Bowl".to_string(),
            description: "Nutritious bowl with quinoa, roasted vegetables, avocado, and tahini dressing"
                .to_string(),
            price: 9.99,
            cuisine_type: "Healthy".to_string(),
            ingredients: vec![
                "Quinoa".to_string(),
                "Roasted Vegetables".to_string(),
                "Avocado".to_string(),
                "Tahini".to_string(),
                "Seeds".to_string(),
            ],
            category: "Bowl".to_string(),
        },
    ]
}

/// Best meal from `default_catalog`, or from the built-in meals when it is empty
///
/// Never fails: if nothing fits the budget the cheapest meal is returned instead.
pub fn fallback_meal(default_catalog: &[Meal], budget: f64, preferences: &PreferenceSet) -> Meal {
    let predefined;
    let catalog = if default_catalog.is_empty() {
        predefined = predefined_meals();
        &predefined[..]
    } else {
        default_catalog
    };

    match rank(catalog, budget, preferences) {
        Ok(ranking) => ranking.top().meal.clone(),
        Err(e) => {
            let cheapest = cheapest(catalog);
            tracing::info!(
                error = %e,
                meal = %cheapest.name,
                price = cheapest.price,
                "Nothing affordable in fallback catalog, using cheapest meal"
            );
            cheapest
        }
    }
}

fn cheapest(catalog: &[Meal]) -> Meal {
    match catalog.iter().min_by(|a, b| a.price.total_cmp(&b.price)) {
        Some(meal) => meal.clone(),
        None => {
            let [first, ..] = predefined_meals();
            first
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cheapest_predefined_when_over_budget() {
        let meal = fallback_meal(&[], 5.0, &PreferenceSet::new());
        assert_eq!(meal.name, "Quinoa Buddha Bowl");
        assert_eq!(meal.price, 9.99);
    }

    #[test]
    fn test_predefined_ranked_for_new_user() {
        // Caesar salad and primavera share the popular-cuisine bonus
        let meal = fallback_meal(&[], 11.0, &PreferenceSet::new());
        assert_eq!(meal.name, "Vegetarian Pasta Primavera");

        let meal = fallback_meal(&[], 20.0, &PreferenceSet::new());
        assert_eq!(meal.name, "Grilled Chicken Caesar Salad");
    }

    #[test]
    fn test_default_catalog_preferred_over_predefined() {
        let catalog = vec![Meal::new("Tacos", 8.0, "Mexican")];
        let meal = fallback_meal(&catalog, 20.0, &PreferenceSet::new());
        assert_eq!(meal.name, "Tacos");
    }

    #[test]
    fn test_cheapest_from_default_catalog() {
        let catalog = vec![
            Meal::new("Steak Frites", 24.0, "French"),
            Meal::new("Lobster Roll", 19.0, "American"),
        ];
        let meal = fallback_meal(&catalog, 5.0, &PreferenceSet::new());
        assert_eq!(meal.name, "Lobster Roll");
    }
}
