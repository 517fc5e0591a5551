use thiserror::Error;

use crate::models::{Meal, PreferenceSet, ScoredCandidate};
use crate::services::preferences::PreferenceProfile;
use crate::services::scoring::score_with_profile;

/// Most candidates ever offered to the oracle
pub const SHORTLIST_SIZE: usize = 5;

/// Candidates at or below this score never make the shortlist
pub const SHORTLIST_MIN_SCORE: f64 = -100.0;

#[derive(Debug, Error, PartialEq)]
#[error("No meals priced within budget {budget}")]
pub struct NoAffordableMeals {
    pub budget: f64,
}

/// Affordable meals ordered best first
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    candidates: Vec<ScoredCandidate>,
}

impl Ranking {
    /// All affordable meals, best first; equal scores keep catalog order
    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    /// Best-scoring candidate
    pub fn top(&self) -> &ScoredCandidate {
        // A ranking is only built from a non-empty affordable set
        &self.candidates[0]
    }

    /// Up to five leading candidates scoring above the cutoff
    ///
    /// Falls back to the single best candidate when every score is at or below
    /// the cutoff.
    pub fn shortlist(&self) -> Vec<&ScoredCandidate> {
        let shortlist: Vec<&ScoredCandidate> = self
            .candidates
            .iter()
            .take(SHORTLIST_SIZE)
            .filter(|candidate| candidate.score > SHORTLIST_MIN_SCORE)
            .collect();

        if shortlist.is_empty() {
            vec![self.top()]
        } else {
            shortlist
        }
    }

    /// Score previously assigned to a meal name, if ranked
    pub fn score_of(&self, meal_name: &str) -> Option<f64> {
        self.candidates
            .iter()
            .find(|candidate| candidate.meal.name == meal_name)
            .map(|candidate| candidate.score)
    }
}

/// Filters the catalog by budget and orders what remains by compatibility
pub fn rank(
    catalog: &[Meal],
    budget: f64,
    preferences: &PreferenceSet,
) -> Result<Ranking, NoAffordableMeals> {
    let profile = PreferenceProfile::from_preferences(preferences);

    let mut candidates: Vec<ScoredCandidate> = catalog
        .iter()
        .filter(|meal| meal.is_affordable(budget))
        .map(|meal| ScoredCandidate {
            meal: meal.clone(),
            score: score_with_profile(meal, &profile),
        })
        .collect();

    if candidates.is_empty() {
        return Err(NoAffordableMeals { budget });
    }

    // Stable, so ties stay in catalog order
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    tracing::debug!(
        affordable = candidates.len(),
        top_meal = %candidates[0].meal.name,
        top_score = candidates[0].score,
        "Ranked candidates"
    );

    Ok(Ranking { candidates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PreferenceEntry;

    fn names(meals: &[&ScoredCandidate]) -> Vec<String> {
        meals.iter().map(|c| c.meal.name.clone()).collect()
    }

    fn disliking(names: &[&str]) -> PreferenceSet {
        PreferenceSet {
            disliked: names.iter().map(|n| PreferenceEntry::from(*n)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_budget_filter() {
        let catalog = vec![
            Meal::new("Tacos", 8.0, "Mexican"),
            Meal::new("Steak Frites", 24.0, "French"),
        ];

        let ranking = rank(&catalog, 10.0, &PreferenceSet::new()).unwrap();
        assert_eq!(ranking.candidates().len(), 1);
        assert_eq!(ranking.top().meal.name, "Tacos");
    }

    #[test]
    fn test_no_affordable_meals() {
        let catalog = vec![Meal::new("Steak Frites", 24.0, "French")];
        let result = rank(&catalog, 5.0, &PreferenceSet::new());
        assert_eq!(result, Err(NoAffordableMeals { budget: 5.0 }));

        assert!(rank(&[], 50.0, &PreferenceSet::new()).is_err());
    }

    #[test]
    fn test_sorted_descending_and_stable() {
        let catalog = vec![
            Meal::new("Sushi Roll", 9.0, "Asian"),
            Meal::new("Tacos", 8.0, "Mexican"),
            Meal::new("Pho", 9.0, "Vietnamese"),
            Meal::new("Burger", 9.0, "American"),
        ];

        let ranking = rank(&catalog, 20.0, &PreferenceSet::new()).unwrap();
        let order: Vec<&str> = ranking
            .candidates()
            .iter()
            .map(|c| c.meal.name.as_str())
            .collect();

        // popular cuisines score 40, others 0; ties keep catalog order
        assert_eq!(order, vec!["Tacos", "Burger", "Sushi Roll", "Pho"]);
        assert!(ranking
            .candidates()
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }

    #[test]
    fn test_tacos_beat_sushi_by_forty() {
        let catalog = vec![
            Meal::new("Tacos", 8.0, "mexican"),
            Meal::new("Sushi Roll", 9.0, "asian"),
        ];

        let ranking = rank(&catalog, 20.0, &PreferenceSet::new()).unwrap();
        let tacos = ranking.score_of("Tacos").unwrap();
        let sushi = ranking.score_of("Sushi Roll").unwrap();
        assert_eq!(tacos - sushi, 40.0);
    }

    #[test]
    fn test_shortlist_bounded_to_five() {
        let catalog: Vec<Meal> = (0..8)
            .map(|i| Meal::new(format!("Dish {i}"), 5.0, "Italian"))
            .collect();

        let ranking = rank(&catalog, 10.0, &PreferenceSet::new()).unwrap();
        let shortlist = ranking.shortlist();
        assert_eq!(shortlist.len(), SHORTLIST_SIZE);
        assert_eq!(
            names(&shortlist),
            vec!["Dish 0", "Dish 1", "Dish 2", "Dish 3", "Dish 4"]
        );
    }

    #[test]
    fn test_shortlist_excludes_dislikes() {
        let catalog = vec![
            Meal::new("Tacos", 8.0, "Mexican"),
            Meal::new("Sushi Roll", 9.0, "Asian"),
        ];

        let ranking = rank(&catalog, 20.0, &disliking(&["Tacos"])).unwrap();
        assert_eq!(names(&ranking.shortlist()), vec!["Sushi Roll"]);
    }

    #[test]
    fn test_shortlist_falls_back_to_top() {
        let catalog = vec![
            Meal::new("Tacos", 8.0, "Mexican"),
            Meal::new("Sushi Roll", 9.0, "Asian"),
        ];

        let ranking = rank(&catalog, 20.0, &disliking(&["Tacos", "Sushi Roll"])).unwrap();
        let shortlist = ranking.shortlist();
        assert_eq!(shortlist.len(), 1);
        assert_eq!(shortlist[0].meal.name, "Tacos");
        assert_eq!(shortlist[0].score, -1000.0);
    }

    #[test]
    fn test_shortlist_filters_within_first_five() {
        // Liking "Soup" puts the price band at 7..13
        let preferences = PreferenceSet {
            liked: vec!["Soup".into()],
            disliked: vec!["A".into(), "B".into()],
            ..Default::default()
        };
        let catalog = vec![
            Meal::new("Mid", 40.0, "Fusion"),
            Meal::new("Far", 80.0, "Fusion"),
            Meal::new("A", 10.0, "Fusion"),
            Meal::new("B", 10.0, "Fusion"),
            Meal::new("C", 100.0, "Fusion"),
            Meal::new("D", 100.0, "Fusion"),
        ];

        let ranking = rank(&catalog, 200.0, &preferences).unwrap();

        // Negative but above the cutoff stays; at or below it goes
        let mid = ranking.score_of("Mid").unwrap();
        assert!(mid < 0.0 && mid > SHORTLIST_MIN_SCORE);
        assert!(ranking.score_of("Far").unwrap() <= SHORTLIST_MIN_SCORE);

        // A sits fifth and is dropped; D at sixth never gets promoted
        let order: Vec<&str> = ranking
            .candidates()
            .iter()
            .map(|c| c.meal.name.as_str())
            .collect();
        assert_eq!(order, vec!["Mid", "Far", "C", "D", "A", "B"]);
        assert_eq!(names(&ranking.shortlist()), vec!["Mid"]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let catalog = vec![
            Meal::new("Tacos", 8.0, "Mexican").with_ingredients(["Beef", "Salsa"]),
            Meal::new("Quinoa Bowl", 11.0, "Healthy").with_category("Bowl"),
            Meal::new("Margherita Pizza", 10.0, "Italian").with_category("Pizza"),
        ];
        let preferences = PreferenceSet {
            liked: vec!["Caesar Salad".into()],
            neutral: vec!["Tacos".into()],
            ..Default::default()
        };

        let first = rank(&catalog, 15.0, &preferences).unwrap();
        let second = rank(&catalog, 15.0, &preferences).unwrap();
        assert_eq!(first, second);
    }
}
