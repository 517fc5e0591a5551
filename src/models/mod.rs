mod meal;
mod preferences;
mod recommendation;

pub use meal::Meal;
pub use preferences::{MealRef, PreferenceEntry, PreferenceSet, Rating};
pub use recommendation::{RecommendationResult, ScoredCandidate};
