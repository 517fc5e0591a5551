use serde::{Deserialize, Serialize};

/// Lightweight reference to a rated meal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealRef {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// One entry of a rating list
///
/// Stored history mixes bare names and small records, so both shapes are accepted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PreferenceEntry {
    Name(String),
    Meal(MealRef),
}

impl PreferenceEntry {
    pub fn name(&self) -> &str {
        match self {
            PreferenceEntry::Name(name) => name,
            PreferenceEntry::Meal(meal) => &meal.name,
        }
    }
}

impl From<&str> for PreferenceEntry {
    fn from(name: &str) -> Self {
        PreferenceEntry::Name(name.to_string())
    }
}

/// How a user rated a meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Like,
    Dislike,
    Neutral,
}

/// A user's rating history
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PreferenceSet {
    #[serde(default)]
    pub liked: Vec<PreferenceEntry>,
    #[serde(default)]
    pub disliked: Vec<PreferenceEntry>,
    #[serde(default)]
    pub neutral: Vec<PreferenceEntry>,
}

impl PreferenceSet {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rating, moving the meal out of whichever list held it before
    pub fn rate(&mut self, meal_name: &str, rating: Rating) {
        self.remove(meal_name);

        let entry = PreferenceEntry::Meal(MealRef {
            name: meal_name.to_string(),
            price: Some(0.0),
        });

        match rating {
            Rating::Like => self.liked.push(entry),
            Rating::Dislike => self.disliked.push(entry),
            Rating::Neutral => self.neutral.push(entry),
        }
    }

    /// Drops a meal from every list
    pub fn remove(&mut self, meal_name: &str) {
        for list in [&mut self.liked, &mut self.disliked, &mut self.neutral] {
            list.retain(|entry| entry.name() != meal_name);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.liked.is_empty() && self.disliked.is_empty() && self.neutral.is_empty()
    }
}
