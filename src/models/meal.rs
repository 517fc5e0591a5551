use serde::{Deserialize, Serialize};

/// A meal offered in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    /// Catalog identifier, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Display name, unique within a catalog snapshot
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Price in dollars
    #[serde(default)]
    pub price: f64,
    /// Cuisine label (e.g., "Italian")
    #[serde(default)]
    pub cuisine_type: String,
    /// Ingredients in menu order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Category label (e.g., "Pizza")
    #[serde(default)]
    pub category: String,
}

impl Meal {
    /// Creates a meal with empty description, ingredients and category
    pub fn new(name: impl Into<String>, price: f64, cuisine_type: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: String::new(),
            price,
            cuisine_type: cuisine_type.into(),
            ingredients: Vec::new(),
            category: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn is_affordable(&self, budget: f64) -> bool {
        self.price <= budget
    }
}
