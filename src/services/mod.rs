pub mod fallback;
pub mod keywords;
pub mod oracle;
pub mod preferences;
pub mod prompt;
pub mod ranking;
pub mod recommendation;
pub mod scoring;

pub use oracle::{MealOracle, OpenAiOracle};
pub use recommendation::Recommender;
