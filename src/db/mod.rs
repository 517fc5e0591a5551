pub mod catalog;
pub mod preferences;

pub use catalog::load_catalog;
pub use preferences::PreferenceStore;
