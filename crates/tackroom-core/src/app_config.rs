use std::path::PathBuf;

use crate::facets::BrandOrdering;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// CSV mapping of product types onto category paths.
    pub taxonomy_path: PathBuf,
    /// Catalog export used when a command is not given `--catalog`.
    pub catalog_path: Option<PathBuf>,
    /// JSON file backing persisted filter preferences.
    pub preferences_path: PathBuf,
    /// Public storefront origin, used to build absolute breadcrumb URLs.
    pub site_url: Option<String>,
    pub brand_option_limit: usize,
    pub brand_ordering: BrandOrdering,
    /// Lowest upper bound the price slider may show.
    pub price_slider_floor: u32,
}
