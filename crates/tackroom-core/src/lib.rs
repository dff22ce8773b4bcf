pub mod app_config;
pub mod config;
pub mod facets;
pub mod products;
pub mod selection;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use facets::{BrandOrdering, FacetOption, FacetOptions};
pub use products::{CollectionRef, PriceRange, Product, SelectedOption, Variant};
pub use selection::FilterSelection;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
