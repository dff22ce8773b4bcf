use crate::app_config::{AppConfig, Environment};
use crate::facets::BrandOrdering;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it from a
/// `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TACKROOM_ENV", "development"))?;
    let log_level = or_default("TACKROOM_LOG_LEVEL", "info");
    let taxonomy_path = PathBuf::from(or_default(
        "TACKROOM_TAXONOMY_PATH",
        "./exports/mapping-template-draft2.csv",
    ));
    let catalog_path = optional("TACKROOM_CATALOG_PATH").map(PathBuf::from);
    let preferences_path = PathBuf::from(or_default(
        "TACKROOM_PREFERENCES_PATH",
        "./.tackroom/filter-preferences.json",
    ));
    let site_url = optional("TACKROOM_SITE_URL").map(|s| s.trim_end_matches('/').to_string());

    let brand_option_limit = parse_usize("TACKROOM_BRAND_OPTION_LIMIT", "20")?;
    let brand_ordering = parse_brand_ordering(&or_default("TACKROOM_BRAND_ORDERING", "alphabetical"))?;
    let price_slider_floor = parse_u32("TACKROOM_PRICE_SLIDER_FLOOR", "500")?;

    Ok(AppConfig {
        env,
        log_level,
        taxonomy_path,
        catalog_path,
        preferences_path,
        site_url,
        brand_option_limit,
        brand_ordering,
        price_slider_floor,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TACKROOM_ENV".to_string(),
            reason: format!(
                "unknown environment '{other}'; expected development, test, or production"
            ),
        }),
    }
}

fn parse_brand_ordering(s: &str) -> Result<BrandOrdering, ConfigError> {
    match s {
        "alphabetical" => Ok(BrandOrdering::Alphabetical),
        "count" => Ok(BrandOrdering::Count),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TACKROOM_BRAND_ORDERING".to_string(),
            reason: format!("unknown ordering '{other}'; expected alphabetical or count"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
