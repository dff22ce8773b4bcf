//! Facet option derivation for the filter sidebar.
//!
//! Options are recomputed from whatever product list the caller passes in
//! and are never persisted.

use std::cmp::Ordering;
use std::collections::HashMap;

use rust_decimal::Decimal;
use tackroom_core::{AppConfig, BrandOrdering, FacetOption, FacetOptions, PriceRange, Product};

use crate::filter::{COLOR_OPTION, SIZE_OPTION};

pub const DEFAULT_BRAND_OPTION_LIMIT: usize = 20;
pub const DEFAULT_PRICE_SLIDER_FLOOR: u32 = 500;

/// Tags containing any of these markers are never offered as brands.
const NON_BRAND_MARKERS: &[&str] = &["collection:", "type:"];

/// Knobs for [`derive_facet_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FacetSettings {
    pub brand_limit: usize,
    pub brand_ordering: BrandOrdering,
    /// Lowest upper bound the price slider may have.
    pub price_slider_floor: Decimal,
}

impl Default for FacetSettings {
    fn default() -> Self {
        Self {
            brand_limit: DEFAULT_BRAND_OPTION_LIMIT,
            brand_ordering: BrandOrdering::Alphabetical,
            price_slider_floor: Decimal::from(DEFAULT_PRICE_SLIDER_FLOOR),
        }
    }
}

impl FacetSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            brand_limit: config.brand_option_limit,
            brand_ordering: config.brand_ordering,
            price_slider_floor: Decimal::from(config.price_slider_floor),
        }
    }
}

/// Derives every sidebar facet for `products`.
#[must_use]
pub fn derive_facet_options(products: &[Product], settings: &FacetSettings) -> FacetOptions {
    FacetOptions {
        sizes: derive_size_options(products),
        colors: derive_color_options(products),
        brands: derive_brand_options_with(products, settings.brand_ordering, settings.brand_limit),
        price_range: derive_price_range_with_floor(products, settings.price_slider_floor),
    }
}

/// One option per distinct size value, counted per variant.
///
/// Sorted numerically when every value is a number (`"6"`, `"6.5"`, `"7"`),
/// otherwise lexicographically.
#[must_use]
pub fn derive_size_options(products: &[Product]) -> Vec<FacetOption> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for size in products.iter().flat_map(|p| p.option_values(SIZE_OPTION)) {
        *counts.entry(size).or_default() += 1;
    }

    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(value, count)| FacetOption::new(value, value, count))
        .collect();

    let all_numeric = options
        .iter()
        .all(|o| o.value.trim().parse::<f64>().is_ok());

    if all_numeric {
        options.sort_by(|a, b| {
            let a_num = a.value.trim().parse::<f64>().unwrap_or_default();
            let b_num = b.value.trim().parse::<f64>().unwrap_or_default();
            a_num
                .total_cmp(&b_num)
                .then_with(|| a.value.cmp(&b.value))
        });
    } else {
        options.sort_by(|a, b| compare_labels(&a.value, &b.value));
    }

    options
}

/// One option per distinct colour, ignoring case.
///
/// `value` is the lower-cased colour, `label` keeps the casing first seen.
/// Sorted by label.
#[must_use]
pub fn derive_color_options(products: &[Product]) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for color in products.iter().flat_map(|p| p.option_values(COLOR_OPTION)) {
        let value = color.to_lowercase();
        if let Some(&pos) = positions.get(&value) {
            options[pos].count += 1;
        } else {
            positions.insert(value.clone(), options.len());
            options.push(FacetOption::new(value, color, 1));
        }
    }

    options.sort_by(|a, b| compare_labels(&a.label, &b.label));
    options
}

/// Brand options with the default ordering and limit.
#[must_use]
pub fn derive_brand_options(products: &[Product]) -> Vec<FacetOption> {
    derive_brand_options_with(
        products,
        BrandOrdering::Alphabetical,
        DEFAULT_BRAND_OPTION_LIMIT,
    )
}

/// One option per distinct lower-cased tag, excluding tags of two
/// characters or fewer and `collection:`/`type:` tags.
///
/// [`BrandOrdering::Alphabetical`] sorts by label before keeping the first
/// `limit`, so busy brands late in the alphabet can be dropped.
/// [`BrandOrdering::Count`] keeps the `limit` most frequent.
#[must_use]
pub fn derive_brand_options_with(
    products: &[Product],
    ordering: BrandOrdering,
    limit: usize,
) -> Vec<FacetOption> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tag in products.iter().flat_map(|p| &p.tags) {
        let brand = tag.to_lowercase();
        if brand.chars().count() <= 2 || NON_BRAND_MARKERS.iter().any(|m| brand.contains(m)) {
            continue;
        }
        *counts.entry(brand).or_default() += 1;
    }

    let mut options: Vec<FacetOption> = counts
        .into_iter()
        .map(|(value, count)| {
            let label = capitalize(&value);
            FacetOption {
                value,
                label,
                count,
            }
        })
        .collect();

    match ordering {
        BrandOrdering::Alphabetical => options.sort_by(|a, b| compare_labels(&a.label, &b.label)),
        BrandOrdering::Count => options.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| compare_labels(&a.label, &b.label))
        }),
    }

    options.truncate(limit);
    options
}

/// Slider bounds with the default floor of 500.
#[must_use]
pub fn derive_price_range(products: &[Product]) -> PriceRange {
    derive_price_range_with_floor(products, Decimal::from(DEFAULT_PRICE_SLIDER_FLOOR))
}

/// Slider bounds covering every product, rounded outward to tens.
///
/// The upper bound is at least `floor` and the lower bound at least zero.
/// An empty list yields `0..=floor`.
#[must_use]
pub fn derive_price_range_with_floor(products: &[Product], floor: Decimal) -> PriceRange {
    let Some(min) = products.iter().map(|p| p.price_range.min).min() else {
        return PriceRange::new(Decimal::ZERO, floor);
    };
    let max = products
        .iter()
        .map(|p| p.price_range.max)
        .max()
        .unwrap_or(min);

    let min = (min / Decimal::TEN)
        .floor()
        .checked_mul(Decimal::TEN)
        .unwrap_or(Decimal::MIN);
    // Amounts near the top of the Decimal range saturate instead of overflowing.
    let max = (max / Decimal::TEN)
        .ceil()
        .checked_mul(Decimal::TEN)
        .unwrap_or(Decimal::MAX);

    PriceRange::new(min.max(Decimal::ZERO), max.max(floor))
}

/// Case-insensitive comparison with the raw strings breaking ties.
fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "facets_test.rs"]
mod tests;
