//! Narrowing a product list by taxonomy and by sidebar facets.
//!
//! Every filter only removes products, so they compose in any order.

use std::collections::HashSet;

use tackroom_core::{FilterSelection, PriceRange, Product};

/// Option name carrying a variant's size.
pub const SIZE_OPTION: &str = "size";
/// Option name carrying a variant's colour.
pub const COLOR_OPTION: &str = "color";

/// Keeps products whose product type is in `allowed`, ignoring case and
/// surrounding whitespace.
///
/// An empty `allowed` list returns `products` unchanged so an incomplete
/// mapping never renders an empty page. Products without a product type are
/// dropped whenever `allowed` is non-empty.
#[must_use]
pub fn filter_by_allowed_types(products: Vec<Product>, allowed: &[String]) -> Vec<Product> {
    if allowed.is_empty() {
        tracing::warn!(
            products = products.len(),
            "no allowed product types — returning unfiltered catalog"
        );
        return products;
    }

    let allowed: HashSet<String> = allowed.iter().map(|t| t.trim().to_lowercase()).collect();
    let total = products.len();

    let filtered: Vec<Product> = products
        .into_iter()
        .filter(|p| {
            p.product_type()
                .is_some_and(|t| allowed.contains(&t.to_lowercase()))
        })
        .collect();

    tracing::debug!(
        total,
        kept = filtered.len(),
        allowed = allowed.len(),
        "filtered catalog by product type"
    );

    filtered
}

/// Applies every active facet in `selection`. Facets with no selected values
/// are skipped.
#[must_use]
pub fn apply_facets(products: Vec<Product>, selection: &FilterSelection) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| matches_selection(p, selection))
        .collect()
}

/// `true` when `product` passes every active facet in `selection`.
#[must_use]
pub fn matches_selection(product: &Product, selection: &FilterSelection) -> bool {
    matches_sizes(product, &selection.sizes)
        && matches_colors(product, &selection.colors)
        && matches_brands(product, &selection.brands)
        && selection
            .price_range
            .as_ref()
            .is_none_or(|range| matches_price(product, range))
        && (!selection.in_stock_only || product.available_for_sale)
}

#[must_use]
pub fn filter_by_size(products: Vec<Product>, sizes: &[String]) -> Vec<Product> {
    retain(products, |p| matches_sizes(p, sizes))
}

#[must_use]
pub fn filter_by_color(products: Vec<Product>, colors: &[String]) -> Vec<Product> {
    retain(products, |p| matches_colors(p, colors))
}

#[must_use]
pub fn filter_by_brand(products: Vec<Product>, brands: &[String]) -> Vec<Product> {
    retain(products, |p| matches_brands(p, brands))
}

/// Keeps products whose price range overlaps `range`, boundaries included.
#[must_use]
pub fn filter_by_price(products: Vec<Product>, range: &PriceRange) -> Vec<Product> {
    retain(products, |p| matches_price(p, range))
}

#[must_use]
pub fn filter_by_availability(products: Vec<Product>, in_stock_only: bool) -> Vec<Product> {
    if !in_stock_only {
        return products;
    }
    retain(products, |p| p.available_for_sale)
}

fn retain(products: Vec<Product>, keep: impl Fn(&Product) -> bool) -> Vec<Product> {
    products.into_iter().filter(|p| keep(p)).collect()
}

/// Any variant's size is one of `sizes`, compared exactly.
fn matches_sizes(product: &Product, sizes: &[String]) -> bool {
    sizes.is_empty()
        || product
            .option_values(SIZE_OPTION)
            .any(|size| sizes.iter().any(|s| s == size))
}

/// Any variant's colour is one of `colors`, ignoring case.
fn matches_colors(product: &Product, colors: &[String]) -> bool {
    colors.is_empty()
        || product
            .option_values(COLOR_OPTION)
            .any(|color| colors.iter().any(|c| c.to_lowercase() == color.to_lowercase()))
}

/// Any tag is one of `brands`, ignoring case.
fn matches_brands(product: &Product, brands: &[String]) -> bool {
    brands.is_empty()
        || product
            .tags
            .iter()
            .any(|tag| brands.iter().any(|b| b.to_lowercase() == tag.to_lowercase()))
}

fn matches_price(product: &Product, range: &PriceRange) -> bool {
    product.price_range.overlaps(range)
}

#[cfg(test)]
#[path = "filter_test.rs"]
mod tests;
