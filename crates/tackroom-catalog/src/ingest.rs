//! Ingestion boundary: raw storefront exports to validated [`Product`]s.
//!
//! Everything downstream (filters, facets, primary-collection assignment)
//! works on the typed [`Product`] and never touches loosely-shaped JSON.

use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use tackroom_core::{CollectionRef, PriceRange, Product, SelectedOption, Variant};

use crate::error::CatalogError;
use crate::types::{MoneyV2, ProductsEnvelope, StorefrontProduct, StorefrontVariant};

/// Normalizes a raw [`StorefrontProduct`] into a [`Product`].
///
/// # Errors
///
/// Returns [`CatalogError::Normalization`] if the product has no id or
/// handle, a price amount is not a decimal, or the price range is inverted.
pub fn normalize_product(product: StorefrontProduct) -> Result<Product, CatalogError> {
    let product_id = product.id.trim().to_string();
    if product_id.is_empty() {
        return Err(CatalogError::Normalization {
            product_id: format!("(handle {})", product.handle),
            reason: "product has no id".into(),
        });
    }
    if product.handle.trim().is_empty() {
        return Err(CatalogError::Normalization {
            product_id,
            reason: "product has no handle".into(),
        });
    }

    let min = parse_amount(&product.price_range.min_variant_price, &product_id)?;
    let max = parse_amount(&product.price_range.max_variant_price, &product_id)?;
    if min > max {
        return Err(CatalogError::Normalization {
            product_id,
            reason: format!("price range is inverted ({min} > {max})"),
        });
    }

    // Normalize product_type: treat empty string as absent.
    let product_type = product.product_type.filter(|s| !s.trim().is_empty());

    let primary_collection = product
        .metafield
        .and_then(|m| m.value)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    let variants = product
        .variants
        .into_nodes()
        .map(|variant| normalize_variant(variant, min, &product_id))
        .collect::<Result<Vec<_>, _>>()?;

    let collections = product
        .collections
        .into_nodes()
        .filter(|c| !c.handle.trim().is_empty())
        .map(|c| CollectionRef {
            id: c.id,
            handle: c.handle,
            title: c.title,
        })
        .collect();

    Ok(Product {
        id: product_id,
        handle: product.handle,
        title: product.title,
        product_type,
        tags: product.tags,
        collections,
        price_range: PriceRange::new(min, max),
        available_for_sale: product.available_for_sale,
        variants,
        primary_collection,
    })
}

fn normalize_variant(
    variant: StorefrontVariant,
    fallback_price: Decimal,
    product_id: &str,
) -> Result<Variant, CatalogError> {
    let price = match &variant.price {
        Some(money) => parse_amount(money, product_id)?,
        None => fallback_price,
    };

    Ok(Variant {
        id: variant.id,
        title: variant.title,
        available_for_sale: variant.available_for_sale,
        price,
        selected_options: variant
            .selected_options
            .into_iter()
            .map(|opt| SelectedOption {
                name: opt.name,
                value: opt.value,
            })
            .collect(),
    })
}

fn parse_amount(money: &MoneyV2, product_id: &str) -> Result<Decimal, CatalogError> {
    Decimal::from_str(money.amount.trim()).map_err(|e| CatalogError::Normalization {
        product_id: product_id.to_owned(),
        reason: format!("invalid amount \"{}\": {e}", money.amount),
    })
}

/// Reads and normalizes a catalog export from disk.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, and the errors of
/// [`parse_catalog`] otherwise.
pub fn load_catalog(path: &Path) -> Result<Vec<Product>, CatalogError> {
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content, &path.display().to_string())
}

/// Parses a catalog export.
///
/// Accepted shapes: a bare JSON array of products, a
/// `{"products": {"edges": [...]}}` connection, or the same wrapped in a
/// GraphQL `{"data": ...}` envelope. Products that fail to deserialize or
/// normalize are logged and skipped.
///
/// # Errors
///
/// Returns [`CatalogError::Json`] if `content` is not JSON and
/// [`CatalogError::UnrecognizedCatalog`] if it is none of the shapes above.
pub fn parse_catalog(content: &str, context: &str) -> Result<Vec<Product>, CatalogError> {
    let root: serde_json::Value =
        serde_json::from_str(content).map_err(|e| CatalogError::Json {
            context: context.to_owned(),
            source: e,
        })?;

    let raw_products = extract_product_nodes(root).ok_or_else(|| {
        CatalogError::UnrecognizedCatalog {
            context: context.to_owned(),
        }
    })?;

    let total = raw_products.len();
    let mut products = Vec::with_capacity(total);

    for (position, raw) in raw_products.into_iter().enumerate() {
        let storefront: StorefrontProduct = match serde_json::from_value(raw) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(
                    context,
                    position,
                    error = %e,
                    "skipping product — unexpected shape"
                );
                continue;
            }
        };

        match normalize_product(storefront) {
            Ok(product) => products.push(product),
            Err(e) => {
                tracing::warn!(context, error = %e, "skipping product — normalization failed");
            }
        }
    }

    tracing::info!(
        context,
        total,
        loaded = products.len(),
        "catalog export loaded"
    );

    Ok(products)
}

fn extract_product_nodes(root: serde_json::Value) -> Option<Vec<serde_json::Value>> {
    match root {
        serde_json::Value::Array(items) => Some(items),
        serde_json::Value::Object(mut map) => {
            if let Some(data) = map.remove("data") {
                return extract_product_nodes(data);
            }
            let products = map.remove("products")?;
            if let serde_json::Value::Array(items) = products {
                return Some(items);
            }
            let envelope: ProductsEnvelope =
                serde_json::from_value(serde_json::json!({ "products": products })).ok()?;
            Some(envelope.products.into_nodes().collect())
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "ingest_test.rs"]
mod tests;
