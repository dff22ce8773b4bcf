//! Storefront API response types for catalog exports.
//!
//! These mirror the GraphQL `Product` shape the storefront pages query:
//! connections are `{ edges: [{ node }] }`, money is `{ amount, currencyCode }`
//! with `amount` as a decimal string, and the canonical-path metafield is
//! `metafield(namespace: "custom", key: "primary_collection") { value }`.
//!
//! ### `productType`
//! A plain string; may be empty (`""`). Treated as absent during
//! normalization.
//!
//! ### `availableForSale`
//! May be missing from trimmed-down exports. Defaults to `true`
//! (optimistic) when absent, matching how the variant-level flag is read.
//!
//! ### `metafield`
//! `null` when the product has never been assigned a primary collection.

use serde::Deserialize;

/// A GraphQL connection: `{ "edges": [ { "node": T } ] }`.
#[derive(Debug, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<T> Connection<T> {
    /// Unwraps the edges into their nodes, preserving order.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

/// Top-level `{ "products": { "edges": [...] } }` envelope.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Connection<serde_json::Value>,
}

/// A product as returned by the storefront.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontProduct {
    /// Global ID, e.g. `"gid://shopify/Product/7012345678901"`.
    pub id: String,

    pub handle: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default = "default_available")]
    pub available_for_sale: bool,

    pub price_range: StorefrontPriceRange,

    #[serde(default)]
    pub variants: Connection<StorefrontVariant>,

    #[serde(default)]
    pub collections: Connection<StorefrontCollection>,

    #[serde(default)]
    pub metafield: Option<StorefrontMetafield>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontPriceRange {
    pub min_variant_price: MoneyV2,
    pub max_variant_price: MoneyV2,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    /// Decimal string, e.g. `"89.95"`.
    pub amount: String,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontVariant {
    pub id: String,

    /// Display title, e.g. `"Full / Black"` or `"Default Title"`.
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_available")]
    pub available_for_sale: bool,

    /// Missing on some exports; the product's minimum price stands in.
    #[serde(default)]
    pub price: Option<MoneyV2>,

    #[serde(default)]
    pub selected_options: Vec<StorefrontSelectedOption>,
}

#[derive(Debug, Deserialize)]
pub struct StorefrontSelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct StorefrontCollection {
    #[serde(default)]
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct StorefrontMetafield {
    #[serde(default)]
    pub value: Option<String>,
}

/// Serde default for the availability flags.
fn default_available() -> bool {
    true
}
