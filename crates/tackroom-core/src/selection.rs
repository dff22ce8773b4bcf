//! Facet selections and their query-string encoding.
//!
//! The encoding is shared with the storefront pages and must stay exact:
//! multi-value facets are one comma-joined value (`size=8,9,10`), the price
//! window is a hyphen-joined pair (`price=0-500`), and the stock facet is the
//! literal `inStock=true`.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::products::PriceRange;

/// Characters escaped inside a single facet value. The `,` separator
/// between values is written literally. Readers decode the whole value
/// before splitting, so `size=8%2C9` and `size=8,9` both mean two sizes.
const VALUE_ESCAPES: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const SIZE_PARAM: &str = "size";
pub const COLOR_PARAM: &str = "color";
pub const BRAND_PARAM: &str = "brand";
pub const PRICE_PARAM: &str = "price";
pub const IN_STOCK_PARAM: &str = "inStock";

/// The user's active facet selections for one render.
///
/// Serialized in camelCase with the browser-side store's field names.
/// The price window's bounds are decimal strings (`"250"`), not JSON
/// numbers, so saved entries are not interchangeable with that store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sizes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brands: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<PriceRange>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub in_stock_only: bool,
}

impl FilterSelection {
    /// `true` when no facet would filter anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
            && self.colors.is_empty()
            && self.brands.is_empty()
            && self.price_range.is_none()
            && !self.in_stock_only
    }

    /// Parses a raw query string (with or without the leading `?`).
    ///
    /// Unknown keys are ignored. Only the first occurrence of a key is used.
    /// A `price` value that is not two numbers joined by `-` is ignored, and
    /// `inStock` only counts when it is exactly `"true"`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = query
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_component(key), value.to_string())
            })
            .collect();

        Self {
            sizes: first_value(&pairs, SIZE_PARAM)
                .map(split_values)
                .unwrap_or_default(),
            colors: first_value(&pairs, COLOR_PARAM)
                .map(split_values)
                .unwrap_or_default(),
            brands: first_value(&pairs, BRAND_PARAM)
                .map(split_values)
                .unwrap_or_default(),
            price_range: first_value(&pairs, PRICE_PARAM).and_then(parse_price),
            in_stock_only: first_value(&pairs, IN_STOCK_PARAM)
                .is_some_and(|v| decode_component(v) == "true"),
        }
    }

    /// Encodes the selection back into a query string without the leading
    /// `?`. Empty facets are omitted; an empty selection encodes to `""`.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        for (key, values) in [
            (SIZE_PARAM, &self.sizes),
            (COLOR_PARAM, &self.colors),
            (BRAND_PARAM, &self.brands),
        ] {
            if !values.is_empty() {
                params.push(format!("{key}={}", join_values(values)));
            }
        }

        if let Some(range) = &self.price_range {
            params.push(format!("{PRICE_PARAM}={}-{}", range.min, range.max));
        }

        if self.in_stock_only {
            params.push(format!("{IN_STOCK_PARAM}=true"));
        }

        params.join("&")
    }
}

/// Raw (still encoded) value of the first occurrence of `key`, unless empty.
fn first_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

/// Decodes a facet value, then splits it on `,`. Empty parts are dropped.
fn split_values(raw: &str) -> Vec<String> {
    decode_component(raw)
        .split(',')
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| utf8_percent_encode(v, VALUE_ESCAPES).to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Form-style decoding: `+` is a space, then percent-decoding.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Parses `"{min}-{max}"`. Anything after a second hyphen is ignored.
fn parse_price(raw: &str) -> Option<PriceRange> {
    decode_component(raw).parse().ok()
}

#[cfg(test)]
#[path = "selection_test.rs"]
mod tests;
