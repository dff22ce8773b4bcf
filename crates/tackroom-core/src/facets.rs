use serde::{Deserialize, Serialize};

use crate::products::PriceRange;

/// One selectable value in the filter sidebar, with the number of
/// occurrences it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
    pub count: usize,
}

impl FacetOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count,
        }
    }
}

/// How brand options are ordered before being truncated to the configured
/// limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrandOrdering {
    /// Sort by label, then keep the first `limit`.
    #[default]
    Alphabetical,
    /// Sort by count descending (label breaks ties), then keep the first `limit`.
    Count,
}

impl std::fmt::Display for BrandOrdering {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BrandOrdering::Alphabetical => write!(f, "alphabetical"),
            BrandOrdering::Count => write!(f, "count"),
        }
    }
}

/// Every facet the sidebar renders for one product list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub sizes: Vec<FacetOption>,
    pub colors: Vec<FacetOption>,
    pub brands: Vec<FacetOption>,
    pub price_range: PriceRange,
}
