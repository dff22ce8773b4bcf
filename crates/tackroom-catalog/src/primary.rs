//! Canonical ("primary") collection path for each product.
//!
//! Assignment is pure. The batch plan only compares computed paths against
//! the recorded `custom.primary_collection` metafield; writing values back is
//! left to whoever consumes the plan.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tackroom_core::Product;

use crate::handle::{collection_for_product_type, normalize_product_type};

/// Computes `product`'s canonical path, or `None` when it needs manual
/// categorization.
///
/// First success wins:
/// 1. the product type, as `{collection}/{handle}` (or just `{collection}`
///    when the two are equal);
/// 2. the first tag that is not `_`-prefixed, is longer than two characters
///    and does not mention `sale` or `new`, treated like a product type;
/// 3. the handle of the first collection the product belongs to.
#[must_use]
pub fn assign_primary_collection(product: &Product) -> Option<String> {
    if let Some(product_type) = product.product_type() {
        return Some(path_for_type(product_type));
    }

    if let Some(tag) = product.tags.iter().find(|tag| is_category_tag(tag)) {
        return Some(path_for_type(tag));
    }

    let fallback = product.first_collection_handle().map(str::to_string);
    if fallback.is_none() {
        tracing::debug!(product_id = %product.id, "no primary collection could be derived");
    }
    fallback
}

/// The recorded metafield value when present, otherwise
/// [`assign_primary_collection`].
#[must_use]
pub fn primary_collection_with_priority(product: &Product) -> Option<String> {
    product
        .primary_collection
        .clone()
        .or_else(|| assign_primary_collection(product))
}

/// Computed paths keyed by product id. Unresolvable products are omitted.
#[must_use]
pub fn assign_primary_collections(products: &[Product]) -> HashMap<String, String> {
    products
        .iter()
        .filter_map(|p| assign_primary_collection(p).map(|path| (p.id.clone(), path)))
        .collect()
}

fn path_for_type(product_type: &str) -> String {
    let collection = collection_for_product_type(product_type);
    let subcategory = normalize_product_type(product_type);
    if subcategory.is_empty() || subcategory == collection {
        collection.to_string()
    } else {
        format!("{collection}/{subcategory}")
    }
}

fn is_category_tag(tag: &str) -> bool {
    let lower = tag.to_lowercase();
    !tag.starts_with('_')
        && tag.chars().count() > 2
        && !lower.contains("sale")
        && !lower.contains("new")
}

/// How a product's computed path relates to its recorded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Computed and recorded paths agree.
    Unchanged,
    /// Both exist but differ.
    Changed,
    /// A path was computed but nothing is recorded yet.
    Missing,
    /// No path could be computed.
    Unresolved,
}

impl std::fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanStatus::Unchanged => write!(f, "unchanged"),
            PlanStatus::Changed => write!(f, "changed"),
            PlanStatus::Missing => write!(f, "missing"),
            PlanStatus::Unresolved => write!(f, "unresolved"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub product_id: String,
    pub handle: String,
    pub product_type: Option<String>,
    pub recorded: Option<String>,
    pub computed: Option<String>,
    pub status: PlanStatus,
}

impl PlanEntry {
    /// `true` when applying the plan would write a new value.
    #[must_use]
    pub fn needs_update(&self) -> bool {
        matches!(self.status, PlanStatus::Changed | PlanStatus::Missing)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanCounts {
    pub unchanged: usize,
    pub changed: usize,
    pub missing: usize,
    pub unresolved: usize,
}

impl PlanCounts {
    fn record(&mut self, status: PlanStatus) {
        match status {
            PlanStatus::Unchanged => self.unchanged += 1,
            PlanStatus::Changed => self.changed += 1,
            PlanStatus::Missing => self.missing += 1,
            PlanStatus::Unresolved => self.unresolved += 1,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.unchanged + self.changed + self.missing + self.unresolved
    }
}

/// Dry-run comparison of computed and recorded primary collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryCollectionPlan {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<PlanEntry>,
    pub counts: PlanCounts,
}

impl PrimaryCollectionPlan {
    /// Entries that would change the recorded value.
    pub fn updates(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.needs_update())
    }
}

/// Builds the dry-run plan for `products`, in catalog order.
#[must_use]
pub fn plan_primary_collections(products: &[Product]) -> PrimaryCollectionPlan {
    let mut counts = PlanCounts::default();

    let entries: Vec<PlanEntry> = products
        .iter()
        .map(|product| {
            let computed = assign_primary_collection(product);
            let recorded = product.primary_collection.clone();
            let status = match (&computed, &recorded) {
                (None, _) => PlanStatus::Unresolved,
                (Some(_), None) => PlanStatus::Missing,
                (Some(c), Some(r)) if c == r => PlanStatus::Unchanged,
                (Some(_), Some(_)) => PlanStatus::Changed,
            };
            counts.record(status);
            PlanEntry {
                product_id: product.id.clone(),
                handle: product.handle.clone(),
                product_type: product.product_type().map(str::to_string),
                recorded,
                computed,
                status,
            }
        })
        .collect();

    tracing::info!(
        total = counts.total(),
        unchanged = counts.unchanged,
        changed = counts.changed,
        missing = counts.missing,
        unresolved = counts.unresolved,
        "primary collection plan built"
    );

    PrimaryCollectionPlan {
        generated_at: Utc::now(),
        entries,
        counts,
    }
}

#[cfg(test)]
#[path = "primary_test.rs"]
mod tests;
