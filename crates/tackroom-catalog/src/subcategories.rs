//! Child subcategory listings for "Refine by" panels and mega menus.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tackroom_core::Product;

use crate::handle::normalize_product_type;
use crate::taxonomy::{path_key, TaxonomyIndex};

/// One child category link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryOption {
    pub handle: String,
    pub label: String,
    pub count: usize,
}

impl TaxonomyIndex {
    /// Direct children of `category[/subcategory]` in the taxonomy.
    ///
    /// Each child is the next path segment below the prefix. Its label is
    /// the first product type of the first path seen under it and its count
    /// is the number of rows under it at any depth. Children are returned in
    /// first-seen order.
    #[must_use]
    pub fn subcategories_for(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Vec<SubcategoryOption> {
        let base = path_key([Some(category), subcategory]);
        if base.is_empty() {
            return Vec::new();
        }
        let prefix = format!("{base}/");

        let mut options: Vec<SubcategoryOption> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for path in self.paths() {
            let Some(remainder) = path.strip_prefix(&prefix) else {
                continue;
            };
            let Some(next) = remainder.split('/').next().filter(|s| !s.is_empty()) else {
                continue;
            };
            let row_count = self.rows_for_path(path).count();

            if let Some(&pos) = positions.get(next) {
                options[pos].count += row_count;
            } else {
                let label = self
                    .rows_for_path(path)
                    .next()
                    .map_or_else(|| next.to_string(), |row| row.product_type.clone());
                positions.insert(next, options.len());
                options.push(SubcategoryOption {
                    handle: next.to_string(),
                    label,
                    count: row_count,
                });
            }
        }

        options
    }
}

/// Groups `products` by the handle of their product type.
///
/// The label is the first raw product type seen for each handle. Results are
/// sorted by count, largest first; equal counts keep first-seen order.
/// Products without a product type are skipped.
#[must_use]
pub fn product_type_subcategories(products: &[Product]) -> Vec<SubcategoryOption> {
    let mut options: Vec<SubcategoryOption> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for product_type in products.iter().filter_map(Product::product_type) {
        let handle = normalize_product_type(product_type);
        if handle.is_empty() {
            continue;
        }
        if let Some(&pos) = positions.get(&handle) {
            options[pos].count += 1;
        } else {
            positions.insert(handle.clone(), options.len());
            options.push(SubcategoryOption {
                handle,
                label: product_type.to_string(),
                count: 1,
            });
        }
    }

    options.sort_by(|a, b| b.count.cmp(&a.count));
    options
}

/// `true` when at least one product's product type normalizes to
/// `subcategory_handle`.
#[must_use]
pub fn is_valid_subcategory_path(subcategory_handle: &str, products: &[Product]) -> bool {
    products
        .iter()
        .filter_map(Product::product_type)
        .any(|product_type| normalize_product_type(product_type) == subcategory_handle)
}
