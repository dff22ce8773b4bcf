//! `taxonomy`: load report for the mapping dataset.

use std::path::Path;

use tackroom_catalog::{load_taxonomy, TaxonomyAction};

/// Print row, path and product-type counts plus one line per indexed path.
///
/// A missing or malformed dataset is reported, not treated as an error,
/// matching how pages degrade when the mapping is unavailable.
pub(crate) fn run_taxonomy(path: &Path) {
    let index = load_taxonomy(path);

    if index.is_empty() {
        println!("no taxonomy rows loaded from {}", path.display());
        return;
    }

    let count_action = |action: TaxonomyAction| {
        index.rows().iter().filter(|r| r.action == action).count()
    };

    println!(
        "loaded {} rows ({} include, {} exclude, {} merge), {} paths, {} product types from {}",
        index.len(),
        count_action(TaxonomyAction::Include),
        count_action(TaxonomyAction::Exclude),
        count_action(TaxonomyAction::Merge),
        index.path_count(),
        index.product_type_count(),
        path.display(),
    );

    println!("{:<44}{:<6}TITLE", "PATH", "ROWS");
    for category_path in index.paths() {
        println!(
            "{:<44}{:<6}{}",
            category_path,
            index.rows_for_path(category_path).count(),
            index.title_for(category_path),
        );
    }
}
