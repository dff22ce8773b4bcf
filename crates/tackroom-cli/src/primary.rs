//! `primary`: dry-run of primary collection assignment.
//!
//! Nothing is written back to the catalog; the plan is printed for review.

use std::path::Path;

use anyhow::Context;
use tackroom_catalog::{load_catalog, plan_primary_collections, PlanEntry};
use tackroom_core::AppConfig;

use crate::browse::catalog_path;

/// Format an optional path for display, returning `"—"` when `None`.
fn fmt_path(path: Option<&str>) -> &str {
    path.unwrap_or("\u{2014}")
}

/// Build and print the primary collection plan for a catalog export.
///
/// # Errors
///
/// Returns an error if no catalog export is configured or it cannot be
/// loaded.
pub(crate) fn run_primary(
    config: &AppConfig,
    catalog: Option<&Path>,
    only_changes: bool,
    json: bool,
) -> anyhow::Result<()> {
    let export = catalog_path(catalog, config)?;
    let products = load_catalog(export)
        .with_context(|| format!("loading catalog export {}", export.display()))?;

    let mut plan = plan_primary_collections(&products);
    if only_changes {
        plan.entries.retain(PlanEntry::needs_update);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    if plan.entries.is_empty() {
        println!("no products to report from {}", export.display());
    } else {
        println!(
            "{:<12}{:<36}{:<36}COMPUTED",
            "STATUS", "HANDLE", "RECORDED"
        );
        for entry in &plan.entries {
            println!(
                "{:<12}{:<36}{:<36}{}",
                entry.status.to_string(),
                entry.handle,
                fmt_path(entry.recorded.as_deref()),
                fmt_path(entry.computed.as_deref()),
            );
        }
    }

    let counts = plan.counts;
    println!(
        "{} products: {} unchanged, {} changed, {} missing, {} unresolved (dry run, nothing written)",
        counts.total(),
        counts.unchanged,
        counts.changed,
        counts.missing,
        counts.unresolved,
    );
    Ok(())
}
