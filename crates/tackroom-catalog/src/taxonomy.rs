//! The category mapping dataset and its process-wide index.
//!
//! The dataset is a hand-edited CSV with the header
//! `top_level,parent_category,subcategory_handle,product_type,action,merge_to,notes`.
//! Each row binds one catalog product type to a category path such as
//! `horse/boots` or `horse/boots/bell-boots`.
//!
//! Loading never fails the caller: a missing or unreadable dataset yields an
//! empty index (every lookup then reports "no mapping"), and individual bad
//! rows are logged and skipped.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Separator between path segments in an index key.
pub const PATH_SEPARATOR: char = '/';

static TAXONOMY: OnceLock<TaxonomyIndex> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxonomyAction {
    /// Shown at the row's path.
    Include,
    /// Suppressed from subcategory listings; never establishes a path.
    Exclude,
    /// Folded into the row's `merge_to` target.
    Merge,
}

impl std::fmt::Display for TaxonomyAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaxonomyAction::Include => write!(f, "include"),
            TaxonomyAction::Exclude => write!(f, "exclude"),
            TaxonomyAction::Merge => write!(f, "merge"),
        }
    }
}

impl std::str::FromStr for TaxonomyAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "include" => Ok(TaxonomyAction::Include),
            "exclude" => Ok(TaxonomyAction::Exclude),
            "merge" => Ok(TaxonomyAction::Merge),
            other => Err(format!("unknown action '{other}'")),
        }
    }
}

/// One validated rule from the mapping dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRow {
    /// First path segment, e.g. `"horse"`. Empty only for root rows.
    pub top_level: String,
    /// Second path segment, e.g. `"boots"`.
    pub parent_category: Option<String>,
    /// Third path segment, e.g. `"bell-boots"`.
    pub subcategory_handle: Option<String>,
    /// Catalog product type this rule matches, verbatim.
    pub product_type: String,
    pub action: TaxonomyAction,
    /// Target handle when `action` is [`TaxonomyAction::Merge`].
    pub merge_to: Option<String>,
    pub notes: Option<String>,
}

impl TaxonomyRow {
    /// Index key for this row: the non-empty segments joined by `/`.
    #[must_use]
    pub fn path(&self) -> String {
        path_key([
            Some(self.top_level.as_str()),
            self.parent_category.as_deref(),
            self.subcategory_handle.as_deref(),
        ])
    }
}

/// Joins the non-empty segments into an index key.
#[must_use]
pub fn path_key<'a>(segments: impl IntoIterator<Item = Option<&'a str>>) -> String {
    segments
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Splits a URL-style path (`"/horse/boots/"`) into its non-empty segments.
#[must_use]
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split(PATH_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Rows indexed by category path and by product type.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyIndex {
    rows: Vec<TaxonomyRow>,
    /// Paths in the order they first appear in the dataset.
    path_order: Vec<String>,
    by_path: HashMap<String, Vec<usize>>,
    by_product_type: HashMap<String, usize>,
}

impl TaxonomyIndex {
    /// Builds the index from validated rows in dataset order.
    ///
    /// `exclude` rows and rows without a path are kept out of the path index
    /// but still answer [`TaxonomyIndex::row_for_product_type`]. A later row
    /// for the same product type replaces an earlier one in that lookup.
    #[must_use]
    pub fn from_rows(rows: Vec<TaxonomyRow>) -> Self {
        let mut path_order = Vec::new();
        let mut by_path: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_product_type = HashMap::new();

        for (idx, row) in rows.iter().enumerate() {
            by_product_type.insert(row.product_type.clone(), idx);

            if row.action == TaxonomyAction::Exclude {
                continue;
            }

            let path = row.path();
            if path.is_empty() {
                continue;
            }

            by_path
                .entry(path)
                .or_insert_with_key(|key| {
                    path_order.push(key.clone());
                    Vec::new()
                })
                .push(idx);
        }

        Self {
            rows,
            path_order,
            by_path,
            by_product_type,
        }
    }

    /// Rows mapped to exactly `path`, in dataset order.
    pub fn rows_for_path<'a>(&'a self, path: &str) -> impl Iterator<Item = &'a TaxonomyRow> + 'a {
        self.by_path
            .get(path)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.rows[idx])
    }

    /// `true` when at least one row maps to exactly `path`.
    #[must_use]
    pub fn has_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// The last row for `product_type`, including `exclude` rows.
    #[must_use]
    pub fn row_for_product_type(&self, product_type: &str) -> Option<&TaxonomyRow> {
        self.by_product_type
            .get(product_type)
            .map(|&idx| &self.rows[idx])
    }

    /// Every indexed path, in first-seen order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.path_order.iter().map(String::as_str)
    }

    /// All validated rows, in dataset order.
    #[must_use]
    pub fn rows(&self) -> &[TaxonomyRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.path_order.len()
    }

    #[must_use]
    pub fn product_type_count(&self) -> usize {
        self.by_product_type.len()
    }
}

/// Raw CSV record before validation. Every column is optional here so a
/// short or sparse row reaches validation and is reported by line.
#[derive(Debug, Deserialize)]
struct RawTaxonomyRecord {
    #[serde(default)]
    top_level: Option<String>,
    #[serde(default)]
    parent_category: Option<String>,
    #[serde(default)]
    subcategory_handle: Option<String>,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    merge_to: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_record(raw: RawTaxonomyRecord) -> Result<TaxonomyRow, String> {
    let top_level = non_empty(raw.top_level);
    let parent_category = non_empty(raw.parent_category);
    let subcategory_handle = non_empty(raw.subcategory_handle);

    let product_type =
        non_empty(raw.product_type).ok_or_else(|| "missing product_type".to_string())?;
    let action = non_empty(raw.action)
        .ok_or_else(|| "missing action".to_string())?
        .parse::<TaxonomyAction>()?;
    let merge_to = non_empty(raw.merge_to);

    if action == TaxonomyAction::Merge && merge_to.is_none() {
        return Err("merge row has no merge_to target".to_string());
    }

    if top_level.is_none() && (parent_category.is_some() || subcategory_handle.is_some()) {
        return Err("row has a parent or subcategory but no top_level".to_string());
    }

    for segment in [&top_level, &parent_category, &subcategory_handle]
        .into_iter()
        .flatten()
    {
        if segment.contains(PATH_SEPARATOR) {
            return Err(format!("path segment '{segment}' contains '/'"));
        }
    }

    Ok(TaxonomyRow {
        top_level: top_level.unwrap_or_default(),
        parent_category,
        subcategory_handle,
        product_type,
        action,
        merge_to,
        notes: non_empty(raw.notes),
    })
}

/// Parses the mapping dataset from any reader.
///
/// Bad rows are logged with their line number and skipped.
///
/// # Errors
///
/// Returns [`CatalogError::Taxonomy`] only when the header row itself cannot
/// be read.
pub fn parse_taxonomy<R: Read>(reader: R, context: &str) -> Result<TaxonomyIndex, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| CatalogError::Taxonomy {
            path: context.to_owned(),
            source: e,
        })?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for record in csv_reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                skipped += 1;
                tracing::warn!(context, error = %e, "skipping unreadable taxonomy row");
                continue;
            }
        };

        if record.iter().all(str::is_empty) {
            continue;
        }

        let line = record.position().map_or(0, csv::Position::line);

        let validated = record
            .deserialize::<RawTaxonomyRecord>(Some(&headers))
            .map_err(|e| e.to_string())
            .and_then(validate_record);

        match validated {
            Ok(row) => rows.push(row),
            Err(reason) => {
                skipped += 1;
                tracing::warn!(context, line, %reason, "skipping malformed taxonomy row");
            }
        }
    }

    let index = TaxonomyIndex::from_rows(rows);

    tracing::info!(
        context,
        rows = index.len(),
        paths = index.path_count(),
        skipped,
        "taxonomy loaded"
    );

    Ok(index)
}

/// Loads the mapping dataset from `path`, degrading to an empty index if the
/// file is missing or unreadable.
#[must_use]
pub fn load_taxonomy(path: &Path) -> TaxonomyIndex {
    let context = path.display().to_string();

    let file = match std::fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %context, error = %e, "taxonomy dataset not readable — no category mappings available");
            return TaxonomyIndex::default();
        }
    };

    match parse_taxonomy(file, &context) {
        Ok(index) => index,
        Err(e) => {
            tracing::warn!(path = %context, error = %e, "taxonomy dataset malformed — no category mappings available");
            TaxonomyIndex::default()
        }
    }
}

/// Process-wide taxonomy, loaded from `path` on first use.
///
/// Later calls return the index from the first call regardless of `path`.
pub fn cached_taxonomy(path: &Path) -> &'static TaxonomyIndex {
    TAXONOMY.get_or_init(|| load_taxonomy(path))
}

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
