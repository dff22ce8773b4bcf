//! Page titles and breadcrumb trails for category paths.
//!
//! `title_for` consults the taxonomy; `breadcrumbs_for` only looks at the
//! path itself, so the last crumb and the page title can disagree.

use serde::{Deserialize, Serialize};

use crate::taxonomy::{path_segments, TaxonomyIndex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub label: String,
    /// Site-relative cumulative path, e.g. `"/horse/boots"`.
    pub href: String,
}

impl Breadcrumb {
    /// `href` prefixed with `site_url` (trailing slash ignored).
    #[must_use]
    pub fn absolute_href(&self, site_url: &str) -> String {
        format!("{}{}", site_url.trim_end_matches('/'), self.href)
    }
}

impl TaxonomyIndex {
    /// Display title for `path` (`"horse/boots"` or `"/horse/boots/"`).
    ///
    /// The first mapped product type when the path has rows, otherwise the
    /// title-cased last segment. Empty for an empty path.
    #[must_use]
    pub fn title_for(&self, path: &str) -> String {
        let segments = path_segments(path);
        let key = segments.join("/");

        if let Some(row) = self.rows_for_path(&key).next() {
            return row.product_type.clone();
        }

        segments.last().map(|s| title_case(s)).unwrap_or_default()
    }
}

/// One crumb per path segment, each linking to the cumulative path.
#[must_use]
pub fn breadcrumbs_for(path: &str) -> Vec<Breadcrumb> {
    let mut href = String::new();
    path_segments(path)
        .into_iter()
        .map(|segment| {
            href.push('/');
            href.push_str(segment);
            Breadcrumb {
                label: title_case(segment),
                href: href.clone(),
            }
        })
        .collect()
}

/// `"bell-boots"` → `"Bell Boots"`.
#[must_use]
pub fn title_case(segment: &str) -> String {
    segment
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
