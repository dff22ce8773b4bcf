//! Category path → allowed product types.

use std::collections::HashSet;

use crate::taxonomy::{path_key, TaxonomyIndex};

impl TaxonomyIndex {
    /// Product types that belong on the page at
    /// `top_level[/parent_category[/subcategory_handle]]`.
    ///
    /// An exact path match returns its rows' product types in dataset order.
    /// A top-level path with no rows of its own aggregates every path beneath
    /// it (deduplicated, first-seen order). Anything else returns an empty
    /// list, which callers treat as "page not found".
    ///
    /// Segments are compared verbatim: `"Horse"` does not match `"horse"`.
    /// A blank `top_level` never matches, whatever the child segments are.
    #[must_use]
    pub fn resolve_allowed_product_types(
        &self,
        top_level: &str,
        parent_category: Option<&str>,
        subcategory_handle: Option<&str>,
    ) -> Vec<String> {
        let segments = [Some(top_level), parent_category, subcategory_handle];
        if segments.iter().flatten().any(|s| s.contains('/')) {
            tracing::debug!(top_level, "path segment contains '/' — no mapping");
            return Vec::new();
        }

        if top_level.trim().is_empty() {
            return Vec::new();
        }

        let key = path_key(segments);

        if self.has_path(&key) {
            return self
                .rows_for_path(&key)
                .map(|row| row.product_type.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect();
        }

        let requested_child = [parent_category, subcategory_handle]
            .into_iter()
            .flatten()
            .any(|s| !s.trim().is_empty());
        if requested_child {
            tracing::debug!(path = %key, "no mapping for subcategory path");
            return Vec::new();
        }

        let prefix = format!("{key}/");
        let mut seen = HashSet::new();
        let mut aggregated = Vec::new();

        for path in self.paths().filter(|p| p.starts_with(&prefix)) {
            for row in self.rows_for_path(path) {
                let product_type = row.product_type.trim();
                if !product_type.is_empty() && seen.insert(product_type) {
                    aggregated.push(product_type.to_string());
                }
            }
        }

        tracing::debug!(
            path = %key,
            product_types = aggregated.len(),
            "aggregated top-level category from child paths"
        );

        aggregated
    }
}

#[cfg(test)]
mod tests {
    use crate::taxonomy::{TaxonomyAction, TaxonomyIndex, TaxonomyRow};

    fn make_row(
        top: &str,
        parent: Option<&str>,
        sub: Option<&str>,
        product_type: &str,
        action: TaxonomyAction,
    ) -> TaxonomyRow {
        TaxonomyRow {
            top_level: top.to_string(),
            parent_category: parent.map(str::to_string),
            subcategory_handle: sub.map(str::to_string),
            product_type: product_type.to_string(),
            action,
            merge_to: (action == TaxonomyAction::Merge).then(|| "bell-boots".to_string()),
            notes: None,
        }
    }

    fn make_index() -> TaxonomyIndex {
        use TaxonomyAction::{Exclude, Include};
        TaxonomyIndex::from_rows(vec![
            make_row("horse", Some("boots"), None, "Tendon Boots", Include),
            make_row("horse", Some("boots"), None, "Bell boots", Include),
            make_row("horse", Some("boots"), None, "Novelty Socks", Exclude),
            make_row("horse", Some("rugs"), None, "Cotton Rugs", Include),
            make_row("horse", Some("rugs"), None, "Tendon Boots", Include),
            make_row("horse", Some("boots"), Some("bell-boots"), "Bell boots", Include),
            make_row("dog", Some("toys"), None, "Dog Toys", Include),
            make_row("rider", None, None, "Helmets", Include),
        ])
    }

    #[test]
    fn exact_match_returns_types_in_dataset_order() {
        let types = make_index().resolve_allowed_product_types("horse", Some("boots"), None);
        assert_eq!(types, vec!["Tendon Boots", "Bell boots"]);
    }

    #[test]
    fn exact_match_skips_excluded_rows() {
        let types = make_index().resolve_allowed_product_types("horse", Some("boots"), None);
        assert!(!types.iter().any(|t| t == "Novelty Socks"));
    }

    #[test]
    fn third_level_exact_match() {
        let types =
            make_index().resolve_allowed_product_types("horse", Some("boots"), Some("bell-boots"));
        assert_eq!(types, vec!["Bell boots"]);
    }

    #[test]
    fn top_level_aggregates_children_deduplicated() {
        let types = make_index().resolve_allowed_product_types("horse", None, None);
        assert_eq!(types, vec!["Tendon Boots", "Bell boots", "Cotton Rugs"]);
    }

    #[test]
    fn top_level_with_own_rows_does_not_aggregate() {
        let types = make_index().resolve_allowed_product_types("rider", None, None);
        assert_eq!(types, vec!["Helmets"]);
    }

    #[test]
    fn top_level_prefix_does_not_match_sibling_names() {
        let index = TaxonomyIndex::from_rows(vec![make_row(
            "horsewear",
            Some("rugs"),
            None,
            "Rugs",
            TaxonomyAction::Include,
        )]);
        assert!(index
            .resolve_allowed_product_types("horse", None, None)
            .is_empty());
    }

    #[test]
    fn unknown_subcategory_is_empty() {
        let types = make_index().resolve_allowed_product_types("horse", Some("saddles"), None);
        assert!(types.is_empty());
    }

    #[test]
    fn empty_segments_are_treated_as_absent() {
        let types = make_index().resolve_allowed_product_types("horse", Some(""), Some(" "));
        assert_eq!(types, vec!["Tendon Boots", "Bell boots", "Cotton Rugs"]);
    }

    #[test]
    fn blank_top_level_is_empty() {
        let index = TaxonomyIndex::from_rows(vec![
            make_row("boots", None, None, "Yard Boots", TaxonomyAction::Include),
            make_row("horse", Some("boots"), None, "Tendon Boots", TaxonomyAction::Include),
        ]);
        assert_eq!(
            index.resolve_allowed_product_types("boots", None, None),
            vec!["Yard Boots"]
        );
        assert!(index
            .resolve_allowed_product_types("", Some("boots"), None)
            .is_empty());
        assert!(index
            .resolve_allowed_product_types(" ", Some("horse"), Some("boots"))
            .is_empty());
        assert!(index.resolve_allowed_product_types("", None, None).is_empty());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let types = make_index().resolve_allowed_product_types("Horse", Some("Boots"), None);
        assert!(types.is_empty());
    }

    #[test]
    fn segment_with_separator_is_empty() {
        let types = make_index().resolve_allowed_product_types("horse/boots", None, None);
        assert!(types.is_empty());
    }

    #[test]
    fn empty_index_resolves_nothing() {
        let index = TaxonomyIndex::default();
        assert!(index
            .resolve_allowed_product_types("horse", None, None)
            .is_empty());
        assert!(index
            .resolve_allowed_product_types("horse", Some("boots"), None)
            .is_empty());
    }
}
