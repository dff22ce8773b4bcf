//! Category mapping and product filtering for the tackroom storefront.
//!
//! The taxonomy dataset decides which product types belong under each
//! `/{category}/{subcategory}/{subsubcategory}` path; the filter engine then
//! narrows the catalog by those types and by sidebar facets.

pub mod breadcrumbs;
pub mod error;
pub mod facets;
pub mod filter;
pub mod handle;
pub mod ingest;
pub mod preferences;
pub mod primary;
pub mod resolver;
pub mod subcategories;
pub mod taxonomy;
pub mod types;

pub use breadcrumbs::{breadcrumbs_for, title_case, Breadcrumb};
pub use error::CatalogError;
pub use facets::{
    derive_brand_options, derive_brand_options_with, derive_color_options, derive_facet_options,
    derive_price_range, derive_price_range_with_floor, derive_size_options, FacetSettings,
};
pub use filter::{
    apply_facets, filter_by_allowed_types, filter_by_availability, filter_by_brand,
    filter_by_color, filter_by_price, filter_by_size, matches_selection,
};
pub use handle::{
    collection_for_product_type, normalize_product_type, DEFAULT_COLLECTION,
    PRODUCT_TYPE_TO_COLLECTION,
};
pub use ingest::{load_catalog, normalize_product, parse_catalog};
pub use preferences::{
    preference_key, JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore,
};
pub use primary::{
    assign_primary_collection, assign_primary_collections, plan_primary_collections,
    primary_collection_with_priority, PlanCounts, PlanEntry, PlanStatus, PrimaryCollectionPlan,
};
pub use subcategories::{is_valid_subcategory_path, product_type_subcategories, SubcategoryOption};
pub use taxonomy::{
    cached_taxonomy, load_taxonomy, parse_taxonomy, path_segments, TaxonomyAction, TaxonomyIndex,
    TaxonomyRow,
};
