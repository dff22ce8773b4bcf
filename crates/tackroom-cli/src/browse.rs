//! `resolve` and `browse`: what a category page would show.
//!
//! Both read the process-wide taxonomy and print JSON to stdout.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tackroom_catalog::{
    apply_facets, breadcrumbs_for, cached_taxonomy, derive_facet_options, filter_by_allowed_types,
    load_catalog, path_segments, Breadcrumb, FacetSettings, JsonFilePreferenceStore,
    PreferenceStore, SubcategoryOption,
};
use tackroom_core::{AppConfig, FacetOptions, FilterSelection, PriceRange, Product};

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Category path, e.g. horse/boots
    pub path: String,
    /// Catalog export (defaults to TACKROOM_CATALOG_PATH)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    /// Facet query string, e.g. "size=8,9&price=0-500&inStock=true"
    #[arg(long)]
    pub query: Option<String>,
    /// Size values to keep (comma-separated or repeated)
    #[arg(long, value_delimiter = ',')]
    pub size: Vec<String>,
    /// Colour values to keep
    #[arg(long, value_delimiter = ',')]
    pub color: Vec<String>,
    /// Brand tags to keep
    #[arg(long, value_delimiter = ',')]
    pub brand: Vec<String>,
    /// Price window as MIN-MAX, e.g. 0-500
    #[arg(long)]
    pub price: Option<PriceRange>,
    /// Only products available for sale
    #[arg(long)]
    pub in_stock: bool,
    /// Remember this selection for the category path
    #[arg(long)]
    pub save_preferences: bool,
    /// Ignore remembered selections when no facets are given
    #[arg(long)]
    pub no_preferences: bool,
}

impl BrowseArgs {
    /// Selection from `--query`, extended by the individual facet flags.
    /// A flag given for price replaces a price from the query.
    #[must_use]
    pub fn selection(&self) -> FilterSelection {
        let mut selection = self
            .query
            .as_deref()
            .map(FilterSelection::from_query)
            .unwrap_or_default();

        selection.sizes.extend(self.size.iter().cloned());
        selection.colors.extend(self.color.iter().cloned());
        selection.brands.extend(self.brand.iter().cloned());
        if self.price.is_some() {
            selection.price_range = self.price;
        }
        selection.in_stock_only |= self.in_stock;
        selection
    }
}

/// Splits `path` into at most three category segments.
pub(crate) fn split_category_path(path: &str) -> anyhow::Result<(&str, Option<&str>, Option<&str>)> {
    match path_segments(path).as_slice() {
        [] => anyhow::bail!("category path is empty"),
        [top] => Ok((*top, None, None)),
        [top, parent] => Ok((*top, Some(*parent), None)),
        [top, parent, sub] => Ok((*top, Some(*parent), Some(*sub))),
        _ => anyhow::bail!("category path \"{path}\" has more than three segments"),
    }
}

#[derive(Debug, Serialize)]
struct ResolveReport {
    path: String,
    title: String,
    breadcrumbs: Vec<Breadcrumb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical_url: Option<String>,
    allowed_product_types: Vec<String>,
    subcategories: Vec<SubcategoryOption>,
}

/// Print what the taxonomy says about one category path.
///
/// # Errors
///
/// Returns an error if `path` is not a valid category path.
pub(crate) fn run_resolve(config: &AppConfig, path: &str) -> anyhow::Result<()> {
    let (top_level, parent, sub) = split_category_path(path)?;
    let taxonomy = cached_taxonomy(&config.taxonomy_path);
    let key = path_segments(path).join("/");

    let breadcrumbs = breadcrumbs_for(&key);
    let canonical_url = config.site_url.as_deref().and_then(|site| {
        breadcrumbs
            .last()
            .map(|crumb| crumb.absolute_href(site))
    });

    let report = ResolveReport {
        title: taxonomy.title_for(&key),
        breadcrumbs,
        canonical_url,
        allowed_product_types: taxonomy.resolve_allowed_product_types(top_level, parent, sub),
        subcategories: if sub.is_none() {
            taxonomy.subcategories_for(top_level, parent)
        } else {
            Vec::new()
        },
        path: key,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct ProductSummary<'a> {
    id: &'a str,
    handle: &'a str,
    title: &'a str,
    product_type: Option<&'a str>,
    price_range: PriceRange,
    available_for_sale: bool,
}

impl<'a> From<&'a Product> for ProductSummary<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            id: &product.id,
            handle: &product.handle,
            title: &product.title,
            product_type: product.product_type(),
            price_range: product.price_range,
            available_for_sale: product.available_for_sale,
        }
    }
}

#[derive(Debug, Serialize)]
struct BrowseReport<'a> {
    path: String,
    allowed_product_types: Vec<String>,
    /// The taxonomy had no types for this page and the catalog was shown
    /// unfiltered.
    unfiltered: bool,
    query: String,
    selection: &'a FilterSelection,
    in_category: usize,
    matched: usize,
    facets: FacetOptions,
    products: Vec<ProductSummary<'a>>,
}

/// Filter the catalog export down to the page at `args.path`.
///
/// Facet options are derived from the category page before facets are
/// applied, matching what the sidebar offers.
///
/// # Errors
///
/// Returns an error if the path is invalid or unmapped, no catalog export is
/// configured, the export cannot be loaded, or preferences cannot be saved.
pub(crate) fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<()> {
    let (top_level, parent, sub) = split_category_path(&args.path)?;
    let key = path_segments(&args.path).join("/");
    let taxonomy = cached_taxonomy(&config.taxonomy_path);

    let allowed = taxonomy.resolve_allowed_product_types(top_level, parent, sub);
    if allowed.is_empty() && parent.is_some() {
        anyhow::bail!("no product types are mapped to /{key}");
    }

    let export = catalog_path(args.catalog.as_deref(), config)?;
    let products = load_catalog(export)
        .with_context(|| format!("loading catalog export {}", export.display()))?;

    let page = filter_by_allowed_types(products, &allowed);

    let mut store = JsonFilePreferenceStore::new(&config.preferences_path);
    let mut selection = args.selection();
    if selection.is_empty() && !args.no_preferences {
        if let Some(saved) = store.get(&key) {
            tracing::info!(path = %key, query = %saved.to_query(), "restored saved filter preferences");
            selection = saved;
        }
    }
    if args.save_preferences {
        store.save(&key, &selection)?;
    }

    let facets = derive_facet_options(&page, &FacetSettings::from_app_config(config));
    let matched = apply_facets(page.clone(), &selection);

    let report = BrowseReport {
        unfiltered: allowed.is_empty(),
        allowed_product_types: allowed,
        query: selection.to_query(),
        selection: &selection,
        in_category: page.len(),
        matched: matched.len(),
        facets,
        products: matched.iter().map(ProductSummary::from).collect(),
        path: key,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// `--catalog` when given, otherwise the configured export.
pub(crate) fn catalog_path<'a>(
    flag: Option<&'a Path>,
    config: &'a AppConfig,
) -> anyhow::Result<&'a Path> {
    flag.or(config.catalog_path.as_deref()).ok_or_else(|| {
        anyhow::anyhow!("no catalog export given; pass --catalog or set TACKROOM_CATALOG_PATH")
    })
}
