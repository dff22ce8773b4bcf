use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as consumed by the mapping and filtering engine.
///
/// Products are owned by the external catalog; the engine only ever reads
/// them and hands back filtered copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Storefront global ID, e.g. `"gid://shopify/Product/7012345678901"`.
    pub id: String,
    /// URL slug, e.g. `"tendon-boots-pro"`.
    pub handle: String,
    pub title: String,
    /// Free-text catalog grouping, e.g. `"Tendon Boots"`. Empty strings are
    /// normalized to `None` at the ingestion boundary.
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    /// Collections the product belongs to, in catalog order.
    pub collections: Vec<CollectionRef>,
    pub price_range: PriceRange,
    pub available_for_sale: bool,
    pub variants: Vec<Variant>,
    /// Value of the `custom.primary_collection` metafield, if one was
    /// recorded for this product.
    pub primary_collection: Option<String>,
}

impl Product {
    /// Returns the trimmed product type, or `None` when absent or blank.
    #[must_use]
    pub fn product_type(&self) -> Option<&str> {
        self.product_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Iterates the value of the option named `name` (case-insensitive) for
    /// every variant that carries it.
    pub fn option_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.variants.iter().filter_map(move |v| v.option_value(name))
    }

    /// Handle of the first collection the product belongs to.
    #[must_use]
    pub fn first_collection_handle(&self) -> Option<&str> {
        self.collections.first().map(|c| c.handle.as_str())
    }
}

/// A purchasable variant of a [`Product`], e.g. one size/colour combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    /// Display title, e.g. `"Full / Black"`.
    pub title: String,
    pub available_for_sale: bool,
    pub price: Decimal,
    pub selected_options: Vec<SelectedOption>,
}

impl Variant {
    /// Value of the first selected option whose name matches `name`
    /// ignoring ASCII case.
    #[must_use]
    pub fn option_value(&self, name: &str) -> Option<&str> {
        self.selected_options
            .iter()
            .find(|opt| opt.name.eq_ignore_ascii_case(name))
            .map(|opt| opt.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: String,
    pub handle: String,
    pub title: String,
}

/// Inclusive price window. Used both for a product's min/max variant price
/// and for the user's price facet selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    #[must_use]
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// `true` when the two windows share at least one point. Touching
    /// boundaries count as overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min <= other.max && self.max >= other.min
    }
}

impl std::str::FromStr for PriceRange {
    type Err = String;

    /// Parses the `"{min}-{max}"` form used by the `price` query parameter.
    /// Anything after a second hyphen is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let min = parse_bound(parts.next(), "min")?;
        let max = parse_bound(parts.next(), "max")?;
        Ok(Self::new(min, max))
    }
}

fn parse_bound(part: Option<&str>, which: &str) -> Result<Decimal, String> {
    let part = part
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| format!("price range is missing its {which} bound"))?;
    part.parse::<Decimal>()
        .map_err(|e| format!("invalid {which} price \"{part}\": {e}"))
}
