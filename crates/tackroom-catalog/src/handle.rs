//! Product-type handles and the static product-type → collection table.

use std::sync::LazyLock;

use regex::Regex;

static NON_ALPHANUMERIC_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

/// Collection used for product types missing from
/// [`PRODUCT_TYPE_TO_COLLECTION`].
pub const DEFAULT_COLLECTION: &str = "all-products";

/// Known product types and the core collection they belong to. Keys are
/// matched exactly as they appear in the catalog.
pub const PRODUCT_TYPE_TO_COLLECTION: &[(&str, &str)] = &[
    // Women's clothing
    ("Clothing - Ladies Clothing", "womens-clothing"),
    ("Breeches", "womens-clothing"),
    ("Womens", "womens-clothing"),
    ("Ladies Jacket", "womens-clothing"),
    ("Ladies Competition Jacket", "womens-clothing"),
    ("Ladies Shirt", "womens-clothing"),
    ("Riding Tights", "womens-clothing"),
    ("tights", "womens-clothing"),
    // Men's clothing
    ("Mens Competition Jacket", "mens-clothing"),
    ("Mens", "mens-clothing"),
    // Horse boots
    ("Horse Boots", "horse-boots"),
    ("HORSE: Horse Boots", "horse-boots"),
    ("Tendon Boots", "horse-boots"),
    ("Bell boots", "horse-boots"),
    ("Overreach Boots", "horse-boots"),
    ("Fetlock boots", "horse-boots"),
    // Horse rugs
    ("Rugs", "horse-rugs"),
    ("Cotton Rugs", "horse-rugs"),
    ("Rain Rugs", "horse-rugs"),
    // Saddles & tack
    ("Bits", "saddles-tack"),
    ("HORSE: Bits", "saddles-tack"),
    ("Saddle Cloths", "saddles-tack"),
    ("HORSE: Saddlecloths", "saddles-tack"),
    ("Saddle Pads & Blankets", "saddles-tack"),
    ("Stirrup Leathers", "saddles-tack"),
    // Horse health
    ("STABLE: Supplements", "horse-health"),
    ("Veterinary", "horse-health"),
    ("STABLE: First Aid & Dressings", "horse-health"),
    // Stable & grooming
    ("STABLE: Grooming", "stable-gear"),
    ("STABLE: Show Preparation", "stable-gear"),
    // Dog
    ("Dog Collars & Leads", "dog-products"),
    ("Dog Toys", "dog-products"),
    ("Dog Treats", "dog-products"),
    ("Dog Grooming & Coat Care", "dog-products"),
    ("Dog Accessories", "dog-products"),
    ("Dog Supplements", "dog-products"),
    // Cat
    ("Cat Gyms & Toys", "cat-products"),
    // Jewellery
    ("Jewellery", "jewellery"),
    ("Rings", "jewellery"),
    ("Charm Bead", "jewellery"),
    ("Locket", "jewellery"),
    // Rider safety
    ("Helmets", "rider-safety"),
    // Giftware
    ("RIDER: Giftware", "giftware"),
    ("Gifts", "giftware"),
];

/// Turns a free-text product type into a URL-safe handle.
///
/// Lower-cases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, and trims hyphens from both ends. Idempotent; empty in, empty
/// out.
#[must_use]
pub fn normalize_product_type(product_type: &str) -> String {
    let lower = product_type.to_lowercase();
    NON_ALPHANUMERIC_RUN
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

/// Core collection handle for `product_type`, or [`DEFAULT_COLLECTION`] when
/// the type has no entry in [`PRODUCT_TYPE_TO_COLLECTION`].
#[must_use]
pub fn collection_for_product_type(product_type: &str) -> &'static str {
    PRODUCT_TYPE_TO_COLLECTION
        .iter()
        .find(|(known, _)| *known == product_type)
        .map_or(DEFAULT_COLLECTION, |(_, collection)| *collection)
}
