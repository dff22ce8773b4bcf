use rust_decimal::Decimal;
use tackroom_core::{SelectedOption, Variant};

use super::*;

fn make_variant(size: &str, color: &str) -> Variant {
    Variant {
        id: format!("variant-{size}-{color}"),
        title: format!("{size} / {color}"),
        available_for_sale: true,
        price: Decimal::new(50, 0),
        selected_options: vec![
            SelectedOption {
                name: "Size".to_string(),
                value: size.to_string(),
            },
            SelectedOption {
                name: "Color".to_string(),
                value: color.to_string(),
            },
        ],
    }
}

fn make_product(id: &str, product_type: Option<&str>) -> Product {
    Product {
        id: id.to_string(),
        handle: id.to_string(),
        title: id.to_string(),
        product_type: product_type.map(str::to_string),
        tags: vec![],
        collections: vec![],
        price_range: PriceRange::new(Decimal::new(50, 0), Decimal::new(100, 0)),
        available_for_sale: true,
        variants: vec![],
        primary_collection: None,
    }
}

fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn make_catalog() -> Vec<Product> {
    let mut a = make_product("a", Some("Tendon Boots"));
    a.variants = vec![make_variant("Full", "Black"), make_variant("Cob", "Navy")];
    a.tags = strings(&["LeMieux", "_featured"]);

    let mut b = make_product("b", Some("Tendon Boots"));
    b.variants = vec![make_variant("Pony", "black")];
    b.tags = strings(&["Woof Wear"]);
    b.available_for_sale = false;

    let mut c = make_product("c", Some("Rugs"));
    c.variants = vec![make_variant("6'3", "Navy")];
    c.tags = strings(&["lemieux"]);
    c.price_range = PriceRange::new(Decimal::new(120, 0), Decimal::new(240, 0));

    vec![a, b, c]
}

#[test]
fn allowed_types_empty_returns_input_unchanged() {
    let catalog = make_catalog();
    let result = filter_by_allowed_types(catalog.clone(), &[]);
    assert_eq!(result, catalog);
}

#[test]
fn allowed_types_match_ignores_case_and_whitespace() {
    let products = vec![
        make_product("1", Some("riding boots")),
        make_product("2", Some("")),
        make_product("3", None),
        make_product("4", Some("  Riding Boots ")),
        make_product("5", Some("Rugs")),
    ];
    let result = filter_by_allowed_types(products, &strings(&["Riding Boots "]));
    assert_eq!(ids(&result), vec!["1", "4"]);
}

#[test]
fn allowed_types_preserve_catalog_order() {
    let result = filter_by_allowed_types(make_catalog(), &strings(&["Rugs", "Tendon Boots"]));
    assert_eq!(ids(&result), vec!["a", "b", "c"]);
}

#[test]
fn size_filter_is_exact() {
    assert_eq!(ids(&filter_by_size(make_catalog(), &strings(&["Full"]))), vec!["a"]);
    assert!(filter_by_size(make_catalog(), &strings(&["full"])).is_empty());
}

#[test]
fn size_option_name_is_case_insensitive() {
    let mut product = make_product("x", Some("Rugs"));
    product.variants = vec![Variant {
        selected_options: vec![SelectedOption {
            name: "SIZE".to_string(),
            value: "5'9".to_string(),
        }],
        ..make_variant("unused", "unused")
    }];
    let result = filter_by_size(vec![product], &strings(&["5'9"]));
    assert_eq!(ids(&result), vec!["x"]);
}

#[test]
fn color_filter_ignores_case() {
    let result = filter_by_color(make_catalog(), &strings(&["black"]));
    assert_eq!(ids(&result), vec!["a", "b"]);
    let result = filter_by_color(make_catalog(), &strings(&["NAVY"]));
    assert_eq!(ids(&result), vec!["a", "c"]);
}

#[test]
fn brand_filter_matches_any_tag_ignoring_case() {
    let result = filter_by_brand(make_catalog(), &strings(&["lemieux"]));
    assert_eq!(ids(&result), vec!["a", "c"]);
    let result = filter_by_brand(make_catalog(), &strings(&["woof wear"]));
    assert_eq!(ids(&result), vec!["b"]);
}

#[test]
fn price_filter_touching_boundary_overlaps() {
    let products = vec![make_product("p", Some("Rugs"))];
    let touching = PriceRange::new(Decimal::new(100, 0), Decimal::new(150, 0));
    assert_eq!(ids(&filter_by_price(products.clone(), &touching)), vec!["p"]);

    let beyond = PriceRange::new(Decimal::new(101, 0), Decimal::new(150, 0));
    assert!(filter_by_price(products, &beyond).is_empty());
}

#[test]
fn price_filter_window_inside_product_range_overlaps() {
    let products = vec![make_product("p", Some("Rugs"))];
    let inside = PriceRange::new(Decimal::new(60, 0), Decimal::new(70, 0));
    assert_eq!(ids(&filter_by_price(products, &inside)), vec!["p"]);
}

#[test]
fn availability_filter() {
    assert_eq!(ids(&filter_by_availability(make_catalog(), true)), vec!["a", "c"]);
    assert_eq!(filter_by_availability(make_catalog(), false).len(), 3);
}

#[test]
fn empty_selection_is_noop() {
    let result = apply_facets(make_catalog(), &FilterSelection::default());
    assert_eq!(result, make_catalog());
}

#[test]
fn facets_combine_as_and() {
    let selection = FilterSelection {
        colors: strings(&["navy"]),
        brands: strings(&["LEMIEUX"]),
        in_stock_only: true,
        ..FilterSelection::default()
    };
    assert_eq!(ids(&apply_facets(make_catalog(), &selection)), vec!["a", "c"]);

    let selection = FilterSelection {
        price_range: Some(PriceRange::new(Decimal::new(110, 0), Decimal::new(500, 0))),
        ..selection
    };
    assert_eq!(ids(&apply_facets(make_catalog(), &selection)), vec!["c"]);
}

#[test]
fn facet_order_does_not_matter() {
    let sizes = strings(&["Full", "Pony", "6'3"]);
    let colors = strings(&["black"]);

    let size_then_color = filter_by_color(filter_by_size(make_catalog(), &sizes), &colors);
    let color_then_size = filter_by_size(filter_by_color(make_catalog(), &colors), &sizes);
    assert_eq!(size_then_color, color_then_size);
    assert_eq!(ids(&size_then_color), vec!["a", "b"]);

    let selection = FilterSelection {
        sizes,
        colors,
        ..FilterSelection::default()
    };
    assert_eq!(apply_facets(make_catalog(), &selection), size_then_color);
}

#[test]
fn products_without_variants_never_match_size_or_color() {
    let products = vec![make_product("bare", Some("Rugs"))];
    assert!(filter_by_size(products.clone(), &strings(&["Full"])).is_empty());
    assert!(filter_by_color(products, &strings(&["black"])).is_empty());
}
