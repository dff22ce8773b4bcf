use rust_decimal::Decimal;

use super::*;

fn dec(n: i64) -> Decimal {
    Decimal::new(n, 0)
}

#[test]
fn from_query_parses_every_facet() {
    let selection =
        FilterSelection::from_query("size=8,9,10&color=black,navy&brand=lemieux&price=0-500&inStock=true");
    assert_eq!(selection.sizes, vec!["8", "9", "10"]);
    assert_eq!(selection.colors, vec!["black", "navy"]);
    assert_eq!(selection.brands, vec!["lemieux"]);
    assert_eq!(selection.price_range, Some(PriceRange::new(dec(0), dec(500))));
    assert!(selection.in_stock_only);
}

#[test]
fn from_query_accepts_leading_question_mark() {
    let selection = FilterSelection::from_query("?size=Cob");
    assert_eq!(selection.sizes, vec!["Cob"]);
}

#[test]
fn from_query_empty_string_is_empty_selection() {
    let selection = FilterSelection::from_query("");
    assert!(selection.is_empty());
    assert_eq!(selection, FilterSelection::default());
}

#[test]
fn from_query_decodes_percent_and_plus() {
    let selection = FilterSelection::from_query("color=Dark+Navy,Rose%20Gold&brand=Woof%20Wear");
    assert_eq!(selection.colors, vec!["Dark Navy", "Rose Gold"]);
    assert_eq!(selection.brands, vec!["Woof Wear"]);
}

#[test]
fn from_query_splits_encoded_commas() {
    let selection = FilterSelection::from_query("size=8%2C9%2C10&color=black%2Cnavy");
    assert_eq!(selection.sizes, vec!["8", "9", "10"]);
    assert_eq!(selection.colors, vec!["black", "navy"]);
}

#[test]
fn from_query_ignores_malformed_price() {
    assert!(FilterSelection::from_query("price=cheap").price_range.is_none());
    assert!(FilterSelection::from_query("price=100").price_range.is_none());
    assert!(FilterSelection::from_query("price=-500").price_range.is_none());
}

#[test]
fn from_query_price_accepts_decimals() {
    let selection = FilterSelection::from_query("price=12.50-99.95");
    assert_eq!(
        selection.price_range,
        Some(PriceRange::new(Decimal::new(1250, 2), Decimal::new(9995, 2)))
    );
}

#[test]
fn from_query_in_stock_requires_literal_true() {
    assert!(!FilterSelection::from_query("inStock=1").in_stock_only);
    assert!(!FilterSelection::from_query("inStock=TRUE").in_stock_only);
    assert!(!FilterSelection::from_query("instock=true").in_stock_only);
}

#[test]
fn from_query_uses_first_occurrence() {
    let selection = FilterSelection::from_query("size=8&size=9");
    assert_eq!(selection.sizes, vec!["8"]);
}

#[test]
fn from_query_drops_empty_parts() {
    let selection = FilterSelection::from_query("size=8,,9,&color=");
    assert_eq!(selection.sizes, vec!["8", "9"]);
    assert!(selection.colors.is_empty());
}

#[test]
fn to_query_matches_storefront_encoding() {
    let selection = FilterSelection {
        sizes: vec!["8".into(), "9".into(), "10".into()],
        colors: vec![],
        brands: vec!["lemieux".into()],
        price_range: Some(PriceRange::new(dec(0), dec(500))),
        in_stock_only: true,
    };
    assert_eq!(
        selection.to_query(),
        "size=8,9,10&brand=lemieux&price=0-500&inStock=true"
    );
}

#[test]
fn to_query_escapes_values_but_not_separator() {
    let selection = FilterSelection {
        colors: vec!["Dark Navy".into(), "Rose & Gold".into()],
        ..FilterSelection::default()
    };
    assert_eq!(selection.to_query(), "color=Dark%20Navy,Rose%20%26%20Gold");
    assert_eq!(FilterSelection::from_query(&selection.to_query()), selection);
}

#[test]
fn to_query_empty_selection_is_empty_string() {
    assert_eq!(FilterSelection::default().to_query(), "");
}

#[test]
fn is_empty_false_when_only_in_stock_set() {
    let selection = FilterSelection {
        in_stock_only: true,
        ..FilterSelection::default()
    };
    assert!(!selection.is_empty());
}

#[test]
fn serde_uses_camel_case_and_skips_empty_fields() {
    let selection = FilterSelection {
        sizes: vec!["Full".into()],
        in_stock_only: true,
        ..FilterSelection::default()
    };
    let json = serde_json::to_value(&selection).expect("serialization failed");
    assert_eq!(json, serde_json::json!({"sizes": ["Full"], "inStockOnly": true}));
}

#[test]
fn serde_reads_missing_fields_as_defaults() {
    let selection: FilterSelection =
        serde_json::from_str(r#"{"colors":["black"]}"#).expect("deserialization failed");
    assert_eq!(selection.colors, vec!["black"]);
    assert!(selection.sizes.is_empty());
    assert!(!selection.in_stock_only);
}

#[test]
fn serde_writes_price_bounds_as_decimal_strings() {
    let selection = FilterSelection {
        price_range: Some(PriceRange::new(dec(0), dec(250))),
        ..FilterSelection::default()
    };
    let json = serde_json::to_value(&selection).expect("serialization failed");
    assert_eq!(json, serde_json::json!({"priceRange": {"min": "0", "max": "250"}}));
}
