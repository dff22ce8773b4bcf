use tackroom_core::PriceRange;

use super::*;
use crate::browse::split_category_path;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["tackroom"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_resolve_command() {
    let cli = Cli::try_parse_from(["tackroom", "resolve", "horse/boots"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Resolve { ref path }) if path == "horse/boots"
    ));
}

#[test]
fn resolve_requires_a_path() {
    assert!(Cli::try_parse_from(["tackroom", "resolve"]).is_err());
}

#[test]
fn parses_browse_with_defaults() {
    let cli = Cli::try_parse_from(["tackroom", "browse", "horse"]).unwrap();
    let Some(Commands::Browse(args)) = cli.command else {
        panic!("expected browse command");
    };
    assert_eq!(args.path, "horse");
    assert!(args.catalog.is_none());
    assert!(args.size.is_empty());
    assert!(args.price.is_none());
    assert!(!args.in_stock);
    assert!(!args.save_preferences);
    assert!(args.selection().is_empty());
}

#[test]
fn parses_browse_facet_flags() {
    let cli = Cli::try_parse_from([
        "tackroom",
        "browse",
        "horse/boots",
        "--catalog",
        "exports/products.json",
        "--size",
        "Full,Cob",
        "--size",
        "Pony",
        "--color",
        "black",
        "--price",
        "0-150",
        "--in-stock",
        "--save-preferences",
    ])
    .unwrap();
    let Some(Commands::Browse(args)) = cli.command else {
        panic!("expected browse command");
    };
    assert_eq!(args.size, vec!["Full", "Cob", "Pony"]);
    assert_eq!(args.price, Some("0-150".parse::<PriceRange>().unwrap()));
    assert!(args.in_stock && args.save_preferences);

    let selection = args.selection();
    assert_eq!(selection.to_query(), "size=Full,Cob,Pony&color=black&price=0-150&inStock=true");
}

#[test]
fn browse_rejects_malformed_price() {
    let result = Cli::try_parse_from(["tackroom", "browse", "horse", "--price", "cheap"]);
    assert!(result.is_err());
}

#[test]
fn browse_flags_extend_query() {
    let cli = Cli::try_parse_from([
        "tackroom",
        "browse",
        "horse",
        "--query",
        "?brand=lemieux&price=0-500",
        "--brand",
        "woof wear",
        "--price",
        "10-20",
    ])
    .unwrap();
    let Some(Commands::Browse(args)) = cli.command else {
        panic!("expected browse command");
    };
    let selection = args.selection();
    assert_eq!(selection.brands, vec!["lemieux", "woof wear"]);
    assert_eq!(
        selection.price_range,
        Some("10-20".parse::<PriceRange>().unwrap())
    );
}

#[test]
fn parses_primary_only_changes() {
    let cli = Cli::try_parse_from(["tackroom", "primary", "--only-changes"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Primary {
            catalog: None,
            only_changes: true,
            json: false
        })
    ));
}

#[test]
fn parses_taxonomy_with_path() {
    let cli = Cli::try_parse_from(["tackroom", "taxonomy", "--path", "mapping.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Taxonomy { path: Some(ref p) }) if p.as_os_str() == "mapping.csv"
    ));
}

#[test]
fn split_category_path_accepts_up_to_three_segments() {
    assert_eq!(split_category_path("horse").unwrap(), ("horse", None, None));
    assert_eq!(
        split_category_path("/horse/boots/bell-boots/").unwrap(),
        ("horse", Some("boots"), Some("bell-boots"))
    );
    assert!(split_category_path("/").is_err());
    assert!(split_category_path("a/b/c/d").is_err());
}
