use grocery_core::{SortDirection, SortField};

use super::*;

#[test]
fn parses_catalog_defaults() {
    let cli = Cli::try_parse_from(["grocery-cli", "catalog"]).expect("expected valid cli args");

    let Commands::Catalog(args) = cli.command else {
        panic!("expected catalog command");
    };
    let state = args.view_state().expect("view state");
    assert_eq!(state, ViewState::default());
    assert!(!args.interactive);
}

#[test]
fn parses_catalog_filters_and_sort_keys() {
    let cli = Cli::try_parse_from([
        "grocery-cli",
        "catalog",
        "--search",
        "milk",
        "--category",
        "Dairy",
        "--sort",
        "name:desc",
        "--sort",
        "price",
        "--page",
        "2",
        "--page-size",
        "10",
    ])
    .expect("expected valid cli args");

    let Commands::Catalog(args) = cli.command else {
        panic!("expected catalog command");
    };
    let state = args.view_state().expect("view state");
    assert_eq!(state.search(), "milk");
    assert_eq!(state.category(), Some("Dairy"));
    assert_eq!(state.page_index(), 1);
    assert_eq!(state.page_size().get(), 10);
    assert_eq!(
        state.sort().items(),
        &[
            SortItem {
                field: SortField::Name,
                direction: SortDirection::Desc
            },
            SortItem::asc(SortField::Price),
        ]
    );
}

#[test]
fn rejects_unknown_sort_field() {
    let result = Cli::try_parse_from(["grocery-cli", "catalog", "--sort", "weight"]);
    assert!(result.is_err());
}

#[test]
fn unsupported_page_size_fails_view_state() {
    let cli = Cli::try_parse_from(["grocery-cli", "catalog", "--page-size", "7"])
        .expect("expected valid cli args");
    let Commands::Catalog(args) = cli.command else {
        panic!("expected catalog command");
    };
    assert!(args.view_state().is_err());
}

#[test]
fn parses_details_without_id() {
    let cli = Cli::try_parse_from(["grocery-cli", "details"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Details { id: None }));
}

#[test]
fn parses_open_with_global_relay_url() {
    let cli = Cli::try_parse_from([
        "grocery-cli",
        "open",
        "/product-details?id=p1",
        "--relay-url",
        "http://127.0.0.1:3000/api/products",
    ])
    .expect("expected valid cli args");
    assert_eq!(
        cli.relay_url.as_deref(),
        Some("http://127.0.0.1:3000/api/products")
    );
    assert!(matches!(cli.command, Commands::Open { ref path } if path == "/product-details?id=p1"));
}
