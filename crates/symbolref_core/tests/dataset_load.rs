use serde_json::json;
use std::io::Write;
use symbolref_core::dataset::ALL_CATEGORIES_KEY;
use symbolref_core::{DatasetError, Language, SymbolDataset, SymbolFilter};

const FIXTURE: &str = include_str!("fixtures/symbols.json");

fn search_ids(dataset: &SymbolDataset, filter: &SymbolFilter) -> Vec<String> {
    dataset
        .search(filter)
        .into_iter()
        .map(|symbol| symbol.id.clone())
        .collect()
}

#[test]
fn fixture_loads_with_lookups() {
    let dataset = SymbolDataset::from_json_str(FIXTURE).unwrap();

    assert_eq!(dataset.categories().len(), 3);
    assert_eq!(dataset.symbols().len(), 7);

    let alpha = dataset.symbol("alpha").unwrap();
    assert_eq!(alpha.unicode.value(), 0x03B1);
    assert_eq!(alpha.display_name(Language::Ja), "アルファ");
    assert!(dataset.symbol("missing").is_none());

    let greek = dataset.category("greek").unwrap();
    assert_eq!(greek.display_name(Language::En), "Greek Letters");
    assert_eq!(greek.display_description(Language::Ja), "常用希腊字母");
}

#[test]
fn bare_document_without_metadata_loads() {
    let document = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [{ "id": "sun", "symbol": "☀", "unicode": "U+2600", "name": "太阳", "category": "misc" }]
    });
    let dataset = SymbolDataset::from_json_str(&document.to_string()).unwrap();
    assert_eq!(dataset.symbols().len(), 1);
}

#[test]
fn malformed_code_point_fails_at_load() {
    let document = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [{ "id": "bad", "symbol": "☀", "unicode": "U+26ZZ", "name": "坏", "category": "misc" }]
    });
    let err = SymbolDataset::from_json_str(&document.to_string()).unwrap_err();
    assert!(matches!(err, DatasetError::Parse(_)));
    assert!(err.to_string().contains("U+26ZZ"), "unexpected error: {err}");
}

#[test]
fn glyph_that_disagrees_with_code_point_fails_at_load() {
    let document = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [{ "id": "sun", "symbol": "☀", "unicode": "U+2764", "name": "太阳", "category": "misc" }]
    });
    let err = SymbolDataset::from_json_str(&document.to_string()).unwrap_err();
    assert!(err.to_string().contains("does not start with U+2764"), "unexpected error: {err}");
}

#[test]
fn emoji_presentation_selector_is_accepted() {
    let document = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [{ "id": "heart", "symbol": "❤\u{FE0F}", "unicode": "U+2764", "name": "爱心", "category": "misc" }]
    });
    assert!(SymbolDataset::from_json_str(&document.to_string()).is_ok());
}

#[test]
fn integrity_violations_are_reported() {
    let duplicate_symbol = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [
            { "id": "sun", "symbol": "☀", "unicode": "U+2600", "name": "太阳", "category": "misc" },
            { "id": "sun", "symbol": "☀", "unicode": "U+2600", "name": "太阳", "category": "misc" }
        ]
    });
    let err = SymbolDataset::from_json_str(&duplicate_symbol.to_string()).unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateSymbolId(id) if id == "sun"));

    let duplicate_category = json!({
        "categories": [
            { "id": "misc", "name": "杂项", "description": "" },
            { "id": "misc", "name": "杂项", "description": "" }
        ],
        "symbols": []
    });
    let err = SymbolDataset::from_json_str(&duplicate_category.to_string()).unwrap_err();
    assert!(matches!(err, DatasetError::DuplicateCategoryId(id) if id == "misc"));

    let dangling = json!({
        "categories": [{ "id": "misc", "name": "杂项", "description": "" }],
        "symbols": [{ "id": "sun", "symbol": "☀", "unicode": "U+2600", "name": "太阳", "category": "weather" }]
    });
    let err = SymbolDataset::from_json_str(&dangling.to_string()).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::UnknownCategory { symbol_id, category_id }
            if symbol_id == "sun" && category_id == "weather"
    ));
}

#[test]
fn stats_and_counts_cover_every_category() {
    let dataset = SymbolDataset::from_json_str(FIXTURE).unwrap();

    let stats = dataset.stats();
    assert_eq!(stats.total_categories, 3);
    assert_eq!(stats.total_symbols, 7);
    let per_category = stats
        .symbols_by_category
        .iter()
        .map(|entry| (entry.id.as_str(), entry.count))
        .collect::<Vec<_>>();
    assert_eq!(per_category, vec![("greek", 2), ("math", 2), ("misc", 3)]);

    let counts = dataset.category_counts();
    assert_eq!(counts[ALL_CATEGORIES_KEY], 7);
    assert_eq!(counts["misc"], 3);

    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["totalSymbols"], 7);
    assert_eq!(json["symbolsByCategory"][0]["name"], "希腊字母");
}

#[test]
fn category_listing_returns_symbols_in_dataset_order() {
    let dataset = SymbolDataset::from_json_str(FIXTURE).unwrap();

    let listing = dataset.category_listing("misc").unwrap();
    assert_eq!(listing.category.id, "misc");
    assert_eq!(listing.count, 3);
    let ids = listing
        .symbols
        .iter()
        .map(|symbol| symbol.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["heart", "sun", "grinning"]);

    assert_eq!(dataset.symbols_in_category("math").count(), 2);
    assert!(dataset.category_listing("weather").is_none());
}

#[test]
fn search_combines_category_and_text_filters() {
    let dataset = SymbolDataset::from_json_str(FIXTURE).unwrap();

    assert_eq!(search_ids(&dataset, &SymbolFilter::default()).len(), 7);
    assert_eq!(
        search_ids(&dataset, &SymbolFilter::new("").in_category("greek")),
        vec!["alpha", "omega-upper"]
    );
    assert_eq!(
        search_ids(&dataset, &SymbolFilter::new("u+22")),
        vec!["sum", "infinity"]
    );
    assert_eq!(
        search_ids(
            &dataset,
            &SymbolFilter::new("omega").with_language(Language::En)
        ),
        vec!["omega-upper"]
    );
    // English names are not searched while the UI is in Chinese.
    assert!(search_ids(&dataset, &SymbolFilter::new("omega")).is_empty());
    assert_eq!(
        search_ids(&dataset, &SymbolFilter::new("math").in_category("math")),
        vec!["sum", "infinity"]
    );
}

#[test]
fn from_json_file_reads_bundle_and_reports_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unicode-symbols.json");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(FIXTURE.as_bytes()).unwrap();
    drop(file);

    let dataset = SymbolDataset::from_json_file(&path).unwrap();
    assert_eq!(dataset.symbols().len(), 7);

    let err = SymbolDataset::from_json_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, DatasetError::Io { .. }));
}
