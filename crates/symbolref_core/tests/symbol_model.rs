use symbolref_core::{Category, CodePoint, Language, Symbol, SymbolValidationError};

#[test]
fn symbol_new_uses_code_point_as_glyph() {
    let symbol = Symbol::new("alpha", CodePoint::parse("U+03B1").unwrap(), "阿尔法", "greek").unwrap();

    assert_eq!(symbol.symbol, "α");
    assert_eq!(symbol.name_en, None);
    assert_eq!(symbol.display_name(Language::En), "阿尔法");
}

#[test]
fn symbol_serialization_uses_dataset_field_names() {
    let mut symbol =
        Symbol::new("heart", CodePoint::parse("U+2764").unwrap(), "爱心", "misc").unwrap();
    symbol.name_en = Some("Heart".to_string());

    let json = serde_json::to_value(&symbol).unwrap();
    assert_eq!(json["id"], "heart");
    assert_eq!(json["symbol"], "❤");
    assert_eq!(json["unicode"], "U+2764");
    assert_eq!(json["name_en"], "Heart");
    assert!(json.get("name_ja").is_none());
    assert_eq!(json["category"], "misc");

    let decoded: Symbol = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, symbol);
}

#[test]
fn deserialize_rejects_empty_glyph() {
    let value = serde_json::json!({
        "id": "blank",
        "symbol": "",
        "unicode": "U+2600",
        "name": "空",
        "category": "misc"
    });

    let err = serde_json::from_value::<Symbol>(value).unwrap_err();
    assert!(
        err.to_string().contains("symbol `blank` has an empty glyph"),
        "unexpected error: {err}"
    );
}

#[test]
fn validate_reports_empty_fields() {
    let mut symbol = Symbol::new("sun", CodePoint::parse("U+2600").unwrap(), "太阳", "misc").unwrap();

    symbol.category = String::new();
    assert_eq!(
        symbol.validate().unwrap_err(),
        SymbolValidationError::EmptyCategory("sun".to_string())
    );

    let err = Symbol::new(" ", CodePoint::parse("U+2600").unwrap(), "太阳", "misc").unwrap_err();
    assert_eq!(err, SymbolValidationError::EmptyId);
}

#[test]
fn category_localized_fields_fall_back_to_base() {
    let mut category = Category::new("math", "数学符号", "数学运算符").unwrap();
    category.name_ja = Some("数学記号".to_string());

    assert_eq!(category.display_name(Language::Ja), "数学記号");
    assert_eq!(category.display_name(Language::En), "数学符号");
    assert_eq!(category.display_description(Language::En), "数学运算符");

    assert_eq!(
        Category::new("x", "", "").unwrap_err(),
        SymbolValidationError::EmptyName("x".to_string())
    );
}
