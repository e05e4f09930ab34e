use recordquery::{Operator, QueryConfig, QueryError, parse_request_json};

#[test]
fn display_messages() {
    let e = QueryError::InvalidPagination { page_number: 0, page_size: 10 };
    assert_eq!(e.to_string(), "Invalid pagination: pageNumber=0, pageSize=10 (both must be >= 1)");
    let e = QueryError::LimitExceeded { what: "pageSize", limit: 100, actual: 500 };
    assert_eq!(e.to_string(), "Limit exceeded: pageSize is 500, maximum is 100");
    let e = QueryError::UnsupportedOperator { operator: Operator::Lte, field: "IsActive".into(), field_type: "bool".into() };
    assert_eq!(e.to_string(), "Operator 'lte' is not supported on 'IsActive' of type bool");
}

#[test]
fn field_is_reported_for_field_errors_only() {
    let e = QueryError::UnknownOperator { operator: "like".into(), field: "Name".into() };
    assert_eq!(e.field(), Some("Name"));
    assert_eq!(QueryError::InvalidPagination { page_number: 0, page_size: 0 }.field(), None);
}

#[test]
fn conversions_from_parse_errors() {
    let json = parse_request_json("42").unwrap_err();
    assert!(matches!(json, QueryError::Json(_)));
    assert!(json.to_string().starts_with("Serde JSON: "));
    let cfg = QueryConfig::from_toml_str("max_page_size = \"lots\"").unwrap_err();
    assert!(matches!(cfg, QueryError::Config(_)));
}
