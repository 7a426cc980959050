use super::*;

#[test]
fn test_canonical_lowercases_and_unquotes() {
    assert_eq!(TableId::canonical("Source_Table").unwrap(), "source_table");
    assert_eq!(
        TableId::canonical("Raw.\"Orders\"").unwrap().as_str(),
        "raw.orders"
    );
    assert_eq!(TableId::canonical("[dbo].[T]").unwrap(), "dbo.t");
    assert_eq!(TableId::canonical("  RAW.events  ").unwrap(), "raw.events");
}

#[test]
fn test_canonical_keeps_dots_inside_quotes() {
    assert_eq!(TableId::canonical("`db`.`My.Table`").unwrap(), "db.my.table");
    assert_eq!(
        TableId::canonical("\"Sales\".[Order.Items]").unwrap(),
        "sales.order.items"
    );
    assert_eq!(TableId::canonical("a..b").unwrap(), "a.b");
}

#[test]
fn test_canonical_name_from_parts() {
    assert_eq!(canonical_name(["Raw", "Orders"]), "raw.orders");
    assert_eq!(canonical_name(vec![String::from(" X "), String::new()]), "x");
    assert_eq!(canonical_name(Vec::<&str>::new()), "");
}

#[test]
fn test_canonical_rejects_empty() {
    assert!(TableId::canonical("").is_none());
    assert!(TableId::canonical(" \"\" ").is_none());
    assert!(TableId::try_new("").is_none());
}

#[test]
fn test_name_to_id() {
    let name = TableName::try_new("Analytics.Final_Table").unwrap();
    assert_eq!(name.to_id().unwrap(), "analytics.final_table");
    assert_eq!(name.to_string(), "Analytics.Final_Table");
}

#[test]
fn test_try_from_and_deserialize() {
    assert!(TableId::try_from("").is_err());
    assert_eq!(TableId::try_from("a.b".to_string()).unwrap(), "a.b");

    let id: TableId = serde_json::from_str("\"x.y\"").unwrap();
    assert_eq!(id, "x.y");
    assert!(serde_json::from_str::<TableId>("\"\"").is_err());
    assert_eq!(serde_json::to_string(&id).unwrap(), "\"x.y\"");
}

#[test]
fn test_borrow_as_map_key() {
    let mut map = std::collections::HashMap::new();
    map.insert(TableId::try_new("t1").unwrap(), 1);
    assert_eq!(map.get("t1"), Some(&1));
}
