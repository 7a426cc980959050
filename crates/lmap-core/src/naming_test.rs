use super::*;

#[test]
fn test_stem_without_schema() {
    let naming = StemNaming::new();
    assert_eq!(
        naming.table_for(Path::new("marts/Final_Table.sql")).unwrap(),
        "Final_Table"
    );
}

#[test]
fn test_stem_with_schema() {
    let naming = StemNaming::new().with_schema("analytics");
    assert_eq!(
        naming.table_for(Path::new("source_table.sql")).unwrap(),
        "analytics.source_table"
    );
}

#[test]
fn test_override_wins() {
    let naming = StemNaming::new()
        .with_schema("analytics")
        .with_override("./legacy/orders_v2.sql", "mart.orders");
    assert_eq!(
        naming.table_for(Path::new("legacy/orders_v2.sql")).unwrap(),
        "mart.orders"
    );
    assert_eq!(
        naming.table_for(Path::new("orders_v2.sql")).unwrap(),
        "analytics.orders_v2"
    );
}

#[test]
fn test_from_config() {
    let mut config = Config::new("sql");
    config.file_schema = Some("stage".to_string());
    config
        .models
        .insert("a/b.sql".to_string(), "custom.b".to_string());
    let naming = StemNaming::from_config(&config);
    assert_eq!(naming.table_for(Path::new("a/b.sql")).unwrap(), "custom.b");
    assert_eq!(naming.table_for(Path::new("c.sql")).unwrap(), "stage.c");
}

#[test]
fn test_empty_stem() {
    assert!(StemNaming::new().table_for(Path::new("")).is_none());
}

#[test]
fn test_deterministic() {
    let naming = StemNaming::new().with_schema("s");
    let path = Path::new("x/y.sql");
    assert_eq!(naming.table_for(path), naming.table_for(path));
}
