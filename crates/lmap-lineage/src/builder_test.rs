use super::*;
use lmap_core::NodeKind;
use std::path::Path;

fn src(path: &str, sql: &str) -> Result<SqlSource, LineageError> {
    Ok(SqlSource::new(path, sql))
}

fn builder() -> LineageBuilder {
    LineageBuilder::new(SqlScanner::generic(), StemNaming::new())
}

/// Names only files under `models/`
struct ModelsDirOnly;

impl TableNaming for ModelsDirOnly {
    fn table_for(&self, relative_path: &Path) -> Option<TableName> {
        if !relative_path.starts_with("models") {
            return None;
        }
        TableName::try_new(relative_path.file_stem()?.to_str()?.to_string())
    }
}

#[test]
fn test_failed_inputs_are_skipped() {
    let inputs = vec![
        src("b.sql", "SELECT * FROM a"),
        Err(LineageError::Encoding {
            path: PathBuf::from("bad.sql"),
            message: "invalid utf-8".to_string(),
        }),
        src("a.sql", "SELECT * FROM raw.events"),
    ];
    let result = builder().build(inputs);
    assert_eq!(result.summary.files_found, 3);
    assert_eq!(result.summary.files_processed, 2);
    assert_eq!(result.summary.skipped.len(), 1);
    assert_eq!(result.summary.skipped[0].path, PathBuf::from("bad.sql"));
    assert_eq!(result.graph.edge_count(), 2);
}

#[test]
fn test_unnamed_files_are_skipped() {
    let builder = LineageBuilder::new(SqlScanner::generic(), ModelsDirOnly);
    let result = builder.build(vec![
        src("models/m.sql", "SELECT * FROM s"),
        src("scratch/x.sql", "SELECT * FROM y"),
    ]);
    assert_eq!(result.summary.files_processed, 1);
    assert_eq!(result.summary.skipped[0].reason, SkipReason::Unnamed);
    assert!(!result.graph.contains("y"));
    assert!(!result.graph.contains("x"));
}

#[test]
fn test_file_lineage_records() {
    let result = builder().build(vec![src(
        "t2.sql",
        "WITH x AS (SELECT * FROM t1), y AS (SELECT 1) SELECT * FROM x JOIN raw.Z ON 1=1 JOIN t1 ON 1=1",
    )]);
    assert_eq!(result.files.len(), 1);
    let file = &result.files[0];
    assert_eq!(file.table, "t2");
    assert_eq!(file.ctes, vec!["x", "y"]);
    let upstream: Vec<&str> = file.upstream.iter().map(TableId::as_str).collect();
    assert_eq!(upstream, vec!["raw.z", "t1"]);
}

#[test]
fn test_display_name_first_seen_by_path_order() {
    let result = builder().build(vec![
        src("b.sql", "SELECT * FROM RAW.Orders"),
        src("a.sql", "SELECT * FROM raw.orders"),
    ]);
    assert_eq!(result.graph.node("raw.orders").unwrap().display_name, "raw.orders");
}

#[test]
fn test_file_schema_and_stem_resolution() {
    let builder = LineageBuilder::new(
        SqlScanner::generic(),
        StemNaming::new().with_schema("analytics"),
    );
    let result = builder.build(vec![
        src("source_table.sql", "SELECT * FROM raw_data.input_table"),
        src("intermediate_table.sql", "SELECT * FROM source_table"),
        src(
            "final_table.sql",
            "SELECT * FROM analytics.intermediate_table i JOIN analytics.source_table s ON i.id = s.id",
        ),
    ]);
    let edges: Vec<(String, String)> = result
        .graph
        .edges()
        .into_iter()
        .map(|(s, t)| (s.to_string(), t.to_string()))
        .collect();
    assert_eq!(
        edges,
        vec![
            (
                "analytics.intermediate_table".to_string(),
                "analytics.final_table".to_string()
            ),
            (
                "analytics.source_table".to_string(),
                "analytics.final_table".to_string()
            ),
            (
                "analytics.source_table".to_string(),
                "analytics.intermediate_table".to_string()
            ),
            (
                "raw_data.input_table".to_string(),
                "analytics.source_table".to_string()
            ),
        ]
    );
    assert_eq!(
        result.graph.node("raw_data.input_table").unwrap().kind,
        NodeKind::Source
    );
}

#[test]
fn test_duplicate_producers_merge() {
    let builder = LineageBuilder::new(
        SqlScanner::generic(),
        StemNaming::new()
            .with_override("a.sql", "mart.orders")
            .with_override("b.sql", "mart.orders"),
    );
    let result = builder.build(vec![
        src("a.sql", "SELECT * FROM x"),
        src("b.sql", "SELECT * FROM y"),
    ]);
    assert_eq!(result.graph.node_count(), 3);
    assert_eq!(result.graph.upstream("mart.orders").unwrap().len(), 2);
}

#[test]
fn test_cycles_reported() {
    let result = builder().build(vec![
        src("a.sql", "SELECT * FROM b"),
        src("b.sql", "SELECT * FROM a"),
    ]);
    assert_eq!(result.summary.cycles.len(), 1);
    assert_eq!(result.graph.edge_count(), 2);
}

#[test]
fn test_warnings_collected() {
    let result = builder().build(vec![src("a.sql", "SELECT * FROM t /* never closed")]);
    assert_eq!(result.summary.warnings.len(), 1);
    assert_eq!(result.summary.warnings[0].path, PathBuf::from("a.sql"));
    assert!(result.graph.contains("t"));
}

#[test]
fn test_from_config() {
    let mut config = Config::new("sql");
    config.dialect = lmap_core::Dialect::MsSql;
    config.file_schema = Some("dw".to_string());
    let builder = LineageBuilder::from_config(&config).unwrap();
    let result = builder.build(vec![src("fact.sql", "SELECT * FROM [stage].[Sales] s")]);
    assert!(result.graph.contains("dw.fact"));
    assert!(result.graph.contains("stage.sales"));
}
