use super::*;

#[test]
fn test_extract_block() {
    let md = "# Lineage\n\n```mermaid\nflowchart TD\n    a-->b\n```\n\ntrailing";
    assert_eq!(extract_mermaid_block(md), Some("flowchart TD\n    a-->b\n"));
    assert_eq!(extract_mermaid_block("no diagram here"), None);
}

#[test]
fn test_extract_unclosed_block() {
    assert_eq!(
        extract_mermaid_block("```mermaid\ngraph LR\n a-->b"),
        Some("graph LR\n a-->b")
    );
}

#[test]
fn test_parse_edges_and_kinds() {
    let payload = parse_flowchart(
        "flowchart TD\n    raw_data.input_table-->analytics.source_table\n    analytics.source_table --> analytics.final_table\n",
    );
    let ids: Vec<(&str, NodeKind)> = payload
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), n.kind))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("analytics.final_table", NodeKind::Model),
            ("analytics.source_table", NodeKind::Model),
            ("raw_data.input_table", NodeKind::Source),
        ]
    );
    assert_eq!(payload.edges.len(), 2);
    assert_eq!(payload.nodes[0].name, "analytics.final_table");
}

#[test]
fn test_parse_quoted_ids_and_bare_nodes() {
    let payload = parse_flowchart(
        "graph TD\n  %% comment\n  \"sales.order items\" --> report;\n  lonely\n  A[Styled] --> B\n",
    );
    let ids: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["lonely", "report", "sales.order items"]);
    assert_eq!(payload.edges.len(), 1);
    assert_eq!(payload.edges[0].source, "sales.order items");
}

#[test]
fn test_parse_dedups_and_skips_self_edges() {
    let payload = parse_flowchart("flowchart TD\n a-->b\n a-->b\n c-->c\n");
    assert_eq!(payload.edges.len(), 1);
    assert_eq!(payload.nodes.len(), 2);
}

#[test]
fn test_unescape_quotes() {
    let payload = parse_flowchart("flowchart TD\n \"say#quot;hi\"-->b\n");
    assert_eq!(payload.edges[0].source, "say\"hi");
}

#[test]
fn test_read_markdown() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lineage.md");
    std::fs::write(&path, "```mermaid\nflowchart TD\n    a-->b\n```\n").unwrap();
    let payload = read_markdown(&path).unwrap();
    assert_eq!(payload.edges.len(), 1);

    std::fs::write(&path, "nothing").unwrap();
    assert!(matches!(
        read_markdown(&path).unwrap_err(),
        CoreError::MermaidNotFound { .. }
    ));
    assert!(matches!(
        read_markdown(&dir.path().join("missing.md")).unwrap_err(),
        CoreError::IoWithPath { .. }
    ));
}
