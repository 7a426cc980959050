use super::*;
use crate::table_id::TableId;

fn sample() -> LineageGraph {
    let mut graph = LineageGraph::new();
    graph.add_model(TableId::try_new("t1").unwrap(), "t1");
    graph.add_model(TableId::try_new("t2").unwrap(), "T2");
    graph.add_model(TableId::try_new("src").unwrap(), "src");
    graph.add_source(TableId::try_new("source_table_4").unwrap(), "Source_Table_4");
    graph.add_source(TableId::try_new("source_table_3").unwrap(), "source_table_3");
    graph.add_dependency("source_table_4", "t1");
    graph.add_dependency("source_table_3", "t1");
    graph.add_dependency("t1", "t2");
    graph
}

#[test]
fn test_payload_from_graph() {
    let payload = GraphPayload::from_graph(&sample());
    let ids: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["source_table_3", "source_table_4", "src", "t1", "t2"]);
    assert_eq!(payload.nodes[1].name, "Source_Table_4");
    assert_eq!(payload.nodes[1].kind, NodeKind::Source);
    assert_eq!(
        payload.edges[0],
        PayloadEdge {
            source: "source_table_3".to_string(),
            target: "t1".to_string()
        }
    );
    assert_eq!(payload.edges.len(), 3);
}

#[test]
fn test_mermaid_sorted_with_isolated_nodes() {
    let mermaid = GraphPayload::from_graph(&sample()).to_mermaid();
    assert_eq!(
        mermaid,
        "flowchart TD\n    source_table_3-->t1\n    source_table_4-->t1\n    t1-->t2\n    src"
    );
}

#[test]
fn test_mermaid_empty_graph() {
    assert_eq!(GraphPayload::default().to_mermaid(), "flowchart TD");
}

#[test]
fn test_mermaid_id_quoting() {
    assert_eq!(mermaid_id("analytics.final_table"), "analytics.final_table");
    assert_eq!(mermaid_id("sales.order items"), "\"sales.order items\"");
    assert_eq!(mermaid_id("a-b"), "\"a-b\"");
    assert_eq!(mermaid_id("say\"hi"), "\"say#quot;hi\"");
}

#[test]
fn test_mermaid_id_quotes_reserved_words_and_edge_heads() {
    assert_eq!(mermaid_id("end"), "\"end\"");
    assert_eq!(mermaid_id("END"), "\"END\"");
    assert_eq!(mermaid_id("subgraph"), "\"subgraph\"");
    assert_eq!(mermaid_id("orders"), "\"orders\"");
    assert_eq!(mermaid_id("xref.t"), "\"xref.t\"");
    assert_eq!(mermaid_id("raw.end"), "raw.end");
    assert_eq!(mermaid_id("sales.orders"), "sales.orders");
}

#[test]
fn test_markdown_fence() {
    assert_eq!(
        to_markdown("flowchart TD\n    a-->b"),
        "```mermaid\nflowchart TD\n    a-->b\n```\n"
    );
}

#[test]
fn test_json_shape() {
    let json = GraphPayload::from_graph(&sample()).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["nodes"][3]["id"], "t1");
    assert_eq!(value["nodes"][3]["name"], "t1");
    assert_eq!(value["nodes"][3]["kind"], "model");
    assert_eq!(value["edges"][2]["source"], "t1");
    assert_eq!(value["edges"][2]["target"], "t2");
}

#[test]
fn test_dot_colors() {
    let dot = GraphPayload::from_graph(&sample()).to_dot();
    assert!(dot.starts_with("digraph lineage {\n"));
    assert!(dot.contains("\"source_table_3\" [label=\"source_table_3\" fillcolor=\"#d3d3d3\"];"));
    assert!(dot.contains("\"t2\" [label=\"T2\" fillcolor=\"#a8e6a1\"];"));
    assert!(dot.contains("\"t1\" -> \"t2\";"));
    assert!(dot.ends_with("}\n"));
}

#[test]
fn test_mermaid_and_payload_agree() {
    let payload = GraphPayload::from_graph(&sample());
    let reread = crate::mermaid::parse_flowchart(&payload.to_mermaid());
    assert_eq!(reread.edges, payload.edges);
    let ids: Vec<&str> = reread.nodes.iter().map(|n| n.id.as_str()).collect();
    let expected: Vec<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, expected);
}

#[test]
fn test_reserved_ids_survive_round_trip() {
    let mut graph = LineageGraph::new();
    graph.add_model(TableId::try_new("end").unwrap(), "end");
    graph.add_source(TableId::try_new("orders").unwrap(), "orders");
    graph.add_dependency("orders", "end");

    let mermaid = GraphPayload::from_graph(&graph).to_mermaid();
    assert_eq!(mermaid, "flowchart TD\n    \"orders\"-->\"end\"");

    let reread = crate::mermaid::parse_flowchart(&mermaid);
    assert_eq!(
        reread.edges,
        vec![PayloadEdge {
            source: "orders".to_string(),
            target: "end".to_string()
        }]
    );
}
