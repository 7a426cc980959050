use super::*;
use crate::lexer::tokenize;
use sqlparser::dialect::{GenericDialect, MsSqlDialect};

fn refs(sql: &str) -> Vec<String> {
    let tokenized = tokenize(sql, &GenericDialect {});
    extract_table_references(&tokenized.tokens)
        .iter()
        .map(TableReference::canonical)
        .collect()
}

#[test]
fn test_simple_from() {
    assert_eq!(refs("SELECT * FROM orders"), vec!["orders"]);
}

#[test]
fn test_join_variants_and_aliases() {
    let sql = "SELECT * FROM source_table_3 s3 \
               JOIN source_table_4 s4 ON s3.id = s4.id \
               LEFT OUTER JOIN c AS cc ON 1 = 1 \
               CROSS JOIN d \
               FULL JOIN e USING (id)";
    assert_eq!(
        refs(sql),
        vec!["source_table_3", "source_table_4", "c", "d", "e"]
    );
}

#[test]
fn test_comma_joins() {
    assert_eq!(
        refs("SELECT * FROM a, b AS bb, c cc WHERE a.id = b.id"),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_comma_after_join_on() {
    assert_eq!(
        refs("SELECT * FROM a JOIN b ON a.id = b.id, c WHERE c.k = a.k"),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_comma_after_join_using() {
    assert_eq!(
        refs("SELECT * FROM a LEFT JOIN b USING (id, day), c cc"),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_commas_outside_from_clause_ignored() {
    assert_eq!(
        refs("SELECT x, y FROM a WHERE f(x, y) > 0 GROUP BY x, y ORDER BY x, y"),
        vec!["a"]
    );
    assert_eq!(
        refs("WITH p AS (SELECT * FROM a), q AS (SELECT * FROM b) SELECT * FROM p, q"),
        vec!["a", "b", "p", "q"]
    );
}

#[test]
fn test_comma_after_subquery_factor() {
    assert_eq!(
        refs("SELECT * FROM (SELECT id FROM a) s, b JOIN c ON b.id = c.id AND c.x IN (1, 2), d"),
        vec!["a", "b", "c", "d"]
    );
}

#[test]
fn test_qualified_names() {
    assert_eq!(
        refs("SELECT * FROM Raw_Data.Input_Table JOIN db.schema.t ON 1=1"),
        vec!["raw_data.input_table", "db.schema.t"]
    );
}

#[test]
fn test_double_dot_name() {
    assert_eq!(refs("SELECT * FROM db..orders"), vec!["db.orders"]);
}

#[test]
fn test_quoted_identifiers() {
    let tokenized = tokenize(
        "SELECT * FROM \"Sales\".\"Order Items\" JOIN `x`.`y` ON 1=1",
        &GenericDialect {},
    );
    let references = extract_table_references(&tokenized.tokens);
    assert_eq!(references.len(), 2);
    assert_eq!(references[0].display(), "Sales.Order Items");
    assert!(references[0].parts.iter().all(|p| p.quoted));
    assert_eq!(references[1].canonical(), "x.y");
}

#[test]
fn test_bracket_identifiers_generic_and_mssql() {
    assert_eq!(refs("SELECT * FROM [dbo].[Orders]"), vec!["dbo.orders"]);

    let tokenized = tokenize("SELECT * FROM [dbo].[Orders] o", &MsSqlDialect {});
    let references = extract_table_references(&tokenized.tokens);
    assert_eq!(references.len(), 1);
    assert_eq!(references[0].canonical(), "dbo.orders");
}

#[test]
fn test_subquery_tables_found() {
    assert_eq!(
        refs("SELECT * FROM (SELECT * FROM inner_t) sub JOIN other o ON 1=1"),
        vec!["inner_t", "other"]
    );
}

#[test]
fn test_function_from_ignored() {
    let sql = "SELECT EXTRACT(YEAR FROM created_at), TRIM(BOTH ' ' FROM name), \
               SUBSTRING(code FROM 2 FOR 3) FROM events";
    assert_eq!(refs(sql), vec!["events"]);
}

#[test]
fn test_table_function_not_a_table() {
    assert_eq!(
        refs("SELECT * FROM read_csv('data.csv') JOIN real_t ON 1=1"),
        vec!["real_t"]
    );
}

#[test]
fn test_string_literal_not_a_table() {
    assert!(refs("SELECT * FROM 'data/file.parquet'").is_empty());
}

#[test]
fn test_is_distinct_from_ignored() {
    assert_eq!(
        refs("SELECT * FROM t WHERE a IS NOT DISTINCT FROM b AND c IS DISTINCT FROM d"),
        vec!["t"]
    );
}

#[test]
fn test_values_lateral_and_scalar_subquery() {
    let sql = "SELECT *, (SELECT COUNT(*) FROM schema3.lookup_table WHERE id = cte1.id) \
               FROM cte1 \
               JOIN schema2.table2 USING (id) \
               CROSS JOIN (VALUES ('a', 'b')) c(col1, col2) \
               CROSS JOIN LATERAL (SELECT * FROM file_schema.model_1_1) a";
    assert_eq!(
        refs(sql),
        vec![
            "schema3.lookup_table",
            "cte1",
            "schema2.table2",
            "file_schema.model_1_1"
        ]
    );
}

#[test]
fn test_parenthesised_join_group() {
    assert_eq!(
        refs("SELECT * FROM (a JOIN b ON a.id = b.id) JOIN c ON 1=1"),
        vec!["a", "b", "c"]
    );
}

#[test]
fn test_union_branches() {
    assert_eq!(
        refs("SELECT id FROM a UNION ALL SELECT id FROM b"),
        vec!["a", "b"]
    );
}

#[test]
fn test_keyword_prefix_not_matched() {
    assert_eq!(
        refs("SELECT from_date, joined FROM fromage JOIN joiner ON 1=1"),
        vec!["fromage", "joiner"]
    );
}

#[test]
fn test_dml_statements() {
    assert_eq!(refs("DELETE FROM stale WHERE id IN (SELECT id FROM keep)"), vec!["stale", "keep"]);
    assert_eq!(
        refs("INSERT INTO target SELECT * FROM staging"),
        vec!["staging"]
    );
}

#[test]
fn test_from_at_end_of_tokens() {
    assert!(refs("SELECT * FROM").is_empty());
}
