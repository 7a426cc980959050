//! CTE registry
//!
//! Collects the names declared by `WITH` clauses in one statement so that
//! later references to them are not mistaken for persisted tables.

use std::collections::BTreeSet;

use serde::Serialize;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use crate::lexer::{is_keyword, TokenCursor};

/// CTE names local to one statement (lower-cased)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CteScope {
    names: BTreeSet<String>,
}

impl CteScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a CTE name; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        self.names.insert(name.to_lowercase())
    }

    /// Case-insensitive membership test
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Collect every CTE declared anywhere in a statement.
///
/// Handles `WITH [RECURSIVE] a AS (...), b (x, y) AS [NOT] MATERIALIZED (...)`.
/// CTE bodies are skipped by parenthesis depth; nested `WITH` clauses inside
/// subqueries are found by the outer loop and land in the same scope.
pub fn collect_ctes(tokens: &[Token]) -> CteScope {
    let mut scope = CteScope::new();

    for (idx, token) in tokens.iter().enumerate() {
        if !is_keyword(token, Keyword::WITH) {
            continue;
        }
        let mut cursor = TokenCursor::at(tokens, idx + 1);
        cursor.consume_keyword(Keyword::RECURSIVE);

        while let Some(name) = read_cte_definition(&mut cursor) {
            log::debug!("registered CTE '{}'", name);
            scope.insert(&name);
            if !cursor.consume(&Token::Comma) {
                break;
            }
        }
    }

    scope
}

/// Read `name [(cols)] AS [[NOT] MATERIALIZED] (body)`, leaving the cursor
/// after the body. Returns None when the tokens are not a CTE definition
/// (`WITH TIME ZONE`, `WITH (NOLOCK)`, `WITH ORDINALITY AS t`...).
fn read_cte_definition(cursor: &mut TokenCursor<'_>) -> Option<String> {
    let name = match cursor.peek()? {
        Token::Word(w) => w.value.clone(),
        _ => return None,
    };
    cursor.advance();

    cursor.skip_balanced_parens();

    if !cursor.consume_keyword(Keyword::AS) {
        return None;
    }
    cursor.consume_keyword(Keyword::NOT);
    cursor.consume_keyword(Keyword::MATERIALIZED);

    if !cursor.check_token(&Token::LParen) {
        return None;
    }
    cursor.skip_balanced_parens();
    Some(name)
}

#[cfg(test)]
#[path = "cte_test.rs"]
mod tests;
