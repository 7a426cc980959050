//! Table reference extraction from a statement's tokens
//!
//! This is a keyword scan, not a parser. Every `FROM`/`JOIN` in a query
//! context is followed by a table factor, and the first object name in that
//! factor is captured. Until a clause keyword such as `WHERE` closes it, a
//! comma at the FROM clause's own nesting level starts another factor.
//! Aliases are plain words to the scan and never look like tables.
//!
//! Query context means the statement top level, or a parenthesis group that
//! starts with `SELECT`/`WITH`/`VALUES`/`(` or was opened right after
//! `FROM`/`JOIN`/`LATERAL`. Groups opened by anything else are function
//! calls or expression lists, which is how `EXTRACT(YEAR FROM d)` and
//! `TRIM(BOTH ' ' FROM s)` are ignored. The heuristic cannot tell
//! `FROM my_func(...)` from a table with a parenthesised argument list; a
//! name followed by `(` is always treated as a table function.

use lmap_core::canonical_name;
use serde::Serialize;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use crate::lexer::{is_keyword, TokenCursor};

/// One component of a dotted object name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NamePart {
    /// Identifier text without its quote characters
    pub value: String,
    /// Whether the identifier was quoted in the source
    pub quoted: bool,
}

/// A table name as written after FROM/JOIN (alias and quotes removed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TableReference {
    pub parts: Vec<NamePart>,
}

impl TableReference {
    /// Lower-cased, dot-joined key used for matching
    pub fn canonical(&self) -> String {
        canonical_name(self.parts.iter().map(|p| p.value.as_str()))
    }

    /// Dot-joined name in its original case
    pub fn display(&self) -> String {
        self.parts
            .iter()
            .map(|p| p.value.as_str())
            .collect::<Vec<_>>()
            .join(".")
    }

    pub fn is_qualified(&self) -> bool {
        self.parts.len() > 1
    }
}

/// One open parenthesis level (or the statement top level)
#[derive(Debug, Clone, Copy)]
struct Frame {
    /// Query context: FROM/JOIN here introduce tables
    query: bool,
    /// Inside a FROM clause: a comma at this level starts another table
    in_from: bool,
}

impl Frame {
    fn new(query: bool) -> Self {
        Self {
            query,
            in_from: false,
        }
    }
}

/// Extract every table reference that follows FROM/JOIN in a query context.
///
/// A comma at the level of an open FROM clause also starts a table factor,
/// including after `JOIN ... ON expr` or `USING (...)`. The clause ends at
/// `WHERE`, `GROUP`, set operators and similar keywords.
///
/// References are returned in source order and may repeat.
pub fn extract_table_references(tokens: &[Token]) -> Vec<TableReference> {
    let mut references = Vec::new();
    let mut frames: Vec<Frame> = vec![Frame::new(true)];

    for (idx, token) in tokens.iter().enumerate() {
        match token {
            Token::LParen => frames.push(Frame::new(opens_query(tokens, idx))),
            Token::RParen => {
                if frames.len() > 1 {
                    frames.pop();
                }
            }
            Token::Comma => {
                if frames.last().is_some_and(|f| f.query && f.in_from) {
                    references.extend(read_table_at(tokens, idx + 1));
                }
            }
            Token::Word(w) if w.quote_style.is_none() => {
                let Some(frame) = frames.last_mut() else {
                    continue;
                };
                match w.keyword {
                    Keyword::FROM | Keyword::JOIN => {}
                    keyword if ends_from_clause(keyword) => {
                        frame.in_from = false;
                        continue;
                    }
                    _ => continue,
                }
                if !frame.query {
                    log::debug!("ignoring {} inside a function call", w.value);
                    continue;
                }
                if w.keyword == Keyword::FROM && follows_distinct(tokens, idx) {
                    continue;
                }
                frame.in_from = true;
                references.extend(read_table_at(tokens, idx + 1));
            }
            _ => {}
        }
    }

    references
}

fn read_table_at(tokens: &[Token], pos: usize) -> Option<TableReference> {
    read_table_factor(&mut TokenCursor::at(tokens, pos))
}

/// Keywords that close the table list of a FROM clause
fn ends_from_clause(keyword: Keyword) -> bool {
    matches!(
        keyword,
        Keyword::WHERE
            | Keyword::GROUP
            | Keyword::HAVING
            | Keyword::ORDER
            | Keyword::LIMIT
            | Keyword::OFFSET
            | Keyword::FETCH
            | Keyword::QUALIFY
            | Keyword::WINDOW
            | Keyword::UNION
            | Keyword::EXCEPT
            | Keyword::INTERSECT
            | Keyword::SELECT
            | Keyword::SET
            | Keyword::UPDATE
            | Keyword::RETURNING
    )
}

/// Decide whether the `(` at `idx` opens a query context
fn opens_query(tokens: &[Token], idx: usize) -> bool {
    let after_from = idx
        .checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|prev| {
            is_keyword(prev, Keyword::FROM)
                || is_keyword(prev, Keyword::JOIN)
                || is_keyword(prev, Keyword::LATERAL)
        });
    if after_from {
        return true;
    }
    match tokens.get(idx + 1) {
        Some(Token::LParen) => true,
        Some(next) => {
            is_keyword(next, Keyword::SELECT)
                || is_keyword(next, Keyword::WITH)
                || is_keyword(next, Keyword::VALUES)
        }
        None => false,
    }
}

/// `IS [NOT] DISTINCT FROM` is a comparison, not a table clause
fn follows_distinct(tokens: &[Token], idx: usize) -> bool {
    idx.checked_sub(1)
        .and_then(|prev| tokens.get(prev))
        .is_some_and(|prev| is_keyword(prev, Keyword::DISTINCT))
}

/// The first object name of a table factor; aliases and the rest are left
/// to the ongoing scan
fn read_table_factor(cursor: &mut TokenCursor<'_>) -> Option<TableReference> {
    cursor.consume_keyword(Keyword::LATERAL);

    if cursor.consume(&Token::LParen) {
        // Subquery or parenthesised join. Subquery tables are picked up by
        // the outer scan; a join group's leading table is captured here.
        let inner = match cursor.peek() {
            Some(Token::LParen) => read_table_factor(cursor),
            Some(token) if starts_object_name(token) => read_table_factor(cursor),
            _ => None,
        };
        cursor.skip_to_close();
        return inner;
    }

    if !cursor.peek().is_some_and(starts_object_name) {
        return None;
    }
    let reference = read_object_name(cursor)?;
    if cursor.check_token(&Token::LParen) {
        log::debug!("'{}' is a table function", reference.display());
        cursor.skip_balanced_parens();
        return None;
    }
    Some(reference)
}

fn starts_object_name(token: &Token) -> bool {
    match token {
        Token::LBracket => true,
        Token::Word(w) if w.quote_style.is_some() => true,
        Token::Word(w) => !matches!(
            w.keyword,
            Keyword::SELECT | Keyword::WITH | Keyword::VALUES | Keyword::LATERAL | Keyword::UNNEST
        ),
        _ => false,
    }
}

/// Read `a`, `a.b`, `a.b.c`, `a..c` and `[a].[b]` forms
fn read_object_name(cursor: &mut TokenCursor<'_>) -> Option<TableReference> {
    let mut parts = vec![read_name_part(cursor)?];
    while cursor.consume(&Token::Period) {
        while cursor.consume(&Token::Period) {}
        match read_name_part(cursor) {
            Some(part) => parts.push(part),
            None => break,
        }
    }
    Some(TableReference { parts })
}

fn read_name_part(cursor: &mut TokenCursor<'_>) -> Option<NamePart> {
    match cursor.peek()? {
        Token::Word(w) => {
            cursor.advance();
            Some(NamePart {
                value: w.value.clone(),
                quoted: w.quote_style.is_some(),
            })
        }
        // `[name]` in dialects whose tokenizer does not treat brackets as quotes
        Token::LBracket => {
            cursor.advance();
            let mut words = Vec::new();
            while let Some(token) = cursor.advance() {
                match token {
                    Token::RBracket => break,
                    Token::Word(w) => words.push(w.value.clone()),
                    Token::Number(n, _) => words.push(n.clone()),
                    _ => {}
                }
            }
            if words.is_empty() {
                return None;
            }
            Some(NamePart {
                value: words.join(" "),
                quoted: true,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "extractor_test.rs"]
mod tests;
