//! Tokenization and token-stream navigation
//!
//! Wraps sqlparser's tokenizer: whitespace is dropped, tokenizer errors are
//! recovered by truncating at the failing line, and statements are split on
//! `;`. [`TokenCursor`] is the small forward-only reader the CTE and table
//! scanners are written against.

use sqlparser::dialect::Dialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, Tokenizer};

use crate::scanner::ScanWarning;

/// Token stream for one file, plus the recovery warning if tokenization failed
#[derive(Debug, Clone, Default)]
pub struct Tokenized {
    pub tokens: Vec<Token>,
    pub warning: Option<ScanWarning>,
}

/// Tokenize comment-free SQL, dropping whitespace.
///
/// On a tokenizer error the text is cut at the start of the failing line and
/// tokenized again; if that also fails the result is empty.
pub fn tokenize(sql: &str, dialect: &dyn Dialect) -> Tokenized {
    let err = match Tokenizer::new(dialect, sql).tokenize() {
        Ok(tokens) => {
            return Tokenized {
                tokens: significant(tokens),
                warning: None,
            }
        }
        Err(err) => err,
    };

    let line = usize::try_from(err.location.line).unwrap_or(1).max(1);
    let cut = line_start(sql, line);
    log::debug!(
        "tokenizer failed at line {}: {}; retrying on the first {} bytes",
        line,
        err.message,
        cut
    );

    match Tokenizer::new(dialect, &sql[..cut]).tokenize() {
        Ok(tokens) => Tokenized {
            tokens: significant(tokens),
            warning: Some(ScanWarning::TokenizerRecovered {
                line,
                message: err.message,
            }),
        },
        Err(retry) => Tokenized {
            tokens: Vec::new(),
            warning: Some(ScanWarning::TokenizerFailed {
                message: retry.message,
            }),
        },
    }
}

/// Split a token stream into statements on every `;`.
///
/// Empty statements (`;;`, trailing `;`) are dropped.
pub fn split_statements(tokens: &[Token]) -> Vec<&[Token]> {
    tokens
        .split(|t| matches!(t, Token::SemiColon))
        .filter(|stmt| !stmt.is_empty())
        .collect()
}

/// Whether a token is the given (unquoted) keyword
pub fn is_keyword(token: &Token, keyword: Keyword) -> bool {
    matches!(token, Token::Word(w) if w.keyword == keyword && w.quote_style.is_none())
}

fn significant(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| !matches!(t, Token::Whitespace(_) | Token::EOF))
        .collect()
}

/// Byte offset where 1-based `line` starts (text length if past the end)
fn line_start(text: &str, line: usize) -> usize {
    if line <= 1 {
        return 0;
    }
    text.match_indices('\n')
        .nth(line - 2)
        .map_or(text.len(), |(idx, _)| idx + 1)
}

/// Forward-only reader over a statement's tokens
#[derive(Debug, Clone)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Start reading at `pos`
    pub fn at(tokens: &'a [Token], pos: usize) -> Self {
        Self { tokens, pos }
    }

    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek().is_some_and(|t| is_keyword(t, keyword))
    }

    /// Compare by token kind only (payloads are ignored)
    pub fn check_token(&self, token: &Token) -> bool {
        self.peek()
            .is_some_and(|t| std::mem::discriminant(t) == std::mem::discriminant(token))
    }

    /// Advance past `token` if it is next
    pub fn consume(&mut self, token: &Token) -> bool {
        if self.check_token(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advance past the keyword if it is next
    pub fn consume_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// When positioned on `(`, move past its matching `)`.
    ///
    /// An unbalanced group runs to the end of the stream.
    pub fn skip_balanced_parens(&mut self) {
        if self.consume(&Token::LParen) {
            self.skip_to_close();
        }
    }

    /// Move past the `)` closing a group that is already open
    pub fn skip_to_close(&mut self) {
        let mut depth = 1usize;
        while let Some(token) = self.advance() {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
#[path = "lexer_test.rs"]
mod tests;
