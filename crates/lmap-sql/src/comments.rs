//! Comment stripping
//!
//! Replaces `-- ...` and `/* ... */` comments with spaces while keeping every
//! byte offset (and therefore every line/column) of the remaining text intact.
//! Quoted strings and identifiers are skipped, using the quoting rules of
//! the tokenizer dialect, so `'--'` or `"a/*b"` survive.

use sqlparser::dialect::{Dialect, GenericDialect};

/// Comment-free SQL text plus the tolerable problems found while stripping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSql {
    /// Text with the same byte length as the input
    pub text: String,
    /// Problems that caused the remainder of the text to be blanked
    pub issues: Vec<StripIssue>,
}

/// A malformed region that was blanked rather than rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripIssue {
    /// `/*` without a closing `*/`
    UnterminatedBlockComment { offset: usize },
    /// A string or quoted identifier that never closes
    UnterminatedQuote { quote: char, offset: usize },
}

impl StripIssue {
    /// Byte offset where the problem starts
    pub fn offset(&self) -> usize {
        match self {
            StripIssue::UnterminatedBlockComment { offset }
            | StripIssue::UnterminatedQuote { offset, .. } => *offset,
        }
    }
}

/// Where a dialect's strings, quoted identifiers and comments begin and end.
///
/// Derived from the sqlparser dialect so the stripper agrees with the
/// tokenizer that runs afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteRules {
    /// `\'` inside a single-quoted string does not close it
    pub backslash_escapes: bool,
    /// `[name]` is a delimited identifier (closed by `]`, `]]` escapes)
    pub bracket_identifiers: bool,
    /// `` `name` `` is a delimited identifier
    pub backtick_identifiers: bool,
    /// `$$...$$` and `$tag$...$tag$` are string literals
    pub dollar_quoting: bool,
    /// `/* /* */ */` nests
    pub nested_comments: bool,
}

impl QuoteRules {
    pub fn for_dialect(dialect: &dyn Dialect) -> Self {
        Self {
            backslash_escapes: dialect.supports_string_literal_backslash_escape(),
            bracket_identifiers: dialect.is_delimited_identifier_start('['),
            backtick_identifiers: dialect.is_delimited_identifier_start('`'),
            dollar_quoting: !dialect.supports_dollar_placeholder(),
            nested_comments: dialect.supports_nested_comments(),
        }
    }
}

impl Default for QuoteRules {
    fn default() -> Self {
        Self::for_dialect(&GenericDialect {})
    }
}

/// Strip line and block comments from SQL text.
///
/// The output always has the same byte length as `sql`. Newlines inside
/// comments are kept so line numbers stay stable.
pub fn strip_comments(sql: &str, rules: QuoteRules) -> StrippedSql {
    let bytes = sql.as_bytes();
    let mut out = bytes.to_vec();
    let mut issues = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let quoted = match bytes[i] {
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                let end = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |p| i + p);
                blank(&mut out[i..end]);
                i = end;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                match find_block_end(bytes, i + 2, rules.nested_comments) {
                    Some(end) => {
                        blank(&mut out[i..end]);
                        i = end;
                    }
                    None => {
                        blank(&mut out[i..]);
                        issues.push(StripIssue::UnterminatedBlockComment { offset: i });
                        i = bytes.len();
                    }
                }
                continue;
            }
            b'\'' => Some((
                b'\'',
                find_closing_quote(bytes, i + 1, b'\'', rules.backslash_escapes),
            )),
            b'"' => Some((b'"', find_closing_quote(bytes, i + 1, b'"', false))),
            b'`' if rules.backtick_identifiers => {
                Some((b'`', find_closing_quote(bytes, i + 1, b'`', false)))
            }
            b'[' if rules.bracket_identifiers => {
                Some((b'[', find_closing_quote(bytes, i + 1, b']', false)))
            }
            b'$' if rules.dollar_quoting && !follows_identifier(bytes, i) => {
                dollar_tag_len(bytes, i).map(|tag_len| {
                    let tag = &bytes[i..i + tag_len];
                    let close = bytes[i + tag_len..]
                        .windows(tag_len)
                        .position(|w| w == tag)
                        .map(|p| i + tag_len + p + tag_len - 1);
                    (b'$', close)
                })
            }
            _ => None,
        };

        match quoted {
            Some((_, Some(close))) => i = close + 1,
            Some((quote, None)) => {
                blank(&mut out[i..]);
                issues.push(StripIssue::UnterminatedQuote {
                    quote: quote as char,
                    offset: i,
                });
                i = bytes.len();
            }
            None => i += 1,
        }
    }

    // Blanked ranges start and end on ASCII bytes, so this never fails in practice.
    let text = String::from_utf8(out)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned());

    StrippedSql { text, issues }
}

/// 1-based line number of a byte offset
pub fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count() + 1
}

fn blank(region: &mut [u8]) {
    for byte in region.iter_mut() {
        if *byte != b'\n' && *byte != b'\r' {
            *byte = b' ';
        }
    }
}

/// Index one past the `*/` closing a comment whose body starts at `from`
fn find_block_end(bytes: &[u8], from: usize, nested: bool) -> Option<usize> {
    let mut depth = 1usize;
    let mut j = from;
    while j + 1 < bytes.len() {
        match &bytes[j..j + 2] {
            b"*/" => {
                depth -= 1;
                j += 2;
                if depth == 0 {
                    return Some(j);
                }
            }
            b"/*" if nested => {
                depth += 1;
                j += 2;
            }
            _ => j += 1,
        }
    }
    None
}

/// Index of the closing quote; a doubled quote is an escape, and so is a
/// backslash when `backslash` is set
fn find_closing_quote(bytes: &[u8], from: usize, quote: u8, backslash: bool) -> Option<usize> {
    let mut j = from;
    while j < bytes.len() {
        if backslash && bytes[j] == b'\\' {
            j += 2;
            continue;
        }
        if bytes[j] == quote {
            if bytes.get(j + 1) == Some(&quote) {
                j += 2;
                continue;
            }
            return Some(j);
        }
        j += 1;
    }
    None
}

/// Length of a `$tag$` opener at `at` (2 for `$$`); `$1` placeholders are not openers
fn dollar_tag_len(bytes: &[u8], at: usize) -> Option<usize> {
    if bytes.get(at + 1).is_some_and(u8::is_ascii_digit) {
        return None;
    }
    let tag = bytes[at + 1..]
        .iter()
        .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
        .count();
    (bytes.get(at + 1 + tag) == Some(&b'$')).then_some(tag + 2)
}

/// `$` inside a word such as `sys$objects` is part of the identifier
fn follows_identifier(bytes: &[u8], at: usize) -> bool {
    at.checked_sub(1)
        .and_then(|prev| bytes.get(prev))
        .is_some_and(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'$'))
}

#[cfg(test)]
#[path = "comments_test.rs"]
mod tests;
