//! Table identity types

use crate::newtype_string::define_newtype_string;

define_newtype_string! {
    /// Canonical table key: lower-cased, unquoted, dot-separated.
    ///
    /// Two references to the same logical table always produce the same
    /// `TableId`, whatever their case or quoting in the source SQL.
    pub struct TableId;
}

define_newtype_string! {
    /// Human-readable table name as first written (original case).
    pub struct TableName;
}

impl TableId {
    /// Canonicalize a dotted name (`Raw."Orders"` becomes `raw.orders`).
    ///
    /// Dots inside `"..."`, `` `...` `` or `[...]` belong to the name.
    /// Returns `None` for names that are empty once quotes and whitespace
    /// are removed.
    pub fn canonical(name: &str) -> Option<Self> {
        Self::try_new(canonical_name(split_name(name)))
    }
}

impl TableName {
    /// The canonical id this name maps to
    pub fn to_id(&self) -> Option<TableId> {
        TableId::canonical(self.as_str())
    }
}

/// Join unquoted name parts into a canonical key.
///
/// Every table id in the workspace goes through here, whether it comes from
/// a file name, a config entry or a scanned reference.
pub fn canonical_name<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .map(|part| part.as_ref().trim().to_lowercase())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// Split dotted text into unquoted parts
fn split_name(name: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut closing: Option<char> = None;

    for ch in name.chars() {
        match closing {
            Some(close) if ch == close => closing = None,
            Some(_) => current.push(ch),
            None => match ch {
                '"' => closing = Some('"'),
                '`' => closing = Some('`'),
                '[' => closing = Some(']'),
                '.' => parts.push(std::mem::take(&mut current)),
                c if c.is_whitespace() => {}
                c => current.push(c),
            },
        }
    }
    parts.push(current);
    parts
}

#[cfg(test)]
#[path = "table_id_test.rs"]
mod tests;
