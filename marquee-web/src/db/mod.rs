//! Database access layer for marquee-web
//!
//! One module per entity. Record structs live next to the queries that
//! produce them. All mutations run inside a single transaction;
//! dropping an uncommitted transaction rolls back.

pub mod artists;
pub mod shows;
pub mod venues;

/// Minimal {id, name} reference used by index pages and search results
#[derive(Debug, Clone)]
pub struct NameRef {
    pub id: i64,
    pub name: String,
}

/// Build a `%term%` LIKE pattern with `%`, `_`, and `\` in the term
/// escaped so they match literally. Used with `ESCAPE '\'`.
/// SQLite LIKE is case-insensitive for ASCII, which supplies the
/// case-folded substring semantics of search.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Encode a genre set for its TEXT column (JSON array)
pub(crate) fn encode_genres(genres: &[String]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(genres)?)
}

/// Decode a genre set from its TEXT column; malformed data reads as empty
pub(crate) fn decode_genres(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}
