pub mod offsets;

/// Trailing statement terminator that must not end up in front of an
/// appended clause.
const TERMINATOR: char = ';';

/// Trims surrounding whitespace and removes a single trailing `;`.
pub fn strip_terminator(sql: &str) -> &str {
    let sql = sql.trim();
    sql.strip_suffix(TERMINATOR).unwrap_or(sql)
}
