use crate::query::strip_terminator;
use model::pagination::offset::OffsetWindow;

/// Keyword a statement must start with to be paginated.
const SELECT_KEYWORD: &str = "select";

/// Any occurrence of this word, anywhere in the statement, disables pagination.
const LIMIT_KEYWORD: &str = "limit";

/// Returns `true` for a `SELECT` that carries no `LIMIT` of its own.
///
/// This is a textual sniff, not a parse: a `limit` inside a string literal or
/// an identifier (`select * from speed_limits`) also counts and keeps the
/// statement on the direct path.
pub fn is_paginable(sql: &str) -> bool {
    let lowered = sql.trim().to_lowercase();
    lowered.starts_with(SELECT_KEYWORD) && !lowered.contains(LIMIT_KEYWORD)
}

/// Appends ` limit {limit} offset {offset}` to the statement.
pub fn rewrite_for_page(sql: &str, limit: usize, offset: usize) -> String {
    format!("{} limit {limit} offset {offset}", strip_terminator(sql))
}

/// Same as [`rewrite_for_page`], driven by a page window.
pub fn rewrite_for_window(sql: &str, window: &OffsetWindow) -> String {
    rewrite_for_page(sql, window.limit.get(), window.offset)
}

/// Appends ` limit 1`, used to check that the server accepts the statement
/// before committing to pagination.
pub fn rewrite_for_probe(sql: &str) -> String {
    format!("{} limit 1", strip_terminator(sql))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    #[test]
    fn test_select_without_limit_is_paginable() {
        assert!(is_paginable("select * from t"));
        assert!(is_paginable("  SELECT id FROM t WHERE x = 1;"));
        assert!(is_paginable("Select\n*\nfrom t"));
    }

    #[test]
    fn test_non_select_is_not_paginable() {
        assert!(!is_paginable("insert into t values (1)"));
        assert!(!is_paginable("update t set x = 1"));
        assert!(!is_paginable("with c as (select 1) select * from c"));
        assert!(!is_paginable(""));
    }

    #[test]
    fn test_existing_limit_disables_pagination() {
        assert!(!is_paginable("select * from t limit 10"));
        assert!(!is_paginable("select * from t LIMIT 10 offset 5"));
    }

    #[test]
    fn test_limit_substring_is_a_false_negative() {
        assert!(!is_paginable("select * from speed_limits"));
        assert!(!is_paginable("select 'no limit' from t"));
    }

    #[test]
    fn test_rewrite_for_page() {
        assert_eq!(
            rewrite_for_page("select * from t", 10000, 0),
            "select * from t limit 10000 offset 0"
        );
        assert_eq!(
            rewrite_for_page("select * from t;", 2, 4),
            "select * from t limit 2 offset 4"
        );
    }

    #[test]
    fn test_rewrite_for_window() {
        let window = OffsetWindow::first(NonZeroUsize::new(5).unwrap()).advance(3);
        assert_eq!(
            rewrite_for_window("select a from b", &window),
            "select a from b limit 5 offset 3"
        );
    }

    #[test]
    fn test_rewrite_for_probe() {
        assert_eq!(rewrite_for_probe("select * from t;"), "select * from t limit 1");
        assert_eq!(rewrite_for_probe(" select 1 "), "select 1 limit 1");
    }
}
