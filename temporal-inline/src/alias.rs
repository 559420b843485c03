//! Alias selection for the aggregated-interval subquery.

/// Candidate alias names, tried in priority order.
const CANDIDATES: [&str; 3] = ["j", "j1", "j2"];

/// Pick a name for the inner aggregate subquery that differs from both input
/// tables' raw spellings.
///
/// The generated query references exactly three relations: the two base
/// tables and the aggregate subquery, so only the two table names need to be
/// checked, and with three candidates one is always free. If the templates
/// ever grow additional relations or projected columns, the collision check
/// must widen to every identifier appearing in the rendered query.
pub(crate) fn choose_alias(left_table: &str, right_table: &str) -> &'static str {
    CANDIDATES
        .into_iter()
        .find(|candidate| *candidate != left_table && *candidate != right_table)
        .expect("two table names cannot exhaust three candidates")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_the_first_free_candidate() {
        assert_eq!(choose_alias("x", "y"), "j");
        assert_eq!(choose_alias("j", "x"), "j1");
        assert_eq!(choose_alias("x", "j"), "j1");
        assert_eq!(choose_alias("j", "j1"), "j2");
        assert_eq!(choose_alias("j1", "j"), "j2");
    }

    #[test]
    fn tables_named_like_later_candidates_only_matter_if_reached() {
        assert_eq!(choose_alias("j1", "j2"), "j");
        assert_eq!(choose_alias("j", "j2"), "j1");
    }

    #[test]
    fn never_returns_either_input() {
        for left in ["j", "j1", "j2", "employees"] {
            for right in ["j", "j1", "j2", "assignments"] {
                let alias = choose_alias(left, right);
                assert_ne!(alias, left);
                assert_ne!(alias, right);
            }
        }
    }
}
