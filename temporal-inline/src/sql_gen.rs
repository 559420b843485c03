//! Rendering of the semijoin and antijoin replacement queries.
//!
//! Both shapes share their core: an inner subquery aggregates the right
//! table's valid-intervals per identifier (collapsing a fragmented history
//! into one multi-interval value), and the left table joins against that
//! aggregate on identifier equality plus interval overlap. They differ only
//! in the join flavor and the projected interval expression:
//!
//! - *semijoin*: inner join, project the intersection of the left interval
//!   with the matched aggregate, unnested into one row per component;
//! - *antijoin*: left outer join, project the left interval unchanged when no
//!   aggregate matched, otherwise the left interval minus the aggregate,
//!   unnested likewise; rows with an empty left interval are filtered out.
//!
//! The `FROM`-clause table references are schema-qualified so they resolve
//! uniquely; every later occurrence of the same table is a correlation-name
//! reference and re-quotes only the bare table name. The projected interval
//! column is named after the left table's valid-interval column.

use crate::alias::choose_alias;
use crate::args::JoinSpec;
use crate::quoting::{quote_identifier, quote_qualified_identifier};

/// Which of the two temporal join shapes to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Keep the parts of each left interval covered by right-side activity
    /// for the same key.
    Semi,
    /// Keep the parts of each left interval *not* covered by right-side
    /// activity for the same key.
    Anti,
}

/// Render the replacement query for `spec`.
///
/// Pure and deterministic: identical inputs produce byte-identical text.
pub fn render_join_query(kind: JoinKind, spec: &JoinSpec) -> String {
    let left = quote_qualified_identifier(spec.left.schema.as_deref(), &spec.left.name);
    let left_table = quote_identifier(&spec.left.name);
    let left_id = quote_identifier(&spec.left_id.name);
    let left_valid = quote_identifier(&spec.left_valid.name);
    let right = quote_qualified_identifier(spec.right.schema.as_deref(), &spec.right.name);
    let right_table = quote_identifier(&spec.right.name);
    let right_id = quote_identifier(&spec.right_id.name);
    let right_valid = quote_identifier(&spec.right_valid.name);
    // The output interval column keeps the left table's naming.
    let result_valid = &left_valid;
    let alias = quote_identifier(choose_alias(&spec.left.name, &spec.right.name));

    let (select_list, join_keyword, where_clause) = match kind {
        JoinKind::Semi => (
            format!(
                "{left_table}.{left_id}, UNNEST(multirange({left_table}.{left_valid}) * {alias}.{right_valid}) AS {result_valid}"
            ),
            "JOIN",
            String::new(),
        ),
        JoinKind::Anti => (
            format!(
                "{left_table}.{left_id}, UNNEST(CASE WHEN {alias}.{right_valid} IS NULL THEN multirange({left_table}.{left_valid})\n                              ELSE multirange({left_table}.{left_valid}) - {alias}.{right_valid} END) AS {result_valid}"
            ),
            "LEFT JOIN",
            format!("\nWHERE NOT isempty({left_table}.{left_valid})"),
        ),
    };

    format!(
        "SELECT {select_list}
FROM {left}
{join_keyword} (
  SELECT {right_table}.{right_id}, range_agg({right_table}.{right_valid}) AS {right_valid}
  FROM {right}
  GROUP BY {right_table}.{right_id}
) AS {alias}
ON {left_table}.{left_id} = {alias}.{right_id} AND {left_table}.{left_valid} && {alias}.{right_valid}{where_clause}"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sqlparser::ast::Statement;
    use sqlparser::dialect::PostgreSqlDialect;
    use sqlparser::parser::Parser;

    use crate::catalog::TableReference;

    use super::*;

    fn spec() -> JoinSpec {
        JoinSpec {
            left: TableReference::new(Some("public"), "shifts"),
            left_id: "employee_id".to_owned().into(),
            left_valid: "valid_at".to_owned().into(),
            right: TableReference::new(Some("public"), "assignments"),
            right_id: "employee_id".to_owned().into(),
            right_valid: "valid_at".to_owned().into(),
        }
    }

    #[test]
    fn renders_the_semijoin_shape() {
        assert_eq!(
            render_join_query(JoinKind::Semi, &spec()),
            r#"SELECT "shifts"."employee_id", UNNEST(multirange("shifts"."valid_at") * "j"."valid_at") AS "valid_at"
FROM "public"."shifts"
JOIN (
  SELECT "assignments"."employee_id", range_agg("assignments"."valid_at") AS "valid_at"
  FROM "public"."assignments"
  GROUP BY "assignments"."employee_id"
) AS "j"
ON "shifts"."employee_id" = "j"."employee_id" AND "shifts"."valid_at" && "j"."valid_at""#
        );
    }

    #[test]
    fn renders_the_antijoin_shape() {
        assert_eq!(
            render_join_query(JoinKind::Anti, &spec()),
            r#"SELECT "shifts"."employee_id", UNNEST(CASE WHEN "j"."valid_at" IS NULL THEN multirange("shifts"."valid_at")
                              ELSE multirange("shifts"."valid_at") - "j"."valid_at" END) AS "valid_at"
FROM "public"."shifts"
LEFT JOIN (
  SELECT "assignments"."employee_id", range_agg("assignments"."valid_at") AS "valid_at"
  FROM "public"."assignments"
  GROUP BY "assignments"."employee_id"
) AS "j"
ON "shifts"."employee_id" = "j"."employee_id" AND "shifts"."valid_at" && "j"."valid_at"
WHERE NOT isempty("shifts"."valid_at")"#
        );
    }

    #[test]
    fn join_condition_and_filter_are_separated() {
        // The filter must start on its own line; gluing it to the join
        // condition would splice two clauses into one token stream.
        let sql = render_join_query(JoinKind::Anti, &spec());
        assert!(sql.contains("\"j\".\"valid_at\"\nWHERE NOT isempty"), "{sql}");
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = spec();
        assert_eq!(
            render_join_query(JoinKind::Semi, &spec),
            render_join_query(JoinKind::Semi, &spec)
        );
        assert_eq!(
            render_join_query(JoinKind::Anti, &spec),
            render_join_query(JoinKind::Anti, &spec)
        );
    }

    #[test]
    fn dodges_tables_spelled_like_the_alias() {
        let mut colliding = spec();
        colliding.left.name = "j".into();
        let sql = render_join_query(JoinKind::Semi, &colliding);
        assert!(sql.contains(r#") AS "j1""#), "{sql}");

        colliding.right.name = "j1".into();
        let sql = render_join_query(JoinKind::Semi, &colliding);
        assert!(sql.contains(r#") AS "j2""#), "{sql}");
    }

    #[test]
    fn output_column_follows_the_left_valid_column() {
        let mut uneven = spec();
        uneven.left_valid = "active_during".to_owned().into();
        uneven.right_valid = "posted_during".to_owned().into();
        let sql = render_join_query(JoinKind::Semi, &uneven);
        assert!(sql.contains(r#"* "j"."posted_during") AS "active_during""#), "{}", sql);
    }

    #[test]
    fn quotes_hostile_identifiers() {
        let hostile = JoinSpec {
            left: TableReference::new(None, r#"sh"ifts"#),
            left_id: "employee id".to_owned().into(),
            left_valid: "valid_at".to_owned().into(),
            right: TableReference::new(Some(r#"au"dit"#), "assignments"),
            right_id: "employee_id".to_owned().into(),
            right_valid: "valid_at".to_owned().into(),
        };
        let sql = render_join_query(JoinKind::Semi, &hostile);
        assert!(sql.contains(r#"FROM "sh""ifts""#), "{sql}");
        assert!(sql.contains(r#""sh""ifts"."employee id""#), "{sql}");
        assert!(sql.contains(r#"FROM "au""dit"."assignments""#), "{sql}");
    }

    #[test]
    fn both_shapes_parse_as_a_single_query() {
        for kind in [JoinKind::Semi, JoinKind::Anti] {
            let sql = render_join_query(kind, &spec());
            let statements = Parser::parse_sql(&PostgreSqlDialect {}, &sql)
                .unwrap_or_else(|e| panic!("{kind:?} failed to parse: {e}\n{sql}"));
            assert_eq!(statements.len(), 1);
            assert!(
                matches!(statements[0], Statement::Query(_)),
                "{kind:?} did not parse to a query"
            );
        }
    }
}
