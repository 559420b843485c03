//! The host's parse-and-analyze service, and its `sqlparser`-backed
//! implementation.

use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

use crate::error::{SupportResult, internal_err};
use crate::request::RoutineContext;

/// Parsing, semantic analysis and rule-based rewriting, injected by the host
/// environment.
///
/// Both operations are synchronous and treated as infallible once their
/// input has been validated: this crate only ever submits text it generated
/// itself, so a parse failure signals a generator bug (fatal), never a user
/// input problem.
pub trait QueryAnalyzer {
    /// Parse raw SQL into its list of statements.
    fn parse(&self, sql: &str) -> SupportResult<Vec<Statement>>;

    /// Analyze and rewrite one parsed statement under the binding rules of a
    /// SQL-language routine body described by `routine`, producing the
    /// resulting statement list.
    fn analyze(
        &self,
        statement: Statement,
        routine: &RoutineContext,
    ) -> SupportResult<Vec<Statement>>;
}

impl<A: QueryAnalyzer + ?Sized> QueryAnalyzer for &A {
    fn parse(&self, sql: &str) -> SupportResult<Vec<Statement>> {
        (*self).parse(sql)
    }

    fn analyze(
        &self,
        statement: Statement,
        routine: &RoutineContext,
    ) -> SupportResult<Vec<Statement>> {
        (*self).analyze(statement, routine)
    }
}

/// Analyzer backed by the `sqlparser` Postgres grammar.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqlAnalyzer;

impl QueryAnalyzer for SqlAnalyzer {
    fn parse(&self, sql: &str) -> SupportResult<Vec<Statement>> {
        Parser::parse_sql(&PostgreSqlDialect {}, sql)
            .map_err(|e| internal_err(format!("generated query failed to parse: {e}")))
    }

    fn analyze(
        &self,
        statement: Statement,
        _routine: &RoutineContext,
    ) -> SupportResult<Vec<Statement>> {
        // Name and collation binding happen at parse time in this grammar,
        // and rule-based rewriting is the identity, so analysis passes the
        // statement through unchanged. The caller still applies its
        // shape checks to the result.
        Ok(vec![statement])
    }
}
