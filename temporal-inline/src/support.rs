//! Support-callback dispatch: recognize the request kind, validate the call,
//! generate the replacement query and validate it, all or nothing.
//!
//! Each invocation is a pure function of its request plus read-only catalog
//! state; nothing is retained across calls. Soft validation failures emit an
//! advisory diagnostic and decline, so the host falls back to executing the
//! call through its regular, non-inlined path. Invariant violations
//! propagate as errors and abort the enclosing statement.

use itertools::Itertools;
use sqlparser::ast::{Query, Statement};
use tracing::{debug, trace, warn};

use crate::analyze::QueryAnalyzer;
use crate::args::extract_join_spec;
use crate::catalog::Catalog;
use crate::error::{Severity, SupportError, SupportResult};
use crate::request::{InlineInFromRequest, RoutineContext, SupportRequest};
use crate::sql_gen::{JoinKind, render_join_query};

/// User-visible name of the semijoin entry point, as used in diagnostics.
pub const TEMPORAL_SEMIJOIN: &str = "temporal_semijoin";
/// User-visible name of the antijoin entry point, as used in diagnostics.
pub const TEMPORAL_ANTIJOIN: &str = "temporal_antijoin";

/// The capabilities the host planner injects into a support callback for the
/// duration of one invocation.
pub trait PlannerContext {
    fn catalog(&self) -> &dyn Catalog;
    fn analyzer(&self) -> &dyn QueryAnalyzer;
}

impl<C: PlannerContext + ?Sized> PlannerContext for &C {
    fn catalog(&self) -> &dyn Catalog {
        (*self).catalog()
    }

    fn analyzer(&self) -> &dyn QueryAnalyzer {
        (*self).analyzer()
    }
}

/// A query that passed one-shot validation and may be spliced into the
/// calling plan. Ownership transfers to the caller on return; the pipeline
/// keeps nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedQuery {
    query: Box<Query>,
}

impl ValidatedQuery {
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn into_query(self) -> Box<Query> {
        self.query
    }
}

/// Support callback for `temporal_semijoin`.
///
/// On an inline-at-call-site request with six valid constant arguments,
/// returns the validated semijoin query for the planner to splice in; on any
/// soft validation failure returns `None`, leaving the call opaque.
pub fn temporal_semijoin_support(
    context: &impl PlannerContext,
    request: &SupportRequest,
) -> SupportResult<Option<ValidatedQuery>> {
    support_join_rewrite(context, request, JoinKind::Semi, TEMPORAL_SEMIJOIN)
}

/// Support callback for `temporal_antijoin`; see [`temporal_semijoin_support`].
pub fn temporal_antijoin_support(
    context: &impl PlannerContext,
    request: &SupportRequest,
) -> SupportResult<Option<ValidatedQuery>> {
    support_join_rewrite(context, request, JoinKind::Anti, TEMPORAL_ANTIJOIN)
}

/// Log the request and decline it.
///
/// Registering this in place of a real support callback forces the
/// non-inlined execution path, which is useful when comparing plans.
pub fn noop_support(request: &SupportRequest) -> Option<ValidatedQuery> {
    debug!(kind = request.kind(), "noop_support declining request");
    None
}

fn support_join_rewrite(
    context: &impl PlannerContext,
    request: &SupportRequest,
    kind: JoinKind,
    function: &'static str,
) -> SupportResult<Option<ValidatedQuery>> {
    // Inlining a FROM-clause call site is the only request this callback is
    // meaningful for; everything else declines without comment.
    let SupportRequest::InlineInFrom(inline) = request else {
        return Ok(None);
    };

    match try_inline(context, inline, kind, function) {
        Ok(query) => Ok(Some(query)),
        Err(error) => match error.severity() {
            Severity::Advisory => {
                warn!(function, %error, "declining to inline");
                Ok(None)
            }
            Severity::Fatal => Err(error),
        },
    }
}

fn try_inline(
    context: &impl PlannerContext,
    request: &InlineInFromRequest,
    kind: JoinKind,
    function: &'static str,
) -> SupportResult<ValidatedQuery> {
    let spec = extract_join_spec(&request.function, function, context.catalog())?;
    let sql = render_join_query(kind, &spec);
    trace!(function, sql = %sql, "generated replacement query");
    build_query(context.analyzer(), &sql, &request.routine, function)
}

/// Parse, analyze and rewrite the generated text, accepting the result only
/// if it is a single query-shaped statement.
fn build_query(
    analyzer: &dyn QueryAnalyzer,
    sql: &str,
    routine: &RoutineContext,
    function: &'static str,
) -> SupportResult<ValidatedQuery> {
    let Ok(statement) = analyzer.parse(sql)?.into_iter().exactly_one() else {
        return Err(SupportError::MultiStatementResult { function });
    };

    // Analysis runs under the wrapping call's parameter and collation
    // environment; unlike plain expression inlining, the rewrite step cannot
    // be skipped here.
    let Ok(statement) = analyzer
        .analyze(statement, routine)?
        .into_iter()
        .exactly_one()
    else {
        return Err(SupportError::MultiStatementResult { function });
    };

    match statement {
        Statement::Query(query) => Ok(ValidatedQuery { query }),
        _ => Err(SupportError::NonQueryResult { function }),
    }
}
