//! Planner support for rewriting temporal semijoin and antijoin calls into
//! plain relational queries the host planner can inline.
//!
//! A call like
//!
//! ```sql
//! SELECT * FROM temporal_semijoin('shifts', 'employee_id', 'valid_at',
//!                                 'assignments', 'employee_id', 'valid_at');
//! ```
//!
//! names two tables, their row-identifier columns and their valid-time
//! interval columns. Executed as an opaque procedure, such a call is a black
//! box to the optimizer. This crate implements the support callbacks that
//! rewrite the call at planning time into an equivalent query built from
//! interval aggregation and set operations, so the optimizer can plan it
//! jointly with the rest of the statement.
//!
//! The pipeline for one invocation: recognize the request kind, validate and
//! decode the six constant arguments into a [`JoinSpec`], pick a
//! collision-free alias for the synthetic aggregate subquery, render the
//! query text ([`render_join_query`]), then parse and analyze that text
//! through the host's services and hand back a [`ValidatedQuery`] — or
//! decline, in which case the call simply executes through its regular
//! non-inlined path. A generated query is either fully accepted or fully
//! rejected; nothing partial ever escapes.
//!
//! Host services (catalog lookup, parse/analyze) are injected through the
//! [`PlannerContext`] capabilities, which keeps the pipeline synchronous,
//! stateless and testable in isolation.

mod alias;
mod args;
pub mod analyze;
pub mod catalog;
pub mod error;
pub mod quoting;
pub mod request;
pub mod sql_gen;
pub mod support;

pub use crate::analyze::{QueryAnalyzer, SqlAnalyzer};
pub use crate::args::{ColumnReference, JoinSpec};
pub use crate::catalog::{Catalog, RelationOid, TableReference};
pub use crate::error::{Severity, SupportError, SupportResult};
pub use crate::quoting::{
    QuotedIdentifier, quote_identifier, quote_qualified_identifier, quoted_len_bound,
};
pub use crate::request::{
    ConstValue, FuncArg, FunctionCall, InlineInFromRequest, RoutineContext, SimplifyRequest,
    SupportRequest,
};
pub use crate::sql_gen::{JoinKind, render_join_query};
pub use crate::support::{
    PlannerContext, TEMPORAL_ANTIJOIN, TEMPORAL_SEMIJOIN, ValidatedQuery, noop_support,
    temporal_antijoin_support, temporal_semijoin_support,
};
