//! The support-request protocol between the host planner and a callback.
//!
//! The planner hands a callback one of several request kinds; a callback
//! pattern-matches and acts only on the kinds it understands, returning "no
//! opinion" for everything else. No open-ended type inspection is involved:
//! the set of kinds is closed by the [`SupportRequest`] union.

use serde::{Deserialize, Serialize};

use crate::catalog::RelationOid;

/// A constant (plan-time) argument value at the supported call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstValue {
    /// A catalog-resolvable relation reference.
    Relation(RelationOid),
    /// A text literal.
    Text(String),
    /// A constant of some other type, named for diagnostics.
    Other { type_name: String },
}

/// One argument of the call expression the planner wants an opinion about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuncArg {
    /// A compile-time-constant value.
    Constant(ConstValue),
    /// Anything computed per row at execution time.
    NonConstant,
}

/// The resolved function-call expression at the call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<FuncArg>,
}

/// The parameter/collation environment of the wrapping call, under which
/// generated text is analyzed as if it were the body of a SQL-language
/// routine. Future parameterization of the generated text then resolves
/// under the same binding rules as the call itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineContext {
    /// The user-visible function being rewritten.
    pub function_name: String,
    /// The collation assigned to the call's inputs, if any.
    pub input_collation: Option<String>,
}

/// A request to replace a set-returning call in a `FROM` clause with an
/// equivalent query the planner can splice into the surrounding plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineInFromRequest {
    pub function: FunctionCall,
    pub routine: RoutineContext,
}

/// A request to replace a call expression with a simpler equivalent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyRequest {
    pub function: FunctionCall,
}

/// Everything the planner may ask a support callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportRequest {
    /// Inline a set-returning call at its `FROM`-clause call site.
    InlineInFrom(InlineInFromRequest),
    /// Simplify a call expression in place.
    Simplify(SimplifyRequest),
}

impl SupportRequest {
    /// The request kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            SupportRequest::InlineInFrom(_) => "inline-in-from",
            SupportRequest::Simplify(_) => "simplify",
        }
    }
}
