//! Validation and decoding of call-site arguments into a [`JoinSpec`].
//!
//! Both entry points take the same fixed six-argument layout: left table,
//! left id column, left valid-interval column, right table, right id column,
//! right valid-interval column. Tables arrive as constant relation handles
//! and are resolved through the catalog; columns arrive as constant text and
//! are never resolved dynamically. Extraction short-circuits on the first
//! failure.

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, TableReference};
use crate::error::{SupportError, SupportResult};
use crate::internal;
use crate::request::{ConstValue, FuncArg, FunctionCall};

/// An unqualified column name, taken verbatim from a text-literal argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnReference {
    pub name: String,
}

impl From<String> for ColumnReference {
    fn from(name: String) -> Self {
        ColumnReference { name }
    }
}

/// A fully validated semijoin/antijoin request: two resolved tables and the
/// two column roles on each side. Built once per invocation and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSpec {
    pub left: TableReference,
    pub left_id: ColumnReference,
    pub left_valid: ColumnReference,
    pub right: TableReference,
    pub right_id: ColumnReference,
    pub right_valid: ColumnReference,
}

/// Decode argument `index` as a constant relation reference and resolve it
/// through the catalog.
///
/// A resolution miss after the type check has passed is an invariant
/// violation, not a validation failure: the value was already accepted as a
/// relation reference by the host's type system.
pub(crate) fn extract_table_reference(
    call: &FunctionCall,
    index: usize,
    function: &'static str,
    catalog: &dyn Catalog,
) -> SupportResult<TableReference> {
    let Some(arg) = call.args.get(index) else {
        internal!("{function} argument {index} out of range");
    };
    let FuncArg::Constant(value) = arg else {
        return Err(SupportError::NonConstantArgument { function });
    };
    let ConstValue::Relation(oid) = value else {
        return Err(SupportError::WrongArgumentType {
            function,
            expected: "regclass",
        });
    };
    match catalog.resolve_relation(*oid) {
        Some(table) => Ok(table),
        None => internal!("cache lookup failed for relation {oid}"),
    }
}

/// Decode argument `index` as a constant text value.
pub(crate) fn extract_text_literal(
    call: &FunctionCall,
    index: usize,
    function: &'static str,
) -> SupportResult<String> {
    let Some(arg) = call.args.get(index) else {
        internal!("{function} argument {index} out of range");
    };
    let FuncArg::Constant(value) = arg else {
        return Err(SupportError::NonConstantArgument { function });
    };
    let ConstValue::Text(text) = value else {
        return Err(SupportError::WrongArgumentType {
            function,
            expected: "text",
        });
    };
    Ok(text.clone())
}

/// Validate arity and decode all six arguments, in call order.
pub(crate) fn extract_join_spec(
    call: &FunctionCall,
    function: &'static str,
    catalog: &dyn Catalog,
) -> SupportResult<JoinSpec> {
    if call.args.len() != 6 {
        return Err(SupportError::ArityMismatch {
            function,
            expected: 6,
            actual: call.args.len(),
        });
    }

    Ok(JoinSpec {
        left: extract_table_reference(call, 0, function, catalog)?,
        left_id: extract_text_literal(call, 1, function)?.into(),
        left_valid: extract_text_literal(call, 2, function)?.into(),
        right: extract_table_reference(call, 3, function, catalog)?,
        right_id: extract_text_literal(call, 4, function)?.into(),
        right_valid: extract_text_literal(call, 5, function)?.into(),
    })
}
