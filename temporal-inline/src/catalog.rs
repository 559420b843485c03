//! Relation handles and the catalog capability the host injects.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque handle for a relation in the host catalog.
///
/// Call sites pass relations as compile-time constants of this type; the
/// handle is meaningless to this crate except as a key for catalog lookup.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RelationOid(pub u32);

impl fmt::Display for RelationOid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The raw (unquoted) names a relation handle resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableReference {
    /// The enclosing schema, if the relation lives in a named one.
    pub schema: Option<String>,
    /// The relation's own name.
    pub name: String,
}

impl TableReference {
    pub fn new(schema: Option<&str>, name: &str) -> Self {
        TableReference {
            schema: schema.map(String::from),
            name: name.into(),
        }
    }
}

/// Read-only catalog lookups, owned entirely by the host environment.
///
/// Lookups are transactionally-scoped reads; their consistency is the host's
/// concern. A handle that already passed the host's type checking is
/// expected to resolve, so callers treat a miss as an invariant violation,
/// not as user input to validate.
pub trait Catalog {
    /// Resolve a relation handle to its schema and table name.
    fn resolve_relation(&self, oid: RelationOid) -> Option<TableReference>;
}

impl<C: Catalog + ?Sized> Catalog for &C {
    fn resolve_relation(&self, oid: RelationOid) -> Option<TableReference> {
        (*self).resolve_relation(oid)
    }
}

/// An in-memory catalog; the form used by tests and embedders that already
/// hold their metadata resolved.
impl Catalog for HashMap<RelationOid, TableReference> {
    fn resolve_relation(&self, oid: RelationOid) -> Option<TableReference> {
        self.get(&oid).cloned()
    }
}
