//! Error definitions and utilities for the support-callback pipeline.

use thiserror::Error;

/// How the dispatcher must react to a [`SupportError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Expected, recoverable: report an advisory diagnostic and decline the
    /// rewrite, letting the call execute through the regular non-inlined
    /// path.
    Advisory,
    /// An internal invariant was violated; the enclosing statement must be
    /// aborted rather than planned against an inconsistent view.
    Fatal,
}

/// Everything that can go wrong while validating a support request or the
/// query generated for it.
///
/// The `function` carried by the advisory variants is the user-visible
/// function name, so diagnostics point at the call the user actually wrote.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupportError {
    /// The call site did not have the fixed six-argument form.
    #[error("{function} called with {actual} args but expected {expected}")]
    ArityMismatch {
        function: &'static str,
        expected: usize,
        actual: usize,
    },

    /// An argument is computed per row rather than fixed at plan time.
    #[error("{function} called with non-constant parameters")]
    NonConstantArgument { function: &'static str },

    /// An argument is constant, but of the wrong type for its position.
    #[error("{function} called with non-{expected} parameters")]
    WrongArgumentType {
        function: &'static str,
        expected: &'static str,
    },

    /// The generated text parsed or analyzed to more than one statement.
    /// Structurally impossible for the fixed templates, but checked anyway.
    #[error("{function} parsed to more than one statement")]
    MultiStatementResult { function: &'static str },

    /// Analysis produced something other than a query.
    #[error("{function} didn't analyze to a query")]
    NonQueryResult { function: &'static str },

    /// An internal invariant has been violated.
    ///
    /// This is produced by the [`internal!`] macro. It must **not** be used
    /// for conditions we expect to handle; declining is never the right
    /// response to this one.
    #[error("internal invariant violated: {0}")]
    Internal(String),
}

impl SupportError {
    pub fn severity(&self) -> Severity {
        match self {
            SupportError::Internal(_) => Severity::Fatal,
            SupportError::ArityMismatch { .. }
            | SupportError::NonConstantArgument { .. }
            | SupportError::WrongArgumentType { .. }
            | SupportError::MultiStatementResult { .. }
            | SupportError::NonQueryResult { .. } => Severity::Advisory,
        }
    }
}

/// Standard issue [`Result`] alias.
pub type SupportResult<T> = std::result::Result<T, SupportError>;

/// Make a new [`SupportError::Internal`] with the provided message.
pub fn internal_err<T: Into<String>>(err: T) -> SupportError {
    SupportError::Internal(err.into())
}

/// Renders information about the current source location, for use in
/// internal-invariant diagnostics. Expands to the empty string in release
/// builds.
#[macro_export]
#[doc(hidden)]
macro_rules! __location_info {
    () => {
        $crate::__location_info!(" (in {})")
    };
    ($fstr: literal) => {
        if cfg!(debug_assertions) {
            format!(
                $fstr,
                format!("{}:{}:{}", std::file!(), std::line!(), std::column!())
            )
        } else {
            "".to_owned()
        }
    };
}

/// Return a [`SupportError::Internal`] from the current function.
#[macro_export]
macro_rules! internal {
    () => {
        $crate::internal!("entered unreachable code")
    };
    ($($tt:tt)*) => {
        return Err($crate::error::internal_err(format!(
            "{}{}",
            $crate::__location_info!("in {}: "),
            format_args!($($tt)*)
        ))
        .into())
    };
}
