use crate::Atom;
use thiserror::Error;

/// Errors raised by assign operations.
///
/// These all indicate a mistake in the calling component, not a transient condition: they are
/// returned to the caller as-is and never retried or recovered from inside the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssignError {
    /// `update` was called on a key that was never assigned.
    #[error("cannot update `{key}`: no such assign")]
    MissingAssign { key: Atom },
    /// A callable was supplied with a parameter count the call site does not accept.
    #[error("callable takes {found} argument(s), expected {expected}")]
    Arity { expected: &'static str, found: usize },
    /// Attribute projection was given something other than a map of assigns.
    #[error("expected a map of assigns, got {found}")]
    InvalidAssigns { found: &'static str },
}
