//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the selection grammar or of the
/// node invariants. Positions are byte offsets into the parsed text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("param name [{0}] must be a valid alphanumeric word")]
    InvalidName(String),

    #[error("nesting depth {depth} exceeds limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("unexpected character {ch:?} at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("'(' at position {position} does not follow a param name")]
    MisplacedOpen { position: usize },

    #[error("empty param at position {position}")]
    EmptyParam { position: usize },

    #[error("missing ',' before param at position {position}")]
    MissingSeparator { position: usize },

    #[error("unbalanced ')' at position {position}")]
    UnbalancedClose { position: usize },

    #[error("group '{name}' opened at position {open} is never closed")]
    UnclosedGroup { name: String, open: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
