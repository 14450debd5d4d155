//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent invalid local input.
/// Everything semantic is validated by the remote service.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("bad format of filter (expected name=value): {filter}")]
    InvalidFilter { filter: String },
}
