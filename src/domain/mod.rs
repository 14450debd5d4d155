//! Domain layer: filter expressions and release bookkeeping
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod filters;

pub use entities::{ReleaseFailure, ReleaseReport};
pub use error::DomainError;
pub use filters::FilterArgs;
