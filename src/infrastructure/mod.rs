//! Infrastructure layer: remote API client and DI container
//!
//! This layer implements the I/O boundary trait and wires up services.

pub mod di;
pub mod error;
pub mod traits;

pub use error::{ApiError, ApiResult};
