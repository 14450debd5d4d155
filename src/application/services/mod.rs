//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on the `FipApi` boundary trait but are themselves
//! concrete structs, not traits.

mod fip;

pub use fip::FipService;
