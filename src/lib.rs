//! Floating IP management: allocate, release, associate and list floating IPs
//! through the remote API.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
