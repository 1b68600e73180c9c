//! Shared test tooling: mesh oracles and build fixtures.

pub mod helpers;
pub mod oracle;

pub use helpers::*;
pub use oracle::*;
