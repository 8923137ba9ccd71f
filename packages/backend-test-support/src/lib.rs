//! Backend test support utilities
//!
//! Shared helpers for the gamehub test binaries: idempotent logging setup and
//! unique test data generation.

pub mod logging;
pub mod unique_helpers;
