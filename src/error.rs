//! Error handling for LZW decoding
//!
//! This module re-exports the error type used throughout the crate. It uses
//! thiserror and carries enough context (code, position, bit counts) to report
//! where a malformed stream went wrong.

pub use crate::common::LzwError;
pub use crate::common::Result;
