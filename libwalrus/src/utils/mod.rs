//! Utilities for libwalrus: small, reusable helpers used across the crate.
//!
//! Hex rendering for card data, timeout constants and the sector range
//! notation (`"0-3,6"`) used when describing read attempts.

pub mod hex;
pub mod ranges;
pub mod timeout;

pub use hex::*;
pub use ranges::{format_ranges, parse_ranges};
pub use timeout::*;
