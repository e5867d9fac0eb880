// Shared helpers for integration tests. Each test crate includes this via
// `#[path = "../common/mod.rs"] mod common;`.
#![allow(dead_code)]

pub mod fixtures;
pub mod helpers;

pub use helpers::*;
