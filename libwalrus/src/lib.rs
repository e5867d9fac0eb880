// libwalrus/src/lib.rs

//! libwalrus
//!
//! Pure Rust drivers for RFID reader-writers: the Chameleon Mini (text
//! protocol) and the Proxmark3 (binary command frames). Devices read HID
//! Prox and Mifare Classic cards, write HID Prox tags and emulate Mifare
//! cards, depending on what each family supports.

pub mod card;
pub mod constants;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
