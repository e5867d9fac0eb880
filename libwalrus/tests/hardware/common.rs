#![cfg(feature = "serial")]

//! Helpers for tests against attached readers. Opening a kind that is not
//! plugged in yields `Ok(None)` so the tests pass on machines without one.

use std::sync::Arc;

use libwalrus::device::{CardDevice, DeviceBuilder, DeviceKind};
use libwalrus::{Error, Result};

/// Open the first attached reader of `kind`, or the port named by
/// `LIBWALRUS_PORT` when set.
pub fn open_device(kind: DeviceKind) -> Result<Option<Arc<dyn CardDevice>>> {
    let mut builder = DeviceBuilder::new().kind(kind);
    if let Ok(port) = std::env::var("LIBWALRUS_PORT") {
        builder = builder.port(port);
    }
    match builder.build() {
        Ok(device) => Ok(Some(device)),
        Err(Error::DeviceNotFound) => Ok(None),
        Err(e) => Err(e),
    }
}
