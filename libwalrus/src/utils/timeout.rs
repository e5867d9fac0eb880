//! Timeout helpers used across the crate.
//!
//! Watchdog windows are per-device: the Chameleon Mini answers quickly, the
//! Proxmark3 may take many seconds for a clone or a tuning sweep.

use std::time::Duration;

/// How long a transport read blocks before the receive loop re-checks
/// cancellation and the watchdog deadline.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Silence window for the Chameleon Mini text protocol.
pub const LINE_WATCHDOG_MS: u64 = 3000;

/// Silence window for Proxmark3 round trips.
pub const FRAME_WATCHDOG_MS: u64 = 20_000;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
