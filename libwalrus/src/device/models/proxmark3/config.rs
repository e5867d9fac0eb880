//! Proxmark3 configuration

use crate::utils::FRAME_WATCHDOG_MS;

/// Text the firmware prints once a clone has been written
pub const CLONE_DONE_TEXT: &str = "DONE!";

/// Text the firmware prints when the HID demodulator exits
pub const HID_STOPPED_TEXT: &str = "Stopped";

/// Pattern of an HID identifier printed by the demodulator
pub const HID_TAG_ID_PATTERN: &str = r"TAG ID: ([0-9a-fA-F]+)";

/// Longest wait for the ACK to the VERSION sent after an HID read
pub const KEEP_ALIVE_WATCHDOG_MS: u64 = 2000;

/// Runtime settings for a Proxmark3.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proxmark3Config {
    /// Silence window before a round trip fails
    pub watchdog_ms: u64,
}

impl Default for Proxmark3Config {
    fn default() -> Self {
        Self {
            watchdog_ms: FRAME_WATCHDOG_MS,
        }
    }
}
