//! Chameleon Mini configuration

use crate::utils::LINE_WATCHDOG_MS;

/// Reader mode selected before identifying cards
pub const READER_MODE: &str = "ISO14443A_READER";

/// Emulation mode used when cloning a Mifare card into a slot
pub const EMULATION_MODE: &str = "MF_CLASSIC_1K";

/// Device-side IDENTIFY timeout (seconds)
pub const IDENTIFY_TIMEOUT_SECS: u32 = 2;

/// Slot loaded with the emulated card
pub const DEFAULT_EMULATION_SLOT: u8 = 1;

/// Runtime settings for a Chameleon Mini.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChameleonMiniConfig {
    pub reader_mode: String,
    pub emulation_mode: String,
    pub identify_timeout_secs: u32,
    pub emulation_slot: u8,
    /// Silence window before a round trip fails
    pub watchdog_ms: u64,
}

impl Default for ChameleonMiniConfig {
    fn default() -> Self {
        Self {
            reader_mode: READER_MODE.to_string(),
            emulation_mode: EMULATION_MODE.to_string(),
            identify_timeout_secs: IDENTIFY_TIMEOUT_SECS,
            emulation_slot: DEFAULT_EMULATION_SLOT,
            watchdog_ms: LINE_WATCHDOG_MS,
        }
    }
}
