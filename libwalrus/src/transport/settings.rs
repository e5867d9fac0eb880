// libwalrus/src/transport/settings.rs

use derive_more::Display;

use crate::constants::{SERIAL_BAUD_RATE, SERIAL_DATA_BITS, SERIAL_STOP_BITS};
use crate::utils::DEFAULT_POLL_INTERVAL_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    #[display(fmt = "N")]
    None,
    #[display(fmt = "O")]
    Odd,
    #[display(fmt = "E")]
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowControl {
    None,
    Software,
    Hardware,
}

/// Line parameters for the USB-serial link. Both supported device families
/// use 115200 8N1 without flow control.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialSettings {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: u8,
    pub flow_control: FlowControl,
    /// Port read timeout; bounds a single poll of the receive loop
    pub read_timeout_ms: u64,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: SERIAL_BAUD_RATE,
            data_bits: SERIAL_DATA_BITS,
            parity: Parity::None,
            stop_bits: SERIAL_STOP_BITS,
            flow_control: FlowControl::None,
            read_timeout_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl SerialSettings {
    /// Short form such as `115200 8N1`.
    pub fn summary(&self) -> String {
        format!(
            "{} {}{}{}",
            self.baud_rate, self.data_bits, self.parity, self.stop_bits
        )
    }
}
