use std::fmt;

use num_bigint::BigUint;

use crate::constants::HID_SHORT_FORMAT_BITS;

/// HID Prox identifier. The bit length decides the clone frame format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HidCardData {
    data: BigUint,
}

impl HidCardData {
    pub fn new(data: BigUint) -> Self {
        Self { data }
    }

    /// Parse the hex form printed by the reader firmware (`TAG ID: 2004...`).
    pub fn from_hex(s: &str) -> Option<Self> {
        BigUint::parse_bytes(s.trim().as_bytes(), 16).map(Self::new)
    }

    pub fn data(&self) -> &BigUint {
        &self.data
    }

    pub fn bit_length(&self) -> u64 {
        self.data.bits()
    }

    /// Identifiers over 44 bits need the long clone format.
    pub fn is_long_format(&self) -> bool {
        self.bit_length() > HID_SHORT_FORMAT_BITS
    }
}

impl fmt::Display for HidCardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self.data)
    }
}
