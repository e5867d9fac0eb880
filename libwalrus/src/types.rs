// libwalrus/src/types.rs

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use derive_more::Display;

use crate::Error;
use crate::constants::{
    MIFARE_BLOCK_LEN, MIFARE_FIRST_LARGE_SECTOR, MIFARE_KEY_LEN, MIFARE_MAX_SECTOR,
};

/// Mifare sector number in `0..=39`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "{}", _0)]
pub struct SectorNumber(u8);

impl SectorNumber {
    pub const MIN: Self = Self(0);
    pub const MAX: Self = Self(MIFARE_MAX_SECTOR);

    pub fn new(number: i32) -> Result<Self, Error> {
        if !(0..=MIFARE_MAX_SECTOR as i32).contains(&number) {
            return Err(Error::InvalidSectorNumber(number));
        }
        Ok(Self(number as u8))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Number of 16-byte blocks in this sector: 4 below sector 32, 16 from there on.
    pub fn block_count(&self) -> usize {
        if self.0 < MIFARE_FIRST_LARGE_SECTOR {
            4
        } else {
            16
        }
    }

    pub fn byte_len(&self) -> usize {
        self.block_count() * MIFARE_BLOCK_LEN
    }
}

impl TryFrom<i32> for SectorNumber {
    type Error = Error;

    fn try_from(number: i32) -> Result<Self, Self::Error> {
        Self::new(number)
    }
}

/// Raw sector content. Regular sectors are four 16-byte blocks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector(Vec<u8>);

impl Sector {
    /// Byte length of a regular (4-block) sector
    pub const LEN: usize = 4 * MIFARE_BLOCK_LEN;

    pub fn new(data: &[u8]) -> Result<Self, Error> {
        if data.len() != Self::LEN {
            return Err(Error::InvalidLength {
                expected: Self::LEN,
                actual: data.len(),
            });
        }
        Ok(Self(data.to_vec()))
    }

    /// Build a sector whose length matches the geometry of `number`, so
    /// large sectors (32 and up) carry all 16 blocks.
    pub fn for_sector(number: SectorNumber, data: &[u8]) -> Result<Self, Error> {
        let expected = number.byte_len();
        if data.len() != expected {
            return Err(Error::InvalidLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self(data.to_vec()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn blocks(&self) -> impl Iterator<Item = &[u8]> {
        self.0.chunks(MIFARE_BLOCK_LEN)
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper(&self.0)
    }
}

impl TryFrom<&[u8]> for Sector {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Mifare access key (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key([u8; MIFARE_KEY_LEN]);

impl Key {
    pub const fn from_bytes(bytes: [u8; MIFARE_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; MIFARE_KEY_LEN] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != MIFARE_KEY_LEN {
            return Err(Error::InvalidLength {
                expected: MIFARE_KEY_LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; MIFARE_KEY_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl FromStr for Key {
    type Err = Error;

    /// Parse 12 hex digits, either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != MIFARE_KEY_LEN * 2 || s.chars().any(char::is_whitespace) {
            return Err(Error::InvalidKey(s.to_string()));
        }
        let bytes = crate::utils::parse_hex(s).map_err(|_| Error::InvalidKey(s.to_string()))?;
        Key::try_from(&bytes[..])
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::bytes_to_hex_upper(&self.0))
    }
}

/// Mifare key register(s) to authenticate with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeySlot {
    #[display(fmt = "A")]
    A,
    #[display(fmt = "B")]
    B,
    #[display(fmt = "Both")]
    Both,
}

impl KeySlot {
    pub fn has_slot_a(self) -> bool {
        matches!(self, Self::A | Self::Both)
    }

    pub fn has_slot_b(self) -> bool {
        matches!(self, Self::B | Self::Both)
    }

    /// Combine individual slot selections; `None` when nothing is selected.
    pub fn from_flags(a: bool, b: bool) -> Option<Self> {
        match (a, b) {
            (true, true) => Some(Self::Both),
            (true, false) => Some(Self::A),
            (false, true) => Some(Self::B),
            (false, false) => None,
        }
    }

    /// Single slots to try, A before B.
    pub fn ordered_slots(self) -> &'static [KeySlot] {
        match self {
            Self::A => &[Self::A],
            Self::B => &[Self::B],
            Self::Both => &[Self::A, Self::B],
        }
    }

    /// Key type index on the wire: 0 for A, 1 otherwise.
    pub fn wire_index(self) -> u64 {
        match self {
            Self::A => 0,
            Self::B | Self::Both => 1,
        }
    }
}
