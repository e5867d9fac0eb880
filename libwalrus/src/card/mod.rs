// libwalrus/src/card/mod.rs

use std::fmt;

use derive_more::Display;

mod hid;
mod mifare;
pub mod operations;
pub mod read_attempt;

pub use hid::HidCardData;
pub use mifare::MifareCardData;
pub use read_attempt::{ReadAttempt, ReadAttemptKind, StaticKeyReadAttempt};

/// Card families a device can read, write or emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardKind {
    #[display(fmt = "HID")]
    Hid,
    #[display(fmt = "MIFARE")]
    Mifare,
}

/// Data read from (or to be written to) a proximity card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardData {
    Hid(HidCardData),
    Mifare(MifareCardData),
}

impl CardData {
    pub fn kind(&self) -> CardKind {
        match self {
            Self::Hid(_) => CardKind::Hid,
            Self::Mifare(_) => CardKind::Mifare,
        }
    }

    pub fn as_hid(&self) -> Option<&HidCardData> {
        match self {
            Self::Hid(hid) => Some(hid),
            _ => None,
        }
    }

    pub fn as_mifare(&self) -> Option<&MifareCardData> {
        match self {
            Self::Mifare(mifare) => Some(mifare),
            _ => None,
        }
    }
}

impl From<HidCardData> for CardData {
    fn from(hid: HidCardData) -> Self {
        Self::Hid(hid)
    }
}

impl From<MifareCardData> for CardData {
    fn from(mifare: MifareCardData) -> Self {
        Self::Mifare(mifare)
    }
}

impl fmt::Display for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hid(hid) => write!(f, "{}: {}", CardKind::Hid, hid),
            Self::Mifare(mifare) => write!(f, "{}: {}", CardKind::Mifare, mifare),
        }
    }
}
