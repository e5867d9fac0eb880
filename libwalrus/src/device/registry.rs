// libwalrus/src/device/registry.rs

//! Static table of supported device families.
//!
//! Each family has one [`DeviceDescriptor`] with its USB identifiers, the
//! card kinds it can read, write and emulate, and a constructor that wraps
//! an open transport in the matching driver.

use std::sync::Arc;

use derive_more::Display;

use crate::card::operations::WriteMode;
use crate::card::{CardKind, ReadAttemptKind};
use crate::device::models::{CardDevice, ChameleonMini, Proxmark3};
use crate::transport::Transport;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceKind {
    #[display(fmt = "Chameleon Mini")]
    ChameleonMini,
    #[display(fmt = "Proxmark3")]
    Proxmark3,
}

/// USB vendor/product pair of a USB-serial bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UsbId {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl UsbId {
    pub const fn new(vendor_id: u16, product_id: u16) -> Self {
        Self {
            vendor_id,
            product_id,
        }
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }
}

/// Wraps an open transport in the driver for one device family.
pub type OpenFn = fn(Box<dyn Transport>) -> Result<Arc<dyn CardDevice>>;

pub struct DeviceDescriptor {
    pub kind: DeviceKind,
    pub name: &'static str,
    pub usb_ids: &'static [UsbId],
    pub supports_read: &'static [CardKind],
    pub supports_write: &'static [CardKind],
    pub supports_emulate: &'static [CardKind],
    pub open: OpenFn,
}

impl DeviceDescriptor {
    pub fn supports_read(&self, kind: CardKind) -> bool {
        self.supports_read.contains(&kind)
    }

    pub fn supports(&self, mode: WriteMode, kind: CardKind) -> bool {
        match mode {
            WriteMode::Write => self.supports_write.contains(&kind),
            WriteMode::Emulate => self.supports_emulate.contains(&kind),
        }
    }

    pub fn matches_usb(&self, vendor_id: u16, product_id: u16) -> bool {
        self.usb_ids.iter().any(|id| id.matches(vendor_id, product_id))
    }

    /// Open this family's driver on `transport`.
    pub fn open(&self, transport: Box<dyn Transport>) -> Result<Arc<dyn CardDevice>> {
        (self.open)(transport)
    }
}

impl std::fmt::Debug for DeviceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceDescriptor")
            .field("kind", &self.kind)
            .field("usb_ids", &self.usb_ids)
            .field("supports_read", &self.supports_read)
            .field("supports_write", &self.supports_write)
            .field("supports_emulate", &self.supports_emulate)
            .finish_non_exhaustive()
    }
}

pub static CHAMELEON_MINI: DeviceDescriptor = DeviceDescriptor {
    kind: DeviceKind::ChameleonMini,
    name: "Chameleon Mini",
    usb_ids: &[UsbId::new(0x16d0, 0x04b2)],
    supports_read: &[CardKind::Mifare],
    supports_write: &[],
    supports_emulate: &[CardKind::Mifare],
    open: ChameleonMini::open,
};

pub static PROXMARK3: DeviceDescriptor = DeviceDescriptor {
    kind: DeviceKind::Proxmark3,
    name: "Proxmark3",
    usb_ids: &[
        UsbId::new(0x2d2d, 0x504d),
        UsbId::new(0x9ac4, 0x4b8f),
        UsbId::new(0x502d, 0x502d),
    ],
    supports_read: &[CardKind::Hid, CardKind::Mifare],
    supports_write: &[CardKind::Hid],
    supports_emulate: &[],
    open: Proxmark3::open,
};

pub static DEVICES: &[&DeviceDescriptor] = &[&CHAMELEON_MINI, &PROXMARK3];

pub fn descriptor(kind: DeviceKind) -> &'static DeviceDescriptor {
    match kind {
        DeviceKind::ChameleonMini => &CHAMELEON_MINI,
        DeviceKind::Proxmark3 => &PROXMARK3,
    }
}

pub fn find_by_usb_id(vendor_id: u16, product_id: u16) -> Option<&'static DeviceDescriptor> {
    DEVICES
        .iter()
        .copied()
        .find(|d| d.matches_usb(vendor_id, product_id))
}

/// Display metadata for a card kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardKindDescriptor {
    pub kind: CardKind,
    pub name: &'static str,
}

pub static CARD_KINDS: &[CardKindDescriptor] = &[
    CardKindDescriptor {
        kind: CardKind::Hid,
        name: "HID Prox",
    },
    CardKindDescriptor {
        kind: CardKind::Mifare,
        name: "MIFARE Classic",
    },
];

pub fn card_kind_descriptor(kind: CardKind) -> &'static CardKindDescriptor {
    match kind {
        CardKind::Hid => &CARD_KINDS[0],
        CardKind::Mifare => &CARD_KINDS[1],
    }
}

/// Display metadata for a read attempt strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadAttemptDescriptor {
    pub kind: ReadAttemptKind,
    pub label: &'static str,
}

pub static READ_ATTEMPTS: &[ReadAttemptDescriptor] = &[ReadAttemptDescriptor {
    kind: ReadAttemptKind::StaticKey,
    label: "Static key",
}];

pub fn read_attempt_descriptor(kind: ReadAttemptKind) -> &'static ReadAttemptDescriptor {
    match kind {
        ReadAttemptKind::StaticKey => &READ_ATTEMPTS[0],
    }
}
