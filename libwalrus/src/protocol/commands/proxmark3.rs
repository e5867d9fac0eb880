// libwalrus/src/protocol/commands/proxmark3.rs

use num_bigint::BigUint;

use crate::card::HidCardData;
use crate::protocol::Pm3Frame;
use crate::types::{Key, KeySlot, SectorNumber};
use crate::{Error, Result};

/// Proxmark3 firmware op codes.
pub mod op {
    pub const ACK: u64 = 0x00FF;
    pub const DEBUG_PRINT_STRING: u64 = 0x0100;
    pub const VERSION: u64 = 0x0107;
    pub const HID_DEMOD_FSK: u64 = 0x020B;
    pub const HID_CLONE_TAG: u64 = 0x0210;
    pub const READER_ISO_14443A: u64 = 0x0385;
    pub const MEASURE_ANTENNA_TUNING: u64 = 0x0400;
    pub const MEASURED_ANTENNA_TUNING: u64 = 0x0410;
    pub const MIFARE_READSC: u64 = 0x0621;
}

/// `READER_ISO_14443A` arg0 flag: select a card and report its anticollision data.
pub const ISO14A_CONNECT: u64 = 1;

/// `MEASURE_ANTENNA_TUNING` arg0 flags.
pub const TUNE_FLAG_LF: u64 = 1;
pub const TUNE_FLAG_HF: u64 = 2;

pub fn version() -> Pm3Frame {
    Pm3Frame::new(op::VERSION)
}

/// At least one band must be selected.
pub fn measure_antenna_tuning(lf: bool, hf: bool) -> Result<Pm3Frame> {
    let mut flags = 0;
    if lf {
        flags |= TUNE_FLAG_LF;
    }
    if hf {
        flags |= TUNE_FLAG_HF;
    }
    if flags == 0 {
        return Err(Error::InvalidArgument("must tune LF or HF".into()));
    }
    Ok(Pm3Frame::with_args(op::MEASURE_ANTENNA_TUNING, [flags, 0, 0]))
}

pub fn hid_demod_fsk() -> Pm3Frame {
    Pm3Frame::new(op::HID_DEMOD_FSK)
}

/// Clone an HID identifier onto a T55x7 tag. The identifier is split into
/// 32-bit words (bits 64.., 32..64, 0..32); the payload flag selects the
/// long format for identifiers over 44 bits.
pub fn hid_clone_tag(card: &HidCardData) -> Result<Pm3Frame> {
    let word = |shift: u32| -> u64 {
        let shifted: BigUint = card.data() >> shift;
        shifted.iter_u64_digits().next().unwrap_or(0) & 0xFFFF_FFFF
    };
    let long_format = u8::from(card.is_long_format());

    Pm3Frame::with_data(
        op::HID_CLONE_TAG,
        [word(64), word(32), word(0)],
        &[long_format],
    )
}

pub fn iso14a_connect() -> Pm3Frame {
    Pm3Frame::with_args(op::READER_ISO_14443A, [ISO14A_CONNECT, 0, 0])
}

/// `slot` must be a single slot; `Both` is sent as B.
pub fn mifare_read_sector(sector: SectorNumber, slot: KeySlot, key: &Key) -> Result<Pm3Frame> {
    Pm3Frame::with_data(
        op::MIFARE_READSC,
        [u64::from(sector.number()), slot.wire_index(), 0],
        key.as_bytes(),
    )
}
