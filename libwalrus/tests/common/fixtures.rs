// fixtures.rs: provides commonly used test payloads/frames

use libwalrus::card::{ReadAttempt, StaticKeyReadAttempt};
use libwalrus::protocol::{Pm3Frame, op};
use libwalrus::types::KeySlot;

/// Chameleon Mini conversation for one identified card.
pub const IDENTIFY_LINES: &[&str] = &[
    "100:OK",
    "100:OK",
    "101:OK WITH TEXT",
    "ATQA: 0004",
    "UID: 04aabbccdd",
    "SAK: 08",
];

pub const DEFAULT_KEY: &str = "FFFFFFFFFFFF";

/// Anticollision payload of a 4-byte UID card: uid[10], uid_len, atqa, sak,
/// ats_len, ats.
pub fn anticollision_payload() -> Vec<u8> {
    hex::decode("deadbeef00000000000004040008057577810280").unwrap()
}

pub fn anticollision_ack() -> Pm3Frame {
    Pm3Frame::with_data(op::ACK, [1, 0, 0], &anticollision_payload()).unwrap()
}

/// VERSION answer as real firmware sends it: chip id in arg0, version text
/// in the payload.
pub fn chip_version_ack() -> Pm3Frame {
    Pm3Frame::with_data(op::ACK, [0x2701_0300, 0, 0], b"bootrom: master/v4.0").unwrap()
}

pub fn no_tag_ack() -> Pm3Frame {
    Pm3Frame::with_args(op::ACK, [0, 0, 0])
}

/// Successful READSC answer with every byte set to `fill`.
pub fn sector_ack(fill: u8, len: usize) -> Pm3Frame {
    Pm3Frame::with_data(op::ACK, [1, 0, 0], &vec![fill; len]).unwrap()
}

pub fn refused_ack() -> Pm3Frame {
    Pm3Frame::with_args(op::ACK, [0, 0, 0])
}

pub fn static_key(sectors: &str, key: &str, slot: KeySlot) -> ReadAttempt {
    StaticKeyReadAttempt::parse(sectors, key, Some(slot))
        .unwrap()
        .into()
}
