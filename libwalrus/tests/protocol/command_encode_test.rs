#[path = "../common/mod.rs"]
mod common;

use libwalrus::card::HidCardData;
use libwalrus::protocol::commands::proxmark3 as cmd;
use libwalrus::protocol::{LineCommand, op};
use libwalrus::types::{Key, KeySlot, SectorNumber};
use num_bigint::BigUint;

#[test]
fn line_commands_render() {
    assert_eq!(LineCommand::Version.to_line(), "VERSION?");
    assert_eq!(LineCommand::Config("ISO14443A_READER".into()).to_line(), "CONFIG=ISO14443A_READER");
    assert_eq!(LineCommand::Timeout(2).to_line(), "TIMEOUT=2");
    assert_eq!(LineCommand::Identify.to_line(), "IDENTIFY");
    assert_eq!(LineCommand::Setting(1).to_line(), "SETTING=1");
    // UID is zero-padded to at least 8 hex digits
    assert_eq!(LineCommand::Uid(BigUint::from(0xabcu32)).to_line(), "UID=00000abc");
    assert_eq!(
        LineCommand::Uid(BigUint::from(0x04aa_bbcc_ddu64)).to_line(),
        "UID=04aabbccdd"
    );
}

#[test]
fn hid_clone_format_flag_by_bit_length() {
    let long = HidCardData::new(BigUint::from(1u64) << 49u32);
    let short = HidCardData::new(BigUint::from(1u64) << 39u32);
    assert_eq!(cmd::hid_clone_tag(&long).unwrap().data()[0], 1);
    assert_eq!(cmd::hid_clone_tag(&short).unwrap().data()[0], 0);
}

#[test]
fn read_sector_carries_key_and_slot() {
    let key: Key = common::fixtures::DEFAULT_KEY.parse().unwrap();
    let frame = cmd::mifare_read_sector(SectorNumber::new(39).unwrap(), KeySlot::A, &key).unwrap();
    assert_eq!(frame.op(), op::MIFARE_READSC);
    assert_eq!(frame.args(), &[39, 0, 0]);
    assert_eq!(&frame.data()[..6], &[0xFF; 6]);
}

#[test]
fn encoded_frames_are_fixed_length() {
    for frame in [
        cmd::version(),
        cmd::hid_demod_fsk(),
        cmd::iso14a_connect(),
        cmd::measure_antenna_tuning(true, true).unwrap(),
    ] {
        assert_eq!(frame.encode().len(), 544);
    }
}
