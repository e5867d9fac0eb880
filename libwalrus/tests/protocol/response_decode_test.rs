#[path = "../common/mod.rs"]
mod common;

use libwalrus::protocol::parser::{hex_value, hex_value_as, split_field};
use libwalrus::protocol::{AnticollisionInfo, LineStatus, Pm3Frame, TuneResult, op};
use libwalrus::Error;
use num_bigint::BigUint;

#[test]
fn anticollision_payload_decodes() -> anyhow::Result<()> {
    let info = AnticollisionInfo::from_frame(&common::fixtures::anticollision_ack())?
        .ok_or_else(|| anyhow::anyhow!("expected a tag"))?;
    assert_eq!(info.uid, vec![0xde, 0xad, 0xbe, 0xef]);
    assert_eq!(info.atqa, 0x0004);
    assert_eq!(info.sak, 0x08);
    assert_eq!(info.ats, hex::decode("7577810280")?);

    let card = info.into_card_data();
    assert_eq!(card.uid(), &BigUint::from(0xdead_beefu32));
    assert!(card.max_sector().is_none());
    Ok(())
}

#[test]
fn no_tag_is_not_an_error() {
    let info = AnticollisionInfo::from_frame(&common::fixtures::no_tag_ack()).unwrap();
    assert!(info.is_none());
}

#[test]
fn status_lines() {
    assert_eq!(LineStatus::parse("100:OK"), Some(LineStatus::Ok));
    assert_eq!(LineStatus::parse("101:OK WITH TEXT"), Some(LineStatus::OkWithText));
    assert_eq!(LineStatus::parse("203:TIMEOUT"), Some(LineStatus::Timeout));
    assert_eq!(LineStatus::parse("202:INVALID PARAMETER"), None);
}

#[test]
fn key_value_fields() {
    assert_eq!(split_field("UID: 04aabbccdd").unwrap(), ("UID", "04aabbccdd"));
    assert_eq!(hex_value("UID:04 aa bb").unwrap(), BigUint::from(0x04aabbu32));
    assert_eq!(hex_value_as::<u8>("SAK: 08").unwrap(), 8);
    assert!(matches!(hex_value("no separator"), Err(Error::MalformedField(_))));
    assert!(matches!(hex_value_as::<u8>("SAK: 1ff"), Err(Error::MalformedField(_))));
}

#[test]
fn tune_bands_are_independent() {
    let frame = Pm3Frame::with_args(op::MEASURED_ANTENNA_TUNING, [0, 31_000, 0]);
    let hf_only = TuneResult::from_frame(&frame, false, true);
    assert!(hf_only.lf_voltages.is_none());
    assert!(hf_only.v125.is_none());
    assert!((hf_only.hf_voltage.unwrap() - 31.0).abs() < 1e-4);
}
