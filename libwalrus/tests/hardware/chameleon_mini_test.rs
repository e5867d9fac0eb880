#![cfg(feature = "serial")]

#[path = "common.rs"]
mod common;

use std::time::{Duration, Instant};

use libwalrus::card::CardData;
use libwalrus::card::operations::{FnResultSink, ReadRequest};
use libwalrus::device::DeviceKind;
use libwalrus::Result;
use serial_test::serial;

// These tests need a Chameleon Mini attached. They are `#[ignore]`d so CI
// skips them. Run manually with:
//
// cargo test -p libwalrus --test hardware --features serial -- --ignored

#[test]
#[ignore]
#[serial]
fn chameleon_reports_version() -> Result<()> {
    let Some(device) = common::open_device(DeviceKind::ChameleonMini)? else {
        return Ok(());
    };
    let version = device.version()?;
    assert!(!version.is_empty());
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn chameleon_identify_for_a_few_seconds() -> Result<()> {
    let Some(device) = common::open_device(DeviceKind::ChameleonMini)? else {
        return Ok(());
    };
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = 0usize;
    let mut sink = FnResultSink(|card: CardData| {
        println!("{}", card);
        seen += 1;
    });
    device.read_card_data(
        &ReadRequest::Mifare { attempts: vec![] },
        &|| Instant::now() < deadline,
        &mut sink,
    )?;
    drop(sink);
    println!("{} card(s) identified", seen);
    Ok(())
}
