#![cfg(feature = "serial")]

#[path = "common.rs"]
mod common;

use std::time::{Duration, Instant};

use libwalrus::card::operations::{FnResultSink, ReadRequest};
use libwalrus::card::{CardData, StaticKeyReadAttempt};
use libwalrus::device::{DeviceBuilder, DeviceKind};
use libwalrus::{Error, KeySlot, Result};
use serial_test::serial;

// These tests need a Proxmark3 attached. Run manually with:
//
// cargo test -p libwalrus --test hardware --features serial -- --ignored

#[test]
#[ignore]
#[serial]
fn proxmark3_open_and_tune() -> Result<()> {
    let pm3 = match DeviceBuilder::new().kind(DeviceKind::Proxmark3).build_proxmark3() {
        Ok(pm3) => pm3,
        Err(Error::DeviceNotFound) => return Ok(()),
        Err(e) => return Err(e),
    };
    println!("firmware: {}", pm3.firmware());
    let tune = pm3.tune(true, true)?;
    assert!(tune.v125.is_some());
    assert!(tune.hf_voltage.is_some());
    Ok(())
}

#[test]
#[ignore]
#[serial]
fn proxmark3_read_mifare_with_default_key() -> Result<()> {
    let Some(device) = common::open_device(DeviceKind::Proxmark3)? else {
        return Ok(());
    };
    let attempt = StaticKeyReadAttempt::parse("0-15", "FFFFFFFFFFFF", Some(KeySlot::Both))?;
    let deadline = Instant::now() + Duration::from_secs(10);
    let mut sink = FnResultSink(|card: CardData| println!("{}", card));
    device.read_card_data(
        &ReadRequest::Mifare {
            attempts: vec![attempt.into()],
        },
        &|| Instant::now() < deadline,
        &mut sink,
    )?;
    Ok(())
}
