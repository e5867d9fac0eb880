#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;

use libwalrus::card::operations::{
    CancelToken, ReadOperation, ReadRequest, WriteMode, WriteOrEmulateOperation, spawn_read,
};
use libwalrus::card::{CardData, HidCardData};
use libwalrus::device::{CardDevice, status};
use libwalrus::transport::MockTransport;
use libwalrus::Error;
use num_bigint::BigUint;

#[test]
fn operation_reports_busy_while_device_held() {
    let mock = MockTransport::new();
    let cm = common::mock_chameleon_mini(&mock);
    let read = ReadOperation::new(&cm, ReadRequest::Mifare { attempts: vec![] }).unwrap();

    let held = cm.device().try_acquire(status::TUNING).unwrap();
    let mut results: Vec<CardData> = Vec::new();
    assert!(matches!(read.execute(&CancelToken::new(), &mut results), Err(Error::DeviceBusy)));
    // the refused operation left the holder's status alone
    assert_eq!(cm.device().status(), "Tuning");
    drop(held);

    assert_eq!(cm.device().status(), "Idle");
    assert_eq!(mock.sent_count(), 0);
}

#[test]
fn write_on_read_only_family_is_unsupported() {
    let cm = common::mock_chameleon_mini(&MockTransport::new());
    let hid = CardData::from(HidCardData::new(BigUint::from(0x2004u32)));
    match WriteOrEmulateOperation::new(&cm, &hid, WriteMode::Write) {
        Err(Error::Unsupported(msg)) => assert!(msg.contains("Chameleon Mini")),
        Err(other) => panic!("expected Unsupported, got: {}", other),
        Ok(_) => panic!("expected Unsupported"),
    }
}

#[test]
fn concurrent_read_gets_busy() -> anyhow::Result<()> {
    common::init_logging();
    let mock = MockTransport::new();
    // hold the first read in its identify loop
    mock.push_lines(&["100:OK", "100:OK"]);
    let device: Arc<dyn CardDevice> = Arc::new(common::mock_chameleon_mini(&mock));

    let token = CancelToken::new();
    let (tx, _rx) = mpsc::channel::<CardData>();
    let first = spawn_read(device.clone(), ReadRequest::Mifare { attempts: vec![] }, token.clone(), tx)?;

    while device.status() != "Reading" {
        std::thread::sleep(Duration::from_millis(1));
    }
    let mut results: Vec<CardData> = Vec::new();
    let second = device.read_card_data(&ReadRequest::Mifare { attempts: vec![] }, &CancelToken::new(), &mut results);
    assert!(matches!(second, Err(Error::DeviceBusy)));

    token.cancel();
    first.join().map_err(|_| anyhow::anyhow!("read thread panicked"))??;
    assert_eq!(device.status(), "Idle");
    Ok(())
}
