#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex};

use libwalrus::card::CardData;
use libwalrus::card::operations::{CancelToken, ReadRequest};
use libwalrus::device::CardDevice;
use libwalrus::protocol::{Pm3Frame, op};
use libwalrus::transport::MockTransport;
use libwalrus::types::{KeySlot, SectorNumber};
use libwalrus::Error;

/// VERSION is acknowledged and anticollision always finds the fixture card;
/// READSC answers are taken from `sectors` in order.
fn scripted_card(mock: &MockTransport, sectors: Vec<Pm3Frame>) -> Arc<Mutex<Vec<Pm3Frame>>> {
    let queue = Arc::new(Mutex::new(sectors));
    let replies = queue.clone();
    mock.set_responder(move |bytes| {
        let Ok(frame) = Pm3Frame::decode(bytes) else {
            return Vec::new();
        };
        match frame.op() {
            op::VERSION => vec![common::fixtures::chip_version_ack().encode()],
            op::READER_ISO_14443A => vec![common::fixtures::anticollision_ack().encode()],
            op::MIFARE_READSC => {
                let mut replies = replies.lock().unwrap();
                if replies.is_empty() {
                    vec![common::fixtures::refused_ack().encode()]
                } else {
                    vec![replies.remove(0).encode()]
                }
            }
            _ => Vec::new(),
        }
    });
    queue
}

#[test]
fn later_attempt_overwrites_shared_sector() -> anyhow::Result<()> {
    common::init_logging();
    let mock = MockTransport::new();
    let pm3 = common::mock_proxmark3(&mock)?;
    scripted_card(
        &mock,
        vec![
            common::fixtures::sector_ack(0x11, 64),
            common::fixtures::sector_ack(0x22, 64),
        ],
    );

    let request = ReadRequest::Mifare {
        attempts: vec![
            common::fixtures::static_key("6", "A0A1A2A3A4A5", KeySlot::A),
            common::fixtures::static_key("6", "B0B1B2B3B4B5", KeySlot::A),
        ],
    };
    let cards = common::read_first(&pm3, &request)?;

    let card = cards[0].as_mifare().ok_or_else(|| anyhow::anyhow!("not mifare"))?;
    let sector = card.sector(SectorNumber::new(6)?).ok_or_else(|| anyhow::anyhow!("no sector 6"))?;
    assert_eq!(sector.as_bytes(), &[0x22; 64][..]);
    assert_eq!(card.uid().to_str_radix(16), "deadbeef");
    Ok(())
}

#[test]
fn locked_sectors_leave_gaps() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let pm3 = common::mock_proxmark3(&mock)?;
    scripted_card(
        &mock,
        vec![
            common::fixtures::sector_ack(0x01, 64),
            common::fixtures::refused_ack(),
            common::fixtures::refused_ack(),
            common::fixtures::refused_ack(),
            common::fixtures::sector_ack(0x03, 64),
        ],
    );

    let request = ReadRequest::Mifare {
        attempts: vec![common::fixtures::static_key("0-2", common::fixtures::DEFAULT_KEY, KeySlot::Both)],
    };
    let cards = common::read_first(&pm3, &request)?;
    let sectors = cards[0].as_mifare().unwrap().sectors();

    // sector 0 opens with A, sector 1 with neither, sector 2 with B
    let numbers: Vec<u8> = sectors.keys().map(|n| n.number()).collect();
    assert_eq!(numbers, vec![0, 2]);
    assert_eq!(sectors[&SectorNumber::new(2)?].as_bytes()[0], 0x03);
    Ok(())
}

#[test]
fn hid_read_streams_and_stops() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let pm3 = common::mock_proxmark3(&mock)?;
    mock.push_frame(&common::debug_text("#db# TAG ID: 2006ec0c86 (6000) - Format Len: 26bit")?);
    mock.push_frame(&common::debug_text("Stopped")?);

    let mut cards: Vec<CardData> = Vec::new();
    pm3.read_card_data(&ReadRequest::Hid, &CancelToken::new(), &mut cards)?;
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].as_hid().unwrap().bit_length(), 38);
    Ok(())
}

#[test]
fn tune_times_out_without_answer() -> anyhow::Result<()> {
    let mock = MockTransport::new();
    let pm3 = common::mock_proxmark3(&mock)?;
    assert!(matches!(pm3.tune(true, true), Err(Error::Timeout)));
    assert!(!pm3.is_receiving());
    Ok(())
}

#[test]
fn mifare_read_after_hid_read_gets_its_own_replies() -> anyhow::Result<()> {
    common::init_logging();
    let mock = MockTransport::new();
    let pm3 = common::mock_proxmark3(&mock)?;
    scripted_card(&mock, vec![common::fixtures::sector_ack(0x44, 64)]);
    mock.push_frame(&common::debug_text("#db# TAG ID: 2006ec0c86 (6000) - Format Len: 26bit")?);
    mock.push_frame(&common::debug_text("Stopped")?);

    let mut hid: Vec<CardData> = Vec::new();
    pm3.read_card_data(&ReadRequest::Hid, &CancelToken::new(), &mut hid)?;
    assert_eq!(hid.len(), 1);

    let request = ReadRequest::Mifare {
        attempts: vec![common::fixtures::static_key("1", common::fixtures::DEFAULT_KEY, KeySlot::A)],
    };
    let cards = common::read_first(&pm3, &request)?;
    let card = cards[0].as_mifare().ok_or_else(|| anyhow::anyhow!("not mifare"))?;
    assert_eq!(card.uid().to_str_radix(16), "deadbeef");
    assert_eq!(card.sector(SectorNumber::new(1)?).map(|s| s.as_bytes()[0]), Some(0x44));
    Ok(())
}
