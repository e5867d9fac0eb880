#[path = "../common/mod.rs"]
mod common;

use libwalrus::card::operations::{ReadRequest, WriteMode};
use libwalrus::card::{CardData, MifareCardData};
use libwalrus::device::CardDevice;
use libwalrus::transport::MockTransport;
use num_bigint::BigUint;

#[test]
fn identify_scenario_emits_one_card() -> anyhow::Result<()> {
    common::init_logging();
    let mock = common::mock_with_lines(common::fixtures::IDENTIFY_LINES);
    let cm = common::mock_chameleon_mini(&mock);

    let cards = common::read_first(&cm, &ReadRequest::Mifare { attempts: vec![] })?;
    assert_eq!(cards.len(), 1);

    let card = cards[0].as_mifare().ok_or_else(|| anyhow::anyhow!("not mifare"))?;
    assert_eq!(card.atqa(), 0x0400);
    assert_eq!(card.uid(), &BigUint::from(0x04aa_bbcc_ddu64));
    assert_eq!(card.sak(), 0x08);
    assert!(card.sectors().is_empty());
    Ok(())
}

#[test]
fn identify_loops_until_cancelled() {
    common::init_logging();
    let mock = MockTransport::new();
    mock.push_lines(common::fixtures::IDENTIFY_LINES);
    // second card, answered to the re-issued IDENTIFY
    mock.push_lines(&["101:OK WITH TEXT", "MF_CLASSIC_4K", "ATQA: 0200", "UID: 11223344", "SAK: 18"]);
    let cm = common::mock_chameleon_mini(&mock);

    let token = libwalrus::card::operations::CancelToken::new();
    let stopper = token.clone();
    let mut cards: Vec<CardData> = Vec::new();
    let mut sink = libwalrus::card::operations::FnResultSink(|card: CardData| {
        cards.push(card);
        if cards.len() == 2 {
            stopper.cancel();
        }
    });
    cm.read_card_data(&ReadRequest::Mifare { attempts: vec![] }, &token, &mut sink)
        .unwrap();
    drop(sink);

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[1].as_mifare().unwrap().atqa(), 0x0002);
    assert_eq!(cards[1].as_mifare().unwrap().sak(), 0x18);
    let identifies = mock.sent_lines().iter().filter(|l| *l == "IDENTIFY").count();
    assert_eq!(identifies, 2);
}

#[test]
fn emulate_loads_uid_into_slot() {
    let mock = common::mock_with_lines(&["100:OK", "100:OK", "100:OK"]);
    let cm = common::mock_chameleon_mini(&mock);
    let card = CardData::from(MifareCardData::new(0x0400, BigUint::from(0x04aa_bbcc_ddu64), 0x08, vec![]));

    cm.write_or_emulate(&card, WriteMode::Emulate, &|| true).unwrap();
    assert_eq!(
        mock.sent_lines(),
        vec!["CONFIG=MF_CLASSIC_1K", "SETTING=1", "UID=04aabbccdd"]
    );
}

#[test]
fn version_query() {
    let mock = common::mock_with_lines(&["101:OK WITH TEXT", "ChameleonMini RevG 190408"]);
    let cm = common::mock_chameleon_mini(&mock);
    assert_eq!(CardDevice::version(&cm).unwrap(), "ChameleonMini RevG 190408");
}

#[test]
fn version_after_cancelled_identify_ignores_late_lines() -> anyhow::Result<()> {
    let mock = common::mock_with_lines(common::fixtures::IDENTIFY_LINES);
    // the next card was already on its way when the read stopped
    mock.push_lines(&["101:OK WITH TEXT", "ATQA: 0004"]);
    let cm = common::mock_chameleon_mini(&mock);

    let cards = common::read_first(&cm, &ReadRequest::Mifare { attempts: vec![] })?;
    assert_eq!(cards.len(), 1);
    assert_eq!(mock.pending_responses(), 0);

    mock.push_lines(&["101:OK WITH TEXT", "ChameleonMini RevG 190408"]);
    assert_eq!(cm.version()?, "ChameleonMini RevG 190408");
    Ok(())
}
