// helpers.rs: logging setup and mock-device shortcuts

use libwalrus::card::CardData;
use libwalrus::card::operations::{CancelToken, FnResultSink, ReadRequest};
use libwalrus::device::CardDevice;
use libwalrus::Result;

pub use libwalrus::test_support::{
    debug_text, mock_chameleon_mini, mock_proxmark3, mock_with_lines, version_ack,
};

/// Route `log` output through env_logger; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run a read on `device` and stop it as soon as the first record arrives.
pub fn read_first(device: &dyn CardDevice, request: &ReadRequest) -> Result<Vec<CardData>> {
    let token = CancelToken::new();
    let stopper = token.clone();
    let mut cards = Vec::new();
    let mut sink = FnResultSink(|card: CardData| {
        cards.push(card);
        stopper.cancel();
    });
    device.read_card_data(request, &token, &mut sink)?;
    drop(sink);
    Ok(cards)
}
