//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockTransport setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::device::{ChameleonMini, ChameleonMiniConfig, Device, Proxmark3, Proxmark3Config};
use crate::protocol::{FixedFrameCodec, LineCodec, Pm3Frame, op};
use crate::transport::MockTransport;
use crate::Result;

/// Poll interval used by mock-backed devices so tests react quickly to
/// cancellation.
pub const TEST_POLL_INTERVAL_MS: u64 = 5;

/// Silence window used by mock-backed devices.
pub const TEST_WATCHDOG_MS: u64 = 300;

/// Build a MockTransport pre-seeded with the given text lines.
#[doc(hidden)]
pub fn mock_with_lines(lines: &[&str]) -> MockTransport {
    let mock = MockTransport::new();
    mock.push_lines(lines);
    mock
}

/// Chameleon Mini on a clone of `mock`, with short timeouts.
#[doc(hidden)]
pub fn mock_chameleon_mini(mock: &MockTransport) -> ChameleonMini {
    let device = Device::new(Box::new(mock.clone()), LineCodec::default())
        .with_poll_interval(TEST_POLL_INTERVAL_MS);
    ChameleonMini::from_device(
        device,
        ChameleonMiniConfig {
            watchdog_ms: TEST_WATCHDOG_MS,
            ..ChameleonMiniConfig::default()
        },
    )
}

/// ACK frame carrying `text`, as sent in reply to VERSION.
#[doc(hidden)]
pub fn version_ack(text: &str) -> Result<Pm3Frame> {
    Pm3Frame::with_data(op::ACK, [0; 3], text.as_bytes())
}

/// `DEBUG_PRINT_STRING` frame carrying `text`.
#[doc(hidden)]
pub fn debug_text(text: &str) -> Result<Pm3Frame> {
    Pm3Frame::with_data(
        op::DEBUG_PRINT_STRING,
        [text.len() as u64, 0, 0],
        text.as_bytes(),
    )
}

/// Proxmark3 on a clone of `mock`, with short timeouts. The VERSION
/// handshake is answered before the device is opened.
#[doc(hidden)]
pub fn mock_proxmark3(mock: &MockTransport) -> Result<Proxmark3> {
    mock.push_frame(&version_ack("mock firmware")?);
    let device =
        Device::new(Box::new(mock.clone()), FixedFrameCodec).with_poll_interval(TEST_POLL_INTERVAL_MS);
    Proxmark3::from_device(
        device,
        Proxmark3Config {
            watchdog_ms: TEST_WATCHDOG_MS,
        },
    )
}
