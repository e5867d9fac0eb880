// libwalrus/src/constants.rs
//! Common protocol constants used across the crate

/// Line terminator used by the Chameleon Mini text protocol
pub const LINE_DELIMITER: &str = "\r\n";

/// Chameleon Mini status lines
pub const LINE_OK: &str = "100:OK";
pub const LINE_OK_WITH_TEXT: &str = "101:OK WITH TEXT";
pub const LINE_TIMEOUT: &str = "203:TIMEOUT";

/// Proxmark3 "UsbCommand" frame layout: op(8) + args(3 * 8) + data(512).
/// All integers are little-endian.
pub const PM3_ARG_COUNT: usize = 3;
pub const PM3_DATA_LEN: usize = 512;
pub const PM3_FRAME_LEN: usize = 8 + PM3_ARG_COUNT * 8 + PM3_DATA_LEN;

/// Mifare Classic geometry
pub const MIFARE_BLOCK_LEN: usize = 16;
pub const MIFARE_KEY_LEN: usize = 6;
pub const MIFARE_MAX_SECTOR: u8 = 39;
/// Sectors from this number on hold 16 blocks instead of 4
pub const MIFARE_FIRST_LARGE_SECTOR: u8 = 32;

/// HID identifiers longer than this many bits use the long clone format
pub const HID_SHORT_FORMAT_BITS: u64 = 44;

/// Serial line parameters shared by both device families
pub const SERIAL_BAUD_RATE: u32 = 115_200;
pub const SERIAL_DATA_BITS: u8 = 8;
pub const SERIAL_STOP_BITS: u8 = 1;
