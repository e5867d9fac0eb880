// libwalrus/src/error.rs

use thiserror::Error;

/// Common error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("device not found")]
    DeviceNotFound,

    #[error("device busy")]
    DeviceBusy,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // serialport is only pulled in when talking to real hardware
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid sector number: {0}")]
    InvalidSectorNumber(i32),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("read attempt needs at least one sector")]
    EmptySectorSet,

    #[error("read attempt has no key")]
    MissingKey,

    #[error("read attempt has no key slot")]
    MissingKeySlot,

    #[error("command {command} failed: device answered \"{response}\"")]
    CommandError { command: String, response: String },

    #[error("unexpected response: expected op {expected:#06x}, got {actual:#06x}")]
    UnexpectedResponse { expected: u64, actual: u64 },

    #[error("malformed field: {0}")]
    MalformedField(String),

    #[error("operation timed out")]
    Timeout,

    #[error("unsupported operation: {0}")]
    Unsupported(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn command(command: impl Into<String>, response: impl Into<String>) -> Self {
        Self::CommandError {
            command: command.into(),
            response: response.into(),
        }
    }
}
