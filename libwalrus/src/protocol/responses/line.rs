// libwalrus/src/protocol/responses/line.rs

use crate::constants::{LINE_OK, LINE_OK_WITH_TEXT, LINE_TIMEOUT};
use crate::protocol::LineCommand;
use crate::{Error, Result};

/// Chameleon Mini status lines the drivers act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStatus {
    /// `100:OK`
    Ok,
    /// `101:OK WITH TEXT`; the text follows on the next line(s)
    OkWithText,
    /// `203:TIMEOUT`; nothing answered within the device-side timeout
    Timeout,
}

impl LineStatus {
    pub fn parse(line: &str) -> Option<Self> {
        match line {
            LINE_OK => Some(Self::Ok),
            LINE_OK_WITH_TEXT => Some(Self::OkWithText),
            LINE_TIMEOUT => Some(Self::Timeout),
            _ => None,
        }
    }

    /// Numeric code prefix of a status line, e.g. 100 for `100:OK`.
    pub fn code(line: &str) -> Option<u16> {
        let (code, _) = line.split_once(':')?;
        if code.len() != 3 {
            return None;
        }
        code.parse().ok()
    }
}

/// Require `line` to be exactly `expected`, else a command error naming
/// `command`.
pub fn expect_status(line: &str, expected: LineStatus, command: &LineCommand) -> Result<()> {
    if LineStatus::parse(line) == Some(expected) {
        Ok(())
    } else {
        Err(Error::command(command.name(), line))
    }
}
