// libwalrus/src/protocol/responses/anticollision.rs

use num_bigint::BigUint;

use crate::card::MifareCardData;
use crate::protocol::{Pm3Frame, op};
use crate::protocol::parser::{byte_at, le_u16_at, slice_at};
use crate::{Error, Result};

const UID_BUF_LEN: usize = 10;

/// ISO14443-A select result carried in an ACK payload.
/// Layout (little-endian): [uid(10)] [uid_len(1)] [atqa(2)] [sak(1)] [ats_len(1)] [ats(n)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnticollisionInfo {
    pub uid: Vec<u8>,
    pub atqa: u16,
    pub sak: u8,
    pub ats: Vec<u8>,
}

impl AnticollisionInfo {
    /// `None` when the reader reported no tag in the field (`arg0 == 0`).
    /// Only an `ACK` carries a select result.
    pub fn from_frame(frame: &Pm3Frame) -> Result<Option<Self>> {
        if frame.op() != op::ACK {
            return Err(Error::UnexpectedResponse {
                expected: op::ACK,
                actual: frame.op(),
            });
        }
        if frame.arg(0) == 0 {
            return Ok(None);
        }
        Self::parse(frame.data()).map(Some)
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let uid_len = byte_at(data, UID_BUF_LEN)? as usize;
        if uid_len > UID_BUF_LEN {
            return Err(Error::MalformedField(format!(
                "uid length {} exceeds {}",
                uid_len, UID_BUF_LEN
            )));
        }
        let uid = slice_at(data, 0, uid_len)?.to_vec();
        let atqa = le_u16_at(data, UID_BUF_LEN + 1)?;
        let sak = byte_at(data, UID_BUF_LEN + 3)?;
        let ats_len = byte_at(data, UID_BUF_LEN + 4)? as usize;
        let ats = slice_at(data, UID_BUF_LEN + 5, ats_len)?.to_vec();

        Ok(Self {
            uid,
            atqa,
            sak,
            ats,
        })
    }

    /// UID bytes are read big-endian as an unsigned integer.
    pub fn uid_value(&self) -> BigUint {
        BigUint::from_bytes_be(&self.uid)
    }

    pub fn into_card_data(self) -> MifareCardData {
        let uid = self.uid_value();
        MifareCardData::new(self.atqa, uid, self.sak, self.ats)
    }
}
