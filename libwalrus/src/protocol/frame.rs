// libwalrus/src/protocol/frame.rs

use std::fmt;

use crate::constants::{PM3_ARG_COUNT, PM3_DATA_LEN, PM3_FRAME_LEN};
use crate::{Error, Result};

use super::codec::latin1_to_string;

/// Proxmark3 command record.
/// Format: [op(u64)] [arg0(u64)] [arg1(u64)] [arg2(u64)] [data(512)]
/// All integers are little-endian.
#[derive(Clone, PartialEq, Eq)]
pub struct Pm3Frame {
    op: u64,
    args: [u64; PM3_ARG_COUNT],
    data: [u8; PM3_DATA_LEN],
}

impl Pm3Frame {
    pub fn new(op: u64) -> Self {
        Self::with_args(op, [0; PM3_ARG_COUNT])
    }

    pub fn with_args(op: u64, args: [u64; PM3_ARG_COUNT]) -> Self {
        Self {
            op,
            args,
            data: [0; PM3_DATA_LEN],
        }
    }

    /// Build a frame whose payload starts with `data`; the rest is zeroed.
    pub fn with_data(op: u64, args: [u64; PM3_ARG_COUNT], data: &[u8]) -> Result<Self> {
        if data.len() > PM3_DATA_LEN {
            return Err(Error::InvalidLength {
                expected: PM3_DATA_LEN,
                actual: data.len(),
            });
        }
        let mut frame = Self::with_args(op, args);
        frame.data[..data.len()].copy_from_slice(data);
        Ok(frame)
    }

    pub fn op(&self) -> u64 {
        self.op
    }

    pub fn args(&self) -> &[u64; PM3_ARG_COUNT] {
        &self.args
    }

    pub fn arg(&self, index: usize) -> u64 {
        self.args.get(index).copied().unwrap_or(0)
    }

    pub fn data(&self) -> &[u8; PM3_DATA_LEN] {
        &self.data
    }

    /// Payload as firmware text: Latin-1 up to the first NUL.
    pub fn data_as_string(&self) -> String {
        let end = self
            .data
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(self.data.len());
        latin1_to_string(&self.data[..end])
    }

    /// Encode into exactly `PM3_FRAME_LEN` bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(PM3_FRAME_LEN);
        out.extend_from_slice(&self.op.to_le_bytes());
        for arg in &self.args {
            out.extend_from_slice(&arg.to_le_bytes());
        }
        out.extend_from_slice(&self.data);
        out
    }

    /// Decode exactly one frame.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != PM3_FRAME_LEN {
            return Err(Error::InvalidLength {
                expected: PM3_FRAME_LEN,
                actual: bytes.len(),
            });
        }

        let word = |i: usize| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            u64::from_le_bytes(raw)
        };

        let mut data = [0u8; PM3_DATA_LEN];
        data.copy_from_slice(&bytes[8 + PM3_ARG_COUNT * 8..]);

        Ok(Self {
            op: word(0),
            args: [word(1), word(2), word(3)],
            data,
        })
    }
}

impl fmt::Debug for Pm3Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // trailing zero padding is noise
        let used = self
            .data
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        f.debug_struct("Pm3Frame")
            .field("op", &format_args!("{:#06x}", self.op))
            .field("args", &self.args)
            .field("data", &crate::utils::bytes_to_hex_spaced(&self.data[..used]))
            .finish()
    }
}
