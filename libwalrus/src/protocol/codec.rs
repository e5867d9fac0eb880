// libwalrus/src/protocol/codec.rs

use std::fmt;

use crate::constants::{LINE_DELIMITER, PM3_FRAME_LEN};
use crate::{Error, Result};

use super::Pm3Frame;

/// Splits a growing receive buffer into protocol messages and serializes
/// outgoing ones. Implementations are pure functions over the buffer; they
/// never block.
pub trait FrameCodec: Send {
    type Frame: fmt::Debug;

    /// Decode the next complete message from the front of `buf`.
    ///
    /// Returns the message and the number of bytes it consumed, or `None`
    /// when `buf` only holds a partial message.
    fn decode(&self, buf: &[u8]) -> Result<Option<(Self::Frame, usize)>>;

    /// Serialize a message into its wire form.
    fn encode(&self, frame: &Self::Frame) -> Result<Vec<u8>>;
}

/// Delimiter-terminated text lines in ISO-8859-1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCodec {
    delimiter: Vec<u8>,
}

impl LineCodec {
    pub fn new(delimiter: &str) -> Self {
        Self {
            delimiter: delimiter.as_bytes().to_vec(),
        }
    }

    pub fn delimiter(&self) -> &[u8] {
        &self.delimiter
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new(LINE_DELIMITER)
    }
}

impl FrameCodec for LineCodec {
    type Frame = String;

    fn decode(&self, buf: &[u8]) -> Result<Option<(String, usize)>> {
        if self.delimiter.is_empty() {
            return Err(Error::InvalidArgument("empty line delimiter".into()));
        }

        let end = buf
            .windows(self.delimiter.len())
            .position(|w| w == self.delimiter.as_slice());

        Ok(end.map(|end| {
            (
                latin1_to_string(&buf[..end]),
                end + self.delimiter.len(),
            )
        }))
    }

    fn encode(&self, frame: &String) -> Result<Vec<u8>> {
        let mut out = string_to_latin1(frame)?;
        out.extend_from_slice(&self.delimiter);
        Ok(out)
    }
}

/// Constant-length Proxmark3 command records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedFrameCodec;

impl FixedFrameCodec {
    pub const FRAME_LEN: usize = PM3_FRAME_LEN;
}

impl FrameCodec for FixedFrameCodec {
    type Frame = Pm3Frame;

    fn decode(&self, buf: &[u8]) -> Result<Option<(Pm3Frame, usize)>> {
        if buf.len() < Self::FRAME_LEN {
            return Ok(None);
        }
        let frame = Pm3Frame::decode(&buf[..Self::FRAME_LEN])?;
        Ok(Some((frame, Self::FRAME_LEN)))
    }

    fn encode(&self, frame: &Pm3Frame) -> Result<Vec<u8>> {
        Ok(frame.encode())
    }
}

/// ISO-8859-1 maps every byte to the code point of the same value.
pub fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn string_to_latin1(s: &str) -> Result<Vec<u8>> {
    s.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                Error::InvalidArgument(format!("character {:?} is not ISO-8859-1", c))
            })
        })
        .collect()
}
