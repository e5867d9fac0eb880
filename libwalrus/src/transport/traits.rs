// libwalrus/src/transport/traits.rs

use crate::Result;

/// Transport trait abstracts I/O away from protocol/device logic.
pub trait Transport: Send {
    /// Send raw bytes to the device
    fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive whatever bytes arrive within `timeout_ms`. An empty vector
    /// means the device stayed silent for the whole window; that is not an
    /// error at this level.
    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>>;

    /// Perform a transport-level reset (drop buffered bytes)
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data)
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        (**self).receive(timeout_ms)
    }

    fn reset(&mut self) -> Result<()> {
        (**self).reset()
    }
}
