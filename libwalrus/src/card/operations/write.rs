// libwalrus/src/card/operations/write.rs

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::{ShouldContinue, WriteMode};
use crate::card::CardData;
use crate::device::CardDevice;
use crate::{Error, Result};

const WRITE_THREAD_NAME: &str = "libwalrus-write";

fn check_write(device: &dyn CardDevice, card: &CardData, mode: WriteMode) -> Result<()> {
    let descriptor = device.descriptor();
    if !descriptor.supports(mode, card.kind()) {
        warn!("{} cannot {} {} cards", descriptor.name, mode, card.kind());
        return Err(Error::Unsupported(format!(
            "{} cannot {} {} cards",
            descriptor.name,
            mode,
            card.kind()
        )));
    }
    Ok(())
}

/// Write or emulate one card record on one device.
pub struct WriteOrEmulateOperation<'a> {
    device: &'a dyn CardDevice,
    card: &'a CardData,
    mode: WriteMode,
}

impl<'a> WriteOrEmulateOperation<'a> {
    /// Fails with `Unsupported` when the device cannot handle `card` in `mode`.
    pub fn new(device: &'a dyn CardDevice, card: &'a CardData, mode: WriteMode) -> Result<Self> {
        check_write(device, card, mode)?;
        Ok(Self { device, card, mode })
    }

    pub fn device(&self) -> &'a dyn CardDevice {
        self.device
    }

    pub fn card(&self) -> &'a CardData {
        self.card
    }

    pub fn mode(&self) -> WriteMode {
        self.mode
    }

    pub fn execute(&self, should_continue: &dyn ShouldContinue) -> Result<()> {
        debug!("{}: {} {}", self.device.kind(), self.mode, self.card);
        self.device
            .write_or_emulate(self.card, self.mode, should_continue)
    }
}

pub fn spawn_write_or_emulate<S>(
    device: Arc<dyn CardDevice>,
    card: CardData,
    mode: WriteMode,
    should_continue: S,
) -> Result<JoinHandle<Result<()>>>
where
    S: ShouldContinue + 'static,
{
    check_write(device.as_ref(), &card, mode)?;

    let handle = thread::Builder::new()
        .name(WRITE_THREAD_NAME.to_string())
        .spawn(move || {
            WriteOrEmulateOperation::new(device.as_ref(), &card, mode)?.execute(&should_continue)
        })?;
    Ok(handle)
}

#[cfg(feature = "async")]
pub async fn spawn_write_or_emulate_async<S>(
    device: Arc<dyn CardDevice>,
    card: CardData,
    mode: WriteMode,
    should_continue: S,
) -> Result<()>
where
    S: ShouldContinue + 'static,
{
    check_write(device.as_ref(), &card, mode)?;

    tokio::task::spawn_blocking(move || {
        WriteOrEmulateOperation::new(device.as_ref(), &card, mode)?.execute(&should_continue)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
