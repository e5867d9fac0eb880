// libwalrus/src/card/operations/read.rs

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, warn};

use super::{ReadRequest, ResultSink, ShouldContinue};
use crate::device::CardDevice;
use crate::{Error, Result};

const READ_THREAD_NAME: &str = "libwalrus-read";

fn check_read(device: &dyn CardDevice, request: &ReadRequest) -> Result<()> {
    let descriptor = device.descriptor();
    let kind = request.card_kind();
    if !descriptor.supports_read(kind) {
        warn!("{} cannot read {} cards", descriptor.name, kind);
        return Err(Error::Unsupported(format!(
            "{} cannot read {} cards",
            descriptor.name, kind
        )));
    }
    Ok(())
}

/// A read bound to one device. Construction fails with `Unsupported` when
/// the device cannot read the requested card kind.
pub struct ReadOperation<'d> {
    device: &'d dyn CardDevice,
    request: ReadRequest,
}

impl<'d> ReadOperation<'d> {
    pub fn new(device: &'d dyn CardDevice, request: ReadRequest) -> Result<Self> {
        check_read(device, &request)?;
        Ok(Self { device, request })
    }

    pub fn device(&self) -> &'d dyn CardDevice {
        self.device
    }

    pub fn request(&self) -> &ReadRequest {
        &self.request
    }

    /// Run the read on the calling thread. Records go to `results` as they
    /// are produced; returns once the device is done or `should_continue`
    /// turns false.
    pub fn execute(&self, should_continue: &dyn ShouldContinue, results: &mut dyn ResultSink) -> Result<()> {
        debug!("{}: read {}", self.device.kind(), self.request.card_kind());
        self.device
            .read_card_data(&self.request, should_continue, results)
    }
}

/// Run a read on a dedicated thread. The capability check happens before
/// the thread starts; the handle yields `results` back once the read ends.
pub fn spawn_read<S, R>(
    device: Arc<dyn CardDevice>,
    request: ReadRequest,
    should_continue: S,
    mut results: R,
) -> Result<JoinHandle<Result<R>>>
where
    S: ShouldContinue + 'static,
    R: ResultSink + 'static,
{
    check_read(device.as_ref(), &request)?;

    let handle = thread::Builder::new()
        .name(READ_THREAD_NAME.to_string())
        .spawn(move || {
            ReadOperation::new(device.as_ref(), request)?.execute(&should_continue, &mut results)?;
            Ok(results)
        })?;
    Ok(handle)
}

/// [`spawn_read`] for tokio callers; the blocking read runs on the blocking
/// thread pool.
#[cfg(feature = "async")]
pub async fn spawn_read_async<S, R>(
    device: Arc<dyn CardDevice>,
    request: ReadRequest,
    should_continue: S,
    mut results: R,
) -> Result<R>
where
    S: ShouldContinue + 'static,
    R: ResultSink + 'static,
{
    check_read(device.as_ref(), &request)?;

    tokio::task::spawn_blocking(move || {
        ReadOperation::new(device.as_ref(), request)?.execute(&should_continue, &mut results)?;
        Ok(results)
    })
    .await
    .map_err(|e| Error::Io(std::io::Error::other(e)))?
}
