// libwalrus/src/device/handle.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError, RwLock, TryLockError};
use std::time::Instant;

use log::{debug, trace, warn};

use crate::protocol::{FrameCodec, Link, ReceiveSink};
use crate::transport::Transport;
use crate::utils::DEFAULT_POLL_INTERVAL_MS;
use crate::{Error, Result};

/// Upper bound on transport reads while draining stale input.
const MAX_DRAIN_READS: usize = 64;

/// Human-readable device status strings.
pub mod status {
    pub const IDLE: &str = "Idle";
    pub const OPENING: &str = "Opening";
    pub const READING: &str = "Reading";
    pub const WRITING: &str = "Writing";
    pub const EMULATING: &str = "Emulating";
    pub const TUNING: &str = "Tuning";
    pub const GETTING_VERSION: &str = "Getting version";
}

/// Everything guarded by the exclusive-access lock.
struct DeviceIo<C: FrameCodec> {
    transport: Box<dyn Transport>,
    codec: C,
    buffer: Vec<u8>,
}

impl<C: FrameCodec> Link<C::Frame> for DeviceIo<C> {
    fn send(&mut self, frame: &C::Frame) -> Result<()> {
        trace!("send {:?}", frame);
        let bytes = self.codec.encode(frame)?;
        self.transport.send(&bytes)
    }
}

/// A transport paired with the codec that frames its byte stream.
///
/// Access is single-flight: the I/O state sits behind a mutex that is only
/// ever taken with `try_lock`, so it acts as a one-permit lock that reports
/// "busy" instead of queueing.
pub struct Device<C: FrameCodec> {
    io: Mutex<DeviceIo<C>>,
    status: RwLock<String>,
    receiving: AtomicBool,
    poll_interval_ms: u64,
}

impl<C: FrameCodec> Device<C> {
    pub fn new(transport: Box<dyn Transport>, codec: C) -> Self {
        Self {
            io: Mutex::new(DeviceIo {
                transport,
                codec,
                buffer: Vec::new(),
            }),
            status: RwLock::new(status::IDLE.to_string()),
            receiving: AtomicBool::new(false),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// How long one transport read may block before the receive loop
    /// re-checks cancellation and its deadline.
    pub fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms.max(1);
        self
    }

    pub fn status(&self) -> String {
        self.status
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_status(&self, text: &str) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        status.clear();
        status.push_str(text);
    }

    /// True while a `receive` call is in progress.
    pub fn is_receiving(&self) -> bool {
        self.receiving.load(Ordering::SeqCst)
    }

    /// Take exclusive access without waiting. On success the status is set
    /// to `status`; when the device is already in use nothing changes and
    /// `None` is returned.
    pub fn try_acquire(&self, status: &str) -> Option<DeviceSession<'_, C>> {
        let io = match self.io.try_lock() {
            Ok(io) => io,
            // the guarded state is a byte buffer and a transport; both stay usable
            Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(TryLockError::WouldBlock) => {
                debug!("device busy, refused {:?}", status);
                return None;
            }
        };

        self.set_status(status);
        debug!("device acquired: {}", status);
        Some(DeviceSession { device: self, io })
    }

    /// Like [`try_acquire`](Self::try_acquire) but reports a busy device as
    /// `Error::DeviceBusy`.
    pub fn acquire(&self, status: &str) -> Result<DeviceSession<'_, C>> {
        self.try_acquire(status).ok_or_else(|| {
            warn!("device busy");
            Error::DeviceBusy
        })
    }
}

/// Exclusive access to a [`Device`]. Dropping the session restores the idle
/// status and releases the device, on every exit path.
pub struct DeviceSession<'d, C: FrameCodec> {
    device: &'d Device<C>,
    io: MutexGuard<'d, DeviceIo<C>>,
}

impl<C: FrameCodec> DeviceSession<'_, C> {
    pub fn device(&self) -> &Device<C> {
        self.device
    }

    pub fn set_status(&self, text: &str) {
        self.device.set_status(text);
    }

    pub fn send(&mut self, frame: &C::Frame) -> Result<()> {
        Link::send(&mut *self.io, frame)
    }

    /// Feed decoded frames to `sink` until it yields a value (`Ok(Some)`),
    /// stops wanting more (`Ok(None)`), its deadline passes
    /// (`Err(Timeout)`) or the transport fails.
    ///
    /// Unless the sink yielded, whatever is still buffered or pending on the
    /// transport is discarded before returning: those are replies to a
    /// request nobody waits for anymore.
    pub fn receive<S>(&mut self, sink: S) -> Result<Option<S::Output>>
    where
        S: ReceiveSink<C::Frame>,
    {
        let outcome = self.receive_frames(sink);
        if !matches!(outcome, Ok(Some(_))) {
            if let Err(e) = self.reset() {
                debug!("could not discard pending input: {}", e);
            }
        }
        outcome
    }

    fn receive_frames<S>(&mut self, mut sink: S) -> Result<Option<S::Output>>
    where
        S: ReceiveSink<C::Frame>,
    {
        let _receiving = ReceivingScope::enter(&self.device.receiving);
        let poll_interval_ms = self.device.poll_interval_ms;
        let io = &mut *self.io;

        loop {
            while let Some((frame, used)) = io.codec.decode(&io.buffer)? {
                io.buffer.drain(..used);
                trace!("recv {:?}", frame);

                if let Some(output) = sink.on_received(frame, io)? {
                    return Ok(Some(output));
                }
                if !sink.wants_more() {
                    debug!("receive stopped by sink");
                    return Ok(None);
                }
            }

            if !sink.wants_more() {
                debug!("receive stopped by sink");
                return Ok(None);
            }

            let wait_ms = match sink.deadline() {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        warn!("receive timed out");
                        return Err(Error::Timeout);
                    }
                    let left = deadline.duration_since(now).as_millis() as u64 + 1;
                    left.min(poll_interval_ms)
                }
                None => poll_interval_ms,
            };

            let chunk = io.transport.receive(wait_ms)?;
            #[cfg(feature = "diagnostics")]
            if !chunk.is_empty() {
                trace!("raw rx [{}]", crate::utils::bytes_to_hex_spaced(&chunk));
            }
            io.buffer.extend_from_slice(&chunk);
        }
    }

    pub fn send_then_receive<S>(&mut self, frame: &C::Frame, sink: S) -> Result<Option<S::Output>>
    where
        S: ReceiveSink<C::Frame>,
    {
        self.send(frame)?;
        self.receive(sink)
    }

    /// Drop buffered bytes, reset the transport and drain what it still
    /// holds, so the next request only sees its own replies.
    pub fn reset(&mut self) -> Result<()> {
        let io = &mut *self.io;
        let mut discarded = io.buffer.len();
        io.buffer.clear();
        io.transport.reset()?;

        for _ in 0..MAX_DRAIN_READS {
            let chunk = io.transport.receive(0)?;
            if chunk.is_empty() {
                break;
            }
            discarded += chunk.len();
        }
        if discarded > 0 {
            debug!("discarded {} stale bytes", discarded);
        }
        Ok(())
    }
}

impl<C: FrameCodec> Drop for DeviceSession<'_, C> {
    fn drop(&mut self) {
        self.io.buffer.clear();
        self.device.set_status(status::IDLE);
        debug!("device released");
    }
}

struct ReceivingScope<'a>(&'a AtomicBool);

impl<'a> ReceivingScope<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ReceivingScope<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
