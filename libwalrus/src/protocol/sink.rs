// libwalrus/src/protocol/sink.rs

//! Response matching.
//!
//! A [`ReceiveSink`] is fed every decoded message of one receive call and
//! decides when the exchange is over. [`Watchdog`] bounds any sink by a
//! silence window: the deadline moves forward on every decoded message, so
//! a chatty device that has not answered yet never times out.

use std::time::{Duration, Instant};

use crate::Result;
use crate::protocol::Pm3Frame;

/// Outgoing half of a device connection, handed to sinks so they can issue
/// follow-up commands while a receive is in progress.
pub trait Link<M> {
    fn send(&mut self, frame: &M) -> Result<()>;

    /// Push the enclosing watchdog deadline a full window forward.
    /// No-op when no watchdog is involved.
    fn reset_watchdog(&mut self) {}
}

pub trait ReceiveSink<M> {
    type Output;

    /// Handle one decoded message. `Ok(Some(_))` ends the receive with that
    /// value, `Ok(None)` keeps waiting and `Err(_)` aborts it.
    fn on_received(&mut self, message: M, link: &mut dyn Link<M>) -> Result<Option<Self::Output>>;

    /// Polled between messages; `false` ends the receive with no result.
    fn wants_more(&self) -> bool {
        true
    }

    /// Instant after which the receive fails with `Error::Timeout`.
    fn deadline(&self) -> Option<Instant> {
        None
    }
}

impl<M, S: ReceiveSink<M> + ?Sized> ReceiveSink<M> for &mut S {
    type Output = S::Output;

    fn on_received(&mut self, message: M, link: &mut dyn Link<M>) -> Result<Option<S::Output>> {
        (**self).on_received(message, link)
    }

    fn wants_more(&self) -> bool {
        (**self).wants_more()
    }

    fn deadline(&self) -> Option<Instant> {
        (**self).deadline()
    }
}

/// Silence-bounded wrapper around another sink. The window starts when the
/// watchdog is built.
#[derive(Debug)]
pub struct Watchdog<S> {
    inner: S,
    timeout: Duration,
    deadline: Instant,
}

impl<S> Watchdog<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self {
            inner,
            timeout,
            deadline: Instant::now() + timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn reset(&mut self) {
        self.deadline = Instant::now() + self.timeout;
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<M, S: ReceiveSink<M>> ReceiveSink<M> for Watchdog<S> {
    type Output = S::Output;

    fn on_received(&mut self, message: M, link: &mut dyn Link<M>) -> Result<Option<S::Output>> {
        // any decoded message counts as activity, matching or not
        self.deadline = Instant::now() + self.timeout;

        let mut link = WatchdogLink {
            link,
            timeout: self.timeout,
            deadline: &mut self.deadline,
        };
        self.inner.on_received(message, &mut link)
    }

    fn wants_more(&self) -> bool {
        self.inner.wants_more()
    }

    fn deadline(&self) -> Option<Instant> {
        Some(match self.inner.deadline() {
            Some(inner) => inner.min(self.deadline),
            None => self.deadline,
        })
    }
}

struct WatchdogLink<'a, 'l, M> {
    link: &'a mut (dyn Link<M> + 'l),
    timeout: Duration,
    deadline: &'a mut Instant,
}

impl<M> Link<M> for WatchdogLink<'_, '_, M> {
    fn send(&mut self, frame: &M) -> Result<()> {
        self.link.send(frame)
    }

    fn reset_watchdog(&mut self) {
        *self.deadline = Instant::now() + self.timeout;
        self.link.reset_watchdog();
    }
}

/// Resolves with the first frame carrying `op`; everything else is skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandWaiter {
    op: u64,
}

impl CommandWaiter {
    pub fn new(op: u64) -> Self {
        Self { op }
    }

    /// Waiter bounded by a silence window.
    pub fn with_timeout(op: u64, timeout: Duration) -> Watchdog<Self> {
        Watchdog::new(Self::new(op), timeout)
    }

    pub fn op(&self) -> u64 {
        self.op
    }
}

impl ReceiveSink<Pm3Frame> for CommandWaiter {
    type Output = Pm3Frame;

    fn on_received(
        &mut self,
        message: Pm3Frame,
        _link: &mut dyn Link<Pm3Frame>,
    ) -> Result<Option<Pm3Frame>> {
        Ok((message.op() == self.op).then_some(message))
    }
}
