// libwalrus/src/card/operations/mod.rs

//! Read and write/emulate operations bound to one card device.
//!
//! Operations run to completion on the calling thread; [`spawn_read`] and
//! [`spawn_write_or_emulate`] move them onto a dedicated worker thread.
//! Cancellation is cooperative: drivers poll a [`ShouldContinue`] between
//! protocol steps, and a cancelled operation returns `Ok` with whatever
//! results it already delivered.

pub mod read;
pub mod write;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;

use derive_more::Display;

use crate::card::{CardData, CardKind, ReadAttempt};

pub use read::{ReadOperation, spawn_read};
pub use write::{WriteOrEmulateOperation, spawn_write_or_emulate};

#[cfg(feature = "async")]
pub use read::spawn_read_async;
#[cfg(feature = "async")]
pub use write::spawn_write_or_emulate_async;

/// Cooperative cancellation check, polled between protocol steps.
pub trait ShouldContinue: Send + Sync {
    fn should_continue(&self) -> bool;
}

impl<F> ShouldContinue for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn should_continue(&self) -> bool {
        self()
    }
}

/// Shared cancellation flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl ShouldContinue for CancelToken {
    fn should_continue(&self) -> bool {
        !self.is_cancelled()
    }
}

/// Receives card records as a read operation produces them.
pub trait ResultSink: Send {
    fn on_result(&mut self, data: CardData);
}

impl ResultSink for Vec<CardData> {
    fn on_result(&mut self, data: CardData) {
        self.push(data);
    }
}

impl ResultSink for Sender<CardData> {
    fn on_result(&mut self, data: CardData) {
        // a dropped receiver only means nobody is listening any more
        let _ = self.send(data);
    }
}

/// Adapts a closure into a [`ResultSink`].
pub struct FnResultSink<F>(pub F);

impl<F> ResultSink for FnResultSink<F>
where
    F: FnMut(CardData) + Send,
{
    fn on_result(&mut self, data: CardData) {
        (self.0)(data)
    }
}

/// What a read operation should look for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadRequest {
    Hid,
    Mifare { attempts: Vec<ReadAttempt> },
}

impl ReadRequest {
    pub fn card_kind(&self) -> CardKind {
        match self {
            Self::Hid => CardKind::Hid,
            Self::Mifare { .. } => CardKind::Mifare,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WriteMode {
    #[display(fmt = "write")]
    Write,
    #[display(fmt = "emulate")]
    Emulate,
}
