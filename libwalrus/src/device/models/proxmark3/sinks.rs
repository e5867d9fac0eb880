// libwalrus/src/device/models/proxmark3/sinks.rs

use std::time::Instant;

use log::{debug, info, warn};
use regex::Regex;

use super::config::{CLONE_DONE_TEXT, HID_STOPPED_TEXT, HID_TAG_ID_PATTERN};
use crate::card::operations::{ResultSink, ShouldContinue};
use crate::card::{CardData, HidCardData};
use crate::protocol::{Link, Pm3Frame, ReceiveSink, op};
use crate::{Error, Result};

/// Firmware text output, if `frame` is a `DEBUG_PRINT_STRING`.
fn debug_text(frame: &Pm3Frame) -> Option<String> {
    (frame.op() == op::DEBUG_PRINT_STRING).then(|| frame.data_as_string())
}

/// Ends the receive without a result once the caller cancels.
pub(super) struct Interruptible<'a, S> {
    inner: S,
    should_continue: &'a dyn ShouldContinue,
}

impl<'a, S> Interruptible<'a, S> {
    pub(super) fn new(inner: S, should_continue: &'a dyn ShouldContinue) -> Self {
        Self {
            inner,
            should_continue,
        }
    }
}

impl<M, S: ReceiveSink<M>> ReceiveSink<M> for Interruptible<'_, S> {
    type Output = S::Output;

    fn on_received(&mut self, message: M, link: &mut dyn Link<M>) -> Result<Option<S::Output>> {
        self.inner.on_received(message, link)
    }

    fn wants_more(&self) -> bool {
        self.should_continue.should_continue() && self.inner.wants_more()
    }

    fn deadline(&self) -> Option<Instant> {
        self.inner.deadline()
    }
}

/// Streams HID identifiers printed by the FSK demodulator until it reports
/// that it stopped.
pub(super) struct HidDemodSink<'a> {
    tag_id: Regex,
    results: &'a mut dyn ResultSink,
}

impl<'a> HidDemodSink<'a> {
    pub(super) fn new(results: &'a mut dyn ResultSink) -> Result<Self> {
        let tag_id = Regex::new(HID_TAG_ID_PATTERN)
            .map_err(|e| Error::InvalidArgument(format!("tag id pattern: {}", e)))?;
        Ok(Self { tag_id, results })
    }
}

impl ReceiveSink<Pm3Frame> for HidDemodSink<'_> {
    type Output = ();

    fn on_received(&mut self, frame: Pm3Frame, _link: &mut dyn Link<Pm3Frame>) -> Result<Option<()>> {
        let Some(text) = debug_text(&frame) else {
            return Ok(None);
        };

        if text.trim() == HID_STOPPED_TEXT {
            debug!("HID demodulator stopped");
            return Ok(Some(()));
        }

        if let Some(caps) = self.tag_id.captures(&text) {
            match HidCardData::from_hex(&caps[1]) {
                Some(card) => {
                    info!("read HID {}", card);
                    self.results.on_result(CardData::Hid(card));
                }
                None => warn!("unparsable tag id: {}", text),
            }
        }
        Ok(None)
    }
}

/// Waits for the firmware to confirm a finished clone.
#[derive(Debug, Default)]
pub(super) struct CloneDoneSink;

impl ReceiveSink<Pm3Frame> for CloneDoneSink {
    type Output = ();

    fn on_received(&mut self, frame: Pm3Frame, _link: &mut dyn Link<Pm3Frame>) -> Result<Option<()>> {
        Ok(debug_text(&frame)
            .filter(|text| text.trim() == CLONE_DONE_TEXT)
            .map(|_| ()))
    }
}
