// libwalrus/src/transport/mock.rs

use std::collections::VecDeque;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use crate::constants::LINE_DELIMITER;
use crate::protocol::Pm3Frame;
use crate::protocol::codec::latin1_to_string;
use crate::transport::traits::Transport;
use crate::{Error, Result};

type Responder = Box<dyn FnMut(&[u8]) -> Vec<Vec<u8>> + Send>;

enum Scripted {
    Bytes(Vec<u8>),
    Delayed(Duration, Vec<u8>),
    Error(io::ErrorKind),
}

#[derive(Default)]
struct MockState {
    sent: Vec<Vec<u8>>,
    responses: VecDeque<Scripted>,
    responder: Option<Responder>,
    fail_sends: usize,
    resets: usize,
}

/// Mock transport for unit tests. It records sent payloads and returns
/// queued responses.
///
/// Clones share state, so a test can keep one handle for scripting and
/// assertions after handing another to a device.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_response(&self, resp: Vec<u8>) {
        self.state().responses.push_back(Scripted::Bytes(resp));
    }

    /// Queue bytes that only arrive after `delay` of silence.
    pub fn push_delayed(&self, delay: Duration, resp: Vec<u8>) {
        self.state()
            .responses
            .push_back(Scripted::Delayed(delay, resp));
    }

    /// Queue one CRLF-terminated text line.
    pub fn push_line(&self, line: &str) {
        let mut bytes: Vec<u8> = line.chars().map(|c| c as u8).collect();
        bytes.extend_from_slice(LINE_DELIMITER.as_bytes());
        self.push_response(bytes);
    }

    pub fn push_lines(&self, lines: &[&str]) {
        for line in lines {
            self.push_line(line);
        }
    }

    pub fn push_frame(&self, frame: &Pm3Frame) {
        self.push_response(frame.encode());
    }

    /// Make the next `receive` fail with an I/O error of `kind`.
    pub fn push_error(&self, kind: io::ErrorKind) {
        self.state().responses.push_back(Scripted::Error(kind));
    }

    /// Answer every sent chunk with the chunks `responder` returns. Scripted
    /// responses already queued are delivered first.
    pub fn set_responder<F>(&self, responder: F)
    where
        F: FnMut(&[u8]) -> Vec<Vec<u8>> + Send + 'static,
    {
        self.state().responder = Some(Box::new(responder));
    }

    /// Fail the next `n` sends with a broken pipe.
    pub fn fail_sends(&self, n: usize) {
        self.state().fail_sends = n;
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state().sent.len()
    }

    /// Sent chunks as text lines with the delimiter stripped.
    pub fn sent_lines(&self) -> Vec<String> {
        self.state()
            .sent
            .iter()
            .map(|chunk| {
                let line = latin1_to_string(chunk);
                line.strip_suffix(LINE_DELIMITER)
                    .map(str::to_string)
                    .unwrap_or(line)
            })
            .collect()
    }

    /// Sent chunks that decode as Proxmark3 frames.
    pub fn sent_frames(&self) -> Vec<Pm3Frame> {
        self.state()
            .sent
            .iter()
            .filter_map(|chunk| Pm3Frame::decode(chunk).ok())
            .collect()
    }

    pub fn pending_responses(&self) -> usize {
        self.state().responses.len()
    }

    pub fn reset_count(&self) -> usize {
        self.state().resets
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("MockTransport")
            .field("sent", &state.sent.len())
            .field("pending", &state.responses.len())
            .field("responder", &state.responder.is_some())
            .finish()
    }
}

impl Transport for MockTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        let mut state = self.state();
        if state.fail_sends > 0 {
            state.fail_sends -= 1;
            return Err(Error::Io(io::Error::from(io::ErrorKind::BrokenPipe)));
        }
        state.sent.push(data.to_vec());

        if let Some(responder) = state.responder.as_mut() {
            let replies = responder(data);
            state
                .responses
                .extend(replies.into_iter().map(Scripted::Bytes));
        }
        Ok(())
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        let window = Duration::from_millis(timeout_ms);
        // never sleep while holding the lock; tests push from other threads
        let next = self.state().responses.pop_front();

        match next {
            None => {
                thread::sleep(window);
                Ok(Vec::new())
            }
            Some(Scripted::Bytes(bytes)) => Ok(bytes),
            Some(Scripted::Error(kind)) => Err(Error::Io(io::Error::from(kind))),
            Some(Scripted::Delayed(delay, bytes)) if delay <= window => {
                thread::sleep(delay);
                Ok(bytes)
            }
            Some(Scripted::Delayed(delay, bytes)) => {
                thread::sleep(window);
                self.state()
                    .responses
                    .push_front(Scripted::Delayed(delay - window, bytes));
                Ok(Vec::new())
            }
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.state().resets += 1;
        Ok(())
    }
}
