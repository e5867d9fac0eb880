// libwalrus/src/device/models/proxmark3/mod.rs

mod config;
mod mifare;
mod sinks;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};

use crate::card::operations::{ReadRequest, ResultSink, ShouldContinue, WriteMode};
use crate::card::{CardData, ReadAttempt};
use crate::device::handle::{Device, DeviceSession, status};
use crate::device::models::CardDevice;
use crate::device::registry::DeviceKind;
use crate::protocol::commands::proxmark3 as cmd;
use crate::protocol::{CommandWaiter, FixedFrameCodec, TuneResult, Watchdog, op};
use crate::transport::Transport;
use crate::utils::ms;
use crate::{Error, Result};

pub use config::{
    CLONE_DONE_TEXT, HID_STOPPED_TEXT, HID_TAG_ID_PATTERN, KEEP_ALIVE_WATCHDOG_MS, Proxmark3Config,
};

use sinks::{CloneDoneSink, HidDemodSink, Interruptible};

/// Proxmark3 driven over fixed-size binary command frames. Reads HID Prox
/// and Mifare Classic cards, clones HID Prox tags and measures antenna
/// tuning.
pub struct Proxmark3 {
    device: Device<FixedFrameCodec>,
    config: Proxmark3Config,
    firmware: String,
}

impl Proxmark3 {
    /// Open the device. The firmware is asked for its version right away,
    /// so a port that is not a Proxmark3 fails here.
    pub fn new(transport: Box<dyn Transport>) -> Result<Self> {
        Self::with_config(transport, Proxmark3Config::default())
    }

    pub fn with_config(transport: Box<dyn Transport>, config: Proxmark3Config) -> Result<Self> {
        Self::from_device(Device::new(transport, FixedFrameCodec), config)
    }

    pub fn from_device(device: Device<FixedFrameCodec>, config: Proxmark3Config) -> Result<Self> {
        let firmware = {
            let mut session = device.acquire(status::OPENING)?;
            Self::query_version(&mut session, ms(config.watchdog_ms))?
        };
        info!("Proxmark3 firmware: {}", firmware);

        Ok(Self {
            device,
            config,
            firmware,
        })
    }

    /// Registry constructor.
    pub fn open(transport: Box<dyn Transport>) -> Result<Arc<dyn CardDevice>> {
        Ok(Arc::new(Self::new(transport)?))
    }

    pub fn device(&self) -> &Device<FixedFrameCodec> {
        &self.device
    }

    pub fn config(&self) -> &Proxmark3Config {
        &self.config
    }

    /// Version text reported when the device was opened.
    pub fn firmware(&self) -> &str {
        &self.firmware
    }

    fn timeout(&self) -> Duration {
        ms(self.config.watchdog_ms)
    }

    fn query_version(session: &mut DeviceSession<'_, FixedFrameCodec>, timeout: Duration) -> Result<String> {
        let ack = session
            .send_then_receive(&cmd::version(), CommandWaiter::with_timeout(op::ACK, timeout))?
            .ok_or(Error::Timeout)?;
        Ok(ack.data_as_string())
    }

    pub fn version(&self) -> Result<String> {
        let mut session = self.device.acquire(status::GETTING_VERSION)?;
        Self::query_version(&mut session, self.timeout())
    }

    /// Measure the antenna on the selected bands. At least one band is
    /// required.
    pub fn tune(&self, lf: bool, hf: bool) -> Result<TuneResult> {
        let request = cmd::measure_antenna_tuning(lf, hf)?;
        let mut session = self.device.acquire(status::TUNING)?;

        let frame = session
            .send_then_receive(
                &request,
                CommandWaiter::with_timeout(op::MEASURED_ANTENNA_TUNING, self.timeout()),
            )?
            .ok_or(Error::Timeout)?;
        Ok(TuneResult::from_frame(&frame, lf, hf))
    }

    /// Stream HID Prox identifiers until the demodulator stops or the caller
    /// cancels.
    pub fn read_hid(&self, should_continue: &dyn ShouldContinue, results: &mut dyn ResultSink) -> Result<()> {
        let mut session = self.device.acquire(status::READING)?;
        let sink = Interruptible::new(HidDemodSink::new(results)?, should_continue);

        if session
            .send_then_receive(&cmd::hid_demod_fsk(), sink)?
            .is_none()
        {
            debug!("HID read cancelled");
        }

        // any command takes the firmware out of the demodulator loop; its
        // ACK must not be left for the next request
        let waiter = CommandWaiter::with_timeout(op::ACK, self.timeout().min(ms(KEEP_ALIVE_WATCHDOG_MS)));
        match session.send_then_receive(&cmd::version(), waiter) {
            Ok(_) => Ok(()),
            Err(Error::Timeout) => {
                warn!("no ACK after stopping the HID demodulator");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Clone an HID Prox identifier onto a T55x7 tag.
    pub fn write_hid(&self, card: &CardData, should_continue: &dyn ShouldContinue) -> Result<()> {
        let hid = card.as_hid().ok_or_else(|| {
            Error::Unsupported(format!("Proxmark3 cannot write {} cards", card.kind()))
        })?;
        let frame = cmd::hid_clone_tag(hid)?;

        let mut session = self.device.acquire(status::WRITING)?;
        let sink = Interruptible::new(Watchdog::new(CloneDoneSink, self.timeout()), should_continue);
        match session.send_then_receive(&frame, sink)? {
            Some(()) => info!("cloned HID {}", hid),
            None => debug!("HID write cancelled"),
        }
        Ok(())
    }

    /// Identify Mifare cards and read sectors with `attempts` until the
    /// caller cancels.
    pub fn read_mifare(
        &self,
        attempts: &[ReadAttempt],
        should_continue: &dyn ShouldContinue,
        results: &mut dyn ResultSink,
    ) -> Result<()> {
        let mut session = self.device.acquire(status::READING)?;
        mifare::read_cards(&mut session, attempts, should_continue, results, self.timeout())
    }
}

impl CardDevice for Proxmark3 {
    fn kind(&self) -> DeviceKind {
        DeviceKind::Proxmark3
    }

    fn status(&self) -> String {
        self.device.status()
    }

    fn is_receiving(&self) -> bool {
        self.device.is_receiving()
    }

    fn version(&self) -> Result<String> {
        Proxmark3::version(self)
    }

    fn read_card_data(
        &self,
        request: &ReadRequest,
        should_continue: &dyn ShouldContinue,
        results: &mut dyn ResultSink,
    ) -> Result<()> {
        match request {
            ReadRequest::Hid => self.read_hid(should_continue, results),
            ReadRequest::Mifare { attempts } => self.read_mifare(attempts, should_continue, results),
        }
    }

    fn write_or_emulate(
        &self,
        card: &CardData,
        mode: WriteMode,
        should_continue: &dyn ShouldContinue,
    ) -> Result<()> {
        match mode {
            WriteMode::Write => self.write_hid(card, should_continue),
            WriteMode::Emulate => Err(Error::Unsupported("Proxmark3 cannot emulate cards".into())),
        }
    }
}
