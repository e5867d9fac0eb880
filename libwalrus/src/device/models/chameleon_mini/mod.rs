// libwalrus/src/device/models/chameleon_mini/mod.rs

mod config;
mod sinks;

use std::sync::Arc;

use log::debug;

use crate::card::CardData;
use crate::card::operations::{ReadRequest, ResultSink, ShouldContinue, WriteMode};
use crate::device::handle::{Device, status};
use crate::device::models::CardDevice;
use crate::device::registry::DeviceKind;
use crate::protocol::{LineCodec, LineCommand, Watchdog};
use crate::transport::Transport;
use crate::utils::ms;
use crate::{Error, Result};

pub use config::ChameleonMiniConfig;

use sinks::{EmulateSink, IdentifySink, VersionSink};

/// Chameleon Mini driven over its CRLF text protocol. Reads and emulates
/// Mifare Classic cards.
pub struct ChameleonMini {
    device: Device<LineCodec>,
    config: ChameleonMiniConfig,
}

impl ChameleonMini {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self::with_config(transport, ChameleonMiniConfig::default())
    }

    pub fn with_config(transport: Box<dyn Transport>, config: ChameleonMiniConfig) -> Self {
        Self::from_device(Device::new(transport, LineCodec::default()), config)
    }

    pub fn from_device(device: Device<LineCodec>, config: ChameleonMiniConfig) -> Self {
        Self { device, config }
    }

    /// Registry constructor.
    pub fn open(transport: Box<dyn Transport>) -> Result<Arc<dyn CardDevice>> {
        Ok(Arc::new(Self::new(transport)))
    }

    pub fn device(&self) -> &Device<LineCodec> {
        &self.device
    }

    pub fn config(&self) -> &ChameleonMiniConfig {
        &self.config
    }

    fn watchdog<S>(&self, sink: S) -> Watchdog<S> {
        Watchdog::new(sink, ms(self.config.watchdog_ms))
    }

    /// Query the firmware version string.
    pub fn version(&self) -> Result<String> {
        let mut session = self.device.acquire(status::GETTING_VERSION)?;
        session
            .send_then_receive(
                &LineCommand::Version.to_line(),
                self.watchdog(VersionSink::default()),
            )?
            .ok_or(Error::Timeout)
    }

    /// Identify Mifare cards until `should_continue` turns false. Every card
    /// seen is pushed to `results` with an empty sector map.
    pub fn read_mifare(
        &self,
        should_continue: &dyn ShouldContinue,
        results: &mut dyn ResultSink,
    ) -> Result<()> {
        let mut session = self.device.acquire(status::READING)?;
        let config = LineCommand::Config(self.config.reader_mode.clone());
        let sink = IdentifySink::new(
            config.clone(),
            self.config.identify_timeout_secs,
            should_continue,
            results,
        );

        match session.send_then_receive(&config.to_line(), self.watchdog(sink))? {
            Some(never) => match never {},
            None => {
                debug!("read stopped");
                Ok(())
            }
        }
    }

    /// Load `card`'s UID into the configured emulation slot.
    pub fn emulate_mifare(&self, card: &CardData, should_continue: &dyn ShouldContinue) -> Result<()> {
        let mifare = card.as_mifare().ok_or_else(|| {
            Error::Unsupported(format!("Chameleon Mini cannot emulate {} cards", card.kind()))
        })?;

        let mut session = self.device.acquire(status::EMULATING)?;
        let config = LineCommand::Config(self.config.emulation_mode.clone());
        let sink = EmulateSink::new(
            config.clone(),
            self.config.emulation_slot,
            mifare.uid().clone(),
            should_continue,
        );

        if session
            .send_then_receive(&config.to_line(), self.watchdog(sink))?
            .is_none()
        {
            debug!("emulate stopped before completion");
        }
        Ok(())
    }
}

impl CardDevice for ChameleonMini {
    fn kind(&self) -> DeviceKind {
        DeviceKind::ChameleonMini
    }

    fn status(&self) -> String {
        self.device.status()
    }

    fn is_receiving(&self) -> bool {
        self.device.is_receiving()
    }

    fn version(&self) -> Result<String> {
        ChameleonMini::version(self)
    }

    fn read_card_data(
        &self,
        request: &ReadRequest,
        should_continue: &dyn ShouldContinue,
        results: &mut dyn ResultSink,
    ) -> Result<()> {
        match request {
            // read attempts need sector access the text protocol does not offer
            ReadRequest::Mifare { .. } => self.read_mifare(should_continue, results),
            ReadRequest::Hid => Err(Error::Unsupported(
                "Chameleon Mini cannot read HID cards".into(),
            )),
        }
    }

    fn write_or_emulate(
        &self,
        card: &CardData,
        mode: WriteMode,
        should_continue: &dyn ShouldContinue,
    ) -> Result<()> {
        match mode {
            WriteMode::Emulate => self.emulate_mifare(card, should_continue),
            WriteMode::Write => Err(Error::Unsupported("Chameleon Mini cannot write cards".into())),
        }
    }
}
