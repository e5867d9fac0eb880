// libwalrus/src/device/builder.rs

use std::sync::Arc;

use crate::device::handle::Device;
use crate::device::models::{
    CardDevice, ChameleonMini, ChameleonMiniConfig, Proxmark3, Proxmark3Config,
};
use crate::device::registry::{self, DeviceKind};
use crate::protocol::{FixedFrameCodec, LineCodec};
use crate::transport::{SerialSettings, Transport};
use crate::utils::DEFAULT_POLL_INTERVAL_MS;
use crate::{Error, Result};

/// Helper to construct a device driver with optional configuration.
///
/// Without an explicit transport the builder opens a serial port (feature
/// `serial`): the configured path, or else the first port whose USB ids
/// belong to the requested device kind.
pub struct DeviceBuilder {
    kind: Option<DeviceKind>,
    transport: Option<Box<dyn Transport>>,
    port: Option<String>,
    #[cfg_attr(not(feature = "serial"), allow(dead_code))]
    settings: SerialSettings,
    chameleon_mini: ChameleonMiniConfig,
    proxmark3: Proxmark3Config,
    poll_interval_ms: u64,
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBuilder {
    pub fn new() -> Self {
        Self {
            kind: None,
            transport: None,
            port: None,
            settings: SerialSettings::default(),
            chameleon_mini: ChameleonMiniConfig::default(),
            proxmark3: Proxmark3Config::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    pub fn kind(mut self, kind: DeviceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Serial port path, e.g. `/dev/ttyACM0`.
    pub fn port(mut self, path: impl Into<String>) -> Self {
        self.port = Some(path.into());
        self
    }

    pub fn serial_settings(mut self, settings: SerialSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn chameleon_mini_config(mut self, config: ChameleonMiniConfig) -> Self {
        self.chameleon_mini = config;
        self
    }

    pub fn proxmark3_config(mut self, config: Proxmark3Config) -> Self {
        self.proxmark3 = config;
        self
    }

    pub fn poll_interval_ms(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Build the driver selected with [`kind`](Self::kind).
    pub fn build(self) -> Result<Arc<dyn CardDevice>> {
        let kind = self
            .kind
            .ok_or_else(|| Error::InvalidArgument("device kind not set".into()))?;
        Ok(match kind {
            DeviceKind::ChameleonMini => Arc::new(self.build_chameleon_mini()?),
            DeviceKind::Proxmark3 => Arc::new(self.build_proxmark3()?),
        })
    }

    pub fn build_chameleon_mini(mut self) -> Result<ChameleonMini> {
        let transport = self.take_transport(DeviceKind::ChameleonMini)?;
        let device = Device::new(transport, LineCodec::default()).with_poll_interval(self.poll_interval_ms);
        Ok(ChameleonMini::from_device(device, self.chameleon_mini))
    }

    pub fn build_proxmark3(mut self) -> Result<Proxmark3> {
        let transport = self.take_transport(DeviceKind::Proxmark3)?;
        let device = Device::new(transport, FixedFrameCodec).with_poll_interval(self.poll_interval_ms);
        Proxmark3::from_device(device, self.proxmark3)
    }

    fn take_transport(&mut self, kind: DeviceKind) -> Result<Box<dyn Transport>> {
        if let Some(requested) = self.kind.filter(|&requested| requested != kind) {
            return Err(Error::InvalidArgument(format!(
                "builder configured for {}, not {}",
                requested, kind
            )));
        }
        match self.transport.take() {
            Some(transport) => Ok(transport),
            None => self.open_serial(kind),
        }
    }

    #[cfg(feature = "serial")]
    fn open_serial(&self, kind: DeviceKind) -> Result<Box<dyn Transport>> {
        use crate::transport::SerialTransport;

        let transport = match &self.port {
            Some(path) => SerialTransport::open(path, &self.settings)?,
            None => SerialTransport::open_usb(registry::descriptor(kind).usb_ids, &self.settings)?,
        };
        Ok(Box::new(transport))
    }

    #[cfg(not(feature = "serial"))]
    fn open_serial(&self, kind: DeviceKind) -> Result<Box<dyn Transport>> {
        log::warn!(
            "no transport for {} ({}); serial support is disabled",
            registry::descriptor(kind).name,
            self.port.as_deref().unwrap_or("auto-detect"),
        );
        Err(Error::DeviceNotFound)
    }
}
