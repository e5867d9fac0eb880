// libwalrus/src/transport/serial.rs

use std::io::{self, Read, Write};
use std::time::Duration;

use log::{debug, trace};
use serialport::{ClearBuffer, DataBits, SerialPort, SerialPortType, StopBits};

use crate::device::registry::UsbId;
use crate::transport::settings::{FlowControl, Parity, SerialSettings};
use crate::transport::traits::Transport;
use crate::{Error, Result};

const READ_CHUNK: usize = 1024;

/// USB-serial transport backed by the `serialport` crate.
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    name: String,
}

impl SerialTransport {
    pub fn open(path: &str, settings: &SerialSettings) -> Result<Self> {
        let data_bits = match settings.data_bits {
            5 => DataBits::Five,
            6 => DataBits::Six,
            7 => DataBits::Seven,
            8 => DataBits::Eight,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unsupported data bits: {}",
                    other
                )));
            }
        };
        let stop_bits = match settings.stop_bits {
            1 => StopBits::One,
            2 => StopBits::Two,
            other => {
                return Err(Error::InvalidArgument(format!(
                    "unsupported stop bits: {}",
                    other
                )));
            }
        };
        let parity = match settings.parity {
            Parity::None => serialport::Parity::None,
            Parity::Odd => serialport::Parity::Odd,
            Parity::Even => serialport::Parity::Even,
        };
        let flow_control = match settings.flow_control {
            FlowControl::None => serialport::FlowControl::None,
            FlowControl::Software => serialport::FlowControl::Software,
            FlowControl::Hardware => serialport::FlowControl::Hardware,
        };

        let port = serialport::new(path, settings.baud_rate)
            .data_bits(data_bits)
            .parity(parity)
            .stop_bits(stop_bits)
            .flow_control(flow_control)
            .timeout(Duration::from_millis(settings.read_timeout_ms))
            .open()?;

        debug!("opened {} at {}", path, settings.summary());
        Ok(Self {
            port,
            name: path.to_string(),
        })
    }

    /// Open the first attached port whose USB ids match one of `ids`.
    pub fn open_usb(ids: &[UsbId], settings: &SerialSettings) -> Result<Self> {
        let path = find_port(ids)?;
        Self::open(&path, settings)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Name of the first serial port whose USB vendor/product ids are listed in `ids`.
pub fn find_port(ids: &[UsbId]) -> Result<String> {
    serialport::available_ports()?
        .into_iter()
        .find(|info| match &info.port_type {
            SerialPortType::UsbPort(usb) => ids.iter().any(|id| id.matches(usb.vid, usb.pid)),
            _ => false,
        })
        .map(|info| info.port_name)
        .ok_or(Error::DeviceNotFound)
}

impl Transport for SerialTransport {
    fn send(&mut self, data: &[u8]) -> Result<()> {
        trace!("{} <- {} bytes", self.name, data.len());
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn receive(&mut self, timeout_ms: u64) -> Result<Vec<u8>> {
        self.port.set_timeout(Duration::from_millis(timeout_ms))?;

        let mut buf = vec![0u8; READ_CHUNK];
        match self.port.read(&mut buf) {
            Ok(n) => {
                buf.truncate(n);
                if n > 0 {
                    trace!("{} -> {} bytes", self.name, n);
                }
                Ok(buf)
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.port.clear(ClearBuffer::All)?;
        Ok(())
    }
}
