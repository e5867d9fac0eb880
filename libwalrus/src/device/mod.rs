// libwalrus/src/device/mod.rs

pub mod builder;
pub mod handle;
pub mod models;
pub mod registry;

pub use builder::DeviceBuilder;
pub use handle::{Device, DeviceSession, status};
pub use models::{CardDevice, ChameleonMini, ChameleonMiniConfig, Proxmark3, Proxmark3Config};
pub use registry::{DeviceDescriptor, DeviceKind, UsbId};
