// libwalrus/src/prelude.rs

pub use crate::card::operations::{
    CancelToken, FnResultSink, ReadOperation, ReadRequest, ResultSink, ShouldContinue,
    WriteMode, WriteOrEmulateOperation, spawn_read, spawn_write_or_emulate,
};
pub use crate::card::{
    CardData, CardKind, HidCardData, MifareCardData, ReadAttempt, ReadAttemptKind,
    StaticKeyReadAttempt,
};
pub use crate::device::{
    CardDevice, ChameleonMini, ChameleonMiniConfig, DeviceBuilder, DeviceKind, Proxmark3,
    Proxmark3Config,
};
pub use crate::protocol::TuneResult;
pub use crate::transport::{SerialSettings, Transport};
pub use crate::{Error, Key, KeySlot, Result, Sector, SectorNumber};

// Re-export small utilities for convenience
pub use crate::utils::{format_ranges, ms, parse_ranges};
