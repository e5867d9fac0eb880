// libwalrus/src/device/models/mod.rs

use crate::Result;
use crate::card::CardData;
use crate::card::operations::{ReadRequest, ResultSink, ShouldContinue, WriteMode};
use crate::device::registry::{self, DeviceDescriptor, DeviceKind};

pub mod chameleon_mini;
pub mod proxmark3;

pub use chameleon_mini::{ChameleonMini, ChameleonMiniConfig};
pub use proxmark3::{Proxmark3, Proxmark3Config};

/// A card reader-writer driver. Implementations serialize their own
/// protocol traffic, so a shared `Arc<dyn CardDevice>` can be handed to
/// several threads; concurrent operations get `Error::DeviceBusy`.
pub trait CardDevice: Send + Sync {
    fn kind(&self) -> DeviceKind;

    /// Human-readable status ("Idle", "Reading", ...).
    fn status(&self) -> String;

    /// True while the device is waiting on protocol responses.
    fn is_receiving(&self) -> bool;

    /// Firmware version text.
    fn version(&self) -> Result<String>;

    /// Read cards until done or until `should_continue` turns false. Every
    /// record is handed to `results` as soon as it is complete.
    fn read_card_data(
        &self,
        request: &ReadRequest,
        should_continue: &dyn ShouldContinue,
        results: &mut dyn ResultSink,
    ) -> Result<()>;

    fn write_or_emulate(
        &self,
        card: &CardData,
        mode: WriteMode,
        should_continue: &dyn ShouldContinue,
    ) -> Result<()>;

    /// Static capabilities of this device family.
    fn descriptor(&self) -> &'static DeviceDescriptor {
        registry::descriptor(self.kind())
    }
}
