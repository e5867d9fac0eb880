// libwalrus/src/protocol/responses/mod.rs

pub mod anticollision;
pub mod line;
pub mod tune;

pub use anticollision::AnticollisionInfo;
pub use line::{LineStatus, expect_status};
pub use tune::TuneResult;
