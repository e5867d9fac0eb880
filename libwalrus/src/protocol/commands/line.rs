// libwalrus/src/protocol/commands/line.rs

use std::fmt;

use num_bigint::BigUint;

/// Chameleon Mini text commands. `Display` yields the wire line without
/// the delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Version,
    Config(String),
    Timeout(u32),
    Identify,
    Setting(u8),
    Uid(BigUint),
}

impl LineCommand {
    /// Command name as it appears in device error reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Version => "VERSION?",
            Self::Config(_) => "CONFIG=",
            Self::Timeout(_) => "TIMEOUT=",
            Self::Identify => "IDENTIFY",
            Self::Setting(_) => "SETTING=",
            Self::Uid(_) => "UID=",
        }
    }

    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Version | Self::Identify => f.write_str(self.name()),
            Self::Config(mode) => write!(f, "CONFIG={}", mode),
            Self::Timeout(secs) => write!(f, "TIMEOUT={}", secs),
            Self::Setting(slot) => write!(f, "SETTING={}", slot),
            Self::Uid(uid) => write!(f, "UID={:08x}", uid),
        }
    }
}
