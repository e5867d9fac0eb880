// libwalrus/src/protocol/commands/mod.rs

pub mod line;
pub mod proxmark3;

pub use line::LineCommand;
pub use proxmark3::op;
