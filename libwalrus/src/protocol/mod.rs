// libwalrus/src/protocol/mod.rs

pub mod codec;
pub mod commands;
pub mod frame;
pub mod parser;
pub mod responses;
pub mod sink;

pub use codec::{FixedFrameCodec, FrameCodec, LineCodec};
pub use commands::*;
pub use frame::Pm3Frame;
pub use responses::*;
pub use sink::{CommandWaiter, Link, ReceiveSink, Watchdog};
