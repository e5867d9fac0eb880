#![cfg(feature = "serial")]

//! Identify Mifare cards with a Chameleon Mini for a few seconds.
//!
//! Usage:
//!   cargo run -p libwalrus --example chameleon_read --features serial -- [PORT] [SECONDS]

use std::time::{Duration, Instant};

use libwalrus::card::CardData;
use libwalrus::card::operations::{FnResultSink, ReadOperation, ReadRequest};
use libwalrus::device::{DeviceBuilder, DeviceKind};
use libwalrus::{Error, Result};

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut builder = DeviceBuilder::new().kind(DeviceKind::ChameleonMini);
    if let Some(port) = args.next() {
        builder = builder.port(port);
    }
    let seconds = match args.next() {
        Some(s) => s
            .parse()
            .map_err(|_| Error::InvalidArgument(format!("bad duration: {}", s)))?,
        None => 10,
    };

    let device = match builder.build() {
        Ok(device) => device,
        Err(Error::DeviceNotFound) => {
            println!("No Chameleon Mini found");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("Firmware: {}", device.version()?);

    let deadline = Instant::now() + Duration::from_secs(seconds);
    let operation = ReadOperation::new(device.as_ref(), ReadRequest::Mifare { attempts: vec![] })?;
    let mut sink = FnResultSink(|card: CardData| println!("{}", card));
    operation.execute(&|| Instant::now() < deadline, &mut sink)?;
    Ok(())
}
