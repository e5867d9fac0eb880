#![cfg(feature = "serial")]

//! Print firmware info and antenna tuning from an attached Proxmark3.
//!
//! Usage:
//!   cargo run -p libwalrus --example proxmark3_tune --features serial -- [PORT]

use libwalrus::device::{DeviceBuilder, DeviceKind};
use libwalrus::{Error, Result};

fn main() -> Result<()> {
    env_logger::init();

    let mut builder = DeviceBuilder::new().kind(DeviceKind::Proxmark3);
    if let Some(port) = std::env::args().nth(1) {
        builder = builder.port(port);
    }
    let pm3 = match builder.build_proxmark3() {
        Ok(pm3) => pm3,
        Err(Error::DeviceNotFound) => {
            println!("No Proxmark3 found");
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    println!("Firmware: {}", pm3.firmware());

    let tune = pm3.tune(true, true)?;
    if let (Some(v125), Some(v134)) = (tune.v125, tune.v134) {
        println!("LF antenna: {:.2} V @ 125 kHz, {:.2} V @ 134 kHz", v125, v134);
    }
    if let (Some(f), Some(v)) = (tune.peak_f, tune.peak_v) {
        println!("LF optimal: {:.2} V @ {:.2} kHz", v, f / 1e3);
    }
    if let Some(hf) = tune.hf_voltage {
        println!("HF antenna: {:.2} V @ 13.56 MHz", hf);
    }
    Ok(())
}
