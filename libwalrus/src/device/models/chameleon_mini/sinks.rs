// libwalrus/src/device/models/chameleon_mini/sinks.rs

use std::convert::Infallible;

use log::{debug, info};
use num_bigint::BigUint;

use crate::Result;
use crate::card::operations::{ResultSink, ShouldContinue};
use crate::card::{CardData, MifareCardData};
use crate::protocol::parser::{field_name, hex_value, hex_value_as};
use crate::protocol::{LineCommand, LineStatus, Link, ReceiveSink, expect_status};
use crate::types::SectorNumber;

fn send(link: &mut dyn Link<String>, command: &LineCommand) -> Result<()> {
    link.send(&command.to_line())
}

/// `VERSION?` answers with a status line, then the version text.
#[derive(Debug, Default)]
pub(super) struct VersionSink {
    got_status: bool,
}

impl ReceiveSink<String> for VersionSink {
    type Output = String;

    fn on_received(&mut self, line: String, _link: &mut dyn Link<String>) -> Result<Option<String>> {
        if !self.got_status {
            expect_status(&line, LineStatus::OkWithText, &LineCommand::Version)?;
            self.got_status = true;
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReadState {
    Config,
    Timeout,
    Identify,
    Header,
    Atqa,
    Uid,
    Sak,
}

/// Continuous identify loop. Each identified card is pushed to the result
/// sink and another `IDENTIFY` is issued until the caller cancels; the sink
/// itself never yields.
pub(super) struct IdentifySink<'a> {
    state: ReadState,
    config: LineCommand,
    identify_timeout_secs: u32,
    atqa: u16,
    uid: BigUint,
    should_continue: &'a dyn ShouldContinue,
    results: &'a mut dyn ResultSink,
}

impl<'a> IdentifySink<'a> {
    /// `config` is the `CONFIG=` command already sent to start the exchange.
    pub(super) fn new(
        config: LineCommand,
        identify_timeout_secs: u32,
        should_continue: &'a dyn ShouldContinue,
        results: &'a mut dyn ResultSink,
    ) -> Self {
        Self {
            state: ReadState::Config,
            config,
            identify_timeout_secs,
            atqa: 0,
            uid: BigUint::default(),
            should_continue,
            results,
        }
    }

    fn identify(&mut self, link: &mut dyn Link<String>) -> Result<()> {
        self.state = ReadState::Identify;
        send(link, &LineCommand::Identify)
    }

    fn parse_atqa(&mut self, line: &str) -> Result<()> {
        // the reader prints ATQA in wire (little-endian) order
        self.atqa = hex_value_as::<u16>(line)?.swap_bytes();
        self.state = ReadState::Uid;
        Ok(())
    }
}

/// A status line where a card field was due means the reader gave up on
/// the card.
fn reject_status_line(line: &str) -> Result<()> {
    match LineStatus::code(line) {
        Some(code) => {
            debug!("identify aborted with status {}", code);
            Err(crate::Error::command(LineCommand::Identify.name(), line))
        }
        None => Ok(()),
    }
}

impl ReceiveSink<String> for IdentifySink<'_> {
    type Output = Infallible;

    fn on_received(&mut self, line: String, link: &mut dyn Link<String>) -> Result<Option<Infallible>> {
        if matches!(
            self.state,
            ReadState::Header | ReadState::Atqa | ReadState::Uid | ReadState::Sak
        ) {
            reject_status_line(&line)?;
        }

        match self.state {
            ReadState::Config => {
                expect_status(&line, LineStatus::Ok, &self.config)?;
                self.state = ReadState::Timeout;
                send(link, &LineCommand::Timeout(self.identify_timeout_secs))?;
            }
            ReadState::Timeout => {
                expect_status(
                    &line,
                    LineStatus::Ok,
                    &LineCommand::Timeout(self.identify_timeout_secs),
                )?;
                self.identify(link)?;
            }
            ReadState::Identify => match LineStatus::parse(&line) {
                Some(LineStatus::OkWithText) => self.state = ReadState::Header,
                Some(LineStatus::Timeout) => {
                    // no card in the field; the device is alive, so ask again
                    link.reset_watchdog();
                    self.identify(link)?;
                }
                _ => return Err(crate::Error::command(LineCommand::Identify.name(), line)),
            },
            ReadState::Header => {
                // some firmware builds skip the card type line
                if field_name(&line).is_some_and(|name| name.eq_ignore_ascii_case("ATQA")) {
                    self.parse_atqa(&line)?;
                } else {
                    debug!("card type: {}", line);
                    self.state = ReadState::Atqa;
                }
            }
            ReadState::Atqa => self.parse_atqa(&line)?,
            ReadState::Uid => {
                self.uid = hex_value(&line)?;
                self.state = ReadState::Sak;
            }
            ReadState::Sak => {
                let sak = hex_value_as::<u8>(&line)?;
                let card = MifareCardData::new(self.atqa, std::mem::take(&mut self.uid), sak, Vec::new())
                    .with_max_sector(SectorNumber::MIN);
                info!("identified {}", card);
                self.results.on_result(CardData::Mifare(card));

                if !self.should_continue.should_continue() {
                    return Ok(None);
                }
                link.reset_watchdog();
                self.identify(link)?;
            }
        }
        Ok(None)
    }

    fn wants_more(&self) -> bool {
        self.should_continue.should_continue()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmulateState {
    Config,
    Setting,
    Uid,
}

/// `CONFIG=` then `SETTING=` then `UID=`, each acknowledged with `100:OK`.
pub(super) struct EmulateSink<'a> {
    state: EmulateState,
    config: LineCommand,
    slot: u8,
    uid: BigUint,
    should_continue: &'a dyn ShouldContinue,
}

impl<'a> EmulateSink<'a> {
    pub(super) fn new(
        config: LineCommand,
        slot: u8,
        uid: BigUint,
        should_continue: &'a dyn ShouldContinue,
    ) -> Self {
        Self {
            state: EmulateState::Config,
            config,
            slot,
            uid,
            should_continue,
        }
    }
}

impl ReceiveSink<String> for EmulateSink<'_> {
    type Output = ();

    fn on_received(&mut self, line: String, link: &mut dyn Link<String>) -> Result<Option<()>> {
        match self.state {
            EmulateState::Config => {
                expect_status(&line, LineStatus::Ok, &self.config)?;
                self.state = EmulateState::Setting;
                send(link, &LineCommand::Setting(self.slot))?;
            }
            EmulateState::Setting => {
                expect_status(&line, LineStatus::Ok, &LineCommand::Setting(self.slot))?;
                self.state = EmulateState::Uid;
                send(link, &LineCommand::Uid(self.uid.clone()))?;
            }
            EmulateState::Uid => {
                expect_status(&line, LineStatus::Ok, &LineCommand::Uid(self.uid.clone()))?;
                return Ok(Some(()));
            }
        }
        Ok(None)
    }

    fn wants_more(&self) -> bool {
        self.should_continue.should_continue()
    }
}
