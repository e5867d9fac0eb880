// libwalrus/src/device/models/proxmark3/mifare.rs

//! Mifare Classic reading: anticollision, then sector acquisition with the
//! caller's read attempts.

use std::collections::BTreeMap;
use std::time::Duration;

use log::{debug, info, trace};

use super::sinks::Interruptible;
use crate::Result;
use crate::card::operations::{ResultSink, ShouldContinue};
use crate::card::{CardData, ReadAttempt, StaticKeyReadAttempt};
use crate::device::handle::DeviceSession;
use crate::protocol::commands::proxmark3::{iso14a_connect, mifare_read_sector};
use crate::protocol::{AnticollisionInfo, CommandWaiter, FixedFrameCodec, Pm3Frame, op};
use crate::types::{Sector, SectorNumber};

type Session<'d> = DeviceSession<'d, FixedFrameCodec>;

/// One round trip answered by `ACK`. `None` when cancelled.
fn round_trip(
    session: &mut Session<'_>,
    frame: &Pm3Frame,
    should_continue: &dyn ShouldContinue,
    timeout: Duration,
) -> Result<Option<Pm3Frame>> {
    session.send_then_receive(
        frame,
        Interruptible::new(CommandWaiter::with_timeout(op::ACK, timeout), should_continue),
    )
}

/// Identify cards and read their sectors until cancelled. Each card is
/// emitted once its attempts are done, even if some sectors stayed locked.
pub(super) fn read_cards(
    session: &mut Session<'_>,
    attempts: &[ReadAttempt],
    should_continue: &dyn ShouldContinue,
    results: &mut dyn ResultSink,
    timeout: Duration,
) -> Result<()> {
    while should_continue.should_continue() {
        let Some(ack) = round_trip(session, &iso14a_connect(), should_continue, timeout)? else {
            break;
        };
        let Some(info) = AnticollisionInfo::from_frame(&ack)? else {
            trace!("no tag in field");
            continue;
        };

        let mut card = info.into_card_data();
        card.extend_sectors(acquire_sectors(session, attempts, should_continue, timeout)?);
        info!("read {} ({} sectors)", card, card.sectors().len());
        results.on_result(CardData::Mifare(card));
    }
    debug!("mifare read stopped");
    Ok(())
}

/// Run every attempt in order against the selected card. A sector read by
/// several attempts keeps the data of the last one. Cancellation returns
/// what was read so far.
pub(super) fn acquire_sectors(
    session: &mut Session<'_>,
    attempts: &[ReadAttempt],
    should_continue: &dyn ShouldContinue,
    timeout: Duration,
) -> Result<BTreeMap<SectorNumber, Sector>> {
    let mut sectors = BTreeMap::new();

    for attempt in attempts {
        if !should_continue.should_continue() {
            break;
        }
        debug!("attempt: {}", attempt.kind());

        match attempt {
            ReadAttempt::StaticKey(attempt) => {
                read_with_static_key(session, attempt, should_continue, timeout, &mut sectors)?
            }
        }
    }
    Ok(sectors)
}

fn read_with_static_key(
    session: &mut Session<'_>,
    attempt: &StaticKeyReadAttempt,
    should_continue: &dyn ShouldContinue,
    timeout: Duration,
    sectors: &mut BTreeMap<SectorNumber, Sector>,
) -> Result<()> {
    for &number in attempt.sectors() {
        for &slot in attempt.key_slot().ordered_slots() {
            if !should_continue.should_continue() {
                return Ok(());
            }

            let frame = mifare_read_sector(number, slot, attempt.key())?;
            let Some(ack) = round_trip(session, &frame, should_continue, timeout)? else {
                return Ok(());
            };

            if ack.arg(0) & 0xFF == 0 {
                trace!("sector {} refused key {}", number, slot);
                continue;
            }

            let sector = Sector::for_sector(number, &ack.data()[..number.byte_len()])?;
            sectors.insert(number, sector);
            break;
        }
    }
    Ok(())
}
