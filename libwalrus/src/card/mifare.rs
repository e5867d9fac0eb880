use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigUint;

use crate::types::{Sector, SectorNumber};

/// ISO14443-A identification plus whatever sectors could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MifareCardData {
    atqa: u16,
    uid: BigUint,
    sak: u8,
    ats: Vec<u8>,
    sectors: BTreeMap<SectorNumber, Sector>,
    max_sector: Option<SectorNumber>,
}

impl MifareCardData {
    pub fn new(atqa: u16, uid: BigUint, sak: u8, ats: Vec<u8>) -> Self {
        Self {
            atqa,
            uid,
            sak,
            ats,
            sectors: BTreeMap::new(),
            max_sector: None,
        }
    }

    pub fn with_max_sector(mut self, max_sector: SectorNumber) -> Self {
        self.max_sector = Some(max_sector);
        self
    }

    pub fn atqa(&self) -> u16 {
        self.atqa
    }

    pub fn uid(&self) -> &BigUint {
        &self.uid
    }

    pub fn sak(&self) -> u8 {
        self.sak
    }

    pub fn ats(&self) -> &[u8] {
        &self.ats
    }

    pub fn sectors(&self) -> &BTreeMap<SectorNumber, Sector> {
        &self.sectors
    }

    pub fn sector(&self, number: SectorNumber) -> Option<&Sector> {
        self.sectors.get(&number)
    }

    pub fn max_sector(&self) -> Option<SectorNumber> {
        self.max_sector
    }

    /// Record sectors; a later read of the same sector replaces the earlier one.
    pub fn extend_sectors<I>(&mut self, sectors: I)
    where
        I: IntoIterator<Item = (SectorNumber, Sector)>,
    {
        self.sectors.extend(sectors);
    }
}

impl fmt::Display for MifareCardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UID {:X} (ATQA {:04X}, SAK {:02X})",
            self.uid, self.atqa, self.sak
        )?;

        for (i, (number, sector)) in self.sectors.iter().enumerate() {
            f.write_str(if i == 0 { " - " } else { ", " })?;
            write!(f, "{}: {}", number, sector)?;
        }
        Ok(())
    }
}
