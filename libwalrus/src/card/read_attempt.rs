//! Mifare read attempts: which sectors to try, with which key material.
//!
//! `ReadAttempt` is a closed sum type. Sector acquisition matches on it
//! exhaustively, so a new attempt strategy is a new variant plus one new
//! match arm there.

use std::collections::BTreeSet;

use derive_more::Display;

use crate::types::{Key, KeySlot, SectorNumber};
use crate::utils::{format_ranges, parse_ranges};
use crate::{Error, Result};

/// Tag identifying a read attempt variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadAttemptKind {
    #[display(fmt = "Static key")]
    StaticKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReadAttempt {
    StaticKey(StaticKeyReadAttempt),
}

impl ReadAttempt {
    pub fn kind(&self) -> ReadAttemptKind {
        match self {
            Self::StaticKey(_) => ReadAttemptKind::StaticKey,
        }
    }

    pub fn description(&self) -> String {
        match self {
            Self::StaticKey(attempt) => attempt.description(),
        }
    }
}

impl From<StaticKeyReadAttempt> for ReadAttempt {
    fn from(attempt: StaticKeyReadAttempt) -> Self {
        Self::StaticKey(attempt)
    }
}

/// Try one fixed key against a set of sectors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StaticKeyReadAttempt {
    sectors: BTreeSet<SectorNumber>,
    key: Key,
    key_slot: KeySlot,
}

impl StaticKeyReadAttempt {
    /// Fails on an empty sector set or a missing key / key slot.
    pub fn new(
        sectors: BTreeSet<SectorNumber>,
        key: Option<Key>,
        key_slot: Option<KeySlot>,
    ) -> Result<Self> {
        if sectors.is_empty() {
            return Err(Error::EmptySectorSet);
        }
        let key = key.ok_or(Error::MissingKey)?;
        let key_slot = key_slot.ok_or(Error::MissingKeySlot)?;

        Ok(Self {
            sectors,
            key,
            key_slot,
        })
    }

    /// Build an attempt from user text: sector ranges (`"0-3,6"`) and a
    /// 12-digit hex key.
    pub fn parse(sectors: &str, key: &str, key_slot: Option<KeySlot>) -> Result<Self> {
        let numbers = parse_ranges(sectors).map_err(Error::InvalidArgument)?;
        let sectors = numbers
            .into_iter()
            .map(SectorNumber::new)
            .collect::<Result<BTreeSet<_>>>()?;
        let key = key.parse::<Key>()?;

        Self::new(sectors, Some(key), key_slot)
    }

    pub fn sectors(&self) -> &BTreeSet<SectorNumber> {
        &self.sectors
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn key_slot(&self) -> KeySlot {
        self.key_slot
    }

    pub fn description(&self) -> String {
        format!(
            "Sector(s): {}\nKey: {}\nSlot(s): {}",
            format_ranges(self.sectors.iter().map(|n| i32::from(n.number()))),
            self.key,
            self.key_slot
        )
    }
}
