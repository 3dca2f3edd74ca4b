use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ledger::{Slot, SLOT_COUNT};

pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope<'a> {
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    pub version: &'static str,
    pub data: &'a [Slot],
}

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("backup is not a JSON object: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("backup has no `data` collection")]
    MissingData,
    #[error("slot entry {index} is invalid: {source}")]
    InvalidSlot {
        index: usize,
        source: serde_json::Error,
    },
    #[error("backup holds {found} slots, expected {}", SLOT_COUNT)]
    WrongCount { found: usize },
    #[error("slot number {0} is out of range or repeated")]
    BadNumber(u32),
}

pub fn export(slots: &[Slot], now: OffsetDateTime) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ExportEnvelope {
        timestamp: now,
        version: FORMAT_VERSION,
        data: slots,
    })
}

/// `rifa-backup-YYYY-MM-DD.json`
pub fn export_filename(now: OffsetDateTime) -> String {
    format!("rifa-backup-{}.json", now.date())
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImportEnvelope {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Parses a backup and returns its slots ordered by number. Nothing is
/// applied here; callers replace the ledger only on `Ok`.
pub fn parse_import(text: &str) -> Result<Vec<Slot>, ImportError> {
    let envelope: ImportEnvelope = serde_json::from_str(text)?;
    let Some(serde_json::Value::Array(entries)) = envelope.data else {
        return Err(ImportError::MissingData);
    };

    let mut slots = entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value::<Slot>(entry)
                .map_err(|source| ImportError::InvalidSlot { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    slots.sort_by_key(|s| s.number);
    check_numbering(&slots)?;
    Ok(slots)
}

/// Slots must be exactly 1..=SLOT_COUNT, in order, each once.
pub fn check_numbering(slots: &[Slot]) -> Result<(), ImportError> {
    if slots.len() != SLOT_COUNT as usize {
        return Err(ImportError::WrongCount { found: slots.len() });
    }
    for (expected, slot) in (1..=SLOT_COUNT).zip(slots) {
        if slot.number != expected {
            return Err(ImportError::BadNumber(slot.number));
        }
    }
    Ok(())
}
