//! The canonical `transfer` record and the batch handed to a sink.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::event::EventKind;
use crate::types::Balance;

/// Zero-padding width for both id components. Wide enough for any `u32`,
/// so lexical order of ids always equals `(block_height, event_index)` order.
const ID_COMPONENT_WIDTH: usize = 10;

/// Primary key of a canonical record, derived only from the event's position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransferId(String);

impl TransferId {
    /// `"0000950000-0000000012"` for block 950000, event 12.
    pub fn from_position(block_height: u32, event_index: u32) -> Self {
        Self(format!(
            "{block_height:0w$}-{event_index:0w$}",
            w = ID_COMPONENT_WIDTH
        ))
    }

    /// Accept a stored id back, checking the `height-index` shape.
    pub fn parse(s: &str) -> Option<Self> {
        let (height, index) = s.split_once('-')?;
        let well_formed = |part: &str| {
            part.len() == ID_COMPONENT_WIDTH && part.bytes().all(|b| b.is_ascii_digit())
        };
        (well_formed(height) && well_formed(index)).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status column of a record. Stored as `varchar(11)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransferStatus {
    Issued,
    Burned,
    Transferred,
}

impl TransferStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TransferStatus::Issued => "ISSUED",
            TransferStatus::Burned => "BURNED",
            TransferStatus::Transferred => "TRANSFERRED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ISSUED" => Some(TransferStatus::Issued),
            "BURNED" => Some(TransferStatus::Burned),
            "TRANSFERRED" => Some(TransferStatus::Transferred),
            _ => None,
        }
    }
}

impl From<EventKind> for TransferStatus {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Issued => TransferStatus::Issued,
            EventKind::Burned => TransferStatus::Burned,
            EventKind::Transferred => TransferStatus::Transferred,
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted row of the `transfer` table.
///
/// `from` is empty for issuance, `to` is empty for burns, and both are set
/// for transfers. Addresses are `0x` + lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalTransfer {
    pub id: TransferId,
    pub asset_id: String,
    pub from: String,
    pub to: String,
    pub balance: Balance,
    pub status: TransferStatus,
}

/// The complete output of one batch: everything the sink persists as a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBatch {
    /// Records in chain emission order.
    pub records: Vec<CanonicalTransfer>,
    /// Height of the first block in the batch (`None` for an empty batch).
    pub first_height: Option<u32>,
    /// Height of the last block in the batch.
    pub last_height: Option<u32>,
    /// Matching events skipped because their spec version is unknown
    /// (only non-zero under an explicit skip policy).
    pub skipped: usize,
    /// Events of other pallets or methods, passed over without decoding.
    pub ignored: usize,
}

impl TransferBatch {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
