//! Raw events and blocks as delivered by the chain event feed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::TransferId;

/// Pallet that emits all recognized events.
pub const ASSETS_PALLET: &str = "Assets";

/// The three `assets` pallet events this system indexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventKind {
    Issued,
    Burned,
    Transferred,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Issued, EventKind::Burned, EventKind::Transferred];

    /// The event method name inside the pallet, e.g. `"Issued"`.
    pub fn method(self) -> &'static str {
        match self {
            EventKind::Issued => "Issued",
            EventKind::Burned => "Burned",
            EventKind::Transferred => "Transferred",
        }
    }

    /// Parse a qualified event name such as `"Assets.Issued"`.
    ///
    /// The pallet part is compared case-insensitively because archives and
    /// handler registrations disagree on it (`assets.Issued` vs `Assets.Issued`).
    /// The method part must match exactly.
    pub fn from_event_name(name: &str) -> Option<Self> {
        let (pallet, method) = name.split_once('.')?;
        if !pallet.eq_ignore_ascii_case(ASSETS_PALLET) {
            return None;
        }
        Self::ALL.into_iter().find(|k| k.method() == method)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{ASSETS_PALLET}.{}", self.method())
    }
}

/// Hash of an event's parameter layout, taken from the runtime metadata active
/// at the emitting block.
///
/// Stored normalized: lowercase hex without the `0x` prefix, so lookups are
/// insensitive to how the feed formats it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct EventFingerprint(String);

impl EventFingerprint {
    pub fn new(hex: impl AsRef<str>) -> Self {
        let hex = hex.as_ref().trim();
        let hex = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix("0X"))
            .unwrap_or(hex);
        Self(hex.to_ascii_lowercase())
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl From<String> for EventFingerprint {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<EventFingerprint> for String {
    fn from(fp: EventFingerprint) -> Self {
        fp.0
    }
}

impl fmt::Display for EventFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw, undecoded event item. This is the input to every decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    /// Qualified event name, e.g. `"Assets.Transferred"`.
    pub name: String,
    /// Parameter payload as encoded by the archive: a JSON array for
    /// positional layouts, a JSON object for named layouts.
    pub params: serde_json::Value,
    pub block_height: u32,
    /// Position of the event within its block.
    pub event_index: u32,
    pub fingerprint: EventFingerprint,
}

impl RawEvent {
    /// The recognized kind of this event, or `None` for any other event.
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_event_name(&self.name)
    }

    /// The record id this event would produce.
    pub fn transfer_id(&self) -> TransferId {
        TransferId::from_position(self.block_height, self.event_index)
    }
}

/// One block and its event items, in emission order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Unix timestamp in milliseconds, if the feed provides it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default)]
    pub events: Vec<RawEvent>,
}
