//! Native per-version shapes of each event, and the tagged unions over them.

use chainassets_core::{AccountId, AssetId, Balance, EventKind, SpecVersion};
use serde::Deserialize;

// ─── Issued ──────────────────────────────────────────────────────────────────

/// `[asset_id, owner, total_supply]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuedV1101(pub AssetId, pub AccountId, pub Balance);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IssuedV1201 {
    pub asset_id: AssetId,
    pub owner: AccountId,
    pub total_supply: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedEvent {
    V1101(IssuedV1101),
    V1201(IssuedV1201),
}

impl IssuedEvent {
    pub fn version(&self) -> SpecVersion {
        match self {
            IssuedEvent::V1101(_) => SpecVersion::V1101,
            IssuedEvent::V1201(_) => SpecVersion::V1201,
        }
    }
}

// ─── Burned ──────────────────────────────────────────────────────────────────

/// `[asset_id, owner, balance]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BurnedV1101(pub AssetId, pub AccountId, pub Balance);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BurnedV1201 {
    pub asset_id: AssetId,
    pub owner: AccountId,
    pub balance: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BurnedEvent {
    V1101(BurnedV1101),
    V1201(BurnedV1201),
}

impl BurnedEvent {
    pub fn version(&self) -> SpecVersion {
        match self {
            BurnedEvent::V1101(_) => SpecVersion::V1101,
            BurnedEvent::V1201(_) => SpecVersion::V1201,
        }
    }
}

// ─── Transferred ─────────────────────────────────────────────────────────────

/// `[asset_id, from, to, amount]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransferredV1101(pub AssetId, pub AccountId, pub AccountId, pub Balance);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TransferredV1201 {
    pub asset_id: AssetId,
    pub from: AccountId,
    pub to: AccountId,
    pub amount: Balance,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferredEvent {
    V1101(TransferredV1101),
    V1201(TransferredV1201),
}

impl TransferredEvent {
    pub fn version(&self) -> SpecVersion {
        match self {
            TransferredEvent::V1101(_) => SpecVersion::V1101,
            TransferredEvent::V1201(_) => SpecVersion::V1201,
        }
    }
}

// ─── DecodedEvent ────────────────────────────────────────────────────────────

/// Any decoded event, still in its version-native shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedEvent {
    Issued(IssuedEvent),
    Burned(BurnedEvent),
    Transferred(TransferredEvent),
}

impl DecodedEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DecodedEvent::Issued(_) => EventKind::Issued,
            DecodedEvent::Burned(_) => EventKind::Burned,
            DecodedEvent::Transferred(_) => EventKind::Transferred,
        }
    }

    pub fn version(&self) -> SpecVersion {
        match self {
            DecodedEvent::Issued(e) => e.version(),
            DecodedEvent::Burned(e) => e.version(),
            DecodedEvent::Transferred(e) => e.version(),
        }
    }
}
