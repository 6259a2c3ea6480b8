//! Maps version-native event shapes onto one version-independent field set.
//!
//! Every tagged union is matched exhaustively and without a wildcard arm, so
//! a new `SpecVersion` does not compile until it is handled here.

use chainassets_core::{AccountId, AssetId, Balance};

use crate::layouts::{
    BurnedEvent, BurnedV1101, BurnedV1201, DecodedEvent, IssuedEvent, IssuedV1101, IssuedV1201,
    TransferredEvent, TransferredV1101, TransferredV1201,
};

/// The common intermediate fields of every event kind.
///
/// `from` is the party whose holdings shrink, `to` the party whose holdings
/// grow: issuance has no `from`, a burn has no `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedTransfer {
    pub asset_id: AssetId,
    pub from: Option<AccountId>,
    pub to: Option<AccountId>,
    /// Total supply, burned balance, or transferred amount.
    pub amount: Balance,
}

/// Conversion of a decoded event into [`NormalizedTransfer`].
pub trait Normalize {
    fn normalize(&self) -> NormalizedTransfer;
}

impl Normalize for IssuedEvent {
    fn normalize(&self) -> NormalizedTransfer {
        match self {
            IssuedEvent::V1101(IssuedV1101(asset_id, owner, total_supply)) => NormalizedTransfer {
                asset_id: *asset_id,
                from: None,
                to: Some(*owner),
                amount: *total_supply,
            },
            IssuedEvent::V1201(IssuedV1201 {
                asset_id,
                owner,
                total_supply,
            }) => NormalizedTransfer {
                asset_id: *asset_id,
                from: None,
                to: Some(*owner),
                amount: *total_supply,
            },
        }
    }
}

impl Normalize for BurnedEvent {
    fn normalize(&self) -> NormalizedTransfer {
        match self {
            BurnedEvent::V1101(BurnedV1101(asset_id, owner, balance)) => NormalizedTransfer {
                asset_id: *asset_id,
                from: Some(*owner),
                to: None,
                amount: *balance,
            },
            BurnedEvent::V1201(BurnedV1201 {
                asset_id,
                owner,
                balance,
            }) => NormalizedTransfer {
                asset_id: *asset_id,
                from: Some(*owner),
                to: None,
                amount: *balance,
            },
        }
    }
}

impl Normalize for TransferredEvent {
    fn normalize(&self) -> NormalizedTransfer {
        match self {
            TransferredEvent::V1101(TransferredV1101(asset_id, from, to, amount)) => {
                NormalizedTransfer {
                    asset_id: *asset_id,
                    from: Some(*from),
                    to: Some(*to),
                    amount: *amount,
                }
            }
            TransferredEvent::V1201(TransferredV1201 {
                asset_id,
                from,
                to,
                amount,
            }) => NormalizedTransfer {
                asset_id: *asset_id,
                from: Some(*from),
                to: Some(*to),
                amount: *amount,
            },
        }
    }
}

impl Normalize for DecodedEvent {
    fn normalize(&self) -> NormalizedTransfer {
        match self {
            DecodedEvent::Issued(e) => e.normalize(),
            DecodedEvent::Burned(e) => e.normalize(),
            DecodedEvent::Transferred(e) => e.normalize(),
        }
    }
}

/// Normalize any decoded event.
pub fn normalize(event: &DecodedEvent) -> NormalizedTransfer {
    event.normalize()
}
