//! Canonical record builder.
//!
//! | kind        | from   | to        | balance      |
//! |-------------|--------|-----------|--------------|
//! | ISSUED      | `""`   | owner     | total supply |
//! | BURNED      | owner  | `""`      | burned       |
//! | TRANSFERRED | sender | recipient | amount       |

use chainassets_core::{
    error::BuildError,
    event::EventKind,
    record::{CanonicalTransfer, TransferId, TransferStatus},
};

use crate::normalizer::NormalizedTransfer;

/// Build the persisted record for one event.
///
/// Fails instead of emitting a record whose addresses do not fit the kind.
pub fn build(
    id: TransferId,
    kind: EventKind,
    normalized: &NormalizedTransfer,
) -> Result<CanonicalTransfer, BuildError> {
    let (from, to) = match (kind, &normalized.from, &normalized.to) {
        (EventKind::Issued, None, Some(owner)) => (String::new(), owner.to_hex()),
        (EventKind::Burned, Some(owner), None) => (owner.to_hex(), String::new()),
        (EventKind::Transferred, Some(sender), Some(recipient)) => {
            (sender.to_hex(), recipient.to_hex())
        }
        (kind, from, to) => {
            return Err(BuildError::AddressShape {
                kind,
                from_present: from.is_some(),
                to_present: to.is_some(),
            })
        }
    };

    Ok(CanonicalTransfer {
        id,
        asset_id: normalized.asset_id.to_string(),
        from,
        to,
        balance: normalized.amount,
        status: TransferStatus::from(kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainassets_core::{AccountId, AssetId, Balance};

    fn acc(byte: u8) -> AccountId {
        AccountId([byte; 20])
    }

    fn normalized(from: Option<AccountId>, to: Option<AccountId>) -> NormalizedTransfer {
        NormalizedTransfer {
            asset_id: AssetId(7),
            from,
            to,
            amount: Balance::from(10u64),
        }
    }

    #[test]
    fn issued_has_empty_from() {
        let rec = build(
            TransferId::from_position(1, 0),
            EventKind::Issued,
            &normalized(None, Some(acc(0xab))),
        )
        .unwrap();
        assert_eq!(rec.from, "");
        assert_eq!(rec.to, format!("0x{}", "ab".repeat(20)));
        assert_eq!(rec.status, TransferStatus::Issued);
        assert_eq!(rec.asset_id, "7");
    }

    #[test]
    fn burned_has_empty_to() {
        let rec = build(
            TransferId::from_position(1, 0),
            EventKind::Burned,
            &normalized(Some(acc(0xab)), None),
        )
        .unwrap();
        assert_eq!(rec.to, "");
        assert_eq!(rec.from.len(), 42);
        assert_eq!(rec.status, TransferStatus::Burned);
    }

    #[test]
    fn transferred_has_both() {
        let rec = build(
            TransferId::from_position(1, 0),
            EventKind::Transferred,
            &normalized(Some(acc(1)), Some(acc(2))),
        )
        .unwrap();
        assert!(!rec.from.is_empty());
        assert!(!rec.to.is_empty());
        assert_ne!(rec.from, rec.to);
        assert_eq!(rec.status, TransferStatus::Transferred);
    }

    #[test]
    fn mismatched_shape_is_rejected() {
        let cases = [
            (EventKind::Issued, normalized(Some(acc(1)), Some(acc(2)))),
            (EventKind::Burned, normalized(None, Some(acc(2)))),
            (EventKind::Transferred, normalized(Some(acc(1)), None)),
            (EventKind::Transferred, normalized(None, None)),
        ];
        for (kind, n) in cases {
            let err = build(TransferId::from_position(1, 0), kind, &n).unwrap_err();
            assert!(matches!(err, BuildError::AddressShape { kind: k, .. } if k == kind));
        }
    }
}
