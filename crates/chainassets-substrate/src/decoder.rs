//! Per-kind event decoders.
//!
//! Each decoder turns a [`RawEvent`] into its kind's tagged union, using the
//! layout of the spec version the registry resolved. Decoding is all or
//! nothing: a payload either matches the layout exactly or yields
//! [`DecodeError::DecodeFailure`].

use chainassets_core::{
    error::DecodeError,
    event::{EventKind, RawEvent},
    spec::{Layout, SpecVersion},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::layouts::{BurnedEvent, DecodedEvent, IssuedEvent, TransferredEvent};

/// A decoder for one event kind.
pub trait EventDecoder {
    /// The event kind this decoder accepts.
    const KIND: EventKind;

    /// The tagged union produced for this kind.
    type Output;

    /// Decode `raw` using the layout of `version`.
    fn decode(&self, raw: &RawEvent, version: SpecVersion) -> Result<Self::Output, DecodeError>;
}

/// Decoder for `Assets.Issued`.
#[derive(Debug, Default, Clone, Copy)]
pub struct IssuedDecoder;

/// Decoder for `Assets.Burned`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BurnedDecoder;

/// Decoder for `Assets.Transferred`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransferredDecoder;

impl EventDecoder for IssuedDecoder {
    const KIND: EventKind = EventKind::Issued;
    type Output = IssuedEvent;

    fn decode(&self, raw: &RawEvent, version: SpecVersion) -> Result<IssuedEvent, DecodeError> {
        ensure_kind(raw, Self::KIND)?;
        Ok(match version {
            SpecVersion::V1101 => IssuedEvent::V1101(decode_params(raw, Self::KIND, version)?),
            SpecVersion::V1201 => IssuedEvent::V1201(decode_params(raw, Self::KIND, version)?),
        })
    }
}

impl EventDecoder for BurnedDecoder {
    const KIND: EventKind = EventKind::Burned;
    type Output = BurnedEvent;

    fn decode(&self, raw: &RawEvent, version: SpecVersion) -> Result<BurnedEvent, DecodeError> {
        ensure_kind(raw, Self::KIND)?;
        Ok(match version {
            SpecVersion::V1101 => BurnedEvent::V1101(decode_params(raw, Self::KIND, version)?),
            SpecVersion::V1201 => BurnedEvent::V1201(decode_params(raw, Self::KIND, version)?),
        })
    }
}

impl EventDecoder for TransferredDecoder {
    const KIND: EventKind = EventKind::Transferred;
    type Output = TransferredEvent;

    fn decode(
        &self,
        raw: &RawEvent,
        version: SpecVersion,
    ) -> Result<TransferredEvent, DecodeError> {
        ensure_kind(raw, Self::KIND)?;
        Ok(match version {
            SpecVersion::V1101 => {
                TransferredEvent::V1101(decode_params(raw, Self::KIND, version)?)
            }
            SpecVersion::V1201 => {
                TransferredEvent::V1201(decode_params(raw, Self::KIND, version)?)
            }
        })
    }
}

/// Dispatch `raw` to the decoder for `kind`.
pub fn decode_event(
    kind: EventKind,
    raw: &RawEvent,
    version: SpecVersion,
) -> Result<DecodedEvent, DecodeError> {
    match kind {
        EventKind::Issued => IssuedDecoder.decode(raw, version).map(DecodedEvent::Issued),
        EventKind::Burned => BurnedDecoder.decode(raw, version).map(DecodedEvent::Burned),
        EventKind::Transferred => TransferredDecoder
            .decode(raw, version)
            .map(DecodedEvent::Transferred),
    }
}

fn ensure_kind(raw: &RawEvent, expected: EventKind) -> Result<(), DecodeError> {
    match raw.kind() {
        Some(kind) if kind == expected => Ok(()),
        _ => Err(DecodeError::InvalidEventKind {
            expected,
            got: raw.name.clone(),
        }),
    }
}

/// Deserialize the params of `raw` into `T` after checking the payload shape
/// matches the version's layout. serde would happily read a named struct from
/// an array, so the shape check keeps the two layouts from being confused.
fn decode_params<T: DeserializeOwned>(
    raw: &RawEvent,
    kind: EventKind,
    version: SpecVersion,
) -> Result<T, DecodeError> {
    let failure = |reason: String| DecodeError::DecodeFailure {
        kind,
        version,
        reason,
    };

    match (version.layout(), &raw.params) {
        (Layout::Positional, Value::Array(_)) | (Layout::Named, Value::Object(_)) => {}
        (layout, other) => {
            return Err(failure(format!(
                "{layout} layout expects {}, got {}",
                match layout {
                    Layout::Positional => "an array",
                    Layout::Named => "an object",
                },
                json_type_name(other)
            )));
        }
    }

    T::deserialize(&raw.params).map_err(|e| failure(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layouts::{BurnedV1101, IssuedV1201, TransferredV1101, TransferredV1201};
    use chainassets_core::{AccountId, AssetId, Balance, EventFingerprint};
    use serde_json::json;

    const ALICE: &str = "0xf24ff3a9cf04c71dbc94d0b566f7a27b94566cac";
    const BOB: &str = "0x3cd0a705a2dc65e5b1e1205896baa2be8a07c6e0";

    fn raw(name: &str, params: Value) -> RawEvent {
        RawEvent {
            name: name.into(),
            params,
            block_height: 950_000,
            event_index: 1,
            fingerprint: EventFingerprint::new("00"),
        }
    }

    fn acc(s: &str) -> AccountId {
        s.parse().unwrap()
    }

    #[test]
    fn issued_named_layout() {
        let ev = raw(
            "Assets.Issued",
            json!({"assetId": 7, "owner": ALICE, "totalSupply": "1000"}),
        );
        let decoded = IssuedDecoder.decode(&ev, SpecVersion::V1201).unwrap();
        assert_eq!(
            decoded,
            IssuedEvent::V1201(IssuedV1201 {
                asset_id: AssetId(7),
                owner: acc(ALICE),
                total_supply: Balance::from(1000u64),
            })
        );
    }

    #[test]
    fn burned_positional_layout() {
        let ev = raw("Assets.Burned", json!(["7", ALICE, 200]));
        let decoded = BurnedDecoder.decode(&ev, SpecVersion::V1101).unwrap();
        assert_eq!(
            decoded,
            BurnedEvent::V1101(BurnedV1101(AssetId(7), acc(ALICE), Balance::from(200u64)))
        );
    }

    #[test]
    fn transferred_both_layouts() {
        let legacy = raw("Assets.Transferred", json!([7, ALICE, BOB, 50]));
        assert_eq!(
            TransferredDecoder.decode(&legacy, SpecVersion::V1101).unwrap(),
            TransferredEvent::V1101(TransferredV1101(
                AssetId(7),
                acc(ALICE),
                acc(BOB),
                Balance::from(50u64)
            ))
        );

        let current = raw(
            "Assets.Transferred",
            json!({"assetId": 7, "from": ALICE, "to": BOB, "amount": 50}),
        );
        assert_eq!(
            TransferredDecoder.decode(&current, SpecVersion::V1201).unwrap(),
            TransferredEvent::V1201(TransferredV1201 {
                asset_id: AssetId(7),
                from: acc(ALICE),
                to: acc(BOB),
                amount: Balance::from(50u64),
            })
        );
    }

    #[test]
    fn wrong_kind_rejected() {
        let ev = raw("Assets.Burned", json!(["7", ALICE, 200]));
        let err = IssuedDecoder.decode(&ev, SpecVersion::V1101).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidEventKind {
                expected: EventKind::Issued,
                got: "Assets.Burned".into(),
            }
        );
    }

    #[test]
    fn layout_shape_mismatch_is_decode_failure() {
        // A positional payload under a named version, and vice versa.
        let positional = raw("Assets.Burned", json!(["7", ALICE, 200]));
        let err = BurnedDecoder.decode(&positional, SpecVersion::V1201).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DecodeFailure { version: SpecVersion::V1201, .. }
        ));

        let named = raw("Assets.Burned", json!({"assetId": 7, "owner": ALICE, "balance": 1}));
        let err = BurnedDecoder.decode(&named, SpecVersion::V1101).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeFailure { .. }));
    }

    #[test]
    fn no_partial_decode() {
        let cases = [
            // missing field
            json!({"assetId": 7, "owner": ALICE}),
            // unknown field would otherwise be dropped silently
            json!({"assetId": 7, "owner": ALICE, "totalSupply": 1, "extra": 1}),
            // short account
            json!({"assetId": 7, "owner": "0x1234", "totalSupply": 1}),
            // negative supply
            json!({"assetId": 7, "owner": ALICE, "totalSupply": -1}),
        ];
        for params in cases {
            let ev = raw("Assets.Issued", params.clone());
            assert!(
                IssuedDecoder.decode(&ev, SpecVersion::V1201).is_err(),
                "accepted {params}"
            );
        }
    }

    #[test]
    fn positional_arity_is_exact() {
        let short = raw("Assets.Transferred", json!([7, ALICE, 50]));
        assert!(TransferredDecoder.decode(&short, SpecVersion::V1101).is_err());
        let long = raw("Assets.Transferred", json!([7, ALICE, BOB, 50, 1]));
        assert!(TransferredDecoder.decode(&long, SpecVersion::V1101).is_err());
    }

    #[test]
    fn decode_event_dispatches_by_kind() {
        let ev = raw("assets.Issued", json!([7, ALICE, 1000]));
        let decoded = decode_event(EventKind::Issued, &ev, SpecVersion::V1101).unwrap();
        assert_eq!(decoded.kind(), EventKind::Issued);
        assert_eq!(decoded.version(), SpecVersion::V1101);
    }
}
