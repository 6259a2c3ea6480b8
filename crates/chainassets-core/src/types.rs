//! Primitive field types shared by every event layout.
//!
//! Archives encode integers inconsistently: small values arrive as JSON
//! numbers, values beyond 2^53 as decimal strings, some tooling emits `0x` hex.
//! All three are accepted; floats and negative values are rejected. JSON
//! numbers of any width are read exactly (serde_json `arbitrary_precision`).

use alloy_primitives::U256;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

/// Byte length of a Moonriver account (`AccountId20`).
pub const ACCOUNT_ID_LEN: usize = 20;

/// Map key under which serde_json `arbitrary_precision` hands over numbers
/// that fit no primitive.
const JSON_NUMBER_TOKEN: &str = "$serde_json::private::Number";

// ─── Integers ────────────────────────────────────────────────────────────────

/// Parse a decimal or `0x`/`0X`-prefixed hex string into a U256.
pub fn parse_uint(value: &str) -> Result<U256, FieldError> {
    let trimmed = value.trim();
    let err = |reason: String| FieldError::Integer {
        value: value.to_string(),
        reason,
    };
    let (digits, radix) = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(err("no digits".into()));
    }
    U256::from_str_radix(digits, radix).map_err(|e| err(e.to_string()))
}

struct UintVisitor;

impl<'de> Visitor<'de> for UintVisitor {
    type Value = U256;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative integer, decimal string, or 0x-prefixed hex string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
        Ok(U256::from(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<U256, E> {
        u64::try_from(v)
            .map(|v| U256::from(v))
            .map_err(|_| E::custom(format!("negative integer {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
        parse_uint(v).map_err(E::custom)
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<U256, A::Error> {
        match map.next_entry::<String, String>()? {
            Some((key, digits)) if key == JSON_NUMBER_TOKEN => {
                parse_uint(&digits).map_err(de::Error::custom)
            }
            _ => Err(de::Error::invalid_type(de::Unexpected::Map, &self)),
        }
    }
}

fn deserialize_uint<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    deserializer.deserialize_any(UintVisitor)
}

// ─── AssetId ─────────────────────────────────────────────────────────────────

/// Identifier of an asset in the `assets` pallet (`u128` on Moonriver).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetId(pub u128);

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u128> for AssetId {
    fn from(v: u128) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wide = deserialize_uint(deserializer)?;
        u128::try_from(wide)
            .map(AssetId)
            .map_err(|_| de::Error::custom(format!("asset id {wide} exceeds u128")))
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

// ─── Balance ─────────────────────────────────────────────────────────────────

/// A token amount. Wider than the chain's `u128` balance type, so no value
/// the runtime can emit loses precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Balance(pub U256);

impl Balance {
    pub fn as_u256(&self) -> U256 {
        self.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Balance {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for Balance {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl From<U256> for Balance {
    fn from(v: U256) -> Self {
        Self(v)
    }
}

impl FromStr for Balance {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uint(s).map(Balance)
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_uint(deserializer).map(Balance)
    }
}

/// Always serialized as a decimal string: JSON numbers cannot carry 128-bit
/// values without loss.
impl Serialize for Balance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

// ─── AccountId ───────────────────────────────────────────────────────────────

/// A raw account identifier as emitted by the runtime.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub [u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// Canonical form: `0x` followed by lowercase hex of the full byte width.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = FieldError;

    /// Accepts `0x`-prefixed hex in any case; the byte length must be exact.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason: String| FieldError::Account {
            value: s.to_string(),
            reason,
        };
        let hex_part = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(|| err("missing 0x prefix".into()))?;
        let bytes = hex::decode(hex_part).map_err(|e| err(e.to_string()))?;
        let arr: [u8; ACCOUNT_ID_LEN] = bytes.as_slice().try_into().map_err(|_| {
            err(format!(
                "expected {ACCOUNT_ID_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(AccountId(arr))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_hex())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
