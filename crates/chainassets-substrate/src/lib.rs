//! # chainassets-substrate
//!
//! Decoders for the `assets` pallet events of Moonriver, plus the version
//! normalizer and canonical record builder.
//!
//! ## Pipeline per event
//! - [`decoder`]: raw params → version-tagged variant ([`layouts`])
//! - [`normalizer`]: variant → [`NormalizedTransfer`] (version-independent)
//! - [`builder`]: normalized fields + kind → `CanonicalTransfer`
//!
//! ## Layouts
//! - `V1101`: positional, `[asset_id, account, (account,) amount]`
//! - `V1201`: named, `{assetId, owner|from, (to,) totalSupply|balance|amount}`

pub mod builder;
pub mod decoder;
pub mod layouts;
pub mod normalizer;

pub use builder::build;
pub use decoder::{decode_event, BurnedDecoder, EventDecoder, IssuedDecoder, TransferredDecoder};
pub use layouts::{BurnedEvent, DecodedEvent, IssuedEvent, TransferredEvent};
pub use normalizer::{normalize, Normalize, NormalizedTransfer};
