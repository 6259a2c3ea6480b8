//! # chainassets-registry
//!
//! Spec Version Registry for ChainAssets.
//!
//! Maps `(event kind, metadata fingerprint)` to the [`SpecVersion`] whose
//! layout decodes that event. The mapping is compiled in ([`table`]), built
//! once, and read-only afterwards; [`SpecVersionRegistry::global`] hands out
//! the process-wide instance.
//!
//! [`SpecVersion`]: chainassets_core::SpecVersion

pub mod registry;
pub mod table;

pub use registry::{RegistryEntry, SpecVersionRegistry};
pub use table::KNOWN_LAYOUTS;
