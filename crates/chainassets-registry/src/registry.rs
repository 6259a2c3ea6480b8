//! `SpecVersionRegistry`: read-only fingerprint → spec version lookup.

use chainassets_core::{
    error::{DecodeError, RegistryError},
    event::{EventFingerprint, EventKind},
    spec::SpecVersion,
};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use crate::table::KNOWN_LAYOUTS;

/// One registered layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    pub kind: EventKind,
    pub version: SpecVersion,
    pub fingerprint: EventFingerprint,
}

impl RegistryEntry {
    pub fn new(kind: EventKind, version: SpecVersion, fingerprint: impl AsRef<str>) -> Self {
        Self {
            kind,
            version,
            fingerprint: EventFingerprint::new(fingerprint),
        }
    }
}

/// Immutable registry of known event layouts.
///
/// There is no way to mutate a registry after construction; share it by
/// reference (it is `Send + Sync`).
#[derive(Debug, Clone)]
pub struct SpecVersionRegistry {
    by_fingerprint: HashMap<(EventKind, EventFingerprint), SpecVersion>,
    /// Sorted by kind, then version, for stable listing.
    entries: Vec<RegistryEntry>,
}

static GLOBAL: OnceLock<SpecVersionRegistry> = OnceLock::new();

impl SpecVersionRegistry {
    /// The process-wide registry, built from [`KNOWN_LAYOUTS`] on first use.
    pub fn global() -> &'static SpecVersionRegistry {
        GLOBAL.get_or_init(Self::builtin)
    }

    /// Build a registry from the compiled-in table.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (kind, version, fp) in KNOWN_LAYOUTS {
            registry.insert_unchecked(RegistryEntry::new(*kind, *version, fp));
        }
        registry.finish();
        debug!(layouts = registry.len(), "spec version registry built");
        registry
    }

    /// Build a registry from explicit entries.
    ///
    /// Repeating an identical entry is harmless; mapping one
    /// `(kind, fingerprint)` pair to two versions is a
    /// [`RegistryError::Conflict`].
    pub fn from_entries(
        entries: impl IntoIterator<Item = RegistryEntry>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::empty();
        for entry in entries {
            let key = (entry.kind, entry.fingerprint.clone());
            match registry.by_fingerprint.get(&key) {
                Some(existing) if *existing == entry.version => continue,
                Some(existing) => {
                    return Err(RegistryError::Conflict {
                        kind: entry.kind,
                        fingerprint: entry.fingerprint.to_string(),
                        existing: *existing,
                        conflicting: entry.version,
                    });
                }
                None => registry.insert_unchecked(entry),
            }
        }
        registry.finish();
        Ok(registry)
    }

    fn empty() -> Self {
        Self {
            by_fingerprint: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn insert_unchecked(&mut self, entry: RegistryEntry) {
        self.by_fingerprint
            .insert((entry.kind, entry.fingerprint.clone()), entry.version);
        self.entries.push(entry);
    }

    fn finish(&mut self) {
        self.entries
            .sort_by(|a, b| (a.kind, a.version).cmp(&(b.kind, b.version)));
    }

    /// Resolve the spec version whose layout applies to an event of `kind`
    /// carrying `fingerprint`.
    pub fn resolve_version(
        &self,
        kind: EventKind,
        fingerprint: &EventFingerprint,
    ) -> Result<SpecVersion, DecodeError> {
        self.by_fingerprint
            .get(&(kind, fingerprint.clone()))
            .copied()
            .ok_or_else(|| DecodeError::UnknownSpecVersion {
                kind,
                fingerprint: fingerprint.to_string(),
            })
    }

    /// All versions registered for `kind`, ascending.
    pub fn versions_for(&self, kind: EventKind) -> Vec<SpecVersion> {
        let mut versions: Vec<SpecVersion> = self
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.version)
            .collect();
        versions.dedup();
        versions
    }

    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Number of registered `(kind, fingerprint)` pairs.
    pub fn len(&self) -> usize {
        self.by_fingerprint.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fingerprint.is_empty()
    }
}

impl Default for SpecVersionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
