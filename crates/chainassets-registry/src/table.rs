//! Compiled-in layout table.
//!
//! Fingerprints are the event-type hashes from the Moonriver runtime metadata.
//! `Issued` and `Burned` share a hash at V1101 (identical `[u128, AccountId20,
//! u128]` shapes), which is why lookups are keyed by kind as well.

use chainassets_core::{EventKind, SpecVersion};

/// `(kind, version, fingerprint)` for every known layout.
pub const KNOWN_LAYOUTS: &[(EventKind, SpecVersion, &str)] = &[
    (
        EventKind::Issued,
        SpecVersion::V1101,
        "6af5d1bf4b3418a7ca0383f4cc463f83e54eeee335be7c8c2ddadb7e58a924dc",
    ),
    (
        EventKind::Issued,
        SpecVersion::V1201,
        "00b4e83fd8a2b78206f9e4f83e5841b01b15461279b6952b593fddd97bfa57f8",
    ),
    (
        EventKind::Burned,
        SpecVersion::V1101,
        "6af5d1bf4b3418a7ca0383f4cc463f83e54eeee335be7c8c2ddadb7e58a924dc",
    ),
    (
        EventKind::Burned,
        SpecVersion::V1201,
        "7b313023dcadc0790714779ac69e85195d0b94fbfc5c5b1c65234ca592e0d3f7",
    ),
    (
        EventKind::Transferred,
        SpecVersion::V1101,
        "abbbc10bc7346d8c9b28e542437398fdb02f602123d38cd8b28c364093fc9ddf",
    ),
    (
        EventKind::Transferred,
        SpecVersion::V1201,
        "f65815f0a2516ce398b9e72fe858b92dc308f7815d5ec2c9ca9344c57874f4c2",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_every_version() {
        for kind in EventKind::ALL {
            for version in SpecVersion::ALL {
                assert!(
                    KNOWN_LAYOUTS
                        .iter()
                        .any(|(k, v, _)| *k == kind && *v == version),
                    "missing {kind} {version}"
                );
            }
        }
    }

    #[test]
    fn fingerprints_are_32_byte_hex() {
        for (_, _, fp) in KNOWN_LAYOUTS {
            assert_eq!(fp.len(), 64);
            assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
