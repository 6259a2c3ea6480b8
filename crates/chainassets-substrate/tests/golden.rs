//! Golden fixture integration tests.
//!
//! Each fixture in `fixtures/moonriver/` holds one raw `assets` event as the
//! archive delivers it and the canonical record it must produce. The test
//! runs the full per-event path: registry → decoder → normalizer → builder.

use chainassets_core::{
    event::RawEvent,
    record::{CanonicalTransfer, TransferStatus},
    spec::SpecVersion,
};
use chainassets_registry::SpecVersionRegistry;
use chainassets_substrate::{build, decode_event, normalize};

// ─── Helpers ──────────────────────────────────────────────────────────────────

struct Fixture {
    version: SpecVersion,
    event: RawEvent,
    expected: CanonicalTransfer,
}

/// The fixtures live two levels above the crate root.
fn load_fixture(name: &str) -> Fixture {
    let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../fixtures/moonriver");
    path.push(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("fixture {} not readable: {e}", path.display()));
    let json: serde_json::Value = serde_json::from_str(&text).unwrap();
    Fixture {
        version: serde_json::from_value(json["version"].clone()).unwrap(),
        event: serde_json::from_value(json["event"].clone()).unwrap(),
        expected: serde_json::from_value(json["expected"].clone()).unwrap(),
    }
}

fn run(fixture: &Fixture) -> CanonicalTransfer {
    let raw = &fixture.event;
    let kind = raw.kind().expect("fixture event is not an assets event");
    let version = SpecVersionRegistry::global()
        .resolve_version(kind, &raw.fingerprint)
        .expect("fingerprint not registered");
    assert_eq!(version, fixture.version, "resolved wrong version");

    let decoded = decode_event(kind, raw, version).expect("decode failed");
    assert_eq!(decoded.version(), version);
    build(raw.transfer_id(), kind, &normalize(&decoded)).expect("build failed")
}

fn assert_golden(name: &str) {
    let fixture = load_fixture(name);
    let record = run(&fixture);
    assert_eq!(record, fixture.expected, "{name}");
}

// ─── Issued ───────────────────────────────────────────────────────────────────

#[test]
fn issued_v1101_golden() {
    assert_golden("issued-v1101.json");
}

#[test]
fn issued_v1201_golden() {
    assert_golden("issued-v1201.json");
}

// ─── Burned ───────────────────────────────────────────────────────────────────

#[test]
fn burned_v1101_golden() {
    assert_golden("burned-v1101.json");
}

#[test]
fn burned_v1201_golden() {
    assert_golden("burned-v1201.json");
}

// ─── Transferred ──────────────────────────────────────────────────────────────

#[test]
fn transferred_v1101_golden() {
    assert_golden("transferred-v1101.json");
}

#[test]
fn transferred_v1201_golden() {
    assert_golden("transferred-v1201.json");
}

#[test]
fn transferred_u128_max_keeps_precision() {
    let fixture = load_fixture("transferred-u128-max.json");
    let record = run(&fixture);
    assert_eq!(record.balance.to_string(), u128::MAX.to_string());
    assert_eq!(record, fixture.expected);
}

// ─── Cross-version ────────────────────────────────────────────────────────────

#[test]
fn versions_produce_same_field_set() {
    for (legacy, current) in [
        ("issued-v1101.json", "issued-v1201.json"),
        ("burned-v1101.json", "burned-v1201.json"),
        ("transferred-v1101.json", "transferred-v1201.json"),
    ] {
        let a = run(&load_fixture(legacy));
        let b = run(&load_fixture(current));
        assert_eq!(a.asset_id, b.asset_id);
        assert_eq!(a.from, b.from);
        assert_eq!(a.to, b.to);
        assert_eq!(a.balance, b.balance);
        assert_eq!(a.status, b.status);
        assert_ne!(a.id, b.id);
    }
}

#[test]
fn record_serializes_to_canonical_json() {
    let record = run(&load_fixture("issued-v1201.json"));
    assert_eq!(record.status, TransferStatus::Issued);
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["assetId"], "7");
    assert_eq!(json["from"], "");
    assert_eq!(json["balance"], "1000");
    assert_eq!(json["status"], "ISSUED");
}
