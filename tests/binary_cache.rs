#![cfg(feature = "binary-cache")]

use waypost::{Actor, DeserializeError, Redirect, RuleSet, RuleSetBuilder, Trigger};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn simple_ruleset() -> RuleSet {
    RuleSetBuilder::new()
        .rule("editors", |r| {
            r.on(Trigger::Login).role("editor").weight(-5).to("/dashboard")
        })
        .rule("everyone", |r| r.on(Trigger::Login).to("/welcome"))
        .compile()
        .unwrap()
}

fn complex_ruleset() -> RuleSet {
    RuleSetBuilder::new()
        .base("https://example.org")
        .rule("password_reset", |r| {
            r.on(Trigger::OneTimeLogin).weight(-10).to("/user/password")
        })
        .rule("editors", |r| {
            r.label("Editor dashboard")
                .on(Trigger::Login)
                .on(Trigger::Registration)
                .role("editor")
                .role("admin")
                .page("/user/*")
                .language("en")
                .weight(-5)
                .to("/dashboard")
        })
        .rule("stay_put", |r| r.on(Trigger::Login).page("/node/*").to("<current>"))
        .rule("logout_front", |r| r.on(Trigger::Logout).weight(10).to("<front>"))
        .rule("broken", |r| r.on(Trigger::Login).weight(20).to("not-a-destination"))
        .rule("retired", |r| r.on(Trigger::Login).weight(30).to("/old").disabled())
        .compile()
        .unwrap()
}

// ---------------------------------------------------------------------------
// Round-trips
// ---------------------------------------------------------------------------

#[test]
fn round_trip_simple() {
    let original = simple_ruleset();
    let bytes = original.to_bytes(None).unwrap();
    let restored = RuleSet::from_bytes(&bytes).unwrap();

    assert_eq!(restored.resolution_order(), original.resolution_order());
    let actor = Actor::new().with_role("editor");
    assert_eq!(
        restored.resolve(Trigger::Login, &actor, "/user"),
        original.resolve(Trigger::Login, &actor, "/user")
    );
}

#[test]
fn round_trip_complex_preserves_behavior() {
    let original = complex_ruleset();
    let bytes = original.to_bytes(None).unwrap();
    let restored = RuleSet::from_bytes(&bytes).unwrap();

    assert_eq!(restored.base(), "https://example.org");
    assert_eq!(restored.len(), original.len());
    assert_eq!(restored.label_of("editors"), Some("Editor dashboard"));

    let events: &[(Trigger, Actor, &str)] = &[
        (
            Trigger::Login,
            Actor::new().with_role("editor").with_language("en"),
            "/user/7",
        ),
        (Trigger::Login, Actor::new(), "/node/5?page=2"),
        (Trigger::OneTimeLogin, Actor::new(), "/user/reset"),
        (Trigger::Logout, Actor::new(), "/anywhere"),
        (Trigger::Registration, Actor::new(), "/node/1"),
    ];
    for (trigger, actor, path) in events {
        assert_eq!(
            restored.resolve(*trigger, actor, path),
            original.resolve(*trigger, actor, path),
            "behavior diverged for {trigger:?} on {path}"
        );
    }
}

#[test]
fn round_trip_keeps_broken_rules_unselectable() {
    let original = complex_ruleset();
    let bytes = original.to_bytes(None).unwrap();
    let restored = RuleSet::from_bytes(&bytes).unwrap();

    // The "broken" rule still exists and still never wins.
    assert!(restored.resolution_order().contains(&"broken"));
    let result = restored.resolve(Trigger::Login, &Actor::new(), "/elsewhere");
    assert_ne!(
        result.as_ref().map(Redirect::rule_id),
        Some("broken"),
        "unselectable rule must stay unselectable after decode"
    );
}

#[test]
fn round_trip_with_source_text() {
    let original = simple_ruleset();
    let bytes = original.to_bytes(Some("rule editors: ...")).unwrap();
    let restored = RuleSet::from_bytes(&bytes).unwrap();
    assert_eq!(restored.len(), original.len());
}

#[test]
fn round_trip_empty_ruleset() {
    let original = RuleSetBuilder::new().compile().unwrap();
    let bytes = original.to_bytes(None).unwrap();
    let restored = RuleSet::from_bytes(&bytes).unwrap();
    assert!(restored.is_empty());
}

// ---------------------------------------------------------------------------
// File round-trip
// ---------------------------------------------------------------------------

#[test]
fn file_round_trip() {
    let dir = std::env::temp_dir().join("waypost_test_binary_cache");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("rules.wpc");

    let original = complex_ruleset();
    original.to_binary_file(&path, None).unwrap();
    let restored = RuleSet::from_binary_file(&path).unwrap();

    assert_eq!(restored.resolution_order(), original.resolution_order());
    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_io_error() {
    let result = RuleSet::from_binary_file("/nonexistent/waypost.wpc");
    assert!(matches!(result, Err(DeserializeError::Io(_))));
}

// ---------------------------------------------------------------------------
// Tampering
// ---------------------------------------------------------------------------

#[test]
fn bad_magic_rejected() {
    let mut bytes = simple_ruleset().to_bytes(None).unwrap();
    bytes[0..4].copy_from_slice(b"NOPE");
    assert!(matches!(
        RuleSet::from_bytes(&bytes),
        Err(DeserializeError::BadMagic)
    ));
}

#[test]
fn wrong_format_version_rejected() {
    let mut bytes = simple_ruleset().to_bytes(None).unwrap();
    bytes[4] = 0xFF;
    bytes[5] = 0xFF;
    assert!(matches!(
        RuleSet::from_bytes(&bytes),
        Err(DeserializeError::IncompatibleVersion { .. })
    ));
}

#[test]
fn flipped_payload_byte_fails_checksum() {
    let mut bytes = simple_ruleset().to_bytes(None).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    assert!(matches!(
        RuleSet::from_bytes(&bytes),
        Err(DeserializeError::ChecksumMismatch)
    ));
}

#[test]
fn truncated_payload_rejected() {
    let bytes = simple_ruleset().to_bytes(None).unwrap();
    let truncated = &bytes[..bytes.len() - 4];
    assert!(matches!(
        RuleSet::from_bytes(truncated),
        Err(DeserializeError::LengthMismatch { .. })
    ));
}

#[test]
fn empty_input_rejected() {
    assert!(matches!(
        RuleSet::from_bytes(&[]),
        Err(DeserializeError::LengthMismatch { .. })
    ));
}

#[test]
fn garbage_input_rejected() {
    let garbage = vec![0xAB; 64];
    assert!(RuleSet::from_bytes(&garbage).is_err());
}
