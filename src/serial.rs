//! Binary serialization and deserialization of compiled rule sets.
//!
//! This module provides a stable binary format for persisting compiled
//! [`RuleSet`](crate::RuleSet) values. The format consists of a 32-byte
//! fixed header followed by a bincode-encoded payload.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"WAYP"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Engine version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! ## Versioning
//!
//! The format version in the header must match exactly. If it does not,
//! deserialization fails immediately with
//! [`DeserializeError::IncompatibleVersion`]. The engine version is
//! informational only.
//!
//! The payload carries raw rule records (pattern and destination strings,
//! not compiled matchers), and decoding re-runs the normal compilation
//! step, so a decoded set passes the same validation as a freshly built
//! one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Rule, RuleSet, Trigger};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MAGIC: &[u8; 4] = b"WAYP";
const FORMAT_VERSION: u16 = 1;
const ENGINE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when serializing a [`RuleSet`](crate::RuleSet) to
/// bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode ruleset: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("I/O error during serialization: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when deserializing a [`RuleSet`](crate::RuleSet)
/// from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a waypost binary: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, engine supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("I/O error during deserialization: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Serialized type hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRuleSet {
    metadata: RuleSetMetadata,
    base: String,
    rules: Vec<SerializedRule>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RuleSetMetadata {
    rule_count: usize,
    enabled_count: usize,
    source_digest: Option<[u8; 32]>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRule {
    id: String,
    label: String,
    weight: i32,
    enabled: bool,
    triggers: Vec<SerializedTrigger>,
    destination: String,
    pages: Vec<String>,
    language: Option<String>,
    roles: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum SerializedTrigger {
    Login,
    Registration,
    OneTimeLogin,
    Logout,
}

// ---------------------------------------------------------------------------
// Trigger conversion
// ---------------------------------------------------------------------------

fn serialize_trigger(trigger: Trigger) -> SerializedTrigger {
    match trigger {
        Trigger::Login => SerializedTrigger::Login,
        Trigger::Registration => SerializedTrigger::Registration,
        Trigger::OneTimeLogin => SerializedTrigger::OneTimeLogin,
        Trigger::Logout => SerializedTrigger::Logout,
    }
}

fn deserialize_trigger(trigger: SerializedTrigger) -> Trigger {
    match trigger {
        SerializedTrigger::Login => Trigger::Login,
        SerializedTrigger::Registration => Trigger::Registration,
        SerializedTrigger::OneTimeLogin => Trigger::OneTimeLogin,
        SerializedTrigger::Logout => Trigger::Logout,
    }
}

// ---------------------------------------------------------------------------
// RuleSet -> SerializedRuleSet
// ---------------------------------------------------------------------------

fn ruleset_to_serialized(ruleset: &RuleSet, source_text: Option<&str>) -> SerializedRuleSet {
    let source_digest = source_text.map(|s| *blake3::hash(s.as_bytes()).as_bytes());

    let rules: Vec<SerializedRule> = ruleset
        .to_rules()
        .into_iter()
        .map(|r| SerializedRule {
            id: r.id,
            label: r.label,
            weight: r.weight,
            enabled: r.enabled,
            triggers: r.triggers.into_iter().map(serialize_trigger).collect(),
            destination: r.destination,
            pages: r.pages,
            language: r.language,
            roles: r.roles,
        })
        .collect();

    let enabled_count = rules.iter().filter(|r| r.enabled).count();

    SerializedRuleSet {
        metadata: RuleSetMetadata {
            rule_count: rules.len(),
            enabled_count,
            source_digest,
        },
        base: ruleset.base().to_owned(),
        rules,
    }
}

// ---------------------------------------------------------------------------
// SerializedRuleSet -> RuleSet
// ---------------------------------------------------------------------------

fn serialized_to_ruleset(ser: SerializedRuleSet) -> Result<RuleSet, DeserializeError> {
    validate(&ser)?;

    let rules: Vec<Rule> = ser
        .rules
        .into_iter()
        .map(|sr| Rule {
            id: sr.id,
            label: sr.label,
            weight: sr.weight,
            enabled: sr.enabled,
            triggers: sr.triggers.into_iter().map(deserialize_trigger).collect(),
            destination: sr.destination,
            pages: sr.pages,
            language: sr.language,
            roles: sr.roles,
        })
        .collect();

    // Re-run the normal compilation step so a decoded blob is held to the
    // same structural invariants as a freshly built set.
    crate::compile::compile(rules, ser.base)
        .map_err(|e| DeserializeError::Validation(e.to_string()))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(ser: &SerializedRuleSet) -> Result<(), DeserializeError> {
    if ser.metadata.rule_count != ser.rules.len() {
        return Err(DeserializeError::Validation(format!(
            "metadata says {} rules but payload has {}",
            ser.metadata.rule_count,
            ser.rules.len()
        )));
    }

    let enabled_count = ser.rules.iter().filter(|r| r.enabled).count();
    if ser.metadata.enabled_count != enabled_count {
        return Err(DeserializeError::Validation(format!(
            "metadata says {} enabled rules but payload has {}",
            ser.metadata.enabled_count, enabled_count
        )));
    }

    // Rules are stored in consideration order; re-sorting on decode would
    // mask a tampered or corrupted payload.
    for window in ser.rules.windows(2) {
        let earlier = (&window[0].weight, &window[0].id);
        let later = (&window[1].weight, &window[1].id);
        if earlier >= later {
            return Err(DeserializeError::Validation(
                "rules not sorted by ascending (weight, id)".to_owned(),
            ));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Header I/O
// ---------------------------------------------------------------------------

fn write_header(buf: &mut Vec<u8>, payload: &[u8]) {
    let hash = blake3::hash(payload);
    let hash_bytes = hash.as_bytes();

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&ENGINE_VERSION.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // flags (reserved)
    #[allow(clippy::cast_possible_truncation)] // payload will never exceed 4 GiB
    let payload_len = payload.len() as u32;
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&hash_bytes[..16]);
}

#[allow(clippy::cast_possible_truncation)] // HEADER_SIZE is 32, always fits in u32
fn read_header(bytes: &[u8]) -> Result<(u16, u32, [u8; 16]), DeserializeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializeError::LengthMismatch {
            expected: HEADER_SIZE as u32,
            actual: bytes.len(),
        });
    }

    if &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let format_version = u16::from_le_bytes([bytes[4], bytes[5]]);
    // bytes[6..8] is engine_version (informational, not used for checks)
    // bytes[8..12] is flags (reserved)
    let payload_len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

    let mut hash = [0u8; 16];
    hash.copy_from_slice(&bytes[16..32]);

    Ok((format_version, payload_len, hash))
}

// ---------------------------------------------------------------------------
// Public encode/decode
// ---------------------------------------------------------------------------

pub(crate) fn encode(
    ruleset: &RuleSet,
    source_text: Option<&str>,
) -> Result<Vec<u8>, SerializeError> {
    let serialized = ruleset_to_serialized(ruleset, source_text);
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    write_header(&mut buf, &payload);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<RuleSet, DeserializeError> {
    let (format_version, payload_len, stored_hash) = read_header(bytes)?;

    if format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_start = HEADER_SIZE;
    let payload_end = payload_start + payload_len as usize;
    if bytes.len() < payload_end {
        return Err(DeserializeError::LengthMismatch {
            expected: payload_len,
            actual: bytes.len() - HEADER_SIZE,
        });
    }
    let payload = &bytes[payload_start..payload_end];

    // Integrity check
    let computed_hash = blake3::hash(payload);
    if computed_hash.as_bytes()[..16] != stored_hash {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedRuleSet, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;

    serialized_to_ruleset(serialized)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
