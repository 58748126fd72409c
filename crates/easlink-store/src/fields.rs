//! # Attestation Field Resolution
//!
//! Callers describe the fields they care about as `{label, path}` pairs.
//! A path of the form `data.<name>` selects a decoded payload field by
//! name; any other path must be one of the fixed metadata names backed by
//! the raw record. Unknown paths resolve to nothing — they are omitted
//! from the result, never an error, so display metadata can reference
//! fields a given schema does not carry.

use chrono::{TimeZone, Utc};
use serde::{Deserialize, Serialize};

use easlink_core::{Attestation, TypedValue};

/// A caller-supplied field reference: a display label and the path that
/// selects the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRef {
    /// Display label.
    pub label: String,
    /// `data.<fieldName>` or a metadata name such as `signer` or `time`.
    pub path: String,
}

impl FieldRef {
    /// Construct a field reference.
    pub fn new(label: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            path: path.into(),
        }
    }
}

/// Fixed rendering for the `time`/`expirationTime` metadata fields.
fn format_timestamp(unix_seconds: u64) -> String {
    match Utc.timestamp_opt(unix_seconds as i64, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => unix_seconds.to_string(),
    }
}

/// Resolve a single path against an attestation.
pub fn resolve_field(attestation: &Attestation, path: &str) -> Option<TypedValue> {
    if let Some(name) = path.strip_prefix("data.") {
        return attestation.field(name).cloned();
    }

    let record = &attestation.record;
    let value = match path {
        "name" => TypedValue::String("EAS Attestation".to_string()),
        "version" => TypedValue::String(record.version.clone()),
        "chainId" => TypedValue::Uint(easlink_core::U256::from(record.chain_id.value())),
        "signer" => TypedValue::String(record.signer.to_checksum(None)),
        "verifyingContract" => TypedValue::String(record.verifying_contract.to_checksum(None)),
        "recipient" => TypedValue::String(record.recipient.to_checksum(None)),
        "refUID" => TypedValue::String(record.ref_uid.to_string()),
        "revocable" => TypedValue::Bool(record.revocable),
        "schema" => TypedValue::String(record.schema.to_string()),
        "time" => TypedValue::String(format_timestamp(record.time)),
        "expirationTime" => TypedValue::String(format_timestamp(record.expiration_time)),
        _ => return None,
    };
    Some(value)
}

/// Resolve a list of field references, preserving the caller's order and
/// omitting paths that resolve to nothing.
pub fn resolve_fields(
    attestation: &Attestation,
    refs: &[FieldRef],
) -> Vec<(String, TypedValue)> {
    refs.iter()
        .filter_map(|r| resolve_field(attestation, &r.path).map(|v| (r.label.clone(), v)))
        .collect()
}
