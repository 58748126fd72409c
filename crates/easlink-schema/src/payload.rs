//! # Schema-Driven Payload Decoding
//!
//! A schema string is a comma-separated list of `"type name"` pairs, e.g.
//! `"string eventId,string ticketId,uint8 ticketClass,bytes commitment"`.
//! Declared types are normalized before resolution: every `intN`/`uintN`
//! width widens to `uint256` and every sized `bytesN` widens to `bytes32`
//! (the bare `bytes` keyword stays dynamic). The attestation's data blob
//! is then ABI-decoded against the normalized type list, yielding one
//! named value per field in declaration order.

use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_primitives::Bytes;

use easlink_core::{AttestationError, AttestationField, Cause, TypedValue};

/// Field layout of legacy tickets issued before schema registration: used
/// whenever a record carries no schema uid.
pub const LEGACY_TICKET_SCHEMA: &str =
    "string eventId,string ticketId,uint8 ticketClass,bytes commitment";

/// A parsed and normalized schema field declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    /// Declared field name.
    pub name: String,
    /// The resolution-time ABI type, after width normalization.
    pub ty: DynSolType,
}

/// Widen a declared type for resolution purposes.
///
/// Any `intN`/`uintN` variant becomes `uint256`; any sized `bytesN`
/// becomes `bytes32`; everything else passes through unchanged. The
/// narrower declared width is not preserved downstream.
pub fn normalize_type(declared: &str) -> String {
    let t = declared.trim();
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());

    if let Some(rest) = t.strip_prefix("uint") {
        if all_digits(rest) {
            return "uint256".to_string();
        }
    }
    if let Some(rest) = t.strip_prefix("int") {
        if all_digits(rest) {
            return "uint256".to_string();
        }
    }
    if let Some(rest) = t.strip_prefix("bytes") {
        if !rest.is_empty() && all_digits(rest) {
            return "bytes32".to_string();
        }
    }
    t.to_string()
}

/// Parse a schema string into named, normalized ABI types.
///
/// Returns `None` when any pair fails to parse; the whole schema is
/// unusable then.
pub fn parse_schema_fields(schema: &str) -> Option<Vec<SchemaField>> {
    let declared: Vec<&str> = schema
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let mut fields = Vec::with_capacity(declared.len());
    for pair in &declared {
        let mut tokens = pair.split_whitespace();
        let ty_token = tokens.next()?;
        let name = tokens.next()?;
        if tokens.next().is_some() {
            return None;
        }
        let ty: DynSolType = normalize_type(ty_token).parse().ok()?;
        fields.push(SchemaField {
            name: name.to_string(),
            ty,
        });
    }

    Some(fields)
}

/// Convert a decoded ABI value into the engine's tagged union.
fn to_typed(value: DynSolValue) -> TypedValue {
    match value {
        DynSolValue::Address(a) => TypedValue::Address(a),
        DynSolValue::String(s) => TypedValue::String(s),
        DynSolValue::Bytes(b) => TypedValue::Bytes(Bytes::from(b)),
        DynSolValue::FixedBytes(word, size) => {
            TypedValue::Bytes(Bytes::copy_from_slice(&word.as_slice()[..size]))
        }
        DynSolValue::Int(i, _) => TypedValue::Int(i),
        DynSolValue::Uint(u, _) => TypedValue::Uint(u),
        DynSolValue::Bool(b) => TypedValue::Bool(b),
        // Arrays, tuples, and functions are not part of any supported
        // attestation schema; they decode to a boolean placeholder.
        _ => TypedValue::Bool(false),
    }
}

/// Decode an attestation data blob against a schema string.
///
/// Produces one [`AttestationField`] per declared field, preserving
/// declaration order. Fails with the payload-extraction cause when the
/// schema string is unusable or the blob does not decode against it.
pub fn decode_payload_fields(
    schema: &str,
    data: &[u8],
) -> Result<Vec<AttestationField>, AttestationError> {
    let fields = parse_schema_fields(schema).ok_or_else(|| {
        AttestationError::ExtractAttestationFailed(Cause::ExtractData(format!(
            "unusable schema string: {schema:?}"
        )))
    })?;

    let tuple = DynSolType::Tuple(fields.iter().map(|f| f.ty.clone()).collect());
    let decoded = tuple.abi_decode_sequence(data).map_err(|e| {
        AttestationError::ExtractAttestationFailed(Cause::ExtractData(e.to_string()))
    })?;

    let values = match decoded {
        DynSolValue::Tuple(values) => values,
        single => vec![single],
    };
    if values.len() != fields.len() {
        return Err(AttestationError::ExtractAttestationFailed(
            Cause::ExtractData(format!(
                "decoded {} values for {} declared fields",
                values.len(),
                fields.len()
            )),
        ));
    }

    Ok(fields
        .into_iter()
        .zip(values)
        .map(|(field, value)| AttestationField::new(field.name, to_typed(value)))
        .collect())
}
