//! # Positional Record Parser
//!
//! The inflated payload is a UTF-8 JSON **array** (not an object) with a
//! fixed meaning per index:
//!
//! ```text
//! 0 version        4 s       8  schema      12 refUID
//! 1 chainId        5 v       9  recipient   13 revocable
//! 2 verifyingContract  6 signer  10 time    14 data
//! 3 r              7 uid     11 expirationTime  15 nonce
//! ```
//!
//! The upstream encoder is loose about scalar shapes — numbers may arrive
//! as JSON numbers or decimal strings, hex values with or without `0x`,
//! and with leading zeros stripped. Every slot accessor normalizes before
//! converting. `recipient == "0"` means the null address and
//! `refUID == "0"` means the zero uid.

use alloy_primitives::{hex, Address, Bytes, B256};
use serde_json::Value;

use easlink_core::{AttestationError, Cause, ChainId, RawAttestationRecord};

/// Number of positional slots in the wire array.
const RECORD_SLOTS: usize = 16;

/// Decode raw payload bytes into a [`RawAttestationRecord`].
pub fn parse_record(bytes: &[u8]) -> Result<RawAttestationRecord, AttestationError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        AttestationError::ExtractAttestationFailed(Cause::DecodeArrayString(e.to_string()))
    })?;

    let value: Value = serde_json::from_str(text).map_err(|e| {
        AttestationError::ExtractAttestationFailed(Cause::DecodeArrayString(e.to_string()))
    })?;

    let slots = value.as_array().ok_or_else(|| {
        AttestationError::ExtractAttestationFailed(Cause::DecodeArrayString(
            "payload is not a JSON array".into(),
        ))
    })?;

    if slots.len() < RECORD_SLOTS {
        return Err(AttestationError::ExtractAttestationFailed(
            Cause::DecodeRecord(format!(
                "expected {RECORD_SLOTS} slots, got {}",
                slots.len()
            )),
        ));
    }

    Ok(RawAttestationRecord {
        version: string_slot(slots, 0, "version")?,
        chain_id: ChainId::new(u64_slot(slots, 1, "chainId")?),
        verifying_contract: address_slot(slots, 2, "verifyingContract")?,
        r: b256_slot(slots, 3, "r")?,
        s: b256_slot(slots, 4, "s")?,
        v: u64_slot(slots, 5, "v")?,
        signer: address_slot(slots, 6, "signer")?,
        uid: b256_slot(slots, 7, "uid")?,
        schema: b256_slot(slots, 8, "schema")?,
        recipient: nullable_address_slot(slots, 9, "recipient")?,
        time: u64_slot(slots, 10, "time")?,
        expiration_time: u64_slot(slots, 11, "expirationTime")?,
        ref_uid: b256_slot(slots, 12, "refUID")?,
        revocable: bool_slot(slots, 13, "revocable")?,
        data: bytes_slot(slots, 14, "data")?,
        nonce: u64_slot(slots, 15, "nonce")?,
    })
}

fn decode_err(slot: &str, detail: impl std::fmt::Display) -> AttestationError {
    AttestationError::ExtractAttestationFailed(Cause::DecodeRecord(format!("{slot}: {detail}")))
}

fn string_slot(slots: &[Value], index: usize, name: &str) -> Result<String, AttestationError> {
    match &slots[index] {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(decode_err(name, format!("expected string, got {other}"))),
    }
}

fn u64_slot(slots: &[Value], index: usize, name: &str) -> Result<u64, AttestationError> {
    match &slots[index] {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| decode_err(name, "not an unsigned integer")),
        Value::String(s) => {
            let s = s.trim();
            if let Some(hex_digits) = s.strip_prefix("0x") {
                u64::from_str_radix(hex_digits, 16).map_err(|e| decode_err(name, e))
            } else {
                s.parse::<u64>().map_err(|e| decode_err(name, e))
            }
        }
        other => Err(decode_err(name, format!("expected number, got {other}"))),
    }
}

fn bool_slot(slots: &[Value], index: usize, name: &str) -> Result<bool, AttestationError> {
    match &slots[index] {
        Value::Bool(b) => Ok(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(decode_err(name, format!("not a boolean: {other}"))),
        },
        other => Err(decode_err(name, format!("expected boolean, got {other}"))),
    }
}

fn address_slot(slots: &[Value], index: usize, name: &str) -> Result<Address, AttestationError> {
    let s = string_slot(slots, index, name)?;
    s.trim()
        .parse::<Address>()
        .map_err(|e| decode_err(name, e))
}

/// Address slot where the literal `"0"` encodes the null address.
fn nullable_address_slot(
    slots: &[Value],
    index: usize,
    name: &str,
) -> Result<Address, AttestationError> {
    let s = string_slot(slots, index, name)?;
    if s.trim() == "0" {
        return Ok(Address::ZERO);
    }
    s.trim()
        .parse::<Address>()
        .map_err(|e| decode_err(name, e))
}

/// 32-byte hex slot, tolerant of stripped leading zeros and the literal
/// `"0"` zero encoding.
fn b256_slot(slots: &[Value], index: usize, name: &str) -> Result<B256, AttestationError> {
    let s = string_slot(slots, index, name)?;
    let digits = s.trim().trim_start_matches("0x");
    if digits == "0" {
        return Ok(B256::ZERO);
    }
    if digits.len() > 64 {
        return Err(decode_err(name, "more than 32 bytes of hex"));
    }
    let padded = format!("{digits:0>64}");
    let raw = hex::decode(&padded).map_err(|e| decode_err(name, e))?;
    Ok(B256::from_slice(&raw))
}

fn bytes_slot(slots: &[Value], index: usize, name: &str) -> Result<Bytes, AttestationError> {
    let s = string_slot(slots, index, name)?;
    let digits = s.trim().trim_start_matches("0x");
    let raw = hex::decode(digits).map_err(|e| decode_err(name, e))?;
    Ok(Bytes::from(raw))
}
