//! # Identity & Collection-Id Derivation
//!
//! Two attestations are "the same thing re-issued" when they share an
//! identity: the chain, a keccak hash binding the signer to the
//! collection-defining field values, and the identifying field values
//! themselves. The store replaces rather than appends on an identity
//! match, so a re-issued ticket supersedes its predecessor instead of
//! duplicating it.
//!
//! Which fields define the collection and which identify the instance is
//! caller-supplied metadata — it originates from schema/card descriptors
//! outside this engine. An empty list on either side disables identity
//! matching entirely.

use alloy_primitives::{hex, keccak256, Address};

use easlink_core::Attestation;

use crate::fields::{resolve_fields, FieldRef};

/// Canonical signer form used in the collection-id preimage: the
/// checksummed address, lower-cased, with the `0x` prefix and any leading
/// EC-point-format marker byte (`04`) stripped.
pub fn canonical_signer(signer: Address) -> String {
    let checksummed = signer.to_checksum(None).to_lowercase();
    let stripped = checksummed.trim_start_matches("0x");
    let stripped = stripped.strip_prefix("04").unwrap_or(stripped);
    stripped.to_string()
}

/// `keccak256(canonicalSigner ‖ collection field values)`, hex-encoded.
///
/// Pure and deterministic: the same signer and field values always hash
/// to the same collection id.
pub fn collection_id(signer: Address, field_values: &[String]) -> String {
    let mut preimage = canonical_signer(signer);
    for value in field_values {
        preimage.push_str(value);
    }
    hex::encode(keccak256(preimage.as_bytes()))
}

/// Compute the attestation's identity from caller-supplied collection and
/// identifying field references.
///
/// Returns `None` when either list is empty (identity matching is then
/// skipped — treated as "no match"). Referenced paths that do not resolve
/// are simply omitted from the joined values, so an identity is still
/// produced from whatever does resolve.
pub fn attestation_identity(
    attestation: &Attestation,
    collection_fields: &[FieldRef],
    identifying_fields: &[FieldRef],
) -> Option<String> {
    if collection_fields.is_empty() || identifying_fields.is_empty() {
        return None;
    }

    let collection_values: Vec<String> = resolve_fields(attestation, collection_fields)
        .into_iter()
        .map(|(_, v)| v.as_display_string())
        .collect();
    let identifying_values: Vec<String> = resolve_fields(attestation, identifying_fields)
        .into_iter()
        .map(|(_, v)| v.as_display_string())
        .collect();

    let cid = collection_id(attestation.record.signer, &collection_values);
    Some(format!(
        "{}{}{}",
        attestation.record.chain_id,
        cid,
        identifying_values.concat()
    ))
}
