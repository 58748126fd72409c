//! # ECDSA Signer Recovery
//!
//! Rebuilds a recoverable secp256k1 signature from the record's
//! `(r, s, v)` triple, recovers the public key from the signing digest,
//! and derives the signer address. [`verify_signer`] is the pipeline's
//! hard gate: a mismatch rejects the attestation before any collaborator
//! call is made.

use alloy_primitives::{keccak256, Address};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};

use easlink_core::{AttestationError, Cause, RawAttestationRecord};

/// Normalize the recovery byte: Ethereum signatures carry `v` as 27/28,
/// the underlying recovery id is 0/1.
fn recovery_id(v: u64) -> Result<RecoveryId, AttestationError> {
    let normalized = if v >= 27 { v - 27 } else { v };
    u8::try_from(normalized)
        .ok()
        .and_then(RecoveryId::from_byte)
        .ok_or_else(|| {
            AttestationError::EcRecoverFailed(Cause::ReconstructSignature(format!(
                "recovery byte {v} out of range"
            )))
        })
}

/// Derive the Ethereum address of an uncompressed secp256k1 public key:
/// the low 20 bytes of `keccak256(pubkey)` with the point-format byte
/// stripped.
fn address_of(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    Address::from_slice(&hash[12..])
}

/// Recover the address that produced the record's signature over its own
/// EIP-712 digest.
pub fn recover_signer(record: &RawAttestationRecord) -> Result<Address, AttestationError> {
    let recid = recovery_id(record.v)?;

    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(record.r.as_slice());
    raw[32..].copy_from_slice(record.s.as_slice());
    let signature = Signature::from_slice(&raw).map_err(|e| {
        AttestationError::EcRecoverFailed(Cause::ReconstructSignature(e.to_string()))
    })?;

    let digest = crate::eip712::signing_digest(record);
    let key = VerifyingKey::recover_from_prehash(digest.as_slice(), &signature, recid)
        .map_err(|e| {
            AttestationError::EcRecoverFailed(Cause::ReconstructSignature(e.to_string()))
        })?;

    Ok(address_of(&key))
}

/// The hard gate: recover the signer and require it to equal the record's
/// claimed signer. Returns the confirmed signer address.
pub fn verify_signer(record: &RawAttestationRecord) -> Result<Address, AttestationError> {
    let recovered = recover_signer(record)?;
    if recovered != record.signer {
        return Err(AttestationError::EcRecoveredSignerDoesNotMatch {
            recovered,
            claimed: record.signer,
        });
    }
    Ok(recovered)
}
