//! # Raw Attestation Record
//!
//! The positionally-decoded attestation exactly as it arrived off the
//! wire. Immutable once parsed; everything downstream (digest
//! construction, schema resolution, payload decoding) reads from it and
//! nothing writes back.

use alloy_primitives::{Address, Bytes, B256};
use serde::{Deserialize, Serialize};

use crate::chain::ChainId;

/// The decoded fields of a transported attestation.
///
/// Field order mirrors the wire array (see the codec crate); `recipient`
/// and `ref_uid` have already had their literal-`"0"` null encodings
/// normalized to the zero address / zero uid by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAttestationRecord {
    /// Protocol version string, also the EIP-712 domain version.
    pub version: String,
    /// Chain the attestation was signed for.
    pub chain_id: ChainId,
    /// EIP-712 domain verifying contract.
    pub verifying_contract: Address,
    /// ECDSA signature `r` component.
    pub r: B256,
    /// ECDSA signature `s` component.
    pub s: B256,
    /// ECDSA recovery byte, usually 27 or 28.
    pub v: u64,
    /// The address that claims to have signed this attestation. Trusted
    /// only after EC recovery confirms it.
    pub signer: Address,
    /// Unique attestation id.
    pub uid: B256,
    /// Schema uid describing the layout of `data`.
    pub schema: B256,
    /// Recipient address; zero when the wire carried the literal `"0"`.
    pub recipient: Address,
    /// Issuance time, unix seconds.
    pub time: u64,
    /// Expiration time, unix seconds; zero means never expires.
    pub expiration_time: u64,
    /// Referenced attestation uid; zero when the wire carried `"0"`.
    pub ref_uid: B256,
    /// Whether the attestation is revocable on-chain.
    pub revocable: bool,
    /// The ABI-encoded payload blob, decoded against the schema.
    pub data: Bytes,
    /// Issuer-side nonce.
    pub nonce: u64,
}

impl RawAttestationRecord {
    /// Whether the record carries no usable schema uid (empty legacy
    /// tickets encode this as the all-zero uid). Such records decode
    /// against the hardcoded legacy ticket layout instead of the registry.
    pub fn has_schema(&self) -> bool {
        self.schema != B256::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawAttestationRecord {
        RawAttestationRecord {
            version: "0.26".into(),
            chain_id: ChainId::ARBITRUM_ONE,
            verifying_contract: Address::repeat_byte(0x11),
            r: B256::repeat_byte(0x22),
            s: B256::repeat_byte(0x33),
            v: 28,
            signer: Address::repeat_byte(0x44),
            uid: B256::repeat_byte(0x55),
            schema: B256::repeat_byte(0x66),
            recipient: Address::ZERO,
            time: 1_700_000_000,
            expiration_time: 0,
            ref_uid: B256::ZERO,
            revocable: true,
            data: Bytes::from(vec![0xca, 0xfe]),
            nonce: 0,
        }
    }

    #[test]
    fn equality_is_structural() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a, b);
        b.nonce = 1;
        assert_ne!(a, b);
    }

    #[test]
    fn zero_schema_means_legacy() {
        let mut record = sample();
        assert!(record.has_schema());
        record.schema = B256::ZERO;
        assert!(!record.has_schema());
    }

    #[test]
    fn serde_round_trip() {
        let record = sample();
        let json = serde_json::to_string(&record).expect("serialize");
        let back: RawAttestationRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(record, back);
    }
}
