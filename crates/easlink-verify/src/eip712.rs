//! # EIP-712 Digest Construction
//!
//! Builds the structured-signing digest for the one message shape this
//! engine handles: the EAS `Attest` struct under the `"EAS Attestation"`
//! domain. The construction is the standard
//! `keccak(0x1901 ‖ domainSeparator ‖ structHash)` with dynamic fields
//! (`name`, `version`, `data`) hashed before encoding.
//!
//! There is deliberately no general type system here — the domain and
//! message types are fixed, so the encoding is a straight-line keccak
//! pipeline rather than a type-driven encoder.

use alloy_primitives::{keccak256, Address, B256, U256};

use easlink_core::RawAttestationRecord;

/// EIP-712 domain name used by the EAS delegated-attestation flow.
const DOMAIN_NAME: &str = "EAS Attestation";

/// `EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)`
const DOMAIN_TYPE: &[u8] =
    b"EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// The fixed `Attest` message type, field order matching the registry.
const ATTEST_TYPE: &[u8] = b"Attest(bytes32 schema,address recipient,uint64 time,uint64 expirationTime,bool revocable,bytes32 refUID,bytes data)";

/// Encode an address as a 32-byte big-endian word.
fn address_word(addr: Address) -> B256 {
    B256::left_padding_from(addr.as_slice())
}

/// Encode a u64 as a 32-byte big-endian word.
fn uint_word(value: u64) -> B256 {
    B256::from(U256::from(value))
}

/// Encode a bool as a 32-byte word (0 or 1).
fn bool_word(value: bool) -> B256 {
    uint_word(u64::from(value))
}

/// The domain separator for a record's chain, version, and verifying
/// contract.
pub fn domain_separator(record: &RawAttestationRecord) -> B256 {
    let mut encoded = Vec::with_capacity(5 * 32);
    encoded.extend_from_slice(keccak256(DOMAIN_TYPE).as_slice());
    encoded.extend_from_slice(keccak256(DOMAIN_NAME.as_bytes()).as_slice());
    encoded.extend_from_slice(keccak256(record.version.as_bytes()).as_slice());
    encoded.extend_from_slice(uint_word(record.chain_id.value()).as_slice());
    encoded.extend_from_slice(address_word(record.verifying_contract).as_slice());
    keccak256(&encoded)
}

/// The `Attest` struct hash populated from the record.
pub fn struct_hash(record: &RawAttestationRecord) -> B256 {
    let mut encoded = Vec::with_capacity(8 * 32);
    encoded.extend_from_slice(keccak256(ATTEST_TYPE).as_slice());
    encoded.extend_from_slice(record.schema.as_slice());
    encoded.extend_from_slice(address_word(record.recipient).as_slice());
    encoded.extend_from_slice(uint_word(record.time).as_slice());
    encoded.extend_from_slice(uint_word(record.expiration_time).as_slice());
    encoded.extend_from_slice(bool_word(record.revocable).as_slice());
    encoded.extend_from_slice(record.ref_uid.as_slice());
    encoded.extend_from_slice(keccak256(&record.data).as_slice());
    keccak256(&encoded)
}

/// The final signing digest: `keccak(0x1901 ‖ domainSeparator ‖ structHash)`.
pub fn signing_digest(record: &RawAttestationRecord) -> B256 {
    let mut preimage = Vec::with_capacity(2 + 32 + 32);
    preimage.extend_from_slice(&[0x19, 0x01]);
    preimage.extend_from_slice(domain_separator(record).as_slice());
    preimage.extend_from_slice(struct_hash(record).as_slice());
    keccak256(&preimage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Bytes;
    use easlink_core::ChainId;

    fn record() -> RawAttestationRecord {
        RawAttestationRecord {
            version: "0.26".into(),
            chain_id: ChainId::ARBITRUM_ONE,
            verifying_contract: Address::repeat_byte(0x42),
            r: B256::ZERO,
            s: B256::ZERO,
            v: 28,
            signer: Address::repeat_byte(0x99),
            uid: B256::repeat_byte(1),
            schema: B256::repeat_byte(2),
            recipient: Address::ZERO,
            time: 1_700_000_000,
            expiration_time: 0,
            ref_uid: B256::ZERO,
            revocable: true,
            data: Bytes::from(vec![1, 2, 3]),
            nonce: 0,
        }
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(signing_digest(&record()), signing_digest(&record()));
    }

    #[test]
    fn digest_depends_on_every_signed_field() {
        let base = signing_digest(&record());

        let mut changed = record();
        changed.chain_id = ChainId::MAINNET;
        assert_ne!(base, signing_digest(&changed));

        let mut changed = record();
        changed.recipient = Address::repeat_byte(0x01);
        assert_ne!(base, signing_digest(&changed));

        let mut changed = record();
        changed.revocable = false;
        assert_ne!(base, signing_digest(&changed));

        let mut changed = record();
        changed.data = Bytes::from(vec![1, 2, 4]);
        assert_ne!(base, signing_digest(&changed));
    }

    #[test]
    fn digest_ignores_unsigned_fields() {
        // The signature itself, the uid, and the nonce are not part of the
        // signed message.
        let base = signing_digest(&record());

        let mut changed = record();
        changed.v = 27;
        changed.r = B256::repeat_byte(0xff);
        changed.nonce = 9;
        changed.uid = B256::repeat_byte(0xee);
        assert_eq!(base, signing_digest(&changed));
    }

    #[test]
    fn domain_separator_binds_version_string() {
        let base = domain_separator(&record());
        let mut changed = record();
        changed.version = "0.27".into();
        assert_ne!(base, domain_separator(&changed));
    }
}
