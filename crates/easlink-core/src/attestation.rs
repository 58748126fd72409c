//! # Verified Attestation
//!
//! [`Attestation`] is the unit the pipeline hands to callers and the unit
//! the store persists: the ordered decoded payload, the raw record it came
//! from, the (soft) issuer validity flag, and the source URL.

use serde::{Deserialize, Serialize};

use crate::record::RawAttestationRecord;
use crate::value::TypedValue;

/// A named, decoded payload field. Carried in schema declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttestationField {
    /// Field name from the schema string.
    pub name: String,
    /// The decoded value.
    pub value: TypedValue,
}

impl AttestationField {
    /// Construct a field.
    pub fn new(name: impl Into<String>, value: TypedValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A fully-verified, fully-decoded attestation.
///
/// Constructed only by the verification pipeline — by the time a value of
/// this type exists, the signature hard gate has passed and the payload
/// has decoded against its schema. Equality and hashing are structural,
/// which is what the store's exact-duplicate detection relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    /// Decoded payload fields, in schema declaration order.
    pub data: Vec<AttestationField>,
    /// The raw record the fields were decoded from.
    pub record: RawAttestationRecord,
    /// Outcome of the soft issuer-validation gate. `false` covers both
    /// "not an authorized issuer" and "could not reach the resolver".
    pub is_issuer_valid: bool,
    /// The URL this attestation was imported from.
    pub source: String,
}

impl Attestation {
    /// Look up a decoded payload field by name.
    pub fn field(&self, name: &str) -> Option<&TypedValue> {
        self.data
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ChainId;
    use alloy_primitives::{Address, Bytes, B256, U256};

    fn sample() -> Attestation {
        Attestation {
            data: vec![
                AttestationField::new("eventId", TypedValue::String("devcon".into())),
                AttestationField::new("ticketClass", TypedValue::Uint(U256::from(2u64))),
            ],
            record: RawAttestationRecord {
                version: "0.26".into(),
                chain_id: ChainId::MAINNET,
                verifying_contract: Address::repeat_byte(1),
                r: B256::repeat_byte(2),
                s: B256::repeat_byte(3),
                v: 27,
                signer: Address::repeat_byte(4),
                uid: B256::repeat_byte(5),
                schema: B256::repeat_byte(6),
                recipient: Address::ZERO,
                time: 1_700_000_000,
                expiration_time: 0,
                ref_uid: B256::ZERO,
                revocable: true,
                data: Bytes::new(),
                nonce: 0,
            },
            is_issuer_valid: true,
            source: "https://example.com/#attestation=abc".into(),
        }
    }

    #[test]
    fn field_lookup_by_name() {
        let att = sample();
        assert_eq!(
            att.field("eventId"),
            Some(&TypedValue::String("devcon".into()))
        );
        assert!(att.field("missing").is_none());
    }

    #[test]
    fn field_order_is_preserved_through_serde() {
        let att = sample();
        let json = serde_json::to_string(&att).expect("serialize");
        let back: Attestation = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.data[0].name, "eventId");
        assert_eq!(back.data[1].name, "ticketClass");
        assert_eq!(att, back);
    }

    #[test]
    fn equality_considers_issuer_flag() {
        let a = sample();
        let mut b = sample();
        b.is_issuer_valid = false;
        assert_ne!(a, b);
    }
}
