//! End-to-end pipeline tests: sign a record, pack it into an attestation
//! URL, and import it through the engine with a deterministic fake
//! contract caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{hex, keccak256, Address, B256, U256};
use k256::ecdsa::SigningKey;

use easlink::{
    chain_config, encode_payload, signing_digest, AddOutcome, AttestationEngine,
    AttestationError, AttestationStore, CallerError, ChainId, ContractCaller, FieldRef,
    RawAttestationRecord, TypedValue,
};

/// Schema uid the fake registry serves for ticket attestations.
const TICKET_SCHEMA_UID: B256 = B256::repeat_byte(0x66);
/// Resolver address the fake registry reports for the key schema.
const KEY_RESOLVER: Address = Address::repeat_byte(0x77);

const TICKET_SCHEMA: &str = "string eventId,string ticketId,uint8 ticketClass,bytes commitment";

/// Deterministic fake collaborator: serves `getSchema` for the ticket and
/// key schemas and answers `validateSignature` with a fixed verdict.
struct FakeCaller {
    calls: AtomicUsize,
    issuer_valid: bool,
}

impl FakeCaller {
    fn new(issuer_valid: bool) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            issuer_valid,
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ContractCaller for FakeCaller {
    async fn call(
        &self,
        chain: ChainId,
        _to: Address,
        function: &str,
        args: &[DynSolValue],
    ) -> Result<Vec<DynSolValue>, CallerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if function.starts_with("getSchema") {
            let uid = match args {
                [DynSolValue::FixedBytes(uid, 32)] => *uid,
                other => panic!("unexpected getSchema args: {other:?}"),
            };
            let key_schema_uid = chain_config(chain).expect("configured chain").key_schema_uid;
            let schema = if uid == key_schema_uid {
                // The key schema itself carries no payload layout.
                String::new()
            } else if uid == TICKET_SCHEMA_UID {
                TICKET_SCHEMA.to_string()
            } else {
                return Err(CallerError::Decode {
                    reason: "unknown schema".into(),
                });
            };
            return Ok(vec![
                DynSolValue::FixedBytes(uid, 32),
                DynSolValue::Address(KEY_RESOLVER),
                DynSolValue::Bool(true),
                DynSolValue::String(schema),
            ]);
        }

        if function.starts_with("validateSignature") {
            return Ok(vec![DynSolValue::Bool(self.issuer_valid)]);
        }

        panic!("unexpected function: {function}");
    }
}

/// ABI-encode the standard ticket payload.
fn ticket_blob(event: &str, ticket: &str, class: u64) -> Vec<u8> {
    DynSolValue::Tuple(vec![
        DynSolValue::String(event.into()),
        DynSolValue::String(ticket.into()),
        DynSolValue::Uint(U256::from(class), 256),
        DynSolValue::Bytes(keccak256(ticket.as_bytes()).to_vec()),
    ])
    .abi_encode_sequence()
    .expect("encode ticket payload")
}

/// Build a correctly-signed record, then render it as the wire JSON array
/// inside an attestation URL.
fn signed_url_on(chain: ChainId, schema: B256, event: &str, ticket: &str, tamper_r: bool) -> String {
    let key = SigningKey::from_slice(&[0x07u8; 32]).expect("valid scalar");
    let point = key.verifying_key().to_encoded_point(false);
    let signer = Address::from_slice(&keccak256(&point.as_bytes()[1..])[12..]);

    let mut record = RawAttestationRecord {
        version: "0.26".into(),
        chain_id: chain,
        verifying_contract: Address::repeat_byte(0x21),
        r: B256::ZERO,
        s: B256::ZERO,
        v: 0,
        signer,
        uid: B256::repeat_byte(0x05),
        schema,
        recipient: Address::ZERO,
        time: 1_700_000_000,
        expiration_time: 0,
        ref_uid: B256::ZERO,
        revocable: true,
        data: ticket_blob(event, ticket, 2).into(),
        nonce: 0,
    };

    let digest = signing_digest(&record);
    let (signature, recid) = key
        .sign_prehash_recoverable(digest.as_slice())
        .expect("sign digest");
    let raw = signature.to_bytes();
    record.r = B256::from_slice(&raw[..32]);
    record.s = B256::from_slice(&raw[32..]);
    record.v = u64::from(recid.to_byte()) + 27;

    if tamper_r {
        let mut r = record.r.0;
        r[11] ^= 0x04;
        record.r = B256::from(r);
    }

    let array = serde_json::json!([
        record.version,
        record.chain_id.value(),
        record.verifying_contract.to_string(),
        record.r.to_string(),
        record.s.to_string(),
        record.v,
        record.signer.to_string(),
        record.uid.to_string(),
        if record.schema == B256::ZERO { "0".to_string() } else { record.schema.to_string() },
        "0",
        record.time,
        record.expiration_time,
        "0",
        record.revocable,
        format!("0x{}", hex::encode(&record.data)),
        record.nonce
    ]);

    let payload = encode_payload(array.to_string().as_bytes());
    format!("https://wallet.example/import#attestation={payload}")
}

#[tokio::test]
async fn imports_a_signed_ticket_attestation() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(Arc::clone(&caller));
    let url = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-100", false);

    let attestation = engine.import(&url).await.expect("import succeeds");

    let names: Vec<&str> = attestation.data.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["eventId", "ticketId", "ticketClass", "commitment"]);
    assert_eq!(
        attestation.field("eventId"),
        Some(&TypedValue::String("devcon".into()))
    );
    assert_eq!(
        attestation.field("ticketClass"),
        Some(&TypedValue::Uint(U256::from(2u64)))
    );
    assert!(attestation.is_issuer_valid);
    assert_eq!(attestation.source, url);
    // getSchema(ticket) + getSchema(key) + validateSignature.
    assert_eq!(caller.call_count(), 3);
}

#[tokio::test]
async fn tampered_signature_fails_before_any_contract_call() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(Arc::clone(&caller));
    let url = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-100", true);

    let err = engine.import(&url).await.unwrap_err();
    assert!(matches!(
        err,
        AttestationError::EcRecoveredSignerDoesNotMatch { .. }
            | AttestationError::EcRecoverFailed(_)
    ));
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn issuer_validation_failure_degrades_to_unverified() {
    let caller = FakeCaller::new(false);
    let engine = AttestationEngine::new(caller);
    let url = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-100", false);

    let attestation = engine.import(&url).await.expect("import still succeeds");
    assert!(!attestation.is_issuer_valid);
}

#[tokio::test]
async fn legacy_record_without_schema_uses_the_ticket_layout() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(Arc::clone(&caller));
    let url = signed_url_on(ChainId::ARBITRUM_ONE, B256::ZERO, "edcon", "T-7", false);

    let attestation = engine.import(&url).await.expect("legacy import");
    assert_eq!(
        attestation.field("eventId"),
        Some(&TypedValue::String("edcon".into()))
    );
    // No registry lookup for the payload schema: key schema + issuer check only.
    assert_eq!(caller.call_count(), 2);
}

#[tokio::test]
async fn schema_cache_spares_repeat_imports() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(Arc::clone(&caller));

    let first = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-1", false);
    let second = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-2", false);
    engine.import(&first).await.expect("first import");
    let calls_after_first = caller.call_count();
    engine.import(&second).await.expect("second import");

    // Both getSchema lookups are cached; only validateSignature repeats.
    assert_eq!(caller.call_count(), calls_after_first + 1);
}

#[tokio::test]
async fn imported_attestations_deduplicate_in_the_store() -> anyhow::Result<()> {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(caller);
    let dir = tempfile::tempdir()?;
    let store = AttestationStore::open(dir.path().join("attestations.json"))?;
    let wallet = Address::repeat_byte(0xaa);

    let collection = vec![FieldRef::new("Event", "data.eventId")];
    let identifying = vec![FieldRef::new("Ticket", "data.ticketId")];

    let url = signed_url_on(ChainId::ARBITRUM_ONE, TICKET_SCHEMA_UID, "devcon", "T-100", false);
    let attestation = engine.import(&url).await?;

    let outcome = store.add(wallet, attestation.clone(), &collection, &identifying)?;
    assert_eq!(outcome, AddOutcome::Appended);

    // Importing the same URL again yields a structural duplicate.
    let again = engine.import(&url).await?;
    let outcome = store.add(wallet, again, &collection, &identifying)?;
    assert_eq!(outcome, AddOutcome::Duplicate);
    assert_eq!(store.attestations_for(wallet).len(), 1);

    Ok(())
}

#[tokio::test]
async fn unsupported_chain_fails_after_the_gate_with_zero_calls() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(Arc::clone(&caller));
    let url = signed_url_on(ChainId::new(5), TICKET_SCHEMA_UID, "devcon", "T-100", false);

    let err = engine.import(&url).await.unwrap_err();
    assert!(matches!(err, AttestationError::ChainNotSupported(chain) if chain == ChainId::new(5)));
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn url_without_payload_is_rejected() {
    let caller = FakeCaller::new(true);
    let engine = AttestationEngine::new(caller);
    let err = engine
        .import("https://wallet.example/import?other=1")
        .await
        .unwrap_err();
    assert!(matches!(err, AttestationError::ParseAttestationUrlFailed));
}
