//! # The Verification Pipeline
//!
//! [`AttestationEngine::import`] strings the stages together and owns the
//! ordering guarantees: signature verification completes before any
//! collaborator call, and issuer validation runs only once the schema is
//! known. Everything before the first contract call is pure CPU work, so
//! concurrent imports of different attestations are free to interleave.
//! The schema cache and the store serialize their own mutations.

use std::sync::Arc;

use easlink_codec::{decode_payload, extract_payload, parse_record};
use easlink_core::{chain_config, Attestation, AttestationError};
use easlink_schema::{
    decode_payload_fields, validate_issuer, ContractCaller, SchemaResolver, LEGACY_TICKET_SCHEMA,
};
use easlink_verify::verify_signer;

/// The attestation import engine.
///
/// Generic over the injected [`ContractCaller`] so tests substitute a
/// deterministic fake; engine instances share nothing globally.
pub struct AttestationEngine<C> {
    caller: Arc<C>,
    resolver: SchemaResolver<C>,
}

impl<C: ContractCaller> AttestationEngine<C> {
    /// Create an engine around a contract-call capability.
    pub fn new(caller: Arc<C>) -> Self {
        let resolver = SchemaResolver::new(Arc::clone(&caller));
        Self { caller, resolver }
    }

    /// Access the engine's schema resolver (shared cache included).
    pub fn resolver(&self) -> &SchemaResolver<C> {
        &self.resolver
    }

    /// Import an attestation from a URL.
    ///
    /// Runs the full pipeline. Every failure up to and including signer
    /// verification is fatal and happens before any contract call. A
    /// failing issuer check is not a failure: the returned attestation
    /// carries `is_issuer_valid = false`.
    pub async fn import(&self, url: &str) -> Result<Attestation, AttestationError> {
        let payload = extract_payload(url)?;
        let raw = decode_payload(&payload)?;
        let record = parse_record(&raw)?;

        // Hard gate. Nothing network-facing may run before this passes.
        let signer = verify_signer(&record)?;
        tracing::debug!(%signer, uid = %record.uid, "attestation signer verified");

        let config = chain_config(record.chain_id)
            .ok_or(AttestationError::ChainNotSupported(record.chain_id))?;

        // Records without a schema uid are legacy tickets with a fixed
        // field layout; everything else resolves through the registry.
        let schema_string = if record.has_schema() {
            self.resolver
                .resolve(record.chain_id, record.schema)
                .await?
                .schema
        } else {
            LEGACY_TICKET_SCHEMA.to_string()
        };

        let data = decode_payload_fields(&schema_string, &record.data)?;

        // Soft gate: the key schema's resolver contract decides whether
        // the signer is an authorized issuer. Any failure along the way
        // degrades to "unverified" instead of rejecting the attestation.
        let is_issuer_valid = match self
            .resolver
            .resolve(record.chain_id, config.key_schema_uid)
            .await
        {
            Ok(key_record) => {
                validate_issuer(
                    self.caller.as_ref(),
                    record.chain_id,
                    key_record.resolver,
                    signer,
                )
                .await
            }
            Err(e) => {
                tracing::warn!(
                    chain = %record.chain_id,
                    error = %e,
                    "issuer validation degraded to unverified: key schema unresolvable"
                );
                false
            }
        };

        tracing::info!(
            uid = %record.uid,
            chain = %record.chain_id,
            fields = data.len(),
            is_issuer_valid,
            "attestation imported"
        );

        Ok(Attestation {
            data,
            record,
            is_issuer_valid,
            source: url.to_string(),
        })
    }
}
