//! # easlink — Attestation Verification & Identity-Resolution Engine
//!
//! Takes an opaque, compressed, URL-embedded attestation, decodes it,
//! cryptographically verifies who signed it, resolves the on-chain schema
//! describing its fields, decodes its typed payload, and hands back a
//! fully-verified [`Attestation`] ready for per-wallet persistence.
//!
//! ## Pipeline
//!
//! ```text
//! URL → transport decode → record parse → signer verification (hard gate)
//!     → schema resolution → issuer validation (soft gate) → payload decode
//!     → Attestation → AttestationStore
//! ```
//!
//! The hard gate runs strictly before any contract call: a forged input
//! never costs a network round-trip. The soft gate never rejects — a
//! failed issuer check degrades to `is_issuer_valid = false`.
//!
//! The engine performs no networking of its own. Both contract calls go
//! through the [`ContractCaller`] capability injected at construction.

pub mod engine;

pub use engine::AttestationEngine;

pub use easlink_codec::{decode_payload, encode_payload, extract_payload, parse_record};
pub use easlink_core::{
    chain_config, Attestation, AttestationError, AttestationField, ChainConfig, ChainId,
    RawAttestationRecord, TypedValue,
};
pub use easlink_schema::{
    validate_issuer, CallerError, ContractCaller, SchemaRecord, SchemaResolver,
    LEGACY_TICKET_SCHEMA,
};
pub use easlink_store::{
    attestation_identity, collection_id, resolve_field, resolve_fields, AddOutcome,
    AttestationStore, AttestationsByWallet, FieldRef, StoreError,
};
pub use easlink_verify::{recover_signer, signing_digest, verify_signer};
