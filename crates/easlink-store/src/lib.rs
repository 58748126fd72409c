//! # easlink-store — Attestation Identity & Persistence
//!
//! The tail of the pipeline:
//!
//! - **[`fields`]** — resolve caller-supplied `{label, path}` pairs against
//!   a decoded attestation, for display and for identity computation.
//! - **[`identity`]** — the collection-id and identity derivation used to
//!   detect re-issued attestations.
//! - **[`store`]** — the per-wallet persisted store: whole-file JSON
//!   document, single-writer mutex, watch-channel publication, and the
//!   exact-duplicate / same-identity / new add state machine.

pub mod fields;
pub mod identity;
pub mod store;

pub use fields::{resolve_field, resolve_fields, FieldRef};
pub use identity::{attestation_identity, canonical_signer, collection_id};
pub use store::{AddOutcome, AttestationStore, AttestationsByWallet, StoreError};
