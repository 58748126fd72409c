//! # easlink-verify — Attestation Signature Verification
//!
//! The hard gate of the pipeline. Reconstructs the canonical EIP-712
//! signing digest for the fixed EAS `Attest` message shape, recovers the
//! signer address from the embedded `(r, s, v)` signature, and compares
//! it against the record's claimed signer.
//!
//! Everything here is pure, deterministic, CPU-bound work. The ordering
//! requirement of the pipeline — verification strictly before any contract
//! call — falls out of this crate having no collaborator dependency at all.

pub mod eip712;
pub mod recover;

pub use eip712::signing_digest;
pub use recover::{recover_signer, verify_signer};
