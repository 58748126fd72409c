//! # easlink-core — Foundational Types for the Attestation Engine
//!
//! This crate provides the shared vocabulary used throughout the workspace:
//!
//! - **[`RawAttestationRecord`]** — the positionally-decoded attestation
//!   fields as they arrive off the wire, immutable once parsed.
//! - **[`TypedValue`] / [`AttestationField`]** — the tagged union over
//!   decoded ABI values, always carried as an *ordered list* because
//!   downstream identity computation depends on declaration order.
//! - **[`Attestation`]** — the fully-verified, fully-decoded unit. Only the
//!   verification pipeline constructs one; untrusted input never does.
//! - **[`ChainConfig`]** — the per-chain constant table (key schema uid,
//!   schema registry, root key uid, EAS contract).
//! - **[`AttestationError`] / [`Cause`]** — the two-tier error taxonomy:
//!   a small public surface wrapping a richer internal cause enum.

pub mod attestation;
pub mod chain;
pub mod error;
pub mod record;
pub mod value;

// Re-export primary types.
pub use attestation::{Attestation, AttestationField};
pub use chain::{chain_config, ChainConfig, ChainId};
pub use error::{AttestationError, Cause};
pub use record::RawAttestationRecord;
pub use value::TypedValue;

// The Ethereum primitive types used across crate boundaries.
pub use alloy_primitives::{Address, Bytes, B256, I256, U256};
