//! # easlink-schema — Schema Resolution & Payload Decoding
//!
//! The network-facing half of the attestation pipeline, behind a single
//! injected capability:
//!
//! - **[`caller`]** — the [`ContractCaller`] trait, the engine's only way
//!   to reach a chain. Transport, retries, and endpoint selection all live
//!   in the implementation, never here.
//! - **[`resolver`]** — fetches and caches [`SchemaRecord`]s: well-known
//!   table first, then a process-wide cache, then `getSchema(bytes32)` on
//!   the chain's schema registry.
//! - **[`issuer`]** — the soft gate: `validateSignature(rootKeyUID, signer)`
//!   against the schema's resolver contract, degrading to "unverified" on
//!   any failure.
//! - **[`payload`]** — turns the schema's comma-separated type string into
//!   ABI types and decodes the attestation's data blob into ordered,
//!   named [`TypedValue`](easlink_core::TypedValue)s.

pub mod caller;
pub mod issuer;
pub mod payload;
pub mod resolver;

pub use caller::{CallerError, ContractCaller};
pub use issuer::validate_issuer;
pub use payload::{decode_payload_fields, LEGACY_TICKET_SCHEMA};
pub use resolver::{SchemaRecord, SchemaResolver};
