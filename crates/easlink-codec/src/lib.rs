//! # easlink-codec — Attestation Transport Codec
//!
//! Everything between "a URL someone scanned" and "a typed
//! [`RawAttestationRecord`](easlink_core::RawAttestationRecord)":
//!
//! - **[`transport`]** — locate the encoded payload inside a URL
//!   (fragment `attestation=`, or `ticket`/`attestation` query parameter)
//!   and reverse the base64url + gzip transport encoding.
//! - **[`array`]** — decode the recovered bytes as a positional JSON
//!   array into the raw record.
//!
//! All of this is pure, synchronous CPU work; no I/O happens here.

pub mod array;
pub mod transport;

pub use array::parse_record;
pub use transport::{decode_payload, encode_payload, extract_payload};
