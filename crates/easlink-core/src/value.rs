//! # Typed ABI Values
//!
//! [`TypedValue`] is the tagged union the payload decoder produces: one
//! variant per ABI kind the engine understands. Values are always carried
//! in declaration order as a `Vec` — never a name-keyed map — because both
//! identity computation and display depend on the schema's field order.

use alloy_primitives::{Address, Bytes, I256, U256};
use serde::{Deserialize, Serialize};

/// A decoded ABI value together with its kind.
///
/// The `kind`/`value` serde layout is a self-describing discriminant so
/// persisted attestations can be re-read without the schema in hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TypedValue {
    /// A 20-byte account or contract address.
    Address(Address),
    /// A UTF-8 string.
    String(String),
    /// An opaque byte blob (`bytes` or widened `bytesN`).
    Bytes(Bytes),
    /// A signed 256-bit integer.
    Int(I256),
    /// An unsigned 256-bit integer (all `uintN` widths widen to this).
    Uint(U256),
    /// A boolean. Also the placeholder for ABI kinds the engine does not
    /// decode (arrays, tuples, functions), which decode to `Bool(false)`.
    Bool(bool),
}

impl TypedValue {
    /// Render the value as the string form used for display and for
    /// identity/collection-id concatenation.
    ///
    /// The rendering is fixed: changing it would silently change every
    /// computed identity, so treat it as part of the persistence format.
    pub fn as_display_string(&self) -> String {
        match self {
            TypedValue::Address(a) => a.to_checksum(None),
            TypedValue::String(s) => s.clone(),
            TypedValue::Bytes(b) => format!("0x{}", alloy_primitives::hex::encode(b)),
            TypedValue::Int(i) => i.to_string(),
            TypedValue::Uint(u) => u.to_string(),
            TypedValue::Bool(b) => b.to_string(),
        }
    }
}

impl std::fmt::Display for TypedValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_display_string())
    }
}
