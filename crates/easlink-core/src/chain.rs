//! # Chain Configuration Table
//!
//! Per-chain constants the engine needs before it can talk to a chain:
//! the key schema uid (locates the authorized-issuer resolver), the EAS
//! schema registry address, the root key uid (passed to the resolver's
//! `validateSignature`), and the EAS contract address.
//!
//! Only the chains listed here are supported. Adding a chain means adding
//! a table row — no protocol change. Any other chain id fails with
//! [`AttestationError::ChainNotSupported`](crate::AttestationError::ChainNotSupported)
//! before any contract call is attempted.

use alloy_primitives::{address, b256, Address, B256};
use serde::{Deserialize, Serialize};

/// An EVM chain identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Ethereum mainnet.
    pub const MAINNET: ChainId = ChainId(1);
    /// Arbitrum One.
    pub const ARBITRUM_ONE: ChainId = ChainId(42161);
    /// Sepolia testnet.
    pub const SEPOLIA: ChainId = ChainId(11_155_111);

    /// Wrap a raw chain id.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The raw numeric chain id.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// The four per-chain constants required by schema resolution and issuer
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    /// The chain this row configures.
    pub chain: ChainId,
    /// Schema uid whose resolver performs authorized-issuer checks.
    pub key_schema_uid: B256,
    /// EAS schema registry contract (`getSchema(bytes32)` lives here).
    pub schema_registry: Address,
    /// Root key uid passed to the resolver's `validateSignature`.
    pub root_key_uid: B256,
    /// The EAS attestation contract itself.
    pub eas_contract: Address,
}

/// The fixed allow-list of supported chains.
static CHAIN_CONFIGS: &[ChainConfig] = &[
    ChainConfig {
        chain: ChainId::MAINNET,
        key_schema_uid: b256!("4455598d3ec459c4af59335f7729fea0f50ced46cb1cd67914f5349d44142ec1"),
        schema_registry: address!("a7b39296258348c78294f95b872b282326a97bdf"),
        root_key_uid: b256!("e5c2bfd98a1b35573610b4e5a367bbcb5c736e42508a33fd6046bea68eed1f89"),
        eas_contract: address!("a1207f3bba224e2c9c3c6d5af63d0eb1582ce587"),
    },
    ChainConfig {
        chain: ChainId::ARBITRUM_ONE,
        key_schema_uid: b256!("4455598d3ec459c4af59335f7729fea0f50ced46cb1cd67914f5349d44142ec1"),
        schema_registry: address!("a310da9c5b885e7fb3fba9d66e9ba6df512b78eb"),
        root_key_uid: b256!("e5c2bfd98a1b35573610b4e5a367bbcb5c736e42508a33fd6046bea68eed1f89"),
        eas_contract: address!("bd75f629a22dc1ced33dda0b68c546a1c035c458"),
    },
    ChainConfig {
        chain: ChainId::SEPOLIA,
        key_schema_uid: b256!("4455598d3ec459c4af59335f7729fea0f50ced46cb1cd67914f5349d44142ec1"),
        schema_registry: address!("0a7e2ff54e76b8e6659aedc9103fb21c038050d0"),
        root_key_uid: b256!("7c4e7fd383012f508a29c5b6ef8ca6964b1dbd55c3f1c2eb0e68d1a5a8a57d7c"),
        eas_contract: address!("c2679fbd37d54388ce493f1db75320d236e1815e"),
    },
];

/// Look up the configuration row for a chain.
///
/// Returns `None` for any chain outside the allow-list; callers map that
/// to `ChainNotSupported` before any collaborator call is made.
pub fn chain_config(chain: ChainId) -> Option<&'static ChainConfig> {
    CHAIN_CONFIGS.iter().find(|c| c.chain == chain)
}
