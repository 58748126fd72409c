//! # Issuer Validation (Soft Gate)
//!
//! Asks the schema's resolver contract whether the attestation's signer is
//! an authorized issuer: `validateSignature(rootKeyUID, signer) → bool`.
//!
//! This gate is deliberately non-fatal. "Could not confirm trust" is a
//! different condition from "attestation is malformed or forged", so every
//! failure here — RPC error, decode error, missing chain constants —
//! degrades to `false` and processing continues. The degradation site logs
//! the underlying cause so transient outages remain distinguishable from
//! genuine non-authorization in the logs.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;

use easlink_core::{chain_config, ChainId};

use crate::caller::ContractCaller;

/// Human-readable signature of the resolver's issuer check.
const VALIDATE_SIGNATURE: &str = "validateSignature(bytes32 rootKeyUID, address signer) returns (bool)";

/// Check whether `signer` is an authorized issuer per the schema's
/// `resolver` contract. Never fails: any error degrades to `false`.
pub async fn validate_issuer<C: ContractCaller>(
    caller: &C,
    chain: ChainId,
    resolver: Address,
    signer: Address,
) -> bool {
    let Some(config) = chain_config(chain) else {
        tracing::warn!(%chain, "issuer validation degraded to unverified: chain not configured");
        return false;
    };
    if resolver == Address::ZERO {
        tracing::warn!(%chain, "issuer validation degraded to unverified: schema has no resolver");
        return false;
    }

    let args = [
        DynSolValue::FixedBytes(config.root_key_uid, 32),
        DynSolValue::Address(signer),
    ];
    match caller.call(chain, resolver, VALIDATE_SIGNATURE, &args).await {
        Ok(values) => match values.as_slice() {
            [DynSolValue::Bool(valid)] => *valid,
            other => {
                tracing::warn!(
                    %chain,
                    slots = other.len(),
                    "issuer validation degraded to unverified: non-boolean return"
                );
                false
            }
        },
        Err(e) => {
            tracing::warn!(%chain, error = %e, "issuer validation degraded to unverified");
            false
        }
    }
}
