//! # Injected Contract-Call Capability
//!
//! The engine never talks to a chain directly. Everything on-chain goes
//! through [`ContractCaller`], injected at construction time so tests can
//! substitute a deterministic fake and multiple engine instances cannot
//! interfere through shared global state.
//!
//! Implementations must be `Send + Sync`; the two call sites (schema
//! resolution and issuer validation) are the engine's only suspension
//! points. Timeout and retry policy belong to the implementation.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::Address;
use thiserror::Error;

use easlink_core::ChainId;

/// Errors an injected contract caller may surface.
#[derive(Debug, Error)]
pub enum CallerError {
    /// The RPC endpoint was unreachable or returned a transport-level error.
    #[error("contract call transport failed: {reason}")]
    Transport {
        /// Human-readable description of the transport failure.
        reason: String,
    },

    /// The call executed but its return data could not be decoded against
    /// the declared function signature.
    #[error("contract return data decode failed: {reason}")]
    Decode {
        /// Description of the decode failure.
        reason: String,
    },

    /// The caller refuses the request (for example, an endpoint is not
    /// configured for the chain).
    #[error("contract call rejected: {reason}")]
    Rejected {
        /// Why the call was not attempted.
        reason: String,
    },
}

/// An async, read-only contract call capability.
///
/// `function` is the human-readable signature of the view function being
/// called (for example `getSchema(bytes32) returns (bytes32,address,bool,string)`);
/// the implementation uses it to encode `args` and decode the return data
/// into one [`DynSolValue`] per return slot, in declaration order.
pub trait ContractCaller: Send + Sync {
    /// Perform a read-only call against `to` on `chain`.
    fn call(
        &self,
        chain: ChainId,
        to: Address,
        function: &str,
        args: &[DynSolValue],
    ) -> impl std::future::Future<Output = Result<Vec<DynSolValue>, CallerError>> + Send;
}
