//! # Error Taxonomy
//!
//! Two-tier error design: a rich internal [`Cause`] enum records *what*
//! went wrong mechanically (gzip inflate, positional decode, digest
//! construction, contract call), and the small public [`AttestationError`]
//! enum records *which stage* of the pipeline rejected the attestation.
//! Callers match on the public tier; the internal tier travels along as
//! the `source()` chain for diagnostics.
//!
//! ## Propagation Policy
//!
//! Every failure up to and including signature verification is fatal — the
//! attestation is rejected outright and nothing is cached or stored. The
//! single deliberate soft-failure path is the issuer-validation call, which
//! degrades to `is_issuer_valid = false` at its call site and never reaches
//! this taxonomy as a fatal error.

use alloy_primitives::Address;
use thiserror::Error;

use crate::chain::ChainId;

/// Internal failure causes. Wrapped into [`AttestationError`] before
/// crossing the crate boundary; never matched on by callers.
#[derive(Debug, Error)]
pub enum Cause {
    /// Base64 or gzip decoding of the transported payload failed.
    #[error("payload inflate failed: {0}")]
    Unzip(String),

    /// The inflated payload was not a UTF-8 JSON array literal.
    #[error("attestation payload is not a JSON array: {0}")]
    DecodeArrayString(String),

    /// A positional slot of the attestation array could not be decoded.
    #[error("attestation record decode failed: {0}")]
    DecodeRecord(String),

    /// The EIP-712 signing digest could not be constructed.
    #[error("signing digest construction failed: {0}")]
    BuildDigest(String),

    /// The (r, s, v) triple could not be rebuilt into a recoverable signature.
    #[error("signature reconstruction failed: {0}")]
    ReconstructSignature(String),

    /// Schema-driven ABI decoding of the data blob failed.
    #[error("attestation data extraction failed: {0}")]
    ExtractData(String),

    /// The `validateSignature` resolver call failed or returned a non-boolean.
    #[error("validateSignature call failed: {0}")]
    ValidateSignatureCall(String),

    /// The schema registry call failed or its tuple could not be decoded.
    #[error("schema record lookup failed: {0}")]
    SchemaLookup(String),

    /// A required per-chain constant is absent from the configuration table.
    #[error("missing per-chain constant: {0}")]
    MissingChainConstant(&'static str),
}

/// Public error surface of the attestation pipeline.
///
/// Each variant corresponds to a pipeline stage; the wrapped [`Cause`]
/// carries the mechanical detail.
#[derive(Debug, Error)]
pub enum AttestationError {
    /// No `attestation=` fragment and no `ticket`/`attestation` query
    /// parameter was present in the URL.
    #[error("could not locate an attestation payload in the URL")]
    ParseAttestationUrlFailed,

    /// Transport decoding, record parsing, or payload extraction failed.
    #[error("failed to extract attestation")]
    ExtractAttestationFailed(#[source] Cause),

    /// The signer address could not be recovered from the signature.
    #[error("EC recovery of the attestation signer failed")]
    EcRecoverFailed(#[source] Cause),

    /// The recovered signer does not match the record's claimed signer.
    /// This is the hard gate: nothing past it runs for a forged input.
    #[error("recovered signer {recovered} does not match claimed signer {claimed}")]
    EcRecoveredSignerDoesNotMatch {
        /// The address EC-recovered from the embedded signature.
        recovered: Address,
        /// The address the record claims signed it.
        claimed: Address,
    },

    /// The issuer-validation call could not be issued at all (for example,
    /// the resolver address was unusable). Failures of the call itself
    /// degrade to `is_issuer_valid = false` instead of surfacing here.
    #[error("issuer signature validation failed")]
    ValidateSignatureFailed(#[source] Cause),

    /// No schema record could be resolved for the attestation's schema uid.
    #[error("schema record not found")]
    SchemaRecordNotFound(#[source] Cause),

    /// The attestation names a chain outside the configured table.
    #[error("chain {0} is not supported")]
    ChainNotSupported(ChainId),
}
