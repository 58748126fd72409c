//! # Schema Record Resolution
//!
//! A [`SchemaRecord`] describes how to decode an attestation's data blob:
//! the field layout string plus the resolver contract consulted for issuer
//! checks. Resolution has three tiers, cheapest first:
//!
//! 1. A hardcoded table of well-known records — no network call at all.
//! 2. A process-wide cache keyed by `(chain, registry, function, params)`.
//! 3. `getSchema(bytes32)` on the chain's schema registry via the injected
//!    [`ContractCaller`].
//!
//! Schema records are immutable once published on-chain, which is what
//! makes the cache safe. `DashMap` serializes cache mutations so two
//! concurrent imports of the same schema cannot lose an entry.

use std::sync::Arc;

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::{address, b256, Address, B256};
use dashmap::DashMap;

use easlink_core::{chain_config, AttestationError, Cause, ChainId};

use crate::caller::ContractCaller;
use crate::payload::LEGACY_TICKET_SCHEMA;

/// Human-readable signature of the registry lookup function.
const GET_SCHEMA: &str = "getSchema(bytes32 uid) returns (bytes32 uid, address resolver, bool revocable, string schema)";

/// A resolved schema registry record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRecord {
    /// The schema's registry uid.
    pub uid: B256,
    /// Resolver contract consulted for authorized-issuer checks. Zero when
    /// the schema has no resolver.
    pub resolver: Address,
    /// Whether attestations under this schema are revocable.
    pub revocable: bool,
    /// Comma-separated `"type name"` field list defining the payload layout.
    pub schema: String,
}

/// Well-known records shipped with the engine, as
/// `(uid, resolver, revocable, schema)` rows. These resolve with no
/// network call, which also makes first-scan imports of the common ticket
/// schema work offline.
static WELL_KNOWN_SCHEMAS: &[(B256, Address, bool, &str)] = &[(
    b256!("7f6fb09beb1886d0b223e9f15242961198dd360021b2c9f75ac879c0f786cafd"),
    address!("823924515a1bb30d9a1b0e2dbc363d52cbc1e9d2"),
    true,
    LEGACY_TICKET_SCHEMA,
)];

/// Cache key for resolved registry calls. Mirrors the call itself so a
/// record fetched for one chain is never served for another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    chain: ChainId,
    contract: Address,
    function: &'static str,
    params: B256,
}

/// Schema registry client with a process-wide cache.
pub struct SchemaResolver<C> {
    caller: Arc<C>,
    cache: DashMap<CacheKey, SchemaRecord>,
}

impl<C: ContractCaller> SchemaResolver<C> {
    /// Create a resolver around an injected contract caller.
    pub fn new(caller: Arc<C>) -> Self {
        Self {
            caller,
            cache: DashMap::new(),
        }
    }

    /// Resolve the schema record for `schema_uid` on `chain`.
    ///
    /// Fails with `ChainNotSupported` before any collaborator call when the
    /// chain is outside the configured table, and with
    /// `SchemaRecordNotFound` when the registry call or its tuple decode
    /// fails.
    pub async fn resolve(
        &self,
        chain: ChainId,
        schema_uid: B256,
    ) -> Result<SchemaRecord, AttestationError> {
        if let Some((uid, resolver, revocable, schema)) = WELL_KNOWN_SCHEMAS
            .iter()
            .find(|(uid, ..)| *uid == schema_uid)
        {
            return Ok(SchemaRecord {
                uid: *uid,
                resolver: *resolver,
                revocable: *revocable,
                schema: (*schema).to_string(),
            });
        }

        let config =
            chain_config(chain).ok_or(AttestationError::ChainNotSupported(chain))?;

        let key = CacheKey {
            chain,
            contract: config.schema_registry,
            function: GET_SCHEMA,
            params: schema_uid,
        };
        if let Some(hit) = self.cache.get(&key) {
            tracing::debug!(%chain, schema = %schema_uid, "schema cache hit");
            return Ok(hit.clone());
        }

        let values = self
            .caller
            .call(
                chain,
                config.schema_registry,
                GET_SCHEMA,
                &[DynSolValue::FixedBytes(schema_uid, 32)],
            )
            .await
            .map_err(|e| {
                AttestationError::SchemaRecordNotFound(Cause::SchemaLookup(e.to_string()))
            })?;

        let record = decode_schema_tuple(&values)?;
        self.cache.insert(key, record.clone());
        Ok(record)
    }
}

/// Decode the `(bytes32, address, bool, string)` return tuple of
/// `getSchema`. Accepts both a flattened return sequence and a single
/// wrapping tuple value.
fn decode_schema_tuple(values: &[DynSolValue]) -> Result<SchemaRecord, AttestationError> {
    let slots: &[DynSolValue] = match values {
        [DynSolValue::Tuple(inner)] => inner,
        other => other,
    };

    match slots {
        [DynSolValue::FixedBytes(uid, 32), DynSolValue::Address(resolver), DynSolValue::Bool(revocable), DynSolValue::String(schema)] => {
            Ok(SchemaRecord {
                uid: *uid,
                resolver: *resolver,
                revocable: *revocable,
                schema: schema.clone(),
            })
        }
        _ => Err(AttestationError::SchemaRecordNotFound(Cause::SchemaLookup(
            format!("unexpected getSchema return shape: {} values", slots.len()),
        ))),
    }
}
