//! # Per-Wallet Attestation Store
//!
//! One JSON document maps wallet addresses to their ordered attestation
//! lists. Every mutation rewrites the whole document; the in-memory map
//! and subscribers only observe a mutation after the file write succeeds,
//! so disk and memory never diverge past a successful operation.
//!
//! ## Add State Machine
//!
//! - **Exact duplicate** (structural equality with a stored entry): no-op,
//!   reports [`AddOutcome::Duplicate`].
//! - **Same identity, different content**: the stored entry is replaced in
//!   place, keeping its array position.
//! - **New**: appended to the wallet's list.
//!
//! ## Concurrency
//!
//! All read-modify-write cycles run under one `parking_lot::Mutex`, which
//! also covers the file write. Concurrent imports therefore serialize at
//! this boundary and cannot lose updates. Publication uses a
//! `tokio::sync::watch` channel: subscribers see the current mapping
//! immediately and every mutation after it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::watch;

use easlink_core::Attestation;

use crate::fields::FieldRef;
use crate::identity::attestation_identity;

/// The persisted document shape: wallet address → ordered attestations.
pub type AttestationsByWallet = HashMap<Address, Vec<Attestation>>;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed. The in-memory state is
    /// unchanged when this is returned from a mutation.
    #[error("attestation store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file exists but does not decode as the expected document.
    #[error("attestation store document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Outcome of an add operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Appended as a new entry.
    Appended,
    /// Replaced an existing entry with the same identity, in place.
    Replaced,
    /// Structurally equal to a stored entry; nothing changed.
    Duplicate,
}

impl AddOutcome {
    /// Whether the operation changed the stored list.
    pub fn was_added(self) -> bool {
        !matches!(self, AddOutcome::Duplicate)
    }
}

/// File-backed attestation store with identity-based deduplication.
pub struct AttestationStore {
    path: PathBuf,
    inner: Mutex<AttestationsByWallet>,
    publisher: watch::Sender<AttestationsByWallet>,
}

impl AttestationStore {
    /// Open the store at `path`, loading the existing document when one is
    /// present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let initial: AttestationsByWallet = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AttestationsByWallet::new(),
            Err(e) => return Err(e.into()),
        };
        let (publisher, _) = watch::channel(initial.clone());
        Ok(Self {
            path,
            inner: Mutex::new(initial),
            publisher,
        })
    }

    /// Subscribe to the published mapping: the current value is observable
    /// immediately, every successful mutation after it.
    pub fn subscribe(&self) -> watch::Receiver<AttestationsByWallet> {
        self.publisher.subscribe()
    }

    /// Snapshot of a wallet's stored attestations.
    pub fn attestations_for(&self, wallet: Address) -> Vec<Attestation> {
        self.inner.lock().get(&wallet).cloned().unwrap_or_default()
    }

    /// Add an attestation to a wallet's list.
    ///
    /// The collection/identifying field references drive identity matching;
    /// empty lists disable it, so non-duplicates are then always appended.
    pub fn add(
        &self,
        wallet: Address,
        attestation: Attestation,
        collection_fields: &[FieldRef],
        identifying_fields: &[FieldRef],
    ) -> Result<AddOutcome, StoreError> {
        let mut guard = self.inner.lock();
        let stored = guard.get(&wallet).map(Vec::as_slice).unwrap_or(&[]);

        if stored.contains(&attestation) {
            tracing::debug!(%wallet, uid = %attestation.record.uid, "exact duplicate, not added");
            return Ok(AddOutcome::Duplicate);
        }

        let identity = attestation_identity(&attestation, collection_fields, identifying_fields);
        let replace_at = identity.as_ref().and_then(|id| {
            stored.iter().position(|existing| {
                attestation_identity(existing, collection_fields, identifying_fields).as_ref()
                    == Some(id)
            })
        });

        let mut list = stored.to_vec();
        let outcome = match replace_at {
            Some(index) => {
                list[index] = attestation;
                AddOutcome::Replaced
            }
            None => {
                list.push(attestation);
                AddOutcome::Appended
            }
        };

        self.commit(&mut guard, wallet, list)?;
        Ok(outcome)
    }

    /// Remove every stored entry structurally equal to `attestation`.
    ///
    /// Returns whether anything was removed.
    pub fn remove(
        &self,
        wallet: Address,
        attestation: &Attestation,
    ) -> Result<bool, StoreError> {
        let mut guard = self.inner.lock();
        let Some(stored) = guard.get(&wallet) else {
            return Ok(false);
        };

        let list: Vec<Attestation> = stored
            .iter()
            .filter(|a| *a != attestation)
            .cloned()
            .collect();
        if list.len() == stored.len() {
            return Ok(false);
        }

        self.commit(&mut guard, wallet, list)?;
        Ok(true)
    }

    /// Persist a modified wallet list, then commit it to memory and
    /// publish. Called with the store lock held; the write happening
    /// before the in-memory update is what keeps disk and memory in step
    /// when the write fails.
    fn commit(
        &self,
        guard: &mut AttestationsByWallet,
        wallet: Address,
        list: Vec<Attestation>,
    ) -> Result<(), StoreError> {
        let mut snapshot = guard.clone();
        if list.is_empty() {
            snapshot.remove(&wallet);
        } else {
            snapshot.insert(wallet, list);
        }

        write_document(&self.path, &snapshot)?;
        *guard = snapshot.clone();
        self.publisher.send_replace(snapshot);
        Ok(())
    }
}

/// Rewrite the whole document: serialize, write to a sibling temp file,
/// rename over the target.
fn write_document(path: &Path, document: &AttestationsByWallet) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(document)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
