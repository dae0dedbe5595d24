//! In-memory implementation of `ChainStore`.
//!
//! `InMemoryChainStore` is the reference store implementation. Each tenant's
//! chain is a `Vec` behind its own `Mutex`, with a `RwLock`ed map from
//! tenant to chain on top. The compare-and-append check and the push happen
//! under the per-tenant mutex, so the tail comparison and the commit are
//! one atomic unit for that tenant while other tenants' appends proceed
//! untouched.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chainseal_contracts::{AuditRecord, LedgerError, LedgerResult, TenantId};
use chainseal_core::traits::ChainStore;

type TenantChain = Arc<Mutex<Vec<AuditRecord>>>;

/// An in-memory, append-only chain store keyed by tenant.
///
/// # Thread safety
///
/// All methods take `&self`; the store is safe to share behind an `Arc`
/// across any number of writer and verifier threads. Lock ordering is
/// map-then-chain, and the map lock is never held while a chain lock is
/// taken for more than the lookup itself.
#[derive(Default)]
pub struct InMemoryChainStore {
    chains: RwLock<HashMap<String, TenantChain>>,
}

impl InMemoryChainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the chain for `tenant_id`, creating an empty one on first use.
    fn chain_for(&self, tenant_id: &TenantId) -> TenantChain {
        {
            let chains = self.chains.read().expect("chain map lock poisoned");
            if let Some(chain) = chains.get(&tenant_id.0) {
                return Arc::clone(chain);
            }
        }

        let mut chains = self.chains.write().expect("chain map lock poisoned");
        Arc::clone(
            chains
                .entry(tenant_id.0.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Vec::new()))),
        )
    }

    /// Fetch the chain for `tenant_id` without creating one.
    fn existing_chain(&self, tenant_id: &TenantId) -> Option<TenantChain> {
        let chains = self.chains.read().expect("chain map lock poisoned");
        chains.get(&tenant_id.0).map(Arc::clone)
    }
}

impl ChainStore for InMemoryChainStore {
    /// Compare-and-append: commit `record` only if its `prev_hash` matches
    /// the current tail hash of its tenant's chain.
    fn append(&self, record: AuditRecord) -> LedgerResult<()> {
        let chain = self.chain_for(&record.tenant_id);
        let mut chain = chain.lock().expect("tenant chain lock poisoned");

        let tail_hash = chain.last().map(|tail| tail.hash.as_str());
        if record.prev_hash.as_deref() != tail_hash {
            return Err(LedgerError::AppendConflict {
                tenant_id: record.tenant_id.0.clone(),
            });
        }

        chain.push(record);
        Ok(())
    }

    fn latest_by_tenant(&self, tenant_id: &TenantId) -> LedgerResult<Option<AuditRecord>> {
        match self.existing_chain(tenant_id) {
            Some(chain) => {
                let chain = chain.lock().expect("tenant chain lock poisoned");
                Ok(chain.last().cloned())
            }
            None => Ok(None),
        }
    }

    fn all_by_tenant(&self, tenant_id: &TenantId) -> LedgerResult<Vec<AuditRecord>> {
        match self.existing_chain(tenant_id) {
            Some(chain) => {
                let chain = chain.lock().expect("tenant chain lock poisoned");
                Ok(chain.clone())
            }
            None => Ok(Vec::new()),
        }
    }

    fn all_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> LedgerResult<Vec<AuditRecord>> {
        let chains: Vec<TenantChain> = {
            let map = self.chains.read().expect("chain map lock poisoned");
            map.values().map(Arc::clone).collect()
        };

        let mut matches = Vec::new();
        for chain in chains {
            let chain = chain.lock().expect("tenant chain lock poisoned");
            matches.extend(
                chain
                    .iter()
                    .filter(|r| r.entity_type == entity_type && r.entity_id == entity_id)
                    .cloned(),
            );
        }

        // Per-chain order is creation order already; a stable sort by
        // timestamp merges the (rare) multi-tenant case without reordering
        // records within one tenant.
        matches.sort_by_key(|r| r.created_at);
        Ok(matches)
    }
}

// ── Test-only corruption hooks ────────────────────────────────────────────────
//
// The tamper-detection properties need a way to stage exactly the states the
// verifier must catch: a mutated payload, a forged linkage, a fabricated
// genesis. The public contract has no such operations, so these exist only
// for this crate's tests.
#[cfg(test)]
impl InMemoryChainStore {
    /// Append `record` without the tail check, bypassing the no-fork guard.
    pub(crate) fn inject_unchecked(&self, record: AuditRecord) {
        let chain = self.chain_for(&record.tenant_id);
        let mut chain = chain.lock().expect("tenant chain lock poisoned");
        chain.push(record);
    }

    /// Mutate the record at `index` in `tenant_id`'s chain in place.
    pub(crate) fn mutate_record<F>(&self, tenant_id: &TenantId, index: usize, mutate: F)
    where
        F: FnOnce(&mut AuditRecord),
    {
        let chain = self.chain_for(tenant_id);
        let mut chain = chain.lock().expect("tenant chain lock poisoned");
        mutate(&mut chain[index]);
    }
}
