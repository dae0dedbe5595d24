//! The ledger façade: the producer-side `record()` operation and the
//! consumer-side `verify()` / listing operations.
//!
//! The hard part lives in `record()`. Reading the tenant's tail and
//! appending the next record is a read-then-write sequence; two concurrent
//! calls for the same tenant could otherwise both read the same tail and
//! fork the chain. The writer closes the race optimistically: the store's
//! `append` is conditional on the tail being unchanged, and a rejected
//! append triggers a fresh tail read, bounded by `max_append_retries`.
//! Contention on one tenant never delays appends for another.

use std::sync::Arc;

use tracing::{debug, info, warn};

use chainseal_contracts::{
    AuditRecord, LedgerError, LedgerResult, RecordId, RecordRequest, TenantId,
    VerificationReport,
};
use chainseal_core::{config::LedgerConfig, traits::ChainStore};

use crate::{canonical, chain};

/// The tamper-evident audit ledger.
///
/// One instance serves any number of concurrent domain collaborators; the
/// no-fork guarantee is carried by the `ChainStore`'s compare-and-append
/// contract, so multiple `Ledger` instances over the same store are equally
/// safe.
pub struct Ledger {
    store: Arc<dyn ChainStore>,
    config: LedgerConfig,
}

impl Ledger {
    /// Create a ledger over `store` with default configuration.
    pub fn new(store: Arc<dyn ChainStore>) -> Self {
        Self::with_config(store, LedgerConfig::default())
    }

    /// Create a ledger over `store` with explicit configuration.
    pub fn with_config(store: Arc<dyn ChainStore>, config: LedgerConfig) -> Self {
        Self { store, config }
    }

    /// Append one audit record to the caller's tenant chain.
    ///
    /// # Algorithm
    ///
    /// 1. Canonically encode the payload. An `Encoding` failure aborts here
    ///    — nothing has touched the chain, no partial record exists.
    /// 2. Read the tenant's current tail hash.
    /// 3. Capture `created_at` at millisecond precision.
    /// 4. Compute the record hash and append via compare-and-append.
    /// 5. On `AppendConflict` (the tail moved underneath us), go back to
    ///    step 2; give up with `RetriesExhausted` after the configured
    ///    bound rather than looping forever.
    ///
    /// The appended record, including its new `hash`, is returned. Each
    /// retry is a fresh, independent computation — a fresh tail read, a
    /// fresh timestamp, a fresh record id.
    pub fn record(&self, request: RecordRequest) -> LedgerResult<AuditRecord> {
        let payload_canonical = canonical::encode(&request.payload)?;

        let max_attempts = self.config.max_append_retries.max(1);
        for attempt in 1..=max_attempts {
            let prev_hash = self
                .store
                .latest_by_tenant(&request.tenant_id)?
                .map(|tail| tail.hash);

            let created_at = chain::ledger_timestamp();
            let hash = chain::hash_record(
                prev_hash.as_deref(),
                &payload_canonical,
                &request.entity_type,
                &request.entity_id,
                &request.action,
                &request.actor_id,
                &created_at,
            );

            let record = AuditRecord {
                id: RecordId::new(),
                tenant_id: request.tenant_id.clone(),
                entity_type: request.entity_type.clone(),
                entity_id: request.entity_id.clone(),
                action: request.action.clone(),
                actor_id: request.actor_id.clone(),
                payload: request.payload.clone(),
                payload_canonical: payload_canonical.clone(),
                created_at,
                prev_hash,
                hash,
            };

            match self.store.append(record.clone()) {
                Ok(()) => {
                    info!(
                        tenant_id = %record.tenant_id,
                        record_id = %record.id,
                        entity_type = %record.entity_type,
                        entity_id = %record.entity_id,
                        action = %record.action,
                        attempt,
                        "audit record appended"
                    );
                    return Ok(record);
                }
                Err(LedgerError::AppendConflict { .. }) => {
                    debug!(
                        tenant_id = %request.tenant_id,
                        attempt,
                        "chain tail moved during append, retrying with fresh tail"
                    );
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            tenant_id = %request.tenant_id,
            attempts = max_attempts,
            "append retries exhausted under contention"
        );
        Err(LedgerError::RetriesExhausted {
            tenant_id: request.tenant_id.0.clone(),
            attempts: max_attempts,
        })
    }

    /// Replay `tenant_id`'s full chain and report its integrity.
    ///
    /// A tamper finding is a normal, structured negative result — this
    /// method only errors when the store itself cannot be read.
    pub fn verify(&self, tenant_id: &TenantId) -> LedgerResult<VerificationReport> {
        let records = self.store.all_by_tenant(tenant_id)?;
        let report = chain::verify_records(&records);

        if report.valid {
            debug!(
                tenant_id = %tenant_id,
                total_records = report.total_records,
                "chain verification passed"
            );
        } else {
            warn!(
                tenant_id = %tenant_id,
                total_records = report.total_records,
                verified_records = report.verified_records,
                message = %report.message,
                "chain verification FAILED"
            );
        }

        Ok(report)
    }

    /// All of `tenant_id`'s records in creation order.
    pub fn list_by_tenant(&self, tenant_id: &TenantId) -> LedgerResult<Vec<AuditRecord>> {
        self.store.all_by_tenant(tenant_id)
    }

    /// One business object's history, in creation order.
    pub fn list_by_entity(
        &self,
        entity_type: &str,
        entity_id: &str,
    ) -> LedgerResult<Vec<AuditRecord>> {
        self.store.all_by_entity(entity_type, entity_id)
    }

    /// The current chain-head hash for `tenant_id`, or `None` for an empty
    /// chain.
    ///
    /// Exports embed this as a compact tamper-evidence stamp: any later
    /// alteration of the chain changes the head hash the stamp no longer
    /// matches.
    pub fn head_hash(&self, tenant_id: &TenantId) -> LedgerResult<Option<String>> {
        Ok(self
            .store
            .latest_by_tenant(tenant_id)?
            .map(|record| record.hash))
    }
}
