//! The storage port for the chainseal ledger.
//!
//! `ChainStore` is the *entire* contract between the ledger and whatever
//! engine persists records. It is deliberately narrow: one conditional
//! append and three ordered reads. There is no update and no delete — the
//! "history is never rewritten" invariant is enforced by the shape of this
//! trait, not by convention in its implementations.

use chainseal_contracts::{AuditRecord, LedgerResult, TenantId};

/// An append-only, per-tenant-ordered record store.
///
/// # Ordering
///
/// Within one tenant, append order equals creation order equals hash-chain
/// order. No ordering relationship exists across tenants — each tenant's
/// chain is an independent ledger.
///
/// # Atomicity
///
/// `append` is a **compare-and-append**: the tail comparison and the commit
/// must be observed as a single atomic unit per tenant. Implementations may
/// use a per-tenant lock, a conditional insert, or a serializable
/// transaction — whatever the engine offers — but two records claiming the
/// same predecessor must never both commit. Appends for different tenants
/// must not block each other.
///
/// # Reads
///
/// Reads must return a consistent snapshot: a verify running concurrently
/// with an in-flight append sees that record completely or not at all,
/// never partially.
pub trait ChainStore: Send + Sync {
    /// Commit `record` iff its `prev_hash` equals the current tail hash of
    /// `record.tenant_id`'s chain (both `None` when the chain is empty).
    ///
    /// Returns `LedgerError::AppendConflict` when the tail has moved since
    /// the caller read it, and `LedgerError::StoreUnavailable` on I/O
    /// failure. A record is committed only when this returns `Ok`.
    fn append(&self, record: AuditRecord) -> LedgerResult<()>;

    /// The most recently appended record for `tenant_id`, or `None` if the
    /// tenant has no records yet.
    fn latest_by_tenant(&self, tenant_id: &TenantId) -> LedgerResult<Option<AuditRecord>>;

    /// All of `tenant_id`'s records in creation order.
    fn all_by_tenant(&self, tenant_id: &TenantId) -> LedgerResult<Vec<AuditRecord>>;

    /// All records concerning one business object, in creation order.
    ///
    /// An entity normally lives in a single tenant; if the same
    /// (entity_type, entity_id) pair appears under several tenants, the
    /// merged result is ordered by `created_at`.
    fn all_by_entity(&self, entity_type: &str, entity_id: &str)
        -> LedgerResult<Vec<AuditRecord>>;
}
