//! Audit record and request types.
//!
//! `AuditRecord` is the only entity the ledger persists — one immutable,
//! hash-linked entry per mutating business action. `RecordRequest` is the
//! producer-side input every domain collaborator hands to the ledger writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel actor identifier for actions performed by the system itself
/// (scheduled jobs, webhook handlers, migrations) rather than a principal.
pub const SYSTEM_ACTOR: &str = "system";

/// Partition key for the ledger.
///
/// There is one independent hash chain per tenant — records for different
/// tenants never reference each other's hashes, and no global order exists
/// across tenants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque unique identifier for a single audit record.
///
/// Assigned by the ledger writer at append time and referenced in
/// verification diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(pub uuid::Uuid);

impl RecordId {
    /// Create a new, unique record ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The input to `Ledger::record()` — everything a domain collaborator knows
/// about the action it just performed.
///
/// All fields are required. `payload` may be an empty JSON object when the
/// action genuinely carries no detail, but it is never absent — an audit
/// entry with no context defeats the audit purpose.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordRequest {
    /// The tenant whose chain this record is appended to.
    pub tenant_id: TenantId,
    /// Business object type the action concerns (e.g. "product", "release").
    /// Opaque to the ledger; never interpreted.
    pub entity_type: String,
    /// Business object identifier. Opaque to the ledger.
    pub entity_id: String,
    /// Short verb token (e.g. "CREATE", "UPDATE", "DELETE", "PUBLISH").
    pub action: String,
    /// The principal that performed the action, or [`SYSTEM_ACTOR`].
    pub actor_id: String,
    /// Arbitrary JSON detail of what changed.
    pub payload: Value,
}

impl RecordRequest {
    pub fn new(
        tenant_id: TenantId,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
        action: impl Into<String>,
        actor_id: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            tenant_id,
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
            action: action.into(),
            actor_id: actor_id.into(),
            payload,
        }
    }
}

/// One immutable entry in a tenant's hash chain.
///
/// Each record commits to its predecessor via `prev_hash`, forming an
/// append-only chain per tenant. Modifying any field — including the embedded
/// `payload` — invalidates `hash` and every subsequent record's `prev_hash`,
/// which chain verification detects.
///
/// Records are created only by the ledger writer, never mutated, never
/// deleted. The storage port has no update or delete operation at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier, assigned at append time.
    pub id: RecordId,

    /// The tenant whose chain this record belongs to.
    pub tenant_id: TenantId,

    /// Business object type. Opaque to the ledger.
    pub entity_type: String,

    /// Business object identifier. Opaque to the ledger.
    pub entity_id: String,

    /// Short verb token describing the action. Opaque to the ledger.
    pub action: String,

    /// The principal that performed the action.
    pub actor_id: String,

    /// The structured "what changed" detail, as supplied by the caller.
    pub payload: Value,

    /// The deterministic canonical encoding of `payload` that was fed into
    /// the hash. Persisted so exports can reproduce the exact hash input.
    pub payload_canonical: String,

    /// Creation time, truncated to millisecond precision at capture.
    ///
    /// Milliseconds is the persistence precision of the chain store; the
    /// hash commits to exactly this truncated value, so recomputing the
    /// hash from a re-read record is always reproducible.
    pub created_at: DateTime<Utc>,

    /// The `hash` of the immediately preceding record in this tenant's
    /// chain, or `None` for the tenant's first ("genesis") record.
    pub prev_hash: Option<String>,

    /// SHA-256 (lowercase hex) over this record's own stored fields.
    ///
    /// Computed over `prev_hash ∥ payload_canonical ∥ entity_type ∥
    /// entity_id ∥ action ∥ actor_id ∥ created_at`; an absent `prev_hash`
    /// contributes nothing to the digest.
    pub hash: String,
}
