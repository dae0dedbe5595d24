//! Hash-chain primitives: record hashing and chain verification.
//!
//! Every field contributing to a record's hash is listed explicitly so
//! nothing is accidentally omitted.
//!
//! Hash input layout (bytes, in order):
//!   1. prev_hash as UTF-8 bytes (64 ASCII hex chars; zero bytes for the
//!      genesis record, whose prev_hash is absent)
//!   2. canonical payload encoding as UTF-8 bytes
//!   3. entity_type as UTF-8 bytes
//!   4. entity_id as UTF-8 bytes
//!   5. action as UTF-8 bytes
//!   6. actor_id as UTF-8 bytes
//!   7. created_at as RFC 3339 with millisecond precision, `Z` suffix

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use sha2::{Digest, Sha256};

use chainseal_contracts::{AuditRecord, VerificationReport};

use crate::canonical;

/// Capture "now" at the ledger's persistence precision.
///
/// Timestamps are truncated to milliseconds *before* hashing so that a
/// record re-read from any store that persists millisecond timestamps
/// recomputes to exactly the same hash. Sub-millisecond digits would be
/// silently dropped by such a store and break verification.
pub fn ledger_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// The fixed textual form of `created_at` used as hash input.
pub fn timestamp_repr(created_at: &DateTime<Utc>) -> String {
    created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Compute the SHA-256 hash for one audit record.
///
/// `prev_hash` is `None` exactly for a tenant's genesis record, in which
/// case it contributes nothing to the digest.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_record(
    prev_hash: Option<&str>,
    payload_canonical: &str,
    entity_type: &str,
    entity_id: &str,
    action: &str,
    actor_id: &str,
    created_at: &DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    if let Some(prev) = prev_hash {
        hasher.update(prev.as_bytes());
    }
    hasher.update(payload_canonical.as_bytes());
    hasher.update(entity_type.as_bytes());
    hasher.update(entity_id.as_bytes());
    hasher.update(action.as_bytes());
    hasher.update(actor_id.as_bytes());
    hasher.update(timestamp_repr(created_at).as_bytes());

    hex::encode(hasher.finalize())
}

/// Recompute the hash of `record` from its own stored fields.
///
/// The canonical payload is re-encoded from the stored `payload` value —
/// the persisted `payload_canonical` is *not* trusted, otherwise tampering
/// with the payload alone would go undetected.
fn recompute_hash(record: &AuditRecord) -> Result<String, String> {
    let canonical = canonical::encode(&record.payload)
        .map_err(|e| format!("payload cannot be re-encoded: {}", e))?;

    if canonical != record.payload_canonical {
        return Err(format!(
            "stored canonical payload does not match re-encoded payload: stored={}, computed={}",
            record.payload_canonical, canonical
        ));
    }

    Ok(hash_record(
        record.prev_hash.as_deref(),
        &canonical,
        &record.entity_type,
        &record.entity_id,
        &record.action,
        &record.actor_id,
        &record.created_at,
    ))
}

/// Replay one tenant's chain and check every invariant.
///
/// Single pass over `records` in creation order:
///
/// 1. **Genesis** — the first record's `prev_hash` must be absent.
/// 2. **Linkage** — every later record's `prev_hash` must equal the stored
///    `hash` of the record immediately before it.
/// 3. **Hash correctness** — every record's `hash` must match the value
///    recomputed from its own stored fields.
///
/// Verification stops at the first detected problem: once one link is
/// broken, every subsequent record's expected linkage is meaningless, and
/// the first break is the actionable diagnostic. Record positions in
/// messages are 1-based; `verified_records` counts the records fully
/// checked before the failure.
///
/// An empty chain is trivially valid.
pub fn verify_records(records: &[AuditRecord]) -> VerificationReport {
    let total = records.len();
    if total == 0 {
        return VerificationReport::empty();
    }

    for (index, record) in records.iter().enumerate() {
        let position = index + 1;

        if index == 0 {
            if let Some(found) = &record.prev_hash {
                return VerificationReport::fail(
                    total,
                    0,
                    format!(
                        "genesis record has non-empty prevHash: record {} (id {}), found={}",
                        position, record.id, found
                    ),
                );
            }
        } else {
            let expected = &records[index - 1].hash;
            let found = record.prev_hash.as_deref();
            if found != Some(expected.as_str()) {
                return VerificationReport::fail(
                    total,
                    index,
                    format!(
                        "chain broken at record {} (id {}): expected prevHash={}, found={}",
                        position,
                        record.id,
                        expected,
                        found.unwrap_or("none")
                    ),
                );
            }
        }

        match recompute_hash(record) {
            Ok(recomputed) if recomputed == record.hash => {}
            Ok(recomputed) => {
                return VerificationReport::fail(
                    total,
                    index,
                    format!(
                        "hash mismatch at record {} (id {}): stored={}, computed={}",
                        position, record.id, record.hash, recomputed
                    ),
                );
            }
            Err(reason) => {
                return VerificationReport::fail(
                    total,
                    index,
                    format!(
                        "hash mismatch at record {} (id {}): {}",
                        position, record.id, reason
                    ),
                );
            }
        }
    }

    VerificationReport::pass(total)
}
