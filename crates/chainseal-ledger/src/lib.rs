//! # chainseal-ledger
//!
//! Tamper-evident, per-tenant, SHA-256 hash-chained audit ledger.
//!
//! ## Overview
//!
//! Every mutating action in the wider compliance backend is recorded as one
//! immutable `AuditRecord` that links to its predecessor via its SHA-256
//! hash. One independent chain exists per tenant. Altering, reordering, or
//! deleting any committed record — even a single byte — breaks the chain
//! and is detected by `Ledger::verify`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use chainseal_contracts::{RecordRequest, TenantId};
//! use chainseal_ledger::{InMemoryChainStore, Ledger};
//!
//! let ledger = Ledger::new(Arc::new(InMemoryChainStore::new()));
//! let record = ledger.record(RecordRequest::new(
//!     TenantId::new("acme"), "product", "prod-1", "CREATE", "user-7",
//!     serde_json::json!({ "name": "Widget" }),
//! ))?;
//!
//! let report = ledger.verify(&TenantId::new("acme"))?;
//! assert!(report.valid);
//! ```

pub mod canonical;
pub mod chain;
pub mod ledger;
pub mod memory;

pub use chain::{hash_record, verify_records};
pub use ledger::Ledger;
pub use memory::InMemoryChainStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use serde_json::json;

    use chainseal_contracts::{
        AuditRecord, LedgerError, LedgerResult, RecordId, RecordRequest, TenantId,
    };
    use chainseal_core::{config::LedgerConfig, traits::ChainStore};

    use super::{chain, InMemoryChainStore, Ledger};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn tenant(name: &str) -> TenantId {
        TenantId::new(name)
    }

    /// A ledger over a fresh in-memory store, returning both.
    fn make_ledger() -> (Ledger, Arc<InMemoryChainStore>) {
        let store = Arc::new(InMemoryChainStore::new());
        (Ledger::new(Arc::clone(&store) as Arc<dyn ChainStore>), store)
    }

    /// Build a request with a distinguishable payload.
    fn make_request(tenant_id: &TenantId, name: &str) -> RecordRequest {
        RecordRequest::new(
            tenant_id.clone(),
            "product",
            "prod-1",
            "UPDATE",
            "user-7",
            json!({ "name": name }),
        )
    }

    // ── P1: linear integrity ──────────────────────────────────────────────────

    #[test]
    fn sequential_appends_form_a_valid_chain() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");

        for name in ["A", "B", "C"] {
            ledger.record(make_request(&t, name)).unwrap();
        }

        let report = ledger.verify(&t).unwrap();
        assert!(report.valid);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.verified_records, 3);
    }

    #[test]
    fn each_record_links_to_its_predecessor() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");

        let first = ledger.record(make_request(&t, "A")).unwrap();
        let second = ledger.record(make_request(&t, "B")).unwrap();
        let third = ledger.record(make_request(&t, "C")).unwrap();

        assert_eq!(first.prev_hash, None);
        assert_eq!(second.prev_hash.as_deref(), Some(first.hash.as_str()));
        assert_eq!(third.prev_hash.as_deref(), Some(second.hash.as_str()));
    }

    #[test]
    fn empty_chain_verifies_with_zero_counts() {
        let (ledger, _) = make_ledger();
        let report = ledger.verify(&tenant("nobody")).unwrap();

        assert!(report.valid);
        assert_eq!(report.total_records, 0);
        assert_eq!(report.verified_records, 0);
    }

    // ── P2: genesis invariant ─────────────────────────────────────────────────

    #[test]
    fn first_record_has_absent_prev_hash() {
        let (ledger, _) = make_ledger();
        let record = ledger.record(make_request(&tenant("acme"), "A")).unwrap();
        assert!(record.prev_hash.is_none());
    }

    #[test]
    fn forged_genesis_with_prev_hash_is_detected() {
        let (ledger, store) = make_ledger();
        let t = tenant("acme");

        // Craft a first record claiming a predecessor that cannot exist.
        let payload = json!({ "name": "forged" });
        let payload_canonical = super::canonical::encode(&payload).unwrap();
        let created_at = chain::ledger_timestamp();
        let bogus_prev = "ab".repeat(32);
        let hash = chain::hash_record(
            Some(&bogus_prev),
            &payload_canonical,
            "product",
            "prod-1",
            "CREATE",
            "user-7",
            &created_at,
        );
        store.inject_unchecked(AuditRecord {
            id: RecordId::new(),
            tenant_id: t.clone(),
            entity_type: "product".to_string(),
            entity_id: "prod-1".to_string(),
            action: "CREATE".to_string(),
            actor_id: "user-7".to_string(),
            payload,
            payload_canonical,
            created_at,
            prev_hash: Some(bogus_prev),
            hash,
        });

        let report = ledger.verify(&t).unwrap();
        assert!(!report.valid);
        assert_eq!(report.verified_records, 0);
        assert!(report.message.contains("genesis record has non-empty prevHash"));
    }

    // ── P3: tamper detection, payload ─────────────────────────────────────────

    #[test]
    fn payload_tampering_is_detected_at_the_exact_record() {
        let (ledger, store) = make_ledger();
        let t = tenant("acme");

        for name in ["A", "B", "C"] {
            ledger.record(make_request(&t, name)).unwrap();
        }

        // Overwrite the stored payload of record #2 without touching its hash.
        store.mutate_record(&t, 1, |record| {
            record.payload = json!({ "name": "TAMPERED" });
        });

        let report = ledger.verify(&t).unwrap();
        assert!(!report.valid);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.verified_records, 1);
        assert!(
            report.message.contains("hash mismatch at record 2"),
            "unexpected message: {}",
            report.message
        );
    }

    #[test]
    fn tampering_with_the_last_record_is_detected() {
        let (ledger, store) = make_ledger();
        let t = tenant("acme");

        for name in ["A", "B", "C"] {
            ledger.record(make_request(&t, name)).unwrap();
        }

        store.mutate_record(&t, 2, |record| {
            record.action = "DELETE".to_string();
        });

        let report = ledger.verify(&t).unwrap();
        assert!(!report.valid);
        assert_eq!(report.verified_records, 2);
        assert!(report.message.contains("hash mismatch at record 3"));
    }

    // ── P4: tamper detection, linkage ─────────────────────────────────────────

    #[test]
    fn broken_linkage_is_detected_at_the_break_point() {
        let (ledger, store) = make_ledger();
        let t = tenant("acme");

        for name in ["A", "B"] {
            ledger.record(make_request(&t, name)).unwrap();
        }

        // Inject a third record whose prev_hash skips the real tail. Its own
        // hash is computed correctly over its forged prev_hash, so only the
        // linkage rule can catch it.
        let payload = json!({ "name": "C" });
        let payload_canonical = super::canonical::encode(&payload).unwrap();
        let created_at = chain::ledger_timestamp();
        let forged_prev = "cd".repeat(32);
        let hash = chain::hash_record(
            Some(&forged_prev),
            &payload_canonical,
            "product",
            "prod-1",
            "UPDATE",
            "user-7",
            &created_at,
        );
        store.inject_unchecked(AuditRecord {
            id: RecordId::new(),
            tenant_id: t.clone(),
            entity_type: "product".to_string(),
            entity_id: "prod-1".to_string(),
            action: "UPDATE".to_string(),
            actor_id: "user-7".to_string(),
            payload,
            payload_canonical,
            created_at,
            prev_hash: Some(forged_prev),
            hash,
        });

        let report = ledger.verify(&t).unwrap();
        assert!(!report.valid);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.verified_records, 2);
        assert!(
            report.message.contains("chain broken at record 3"),
            "unexpected message: {}",
            report.message
        );
        assert!(report.message.contains("expected prevHash="));
    }

    // ── P5: no forking under concurrency ──────────────────────────────────────

    #[test]
    fn concurrent_writers_produce_one_linear_chain() {
        const WRITERS: usize = 8;
        const RECORDS_PER_WRITER: usize = 5;

        let store = Arc::new(InMemoryChainStore::new());
        // With W writers, one append can conflict at most once per record
        // committed by the others; a bound comfortably above W * records
        // makes exhaustion impossible in this test.
        let config = LedgerConfig {
            max_append_retries: (WRITERS * RECORDS_PER_WRITER) as u32 + 8,
        };
        let ledger = Arc::new(Ledger::with_config(
            Arc::clone(&store) as Arc<dyn ChainStore>,
            config,
        ));
        let t = tenant("acme");

        let handles: Vec<_> = (0..WRITERS)
            .map(|w| {
                let ledger = Arc::clone(&ledger);
                let t = t.clone();
                thread::spawn(move || {
                    for i in 0..RECORDS_PER_WRITER {
                        ledger
                            .record(make_request(&t, &format!("w{}-{}", w, i)))
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let records = ledger.list_by_tenant(&t).unwrap();
        assert_eq!(records.len(), WRITERS * RECORDS_PER_WRITER);

        // No two records may share a predecessor.
        let mut prev_hashes: Vec<Option<&String>> =
            records.iter().map(|r| r.prev_hash.as_ref()).collect();
        prev_hashes.sort();
        prev_hashes.dedup();
        assert_eq!(prev_hashes.len(), records.len(), "chain forked");

        let report = ledger.verify(&t).unwrap();
        assert!(report.valid);
        assert_eq!(report.verified_records, WRITERS * RECORDS_PER_WRITER);
    }

    // ── P6: tenant isolation ──────────────────────────────────────────────────

    #[test]
    fn tenants_never_reference_each_other() {
        let (ledger, _) = make_ledger();
        let a = tenant("tenant-a");
        let b = tenant("tenant-b");

        // Interleave appends across the two tenants.
        ledger.record(make_request(&a, "a1")).unwrap();
        ledger.record(make_request(&b, "b1")).unwrap();
        let a2 = ledger.record(make_request(&a, "a2")).unwrap();
        let b2 = ledger.record(make_request(&b, "b2")).unwrap();

        let a_records = ledger.list_by_tenant(&a).unwrap();
        let b_hashes: Vec<String> = ledger
            .list_by_tenant(&b)
            .unwrap()
            .iter()
            .map(|r| r.hash.clone())
            .collect();

        for record in &a_records {
            if let Some(prev) = &record.prev_hash {
                assert!(!b_hashes.contains(prev));
            }
        }
        assert_eq!(a2.prev_hash.as_deref(), Some(a_records[0].hash.as_str()));
        assert_eq!(b2.prev_hash.as_deref(), Some(b_hashes[0].as_str()));
    }

    #[test]
    fn corruption_of_one_tenant_does_not_affect_another() {
        let (ledger, store) = make_ledger();
        let a = tenant("tenant-a");
        let b = tenant("tenant-b");

        for name in ["a1", "a2"] {
            ledger.record(make_request(&a, name)).unwrap();
        }
        for name in ["b1", "b2"] {
            ledger.record(make_request(&b, name)).unwrap();
        }

        store.mutate_record(&b, 0, |record| {
            record.payload = json!({ "name": "TAMPERED" });
        });

        let report_a = ledger.verify(&a).unwrap();
        assert!(report_a.valid);
        assert_eq!(report_a.verified_records, 2);

        let report_b = ledger.verify(&b).unwrap();
        assert!(!report_b.valid);
        assert!(report_b.message.contains("hash mismatch at record 1"));
    }

    // ── Encoding failure leaves the chain untouched ───────────────────────────

    #[test]
    fn encoding_failure_aborts_before_the_chain() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");
        ledger.record(make_request(&t, "A")).unwrap();

        let mut too_deep = json!(0);
        for _ in 0..(super::canonical::MAX_DEPTH + 2) {
            too_deep = json!([too_deep]);
        }
        let err = ledger
            .record(RecordRequest::new(
                t.clone(),
                "product",
                "prod-1",
                "UPDATE",
                "user-7",
                too_deep,
            ))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Encoding { .. }));

        // The failed call left no partial record behind.
        assert_eq!(ledger.list_by_tenant(&t).unwrap().len(), 1);
        assert!(ledger.verify(&t).unwrap().valid);
    }

    // ── Writer failure modes against misbehaving stores ───────────────────────

    /// A store whose tail perpetually moves: every append conflicts.
    struct AlwaysConflictingStore;

    impl ChainStore for AlwaysConflictingStore {
        fn append(&self, record: AuditRecord) -> LedgerResult<()> {
            Err(LedgerError::AppendConflict {
                tenant_id: record.tenant_id.0,
            })
        }
        fn latest_by_tenant(&self, _: &TenantId) -> LedgerResult<Option<AuditRecord>> {
            Ok(None)
        }
        fn all_by_tenant(&self, _: &TenantId) -> LedgerResult<Vec<AuditRecord>> {
            Ok(Vec::new())
        }
        fn all_by_entity(&self, _: &str, _: &str) -> LedgerResult<Vec<AuditRecord>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn unresolvable_contention_exhausts_the_retry_bound() {
        let ledger = Ledger::with_config(
            Arc::new(AlwaysConflictingStore),
            LedgerConfig {
                max_append_retries: 3,
            },
        );

        let err = ledger
            .record(make_request(&tenant("acme"), "A"))
            .unwrap_err();
        match err {
            LedgerError::RetriesExhausted { tenant_id, attempts } => {
                assert_eq!(tenant_id, "acme");
                assert_eq!(attempts, 3);
            }
            other => panic!("expected RetriesExhausted, got {:?}", other),
        }
    }

    /// A store that is down: every operation fails.
    struct UnavailableStore;

    impl ChainStore for UnavailableStore {
        fn append(&self, _: AuditRecord) -> LedgerResult<()> {
            Err(LedgerError::StoreUnavailable {
                reason: "connection refused".to_string(),
            })
        }
        fn latest_by_tenant(&self, _: &TenantId) -> LedgerResult<Option<AuditRecord>> {
            Err(LedgerError::StoreUnavailable {
                reason: "connection refused".to_string(),
            })
        }
        fn all_by_tenant(&self, _: &TenantId) -> LedgerResult<Vec<AuditRecord>> {
            Err(LedgerError::StoreUnavailable {
                reason: "connection refused".to_string(),
            })
        }
        fn all_by_entity(&self, _: &str, _: &str) -> LedgerResult<Vec<AuditRecord>> {
            Err(LedgerError::StoreUnavailable {
                reason: "connection refused".to_string(),
            })
        }
    }

    #[test]
    fn store_outage_propagates_without_retry() {
        let ledger = Ledger::new(Arc::new(UnavailableStore));

        let err = ledger
            .record(make_request(&tenant("acme"), "A"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::StoreUnavailable { .. }));
        assert!(err.is_retryable());

        let err = ledger.verify(&tenant("acme")).unwrap_err();
        assert!(matches!(err, LedgerError::StoreUnavailable { .. }));
    }

    // ── Read APIs ─────────────────────────────────────────────────────────────

    #[test]
    fn list_by_entity_returns_one_objects_history_in_order() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");

        ledger
            .record(RecordRequest::new(
                t.clone(), "product", "prod-1", "CREATE", "user-7", json!({}),
            ))
            .unwrap();
        ledger
            .record(RecordRequest::new(
                t.clone(), "release", "rel-1", "CREATE", "user-7", json!({}),
            ))
            .unwrap();
        ledger
            .record(RecordRequest::new(
                t.clone(), "product", "prod-1", "PUBLISH", "user-7", json!({}),
            ))
            .unwrap();

        let history = ledger.list_by_entity("product", "prod-1").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].action, "CREATE");
        assert_eq!(history[1].action, "PUBLISH");
    }

    #[test]
    fn head_hash_tracks_the_latest_record() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");

        assert_eq!(ledger.head_hash(&t).unwrap(), None);

        ledger.record(make_request(&t, "A")).unwrap();
        let second = ledger.record(make_request(&t, "B")).unwrap();

        assert_eq!(ledger.head_hash(&t).unwrap(), Some(second.hash));
    }

    // ── Hash reproducibility across re-reads ──────────────────────────────────

    #[test]
    fn reread_records_recompute_to_their_stored_hash() {
        let (ledger, _) = make_ledger();
        let t = tenant("acme");

        ledger
            .record(RecordRequest::new(
                t.clone(),
                "finding",
                "cve-2026-0001",
                "CREATE",
                "scanner",
                json!({ "severity": "high", "component": "libfoo" }),
            ))
            .unwrap();

        // Serialize and deserialize the record, as an export/import would.
        let stored = ledger.list_by_tenant(&t).unwrap();
        let round_tripped: Vec<AuditRecord> =
            serde_json::from_str(&serde_json::to_string(&stored).unwrap()).unwrap();

        let report = super::verify_records(&round_tripped);
        assert!(report.valid, "round-tripped chain must still verify");
    }
}
