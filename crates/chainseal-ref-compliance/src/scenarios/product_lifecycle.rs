//! Scenario 1: Product Lifecycle
//!
//! A product catalog service walks one product through its lifecycle —
//! create, update, publish a release, archive — and records every mutation
//! on the tenant's chain, exactly the boundary contract every domain
//! service in the backend follows: perform the business mutation, then call
//! `record()` with what changed.
//!
//! The scenario ends by replaying the chain: four mutations, four records,
//! one valid linear chain, and an entity history query showing the
//! product's records in order.

use std::sync::Arc;

use serde_json::json;

use chainseal_contracts::{LedgerResult, RecordRequest, TenantId};
use chainseal_ledger::{InMemoryChainStore, Ledger};

use crate::mock_data::{sample_product, sample_release};

// ── Domain collaborator ───────────────────────────────────────────────────────

/// The product catalog service — one of the ordinary CRUD collaborators
/// sitting in front of the ledger.
///
/// Real deployments persist products in their own tables; here the catalog
/// only performs the audit half of the contract. Each method is "mutation,
/// then record": if `record()` fails, the caller is expected to roll the
/// mutation back so no state change goes unaudited.
pub struct ProductCatalog {
    ledger: Arc<Ledger>,
    tenant_id: TenantId,
}

impl ProductCatalog {
    pub fn new(ledger: Arc<Ledger>, tenant_id: TenantId) -> Self {
        Self { ledger, tenant_id }
    }

    pub fn create_product(&self, product_id: &str, actor_id: &str) -> LedgerResult<()> {
        self.ledger.record(RecordRequest::new(
            self.tenant_id.clone(),
            "product",
            product_id,
            "CREATE",
            actor_id,
            sample_product(product_id),
        ))?;
        Ok(())
    }

    pub fn update_product(&self, product_id: &str, actor_id: &str) -> LedgerResult<()> {
        self.ledger.record(RecordRequest::new(
            self.tenant_id.clone(),
            "product",
            product_id,
            "UPDATE",
            actor_id,
            json!({ "product_id": product_id, "lifecycle": "maintenance" }),
        ))?;
        Ok(())
    }

    pub fn publish_release(
        &self,
        product_id: &str,
        version: &str,
        actor_id: &str,
    ) -> LedgerResult<()> {
        self.ledger.record(RecordRequest::new(
            self.tenant_id.clone(),
            "release",
            format!("{}@{}", product_id, version),
            "PUBLISH",
            actor_id,
            sample_release(product_id, version),
        ))?;
        Ok(())
    }

    pub fn archive_product(&self, product_id: &str, actor_id: &str) -> LedgerResult<()> {
        self.ledger.record(RecordRequest::new(
            self.tenant_id.clone(),
            "product",
            product_id,
            "ARCHIVE",
            actor_id,
            json!({ "product_id": product_id, "reason": "end of sales" }),
        ))?;
        Ok(())
    }
}

// ── Scenario runner ───────────────────────────────────────────────────────────

/// Run Scenario 1: Product Lifecycle.
pub fn run_scenario() -> LedgerResult<()> {
    println!("=== Scenario 1: Product Lifecycle ===");
    println!();

    let store = Arc::new(InMemoryChainStore::new());
    let ledger = Arc::new(Ledger::with_config(store, super::scenario_config()?));
    let tenant = TenantId::new("northwind");
    let catalog = ProductCatalog::new(Arc::clone(&ledger), tenant.clone());

    println!("  Tenant:   northwind");
    println!("  Mutations: CREATE → UPDATE → PUBLISH → ARCHIVE");

    catalog.create_product("prod-aurora", "alice")?;
    catalog.update_product("prod-aurora", "alice")?;
    catalog.publish_release("prod-aurora", "2.4.0", "release-bot")?;
    catalog.archive_product("prod-aurora", "bob")?;

    let report = ledger.verify(&tenant)?;
    println!(
        "  Chain verification:     {} ({}/{} records)",
        if report.valid { "VERIFIED" } else { "FAILED" },
        report.verified_records,
        report.total_records
    );

    let history = ledger.list_by_entity("product", "prod-aurora")?;
    println!("  prod-aurora history:    {} record(s)", history.len());
    for record in &history {
        println!("    {} by {}", record.action, record.actor_id);
    }
    println!("  RESULT: SUCCESS (expected)");
    println!();

    Ok(())
}
