//! # chainseal-ref-compliance
//!
//! Compliance-backend reference collaborators for the chainseal audit
//! ledger.
//!
//! Demonstrates three scenarios using mock data:
//!
//! 1. **Product Lifecycle** — a catalog service recording every CRUD
//!    mutation on one tenant's chain.
//! 2. **SBOM Ingestion** — two tenants' chains interleaving without ever
//!    referencing each other.
//! 3. **Integrity Drill** — a compliance export stamped with the chain head
//!    hash, and a doctored copy caught at the exact record.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;
pub mod scenarios;
