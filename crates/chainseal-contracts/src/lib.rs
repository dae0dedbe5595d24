//! # chainseal-contracts
//!
//! Shared types, reports, and error taxonomy for the chainseal audit ledger.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod error;
pub mod record;
pub mod report;

pub use error::{LedgerError, LedgerResult};
pub use record::{AuditRecord, RecordId, RecordRequest, TenantId, SYSTEM_ACTOR};
pub use report::VerificationReport;
