//! Chain verification report types.
//!
//! A failed verification is an *expected, data-level finding*, not an
//! exception: `verify()` always returns a report, never throws one. This
//! keeps integrity-check tooling and incident-response workflows on a
//! structured path instead of parsing error strings.

use serde::{Deserialize, Serialize};

/// The result of replaying one tenant's full chain.
///
/// On failure, `verified_records` counts the records that were fully checked
/// before the first problem, and `message` names the failing record and the
/// violated invariant (a remediation-grade diagnostic, e.g.
/// "hash mismatch at record 2: stored=…, computed=…"). Record positions in
/// messages are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// True only if every record in the chain passed both linkage and
    /// hash-recomputation checks.
    pub valid: bool,
    /// Total records present in the tenant's chain.
    pub total_records: usize,
    /// Records successfully checked before any failure. Equals
    /// `total_records` on full success.
    pub verified_records: usize,
    /// Human-readable outcome. On failure, identifies the record and the
    /// broken invariant with expected-vs-found detail.
    pub message: String,
}

impl VerificationReport {
    /// A fully-valid chain of `total` records.
    pub fn pass(total: usize) -> Self {
        Self {
            valid: true,
            total_records: total,
            verified_records: total,
            message: "chain verified".to_string(),
        }
    }

    /// A tenant with no records — trivially valid, nothing to verify.
    pub fn empty() -> Self {
        Self {
            valid: true,
            total_records: 0,
            verified_records: 0,
            message: "no records to verify".to_string(),
        }
    }

    /// A chain that failed verification at the first detected problem.
    pub fn fail(total: usize, verified: usize, message: impl Into<String>) -> Self {
        Self {
            valid: false,
            total_records: total,
            verified_records: verified,
            message: message.into(),
        }
    }
}
