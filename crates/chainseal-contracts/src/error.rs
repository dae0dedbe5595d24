//! Error taxonomy for the chainseal ledger.
//!
//! All fallible ledger operations return `LedgerResult<T>`. Variants carry
//! enough context for the calling domain service to decide whether its own
//! business mutation must be rolled back — the design intent is that a
//! mutation and its audit record are committed together or not at all.
//!
//! Note what is *not* here: a failed chain verification. Tamper findings are
//! expected data-level results and come back as a `VerificationReport`,
//! never as an error.

use thiserror::Error;

/// The unified error type for the chainseal ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The payload cannot be canonically encoded. Not retryable — the same
    /// payload will fail the same way; the caller must fix the payload.
    /// The tenant's chain is untouched.
    #[error("payload cannot be canonically encoded: {reason}")]
    Encoding { reason: String },

    /// The tenant's chain tail moved between the tail read and the append
    /// (compare-and-append rejected the record). Retryable with a fresh
    /// tail read; the writer does this internally up to its retry bound.
    #[error("concurrent append conflict for tenant '{tenant_id}': chain tail moved")]
    AppendConflict { tenant_id: String },

    /// The writer exhausted its bounded retries under contention. The
    /// caller may re-invoke `record()` from scratch — each retry is a
    /// fresh, independent append computation.
    #[error("append for tenant '{tenant_id}' gave up after {attempts} attempts")]
    RetriesExhausted { tenant_id: String, attempts: u32 },

    /// The backing chain store failed. The record must not be treated as
    /// committed unless the store confirmed the append.
    #[error("chain store unavailable: {reason}")]
    StoreUnavailable { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    Config { reason: String },
}

impl LedgerError {
    /// Whether re-invoking the failed operation can succeed.
    ///
    /// Encoding and configuration errors are deterministic and will fail
    /// again; contention and store outages are transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LedgerError::AppendConflict { .. }
                | LedgerError::RetriesExhausted { .. }
                | LedgerError::StoreUnavailable { .. }
        )
    }
}

/// Convenience alias used throughout the chainseal crates.
pub type LedgerResult<T> = Result<T, LedgerError>;
