//! Ledger configuration, deserialized from TOML.
//!
//! Example:
//! ```toml
//! max_append_retries = 8
//! ```

use chainseal_contracts::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};

/// Default bound on optimistic-append retries under same-tenant contention.
const DEFAULT_MAX_APPEND_RETRIES: u32 = 8;

/// Tunables for the ledger writer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// How many times one `record()` call re-reads the tail and re-attempts
    /// the append after a `AppendConflict` before giving up with
    /// `RetriesExhausted`. Treated as at least 1.
    #[serde(default = "default_max_append_retries")]
    pub max_append_retries: u32,
}

fn default_max_append_retries() -> u32 {
    DEFAULT_MAX_APPEND_RETRIES
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_append_retries: DEFAULT_MAX_APPEND_RETRIES,
        }
    }
}

impl LedgerConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(raw: &str) -> LedgerResult<Self> {
        toml::from_str(raw).map_err(|e| LedgerError::Config {
            reason: e.to_string(),
        })
    }
}
