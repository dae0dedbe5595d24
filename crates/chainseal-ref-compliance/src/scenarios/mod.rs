//! Compliance-backend reference scenarios.
//!
//! Each scenario is a self-contained module that wires real chainseal
//! components (ledger writer, verifier, in-memory chain store) with mock
//! compliance data and demonstrates a distinct property of the ledger.

pub mod integrity_drill;
pub mod product_lifecycle;
pub mod sbom_ingestion;

use chainseal_contracts::LedgerResult;
use chainseal_core::config::LedgerConfig;

/// Ledger configuration shared by the scenarios, embedded at compile time.
const LEDGER_CONFIG: &str = include_str!("../../config/ledger.toml");

/// Parse the embedded scenario configuration.
pub fn scenario_config() -> LedgerResult<LedgerConfig> {
    LedgerConfig::from_toml_str(LEDGER_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_parses() {
        let config = scenario_config().unwrap();
        assert_eq!(config.max_append_retries, 16);
    }
}
