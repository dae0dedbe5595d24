//! # chainseal-core
//!
//! The trust boundary of the chainseal ledger:
//!
//! - The `ChainStore` port — the append-only storage contract with no
//!   update and no delete, so committed history cannot be rewritten
//! - `LedgerConfig` — writer tunables loaded from TOML
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chainseal_core::{config::LedgerConfig, traits::ChainStore};
//! ```

pub mod config;
pub mod traits;

pub use config::LedgerConfig;
pub use traits::ChainStore;
