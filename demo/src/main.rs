//! chainseal Compliance Ledger — Demo CLI
//!
//! Runs one or all of the three compliance reference scenarios. Each
//! scenario uses real chainseal components (ledger writer, chain verifier,
//! in-memory chain store) wired together with mock compliance data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- product-lifecycle
//!   cargo run -p demo -- sbom-ingestion
//!   cargo run -p demo -- integrity-drill

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chainseal_ref_compliance::scenarios::{integrity_drill, product_lifecycle, sbom_ingestion};

// ── CLI definition ────────────────────────────────────────────────────────────

/// chainseal — tamper-evident audit ledger compliance demo.
///
/// Each subcommand runs one or all of the three reference scenarios,
/// demonstrating hash-chained append, per-tenant isolation, and tamper
/// detection.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "chainseal compliance ledger demo",
    long_about = "Runs chainseal reference scenarios showing hash-chained audit\n\
                  records, tenant-isolated chains, and export tamper detection."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three compliance scenarios in sequence.
    RunAll,
    /// Scenario 1: Product Lifecycle (CRUD mutations on one chain).
    ProductLifecycle,
    /// Scenario 2: SBOM Ingestion (two tenants, isolated chains).
    SbomIngestion,
    /// Scenario 3: Integrity Drill (export, doctor, detect).
    IntegrityDrill,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::ProductLifecycle => product_lifecycle::run_scenario(),
        Command::SbomIngestion => sbom_ingestion::run_scenario(),
        Command::IntegrityDrill => integrity_drill::run_scenario(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> chainseal_contracts::error::LedgerResult<()> {
    product_lifecycle::run_scenario()?;
    sbom_ingestion::run_scenario()?;
    integrity_drill::run_scenario()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("chainseal — Tamper-Evident Audit Ledger");
    println!("Compliance Reference Demo");
    println!("=======================================");
    println!();
    println!("Every mutating action follows the same contract:");
    println!("  [1] Domain service performs its business mutation");
    println!("  [2] Canonical-encode the payload (deterministic hash input)");
    println!("  [3] Read the tenant's chain tail, stamp created_at at ms precision");
    println!("  [4] Compare-and-append — a moved tail retries, the chain never forks");
    println!("  [5] Auditors replay the chain; the first broken link is the diagnostic");
    println!();
}
