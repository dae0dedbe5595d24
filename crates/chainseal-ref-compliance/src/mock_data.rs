//! Simulated compliance-backend data for the reference scenarios.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted. This module stands in for the real product catalog, SBOM
//! pipeline, and vulnerability scanner of a production deployment.

use serde_json::{json, Value};

/// A product as the catalog service would hand it to the ledger.
pub fn sample_product(product_id: &str) -> Value {
    json!({
        "product_id": product_id,
        "name": "Aurora Gateway",
        "category": "network-appliance",
        "lifecycle": "supported",
        "vendor": "Northwind Industrial",
    })
}

/// A release payload for a given product and version.
pub fn sample_release(product_id: &str, version: &str) -> Value {
    json!({
        "product_id": product_id,
        "version": version,
        "channel": "stable",
        "signed": true,
    })
}

/// A parsed SBOM upload, reduced to what the ingestion service records.
///
/// Component counts and formats are fictional but realistic: CycloneDX with
/// a handful of direct dependencies.
pub fn sample_sbom(release_id: &str) -> Value {
    json!({
        "release_id": release_id,
        "format": "CycloneDX",
        "spec_version": "1.5",
        "component_count": 4,
        "components": [
            { "name": "libssl",   "version": "3.0.13" },
            { "name": "zlib",     "version": "1.3.1" },
            { "name": "libcurl",  "version": "8.5.0" },
            { "name": "busybox",  "version": "1.36.1" },
        ],
    })
}

/// A vulnerability finding as the scanner reports it.
pub fn sample_finding(finding_id: &str, component: &str) -> Value {
    json!({
        "finding_id": finding_id,
        "component": component,
        "severity": "high",
        "cvss": 8.1,
        "status": "open",
    })
}
