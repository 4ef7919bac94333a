//! Report generation for Zipsentry.
//!
//! Findings render as SARIF (Static Analysis Results Interchange Format)
//! so CI systems and code hosts can ingest them directly.

pub mod sarif;

pub use sarif::{SarifReport, SarifResult};
