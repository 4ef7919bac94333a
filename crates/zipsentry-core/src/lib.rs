//! Core types for the Zipsentry archive-entry scanner.
//!
//! This crate provides the fundamental types used across all Zipsentry
//! components:
//! - Source regions and findings (`Span`, `Finding`)
//! - The reporting sink contract (`Reporter`, `FindingCollector`)
//! - Rule metadata (`RuleDescriptor`)

mod finding;
mod rule;

pub use finding::{Finding, FindingCollector, Reporter, Span};
pub use rule::{ARCHIVE_ENTRY_RULE, RuleDescriptor};
