//! Zipsentry: zip-slip static analysis for Java sources.
//!
//! Flags every location where an archive entry — one file inside a
//! ZIP/TAR-like archive — is declared or obtained without any evidence
//! that its path is validated before extraction. An entry's name is
//! attacker-controlled data whenever the archive itself is untrusted, so
//! expanding entries blindly lets a crafted archive write outside the
//! target directory.

pub mod scan;

// Re-export component types for convenience
pub use scan::{scan_directory, scan_file, scan_source};
pub use zipsentry_analyzer::{ArchiveEntryCheck, SENSITIVE_ENTRY_TYPES, is_sensitive_entry_type};
pub use zipsentry_core::{ARCHIVE_ENTRY_RULE, Finding, FindingCollector, Reporter, Span};
pub use zipsentry_parser::{
    JavaParser, ParseError, SemanticModel, SourceFile, SyntaxNode, TypeHierarchy,
};
pub use zipsentry_reports::SarifReport;
pub use zipsentry_utils::FileDiscovery;
