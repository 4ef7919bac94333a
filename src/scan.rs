//! Scan drivers: parse, resolve, and run the archive-entry rule.

use std::path::Path;

use anyhow::{Context as _, Result};

use zipsentry_analyzer::ArchiveEntryCheck;
use zipsentry_core::{Finding, FindingCollector};
use zipsentry_parser::JavaParser;
use zipsentry_utils::FileDiscovery;

/// Scan one source string. `name` is carried into finding locations.
pub fn scan_source(name: &str, source: &str) -> Result<Vec<Finding>> {
    let mut parser = JavaParser::new()?;
    let file = parser.parse_source(Some(Path::new(name)), source)?;
    let mut collector = FindingCollector::new();
    ArchiveEntryCheck::new().scan(&file, &mut collector);
    Ok(collector.into_findings())
}

/// Scan one file on disk.
pub fn scan_file(path: &Path) -> Result<Vec<Finding>> {
    let mut parser = JavaParser::new()?;
    let file = parser
        .parse_file(path)
        .with_context(|| format!("failed to scan {}", path.display()))?;
    let mut collector = FindingCollector::new();
    ArchiveEntryCheck::new().scan(&file, &mut collector);
    Ok(collector.into_findings())
}

/// Scan every Java source under `root`.
///
/// Files are independent: one that fails to read is logged and skipped,
/// and nothing carries over between files.
pub fn scan_directory(root: &Path) -> Result<Vec<Finding>> {
    let discovery = FileDiscovery::new(root.to_path_buf());
    let mut parser = JavaParser::new()?;
    let check = ArchiveEntryCheck::new();
    let mut collector = FindingCollector::new();
    for path in discovery.get_files()? {
        match parser.parse_file(&path) {
            Ok(file) => check.scan(&file, &mut collector),
            Err(e) => log::warn!("skipping {}: {}", path.display(), e),
        }
    }
    Ok(collector.into_findings())
}
