//! Findings and the reporting sink contract.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A source region: byte offsets plus 1-based line/column positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    /// A span covering a single point, useful in tests.
    pub fn at(line: usize, column: usize) -> Self {
        Self {
            start_byte: 0,
            end_byte: 0,
            start_line: line,
            start_column: column,
            end_line: line,
            end_column: column,
        }
    }
}

/// One reported diagnostic: a source location and an advisory message.
///
/// Findings are write-once. The scanner never retracts or merges them;
/// ordering follows emission order, which is pre-order source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    pub span: Span,
}

impl Finding {
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.file {
            Some(path) => write!(
                f,
                "{}:{}:{}: {}",
                path.display(),
                self.span.start_line,
                self.span.start_column,
                self.message
            ),
            None => write!(
                f,
                "{}:{}: {}",
                self.span.start_line, self.span.start_column, self.message
            ),
        }
    }
}

/// Sink accepting findings in emission order.
///
/// A reporter is passed into each scan invocation as an explicit parameter;
/// nothing is stored between files.
pub trait Reporter {
    fn report(&mut self, finding: Finding);
}

/// Reporter that collects findings into a vector, preserving order.
#[derive(Debug, Default)]
pub struct FindingCollector {
    findings: Vec<Finding>,
}

impl FindingCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl Reporter for FindingCollector {
    fn report(&mut self, finding: Finding) {
        self.findings.push(finding);
    }
}
