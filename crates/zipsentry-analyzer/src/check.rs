//! The archive-entry rule visitor.

use std::path::Path;

use zipsentry_core::{ARCHIVE_ENTRY_RULE, Finding, Reporter, Span};
use zipsentry_parser::{SemanticModel, SourceFile, SyntaxNode};

use crate::registry::is_sensitive_entry_type;

/// Flags every location where an archive entry is declared or obtained.
///
/// One pre-order pass per file. Two match rules:
/// - a variable declaration with no initializer whose declared type is a
///   sensitive entry type reports at the declaration;
/// - a method call whose result type is a sensitive entry type reports at
///   the call, and its sub-expressions are still visited, so nested
///   matching calls each report.
///
/// A declaration with an initializer defers entirely to whatever matches
/// inside the initializer, so an entry obtained by a call is reported
/// once, at the call.
#[derive(Debug, Default)]
pub struct ArchiveEntryCheck;

impl ArchiveEntryCheck {
    pub fn new() -> Self {
        Self
    }

    /// Scan one parsed file, forwarding each match to `reporter`.
    ///
    /// A file without a semantic model is skipped: zero findings, no error.
    pub fn scan(&self, file: &SourceFile, reporter: &mut dyn Reporter) {
        let Some(model) = file.semantic_model() else {
            log::debug!(
                "skipping {}: no semantic model",
                file.path().map(|p| p.display().to_string()).as_deref().unwrap_or("<memory>")
            );
            return;
        };
        self.visit(file.root(), model, file.path(), reporter);
    }

    fn visit(
        &self,
        node: &SyntaxNode,
        model: &SemanticModel,
        path: Option<&Path>,
        reporter: &mut dyn Reporter,
    ) {
        match node {
            SyntaxNode::VariableDeclaration(decl) => {
                if !decl.has_initializer && self.matches(model, node) {
                    // An issue on the variable covers it; nothing below an
                    // uninitialized declaration can report again.
                    self.report(&decl.span, path, reporter);
                } else {
                    self.visit_children(node, model, path, reporter);
                }
            }
            SyntaxNode::MethodCall(call) => {
                if self.matches(model, node) {
                    self.report(&call.span, path, reporter);
                }
                self.visit_children(node, model, path, reporter);
            }
            SyntaxNode::Other(_) => self.visit_children(node, model, path, reporter),
        }
    }

    fn visit_children(
        &self,
        node: &SyntaxNode,
        model: &SemanticModel,
        path: Option<&Path>,
        reporter: &mut dyn Reporter,
    ) {
        for child in node.children() {
            self.visit(child, model, path, reporter);
        }
    }

    fn matches(&self, model: &SemanticModel, node: &SyntaxNode) -> bool {
        model
            .type_of(node.id())
            .is_some_and(|ty| is_sensitive_entry_type(model, ty))
    }

    fn report(&self, span: &Span, path: Option<&Path>, reporter: &mut dyn Reporter) {
        reporter.report(Finding {
            rule_id: ARCHIVE_ENTRY_RULE.id.to_string(),
            message: ARCHIVE_ENTRY_RULE.message.to_string(),
            file: path.map(Path::to_path_buf),
            span: span.clone(),
        });
    }
}
