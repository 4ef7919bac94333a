//! Java source parser built on tree-sitter.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tree_sitter::Parser;

use crate::semantic::{self, SemanticModel};
use crate::syntax::{Lowering, SyntaxNode};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to load the Java grammar: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),
    #[error("malformed type query: {0}")]
    Query(#[from] tree_sitter::QueryError),
    #[error("tree-sitter produced no tree for {name}")]
    NoTree { name: String },
}

/// One parsed Java source file: the lowered tree plus its semantic model.
///
/// The model is optional by design. A file without one is a legal input to
/// the rule, meaning "skip this file" — not an error.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Option<PathBuf>,
    root: SyntaxNode,
    model: Option<SemanticModel>,
}

impl SourceFile {
    pub fn new(path: Option<PathBuf>, root: SyntaxNode, model: Option<SemanticModel>) -> Self {
        Self { path, root, model }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    pub fn semantic_model(&self) -> Option<&SemanticModel> {
        self.model.as_ref()
    }

    /// Drop the semantic model. Scanning the result reports nothing.
    pub fn without_semantic_model(mut self) -> Self {
        self.model = None;
        self
    }
}

/// Tree-sitter parser pinned to the Java grammar.
pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_java::LANGUAGE.into())?;
        Ok(Self { parser })
    }

    /// Parse and resolve a source string. `path` is carried into findings.
    ///
    /// tree-sitter is error-tolerant, so a file with syntax errors still
    /// yields a tree; resolution simply leaves unrecognized parts untyped.
    pub fn parse_source(
        &mut self,
        path: Option<&Path>,
        source: &str,
    ) -> Result<SourceFile, ParseError> {
        let tree = self.parser.parse(source, None).ok_or_else(|| ParseError::NoTree {
            name: path
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
        })?;

        let root = Lowering::lower(source, tree.root_node());
        let facts = semantic::collect_facts(&tree, source)?;
        let model = semantic::resolve(&root, &facts);
        log::debug!(
            "parsed {}: {} lowered roots",
            path.map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string()),
            root.children().len()
        );

        Ok(SourceFile {
            path: path.map(Path::to_path_buf),
            root,
            model: Some(model),
        })
    }

    pub fn parse_file(&mut self, path: &Path) -> Result<SourceFile, ParseError> {
        let source = fs::read_to_string(path).map_err(|e| ParseError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_source(Some(path), &source)
    }
}
