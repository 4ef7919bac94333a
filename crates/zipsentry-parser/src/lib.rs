//! Tree-sitter based Java frontend for Zipsentry.
//!
//! This crate provides:
//! - Java source parsing using the tree-sitter grammar
//! - Lowering of the concrete syntax tree into the closed node model the
//!   archive-entry rule traverses
//! - The semantic model: resolved types, subtype queries, and the
//!   best-effort binder that attaches types to declarations and calls

mod known;
mod parser;
mod semantic;
mod syntax;

pub use parser::{JavaParser, ParseError, SourceFile};
pub use semantic::{ResolvedType, SemanticModel, TypeHierarchy};
pub use syntax::{MethodCall, NodeId, OtherNode, Receiver, SyntaxNode, VariableDeclaration};
