//! The lowered syntax tree.
//!
//! The archive-entry rule distinguishes exactly three node shapes: variable
//! declarations, method calls, and everything else. Lowering maps the
//! tree-sitter CST into this closed set so the rule can match exhaustively
//! instead of dispatching over the full grammar. Sibling order is source
//! order; the tree is immutable once built.

use tree_sitter::Node;

use zipsentry_core::Span;

/// Identifier of a lowered node, unique within one file.
///
/// Ids are assigned in pre-order during lowering and are the keys the
/// semantic model uses to attach resolved types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// How a method call names its receiver, as far as the frontend can tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Receiver {
    /// A plain identifier, e.g. `zis` in `zis.getNextEntry()`.
    Variable(String),
    /// Another call, e.g. the inner call in `zf.getEntry(n).getName()`.
    Call(NodeId),
    /// A receiver shape the frontend does not model.
    Opaque,
    /// An unqualified call.
    None,
}

/// One declared variable: a local, a field, or a formal parameter.
///
/// A multi-declarator statement lowers to one node per declarator so each
/// variable matches (or not) on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDeclaration {
    pub id: NodeId,
    pub span: Span,
    pub name: String,
    /// Source text of the declared type, e.g. `ZipEntry` or
    /// `java.util.zip.ZipEntry`. `None` when the grammar recovered from an
    /// error and no type node is present.
    pub declared_type: Option<String>,
    pub has_initializer: bool,
    /// The initializer, when it is a direct method call.
    pub initializer_call: Option<NodeId>,
    pub children: Vec<SyntaxNode>,
}

/// A method invocation. Children cover the receiver and the arguments, so
/// calls nested anywhere inside are still visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCall {
    pub id: NodeId,
    pub span: Span,
    pub method_name: String,
    pub receiver: Receiver,
    pub children: Vec<SyntaxNode>,
}

/// Any construct the rule does not inspect; traversal-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherNode {
    pub id: NodeId,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

/// A node in the lowered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    VariableDeclaration(VariableDeclaration),
    MethodCall(MethodCall),
    Other(OtherNode),
}

impl SyntaxNode {
    pub fn id(&self) -> NodeId {
        match self {
            SyntaxNode::VariableDeclaration(n) => n.id,
            SyntaxNode::MethodCall(n) => n.id,
            SyntaxNode::Other(n) => n.id,
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            SyntaxNode::VariableDeclaration(n) => &n.span,
            SyntaxNode::MethodCall(n) => &n.span,
            SyntaxNode::Other(n) => &n.span,
        }
    }

    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::VariableDeclaration(n) => &n.children,
            SyntaxNode::MethodCall(n) => &n.children,
            SyntaxNode::Other(n) => &n.children,
        }
    }
}

pub(crate) struct Lowering<'a> {
    source: &'a str,
    next_id: u32,
}

impl<'a> Lowering<'a> {
    pub(crate) fn lower(source: &'a str, root: Node<'a>) -> SyntaxNode {
        let mut lowering = Lowering { source, next_id: 0 };
        let id = lowering.fresh();
        let mut children = Vec::new();
        lowering.lower_children(root, &mut children);
        SyntaxNode::Other(OtherNode {
            id,
            span: node_span(root, root),
            children,
        })
    }

    fn fresh(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    fn text(&self, node: Node) -> String {
        node.utf8_text(self.source.as_bytes())
            .unwrap_or_default()
            .to_string()
    }

    fn lower_children(&mut self, node: Node<'a>, out: &mut Vec<SyntaxNode>) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.lower_into(child, out);
        }
    }

    fn lower_into(&mut self, node: Node<'a>, out: &mut Vec<SyntaxNode>) {
        match node.kind() {
            "local_variable_declaration" | "field_declaration" => {
                self.lower_declaration(node, out);
            }
            "formal_parameter" => out.push(self.lower_parameter(node)),
            "method_invocation" => {
                let call = self.lower_call(node);
                out.push(SyntaxNode::MethodCall(call));
            }
            _ => {
                let id = self.fresh();
                let mut children = Vec::new();
                self.lower_children(node, &mut children);
                out.push(SyntaxNode::Other(OtherNode {
                    id,
                    span: node_span(node, node),
                    children,
                }));
            }
        }
    }

    /// One `VariableDeclaration` per declarator; the declared type is shared.
    fn lower_declaration(&mut self, node: Node<'a>, out: &mut Vec<SyntaxNode>) {
        let type_node = node.child_by_field_name("type");
        let declared_type = type_node.map(|t| self.type_text(t));

        let mut cursor = node.walk();
        let declarators: Vec<Node> = node.children_by_field_name("declarator", &mut cursor).collect();
        for declarator in declarators {
            let id = self.fresh();
            let name = declarator
                .child_by_field_name("name")
                .map(|n| self.text(n))
                .unwrap_or_default();
            let value = declarator.child_by_field_name("value");

            let mut children = Vec::new();
            if let Some(value) = value {
                self.lower_into(value, &mut children);
            }
            let initializer_call = match children.first() {
                Some(SyntaxNode::MethodCall(call)) => Some(call.id),
                _ => None,
            };

            let span = match type_node {
                Some(t) => node_span(t, declarator),
                None => node_span(declarator, declarator),
            };
            out.push(SyntaxNode::VariableDeclaration(VariableDeclaration {
                id,
                span,
                name,
                declared_type: declared_type.clone(),
                has_initializer: value.is_some(),
                initializer_call,
                children,
            }));
        }
    }

    /// Formal parameters never carry an initializer.
    fn lower_parameter(&mut self, node: Node<'a>) -> SyntaxNode {
        let id = self.fresh();
        let declared_type = node.child_by_field_name("type").map(|t| self.type_text(t));
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        SyntaxNode::VariableDeclaration(VariableDeclaration {
            id,
            span: node_span(node, node),
            name,
            declared_type,
            has_initializer: false,
            initializer_call: None,
            children: Vec::new(),
        })
    }

    fn lower_call(&mut self, node: Node<'a>) -> MethodCall {
        let id = self.fresh();
        let method_name = node
            .child_by_field_name("name")
            .map(|n| self.text(n))
            .unwrap_or_default();
        let object = node.child_by_field_name("object");

        let mut children = Vec::new();
        if let Some(object) = object {
            self.lower_into(object, &mut children);
        }
        let receiver = match object {
            None => Receiver::None,
            Some(object) => match object.kind() {
                "identifier" => Receiver::Variable(self.text(object)),
                "method_invocation" => match children.first() {
                    Some(SyntaxNode::MethodCall(inner)) => Receiver::Call(inner.id),
                    _ => Receiver::Opaque,
                },
                // `this.zis.getNextEntry()` binds through the field name.
                "field_access" => self.field_receiver(object),
                _ => Receiver::Opaque,
            },
        };

        if let Some(arguments) = node.child_by_field_name("arguments") {
            self.lower_children(arguments, &mut children);
        }

        MethodCall {
            id,
            span: node_span(node, node),
            method_name,
            receiver,
            children,
        }
    }

    fn field_receiver(&self, object: Node) -> Receiver {
        let is_this = object
            .child_by_field_name("object")
            .is_some_and(|o| o.kind() == "this");
        match (is_this, object.child_by_field_name("field")) {
            (true, Some(field)) => Receiver::Variable(self.text(field)),
            _ => Receiver::Opaque,
        }
    }

    /// The type name used for resolution: a generic type contributes only
    /// its erasure, so `List<ZipEntry>` never reads as an entry type.
    fn type_text(&self, node: Node) -> String {
        if node.kind() == "generic_type" {
            if let Some(base) = node.named_child(0) {
                return self.text(base);
            }
        }
        self.text(node)
    }
}

fn node_span(start: Node, end: Node) -> Span {
    let start_pos = start.start_position();
    let end_pos = end.end_position();
    Span {
        start_byte: start.start_byte(),
        end_byte: end.end_byte(),
        start_line: start_pos.row + 1,
        start_column: start_pos.column + 1,
        end_line: end_pos.row + 1,
        end_column: end_pos.column + 1,
    }
}
