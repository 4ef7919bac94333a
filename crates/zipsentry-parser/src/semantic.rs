//! The semantic model: resolved types, subtype queries, and the binder.
//!
//! Resolution here is best-effort. Anything the binder cannot qualify is
//! left untyped, and the rule treats untyped nodes as non-matching. The
//! subtype walk is owned by this model; the rule only asks questions.

use std::collections::{HashMap, HashSet, VecDeque};

use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Query, QueryCursor, QueryError, Tree};

use crate::known;
use crate::syntax::{NodeId, Receiver, SyntaxNode};

/// A fully-qualified type name attached to a node by resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    name: String,
}

impl ResolvedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Nominal supertype edges. Subtype queries are reflexive and walk the
/// edges transitively.
#[derive(Debug, Clone, Default)]
pub struct TypeHierarchy {
    supertypes: HashMap<String, Vec<String>>,
}

impl TypeHierarchy {
    /// The built-in hierarchy of JDK and Commons Compress archive types.
    pub fn builtin() -> Self {
        let mut hierarchy = Self::default();
        for (ty, supertype) in known::SUPERTYPE_EDGES {
            hierarchy.add_edge(ty, supertype);
        }
        hierarchy
    }

    pub fn add_edge(&mut self, ty: &str, supertype: &str) {
        self.supertypes
            .entry(ty.to_string())
            .or_default()
            .push(supertype.to_string());
    }

    /// True when `ty` is `ancestor` or transitively extends/implements it.
    pub fn is_subtype_of(&self, ty: &str, ancestor: &str) -> bool {
        self.supertype_closure(ty).iter().any(|t| t == ancestor)
    }

    /// `ty` plus all transitive supertypes, in breadth-first order.
    pub fn supertype_closure(&self, ty: &str) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        let mut closure = Vec::new();
        queue.push_back(ty);
        seen.insert(ty);
        while let Some(current) = queue.pop_front() {
            closure.push(current.to_string());
            if let Some(supertypes) = self.supertypes.get(current) {
                for supertype in supertypes {
                    if seen.insert(supertype) {
                        queue.push_back(supertype);
                    }
                }
            }
        }
        closure
    }
}

/// The resolved type information for one file's lowered tree.
#[derive(Debug, Clone)]
pub struct SemanticModel {
    hierarchy: TypeHierarchy,
    types: HashMap<NodeId, ResolvedType>,
}

impl SemanticModel {
    pub fn new(hierarchy: TypeHierarchy) -> Self {
        Self {
            hierarchy,
            types: HashMap::new(),
        }
    }

    /// Attach a resolved type to a node.
    pub fn bind(&mut self, id: NodeId, ty: ResolvedType) {
        self.types.insert(id, ty);
    }

    /// The resolved type of a node, if resolution bound one.
    pub fn type_of(&self, id: NodeId) -> Option<&ResolvedType> {
        self.types.get(&id)
    }

    /// True when `ty` is equal to, or a subtype of, the type named `ancestor`.
    pub fn is_subtype_of(&self, ty: &ResolvedType, ancestor: &str) -> bool {
        self.hierarchy.is_subtype_of(ty.name(), ancestor)
    }
}

/// What the resolver reads straight off the CST before walking the
/// lowered tree: imports and local class declarations.
#[derive(Debug, Default)]
pub(crate) struct FileFacts {
    imports: Vec<Import>,
    classes: Vec<LocalClass>,
}

#[derive(Debug)]
enum Import {
    Exact(String),
    Wildcard(String),
}

#[derive(Debug)]
struct LocalClass {
    name: String,
    /// Syntactic names from the `extends`/`implements` clauses.
    supertypes: Vec<String>,
}

const FACTS_QUERY: &str = r#"
(import_declaration) @import
(class_declaration) @class
"#;

pub(crate) fn collect_facts(tree: &Tree, source: &str) -> Result<FileFacts, QueryError> {
    let language: tree_sitter::Language = tree_sitter_java::LANGUAGE.into();
    let query = Query::new(&language, FACTS_QUERY)?;
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

    let mut facts = FileFacts::default();
    while let Some(mat) = matches.next() {
        for capture in mat.captures {
            let capture_name = &query.capture_names()[capture.index as usize];
            match *capture_name {
                "import" => {
                    if let Some(import) = parse_import(capture.node, source) {
                        facts.imports.push(import);
                    }
                }
                "class" => {
                    if let Some(class) = parse_class(capture.node, source) {
                        facts.classes.push(class);
                    }
                }
                _ => {}
            }
        }
    }
    Ok(facts)
}

fn parse_import(node: Node, source: &str) -> Option<Import> {
    let text = node.utf8_text(source.as_bytes()).ok()?;
    let body = text
        .trim()
        .strip_prefix("import")?
        .trim()
        .trim_end_matches(';')
        .trim();
    // Static imports bring in members, not types.
    if body.starts_with("static ") {
        return None;
    }
    match body.strip_suffix(".*") {
        Some(prefix) => Some(Import::Wildcard(prefix.to_string())),
        None => Some(Import::Exact(body.to_string())),
    }
}

fn parse_class(node: Node, source: &str) -> Option<LocalClass> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source.as_bytes())
        .ok()?
        .to_string();

    let mut supertypes = Vec::new();
    if let Some(superclass) = node.child_by_field_name("superclass") {
        let mut cursor = superclass.walk();
        for child in superclass.named_children(&mut cursor) {
            supertypes.push(type_name(child, source));
        }
    }
    if let Some(interfaces) = node.child_by_field_name("interfaces") {
        let mut cursor = interfaces.walk();
        for list in interfaces.named_children(&mut cursor) {
            if list.kind() == "type_list" {
                let mut list_cursor = list.walk();
                for ty in list.named_children(&mut list_cursor) {
                    supertypes.push(type_name(ty, source));
                }
            }
        }
    }
    Some(LocalClass { name, supertypes })
}

fn type_name(node: Node, source: &str) -> String {
    let node = if node.kind() == "generic_type" {
        node.named_child(0).unwrap_or(node)
    } else {
        node
    };
    node.utf8_text(source.as_bytes())
        .unwrap_or_default()
        .to_string()
}

struct TypeScope {
    exact_imports: Vec<String>,
    wildcard_imports: Vec<String>,
    local_classes: Vec<String>,
}

impl TypeScope {
    fn from_facts(facts: &FileFacts) -> Self {
        let mut exact_imports = Vec::new();
        let mut wildcard_imports = Vec::new();
        for import in &facts.imports {
            match import {
                Import::Exact(path) => exact_imports.push(path.clone()),
                Import::Wildcard(prefix) => wildcard_imports.push(prefix.clone()),
            }
        }
        Self {
            exact_imports,
            wildcard_imports,
            local_classes: facts.classes.iter().map(|c| c.name.clone()).collect(),
        }
    }

    /// Qualify a syntactic type name, or give up.
    fn qualify(&self, name: &str) -> Option<String> {
        if name.contains('.') {
            return Some(name.to_string());
        }
        if self.local_classes.iter().any(|c| c == name) {
            return Some(name.to_string());
        }
        for path in &self.exact_imports {
            if path.rsplit('.').next() == Some(name) {
                return Some(path.clone());
            }
        }
        for prefix in &self.wildcard_imports {
            let candidate = format!("{prefix}.{name}");
            if known::is_known_type(&candidate) {
                return Some(candidate);
            }
        }
        None
    }
}

/// Build the semantic model for one file.
///
/// A single walk in source order: declarations bind their names as they
/// are met, calls resolve bottom-up so a chained receiver is typed before
/// the outer call asks for it.
pub(crate) fn resolve(root: &SyntaxNode, facts: &FileFacts) -> SemanticModel {
    let scope = TypeScope::from_facts(facts);

    let mut hierarchy = TypeHierarchy::builtin();
    for class in &facts.classes {
        for supertype in &class.supertypes {
            if let Some(qualified) = scope.qualify(supertype) {
                hierarchy.add_edge(&class.name, &qualified);
            }
        }
    }

    let mut resolver = Resolver {
        scope,
        model: SemanticModel::new(hierarchy),
        bindings: HashMap::new(),
    };
    resolver.visit(root);
    resolver.model
}

struct Resolver {
    scope: TypeScope,
    model: SemanticModel,
    /// Variable name -> qualified type. Flat across the file; the last
    /// declaration of a name wins.
    bindings: HashMap<String, String>,
}

impl Resolver {
    fn visit(&mut self, node: &SyntaxNode) {
        match node {
            SyntaxNode::VariableDeclaration(decl) => {
                let mut resolved = decl
                    .declared_type
                    .as_deref()
                    .filter(|t| *t != "var")
                    .and_then(|t| self.scope.qualify(t));
                if let Some(name) = &resolved {
                    self.bindings.insert(decl.name.clone(), name.clone());
                }

                for child in &decl.children {
                    self.visit(child);
                }

                // `var` declarations take the type of an entry-producing
                // initializer call, when there is one.
                if resolved.is_none() && decl.declared_type.as_deref() == Some("var") {
                    resolved = decl
                        .initializer_call
                        .and_then(|call| self.model.type_of(call))
                        .map(|ty| ty.name().to_string());
                    if let Some(name) = &resolved {
                        self.bindings.insert(decl.name.clone(), name.clone());
                    }
                }

                if let Some(name) = resolved {
                    self.model.bind(decl.id, ResolvedType::new(name));
                }
            }
            SyntaxNode::MethodCall(call) => {
                for child in &call.children {
                    self.visit(child);
                }

                let receiver_type: Option<String> = match &call.receiver {
                    Receiver::Variable(name) => self.bindings.get(name).cloned(),
                    Receiver::Call(id) => {
                        self.model.type_of(*id).map(|ty| ty.name().to_string())
                    }
                    Receiver::Opaque | Receiver::None => None,
                };
                if let Some(receiver) = receiver_type {
                    if let Some(ret) = self.signature_return(&receiver, &call.method_name) {
                        self.model.bind(call.id, ResolvedType::new(ret));
                    }
                }
            }
            SyntaxNode::Other(other) => {
                for child in &other.children {
                    self.visit(child);
                }
            }
        }
    }

    fn signature_return(&self, receiver: &str, method: &str) -> Option<&'static str> {
        for candidate in self.model.hierarchy.supertype_closure(receiver) {
            if let Some((_, _, ret)) = known::ENTRY_METHODS
                .iter()
                .find(|(r, m, _)| *r == candidate && *m == method)
            {
                return Some(ret);
            }
        }
        None
    }
}
