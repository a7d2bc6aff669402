//! Lexical scope tree
//!
//! Scopes live in an arena and refer to each other by [`ScopeId`]. Each scope
//! remembers the AST node that introduced it (a `Block`, `For`, `Function` or
//! `If`) and maps identifiers declared directly inside it to their
//! declaration site.

use std::fmt::Write as _;

use rustc_hash::FxHashMap;

use crate::ast::{Datatype, NodeId, NodeKind, SourceLocation};

/// Unique identifier for a scope
#[derive(Copy, Clone, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

/// What introduced a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Parameter,
    Variable,
}

/// Where and how a name was declared
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The `FunctionParameter` or `VariableDeclaration` node
    pub node: NodeId,
    pub datatype: Datatype,
    pub kind: DeclarationKind,
    pub location: SourceLocation,
}

/// A single scope in the scope tree
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeId,
    /// Enclosing scope (None for the root)
    pub parent: Option<ScopeId>,
    /// Node that introduced this scope
    pub owner: NodeId,
    pub owner_kind: NodeKind,
    /// Nested scopes, in the order they were entered
    pub children: Vec<ScopeId>,
    identifiers: FxHashMap<String, Declaration>,
}

impl Scope {
    fn new(id: ScopeId, parent: Option<ScopeId>, owner: NodeId, owner_kind: NodeKind) -> Self {
        Self {
            id,
            parent,
            owner,
            owner_kind,
            children: Vec::new(),
            identifiers: FxHashMap::default(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.identifiers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Declaration> {
        self.identifiers.get(name)
    }

    /// Names declared directly in this scope, sorted
    pub fn identifiers(&self) -> Vec<(&str, &Declaration)> {
        let mut identifiers: Vec<_> = self
            .identifiers
            .iter()
            .map(|(name, declaration)| (name.as_str(), declaration))
            .collect();
        identifiers.sort_by_key(|(name, _)| *name);
        identifiers
    }
}

/// Scope tree for one traversal
#[derive(Debug, Clone)]
pub struct ScopeTree {
    scopes: Vec<Scope>,
}

impl ScopeTree {
    /// Create a tree whose root scope is introduced by `owner`
    pub fn new(owner: NodeId, owner_kind: NodeKind) -> Self {
        Self {
            scopes: vec![Scope::new(ScopeId(0), None, owner, owner_kind)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Create a child scope
    pub fn create_child(&mut self, parent: ScopeId, owner: NodeId, owner_kind: NodeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(id, Some(parent), owner, owner_kind));
        if let Some(parent) = self.scopes.get_mut(parent.0 as usize) {
            parent.children.push(id);
        }
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    pub fn parent_of(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|scope| scope.parent)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter()
    }

    /// Records `name` in `scope`, returning the declaration it replaces.
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: impl Into<String>,
        declaration: Declaration,
    ) -> Option<Declaration> {
        self.scopes
            .get_mut(scope.0 as usize)?
            .identifiers
            .insert(name.into(), declaration)
    }

    /// `scope` followed by each enclosing scope up to the root
    pub fn ancestors(&self, scope: ScopeId) -> impl Iterator<Item = ScopeId> + '_ {
        std::iter::successors(self.get(scope).map(|scope| scope.id), |id| self.parent_of(*id))
    }

    /// Resolve a name in a scope, walking up the scope chain
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Declaration)> {
        self.ancestors(scope).find_map(|id| {
            self.get(id)
                .and_then(|scope| scope.get(name))
                .map(|declaration| (id, declaration))
        })
    }

    /// The scope introduced by `node`, if it introduced one
    pub fn scope_owned_by(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes
            .iter()
            .find(|scope| scope.owner == node)
            .map(|scope| scope.id)
    }

    /// The scope in which `node` was declared
    pub fn scope_of_declaration(&self, node: NodeId) -> Option<ScopeId> {
        self.scopes
            .iter()
            .find(|scope| scope.identifiers.values().any(|decl| decl.node == node))
            .map(|scope| scope.id)
    }

    pub fn depth(&self, scope: ScopeId) -> usize {
        self.ancestors(scope).count().saturating_sub(1)
    }

    /// Indented text form, one scope per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_scope(self.root(), 0, &mut out);
        out
    }

    fn render_scope(&self, id: ScopeId, depth: usize, out: &mut String) {
        let Some(scope) = self.get(id) else {
            return;
        };

        let names: Vec<String> = scope
            .identifiers()
            .into_iter()
            .map(|(name, decl)| format!("{} {}", decl.datatype, name))
            .collect();
        let _ = writeln!(
            out,
            "{}scope {} ({}): {}",
            "  ".repeat(depth),
            id.0,
            scope.owner_kind,
            if names.is_empty() {
                "-".to_string()
            } else {
                names.join(", ")
            }
        );

        for child in &scope.children {
            self.render_scope(*child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::PrimitiveType;

    fn declaration(node: NodeId) -> Declaration {
        Declaration {
            node,
            datatype: Datatype::plain(PrimitiveType::Int),
            kind: DeclarationKind::Variable,
            location: SourceLocation::default(),
        }
    }

    #[test]
    fn test_resolve_walks_parents() {
        let mut tree = ScopeTree::new(1, NodeKind::Block);
        let root = tree.root();
        let inner = tree.create_child(root, 2, NodeKind::Function);
        let innermost = tree.create_child(inner, 3, NodeKind::Block);

        tree.declare(root, "x", declaration(10));
        tree.declare(inner, "y", declaration(11));

        assert_eq!(tree.resolve(innermost, "x").map(|(id, _)| id), Some(root));
        assert_eq!(tree.resolve(innermost, "y").map(|(_, d)| d.node), Some(11));
        assert!(tree.resolve(root, "y").is_none());
        assert_eq!(tree.depth(innermost), 2);
        assert_eq!(tree.get(root).unwrap().children, vec![inner]);
    }

    #[test]
    fn test_shadowing_and_redeclaration() {
        let mut tree = ScopeTree::new(1, NodeKind::Block);
        let root = tree.root();
        let inner = tree.create_child(root, 2, NodeKind::Block);

        tree.declare(root, "x", declaration(10));
        tree.declare(inner, "x", declaration(20));
        assert_eq!(tree.resolve(inner, "x").map(|(_, d)| d.node), Some(20));

        let replaced = tree.declare(inner, "x", declaration(30));
        assert_eq!(replaced.map(|d| d.node), Some(20));
        assert_eq!(tree.scope_of_declaration(30), Some(inner));
        assert_eq!(tree.scope_owned_by(2), Some(inner));
    }

    #[test]
    fn test_render() {
        let mut tree = ScopeTree::new(1, NodeKind::Block);
        let child = tree.create_child(tree.root(), 2, NodeKind::For);
        tree.declare(child, "i", declaration(5));
        assert_eq!(
            tree.render(),
            "scope 0 (Block): -\n  scope 1 (For): int i\n"
        );
    }
}
