//! Scope resolution pass
//!
//! [`ScopeResolver`] threads a [`ScopeTree`] through a traversal. `Block`,
//! `For`, `Function` and `If` each open a scope nested in the current one for
//! the duration of their children. A `For` opens exactly one scope: its
//! initializer and update blocks are walked children-only, so a loop counter
//! declared in the initializer is visible in the condition, the update and
//! the body.
//!
//! Parameters and variable declarations are recorded in the current scope.
//! Every `Variable` visited is remembered together with the scope it was
//! visited in, so that callers can resolve uses afterwards.

use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use super::scope::{Declaration, DeclarationKind, ScopeId, ScopeTree};
use super::{walk_children, Visitor};
use crate::ast::{
    AstNode, Block, For, Function, FunctionParameter, If, NodeId, NodeRef, Variable,
    VariableDeclaration,
};

/// Scope bookkeeping error type
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("no current scope")]
    NoScope,

    #[error("no root scope has been created")]
    NoRootScope,

    #[error("cannot leave a scope: no scope is active")]
    NoActiveScope,
}

/// Builds the scope tree of a traversal
#[derive(Debug, Default)]
pub struct ScopeResolver {
    scopes: Option<ScopeTree>,
    current: Option<ScopeId>,
    uses: FxHashMap<NodeId, ScopeId>,
}

impl ScopeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scope tree built so far
    pub fn scopes(&self) -> Option<&ScopeTree> {
        self.scopes.as_ref()
    }

    /// Hands the finished tree to the caller, leaving the resolver empty.
    pub fn take_scopes(&mut self) -> Option<ScopeTree> {
        self.current = None;
        self.scopes.take()
    }

    /// Starts from an existing tree instead of creating a root lazily.
    pub fn set_scopes(&mut self, scopes: ScopeTree) {
        self.current = None;
        self.scopes = Some(scopes);
    }

    pub fn current_scope(&self) -> Result<ScopeId, ScopeError> {
        self.current.ok_or(ScopeError::NoScope)
    }

    pub fn root_scope(&self) -> Result<ScopeId, ScopeError> {
        self.scopes
            .as_ref()
            .map(ScopeTree::root)
            .ok_or(ScopeError::NoRootScope)
    }

    /// Repositions the cursor, e.g. to continue a pass inside a known scope.
    pub fn override_current_scope(&mut self, scope: Option<ScopeId>) {
        self.current = scope;
    }

    /// Scope in which the `Variable` node `node` was visited
    pub fn use_scope(&self, node: NodeId) -> Option<ScopeId> {
        self.uses.get(&node).copied()
    }

    /// Opens a scope owned by `owner`, nested in the current one.
    pub fn enter_scope(&mut self, owner: NodeRef<'_>) -> ScopeId {
        let entered = if let Some(tree) = self.scopes.as_mut() {
            let parent = self.current.unwrap_or_else(|| tree.root());
            tree.create_child(parent, owner.id(), owner.kind())
        } else {
            let tree = ScopeTree::new(owner.id(), owner.kind());
            let root = tree.root();
            self.scopes = Some(tree);
            root
        };

        trace!(scope = entered.0, owner = %owner.kind(), "enter scope");
        self.current = Some(entered);
        entered
    }

    /// Returns to the enclosing scope; leaving the root clears the cursor.
    pub fn exit_scope(&mut self) -> Result<(), ScopeError> {
        let current = self.current.ok_or(ScopeError::NoActiveScope)?;
        trace!(scope = current.0, "exit scope");
        self.current = self
            .scopes
            .as_ref()
            .and_then(|tree| tree.parent_of(current));
        Ok(())
    }

    /// Runs `visit` inside a fresh scope owned by `owner`. The scope is left
    /// even when `visit` fails.
    fn scoped(
        &mut self,
        owner: NodeRef<'_>,
        visit: impl FnOnce(&mut Self) -> Result<(), ScopeError>,
    ) -> Result<(), ScopeError> {
        self.enter_scope(owner);
        let visited = visit(self);
        let exited = self.exit_scope();
        visited.and(exited)
    }

    fn declare(&mut self, name: &str, declaration: Declaration) -> Result<(), ScopeError> {
        let scope = self.current_scope()?;
        let tree = self.scopes.as_mut().ok_or(ScopeError::NoRootScope)?;

        trace!(scope = scope.0, name, datatype = %declaration.datatype, "declare");
        if let Some(previous) = tree.declare(scope, name, declaration) {
            warn!(
                scope = scope.0,
                name,
                previous = %previous.location,
                "identifier redeclared in the same scope"
            );
        }
        Ok(())
    }
}

impl Visitor for ScopeResolver {
    type Error = ScopeError;

    fn visit_block(&mut self, node: &Block) -> Result<(), ScopeError> {
        self.scoped(node.as_node(), |this| walk_children(this, node.as_node()))
    }

    fn visit_if(&mut self, node: &If) -> Result<(), ScopeError> {
        self.scoped(node.as_node(), |this| walk_children(this, node.as_node()))
    }

    fn visit_function(&mut self, node: &Function) -> Result<(), ScopeError> {
        self.scoped(node.as_node(), |this| walk_children(this, node.as_node()))
    }

    fn visit_for(&mut self, node: &For) -> Result<(), ScopeError> {
        self.scoped(node.as_node(), |this| {
            if let Ok(initializer) = node.initializer() {
                walk_children(this, initializer.as_node())?;
            }
            if let Ok(condition) = node.condition() {
                condition.accept(this)?;
            }
            if let Ok(update) = node.update() {
                walk_children(this, update.as_node())?;
            }
            if let Ok(body) = node.body() {
                body.accept(this)?;
            }
            Ok(())
        })
    }

    fn visit_function_parameter(&mut self, node: &FunctionParameter) -> Result<(), ScopeError> {
        self.declare(
            node.identifier(),
            Declaration {
                node: node.id(),
                datatype: node.datatype(),
                kind: DeclarationKind::Parameter,
                location: node.location(),
            },
        )?;
        walk_children(self, node.as_node())
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) -> Result<(), ScopeError> {
        if let Ok(target) = node.target() {
            self.declare(
                target.identifier(),
                Declaration {
                    node: node.id(),
                    datatype: node.datatype(),
                    kind: DeclarationKind::Variable,
                    location: node.location(),
                },
            )?;
        }
        walk_children(self, node.as_node())
    }

    fn visit_variable(&mut self, node: &Variable) -> Result<(), ScopeError> {
        if let Some(scope) = self.current {
            self.uses.insert(node.id(), scope);
        }
        walk_children(self, node.as_node())
    }
}

/// The outcome of a scope resolution pass
#[derive(Debug, Default)]
pub struct ScopeResolution {
    /// None when the tree contained no scope-introducing node
    pub scopes: Option<ScopeTree>,
    uses: FxHashMap<NodeId, ScopeId>,
}

impl ScopeResolution {
    /// Scope in which the `Variable` node `node` was visited
    pub fn use_scope(&self, node: NodeId) -> Option<ScopeId> {
        self.uses.get(&node).copied()
    }

    /// The declaration a `Variable` use refers to
    pub fn declaration_of(&self, variable: &Variable) -> Option<(ScopeId, &Declaration)> {
        let scope = self.use_scope(variable.id())?;
        self.scopes.as_ref()?.resolve(scope, variable.identifier())
    }
}

/// Runs a [`ScopeResolver`] over the tree rooted at `root`.
pub fn resolve_scopes(root: NodeRef<'_>) -> Result<ScopeResolution, ScopeError> {
    let mut resolver = ScopeResolver::new();
    root.accept(&mut resolver)?;
    Ok(ScopeResolution {
        scopes: resolver.take_scopes(),
        uses: std::mem::take(&mut resolver.uses),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, Statement};
    use crate::parser::parse;

    #[test]
    fn test_no_scope_before_traversal() {
        let mut resolver = ScopeResolver::new();
        assert_eq!(resolver.current_scope(), Err(ScopeError::NoScope));
        assert_eq!(resolver.root_scope(), Err(ScopeError::NoRootScope));
        assert_eq!(resolver.exit_scope(), Err(ScopeError::NoActiveScope));
    }

    #[test]
    fn test_declaration_outside_scope() {
        let root = parse("int x = 1;").unwrap();
        let Statement::VariableDeclaration(decl) = &root.statements()[0] else {
            panic!("Expected declaration");
        };
        let mut resolver = ScopeResolver::new();
        assert_eq!(decl.accept(&mut resolver), Err(ScopeError::NoScope));
    }

    #[test]
    fn test_scope_restored_after_traversal() {
        let root = parse("public int f(int a) { if (a) { return 1; } return 0; }").unwrap();
        let mut resolver = ScopeResolver::new();
        root.accept(&mut resolver).unwrap();

        assert_eq!(resolver.current_scope(), Err(ScopeError::NoScope));
        let tree = resolver.take_scopes().unwrap();
        let kinds: Vec<NodeKind> = tree.iter().map(|scope| scope.owner_kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Block,
                NodeKind::Function,
                NodeKind::Block,
                NodeKind::If,
                NodeKind::Block,
            ]
        );
        assert!(tree.get(ScopeId(1)).unwrap().contains("a"));
        assert!(resolver.scopes().is_none());
    }

    #[test]
    fn test_override_current_scope() {
        let root = parse("{ }").unwrap();
        let mut resolver = ScopeResolver::new();
        root.accept(&mut resolver).unwrap();

        resolver.override_current_scope(Some(ScopeId(1)));
        assert_eq!(resolver.current_scope(), Ok(ScopeId(1)));
        resolver.exit_scope().unwrap();
        assert_eq!(resolver.current_scope(), Ok(ScopeId(0)));
    }

    #[test]
    fn test_continue_in_existing_tree() {
        let first = parse("int x = 1;").unwrap();
        let mut resolver = ScopeResolver::new();
        first.accept(&mut resolver).unwrap();
        let tree = resolver.take_scopes().unwrap();
        let root = tree.root();

        let second = parse("int y = x; { int z = y; }").unwrap();
        let mut resolver = ScopeResolver::new();
        resolver.set_scopes(tree);
        assert_eq!(resolver.root_scope(), Ok(root));
        assert_eq!(resolver.current_scope(), Err(ScopeError::NoScope));

        resolver.override_current_scope(Some(root));
        for statement in second.statements() {
            statement.accept(&mut resolver).unwrap();
        }

        let tree = resolver.scopes().unwrap();
        let names: Vec<&str> = tree
            .get(root)
            .unwrap()
            .identifiers()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["x", "y"]);

        let nested = tree.get(root).unwrap().children[0];
        assert!(tree.resolve(nested, "x").is_some());
        assert!(tree.get(nested).unwrap().contains("z"));
    }
}
