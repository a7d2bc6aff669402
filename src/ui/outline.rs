//! Flattened view of a tree for the explorer
//!
//! [`build_outline`] walks a tree once and produces one [`OutlineRow`] per
//! node in preorder, recording its depth and the innermost scope it belongs to.

use std::convert::Infallible;

use crate::ast::{NodeId, NodeKind, NodeRef};
use crate::visitor::{dispatch, ScopeId, ScopeResolution, Visitor};

/// One line of the AST pane
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub depth: usize,
    pub id: NodeId,
    pub kind: NodeKind,
    pub label: String,
    /// Source line, 0 for nodes rebuilt from the structured form
    pub line: usize,
    /// Innermost scope containing the node (a scope owner is inside its own scope)
    pub scope: Option<ScopeId>,
}

struct OutlineBuilder<'r> {
    resolution: &'r ScopeResolution,
    rows: Vec<OutlineRow>,
    depth: usize,
    scope: Option<ScopeId>,
}

impl Visitor for OutlineBuilder<'_> {
    type Error = Infallible;

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), Infallible> {
        let enclosing = self.scope;
        if let Some(owned) = self
            .resolution
            .scopes
            .as_ref()
            .and_then(|tree| tree.scope_owned_by(node.id()))
        {
            self.scope = Some(owned);
        }

        self.rows.push(OutlineRow {
            depth: self.depth,
            id: node.id(),
            kind: node.kind(),
            label: node.label(),
            line: node.location().line,
            scope: self.scope,
        });

        self.depth += 1;
        let visited = dispatch(self, node);
        self.depth -= 1;
        self.scope = enclosing;
        visited
    }
}

/// One row per node under `root`, in preorder
pub fn build_outline(root: NodeRef<'_>, resolution: &ScopeResolution) -> Vec<OutlineRow> {
    let mut builder = OutlineBuilder {
        resolution,
        rows: Vec::new(),
        depth: 0,
        scope: None,
    };
    match root.accept(&mut builder) {
        Ok(()) => builder.rows,
        Err(never) => match never {},
    }
}
