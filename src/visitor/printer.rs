//! Indented text rendering of a tree

use std::fmt;

use super::{dispatch, Visitor};
use crate::ast::NodeRef;

/// Writes one line per node, indented by depth
pub struct TreePrinter<W: fmt::Write> {
    out: W,
    depth: usize,
    indent: &'static str,
}

impl<W: fmt::Write> TreePrinter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            depth: 0,
            indent: "  ",
        }
    }

    pub fn with_indent(mut self, indent: &'static str) -> Self {
        self.indent = indent;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: fmt::Write> Visitor for TreePrinter<W> {
    type Error = fmt::Error;

    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), fmt::Error> {
        for _ in 0..self.depth {
            self.out.write_str(self.indent)?;
        }
        writeln!(self.out, "{}", node.label())?;

        self.depth += 1;
        let visited = dispatch(self, node);
        self.depth -= 1;
        visited
    }
}

/// Renders the subtree rooted at `node`.
pub fn render_tree(node: NodeRef<'_>) -> String {
    let mut printer = TreePrinter::new(String::new());
    match node.accept(&mut printer) {
        Ok(()) => printer.into_inner(),
        // Writing to a String cannot fail
        Err(fmt::Error) => String::new(),
    }
}
