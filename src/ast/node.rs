//! Node identity, kinds and the borrowed node handle
//!
//! Every concrete AST type embeds a [`NodeMeta`] and implements [`AstNode`].
//! Heterogeneous access (child iteration, visitor dispatch) goes through
//! [`NodeRef`], a borrowed handle over the closed set of concrete variants.
//!
//! # Construction protocol
//!
//! Nodes are built bottom-up with `parent: None`. Once a tree is complete, a
//! single call to [`AstNode::assign_parents`] on the root points every child
//! at its owner. Parent references are node ids, never owning pointers.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;
use serde_json::Value;

use super::errors::{AstError, Category};
use super::expressions::{
    BinaryExpression, Call, ExpressionList, LiteralBool, LiteralChar, LiteralDouble,
    LiteralFloat, LiteralInt, LiteralString, OperatorExpression, TernaryOperator,
    UnaryExpression,
};
use super::statements::{
    Assignment, Block, For, Function, If, Return, VariableDeclaration,
};
use super::targets::{FunctionParameter, IndexAccess, Variable};
use crate::visitor::Visitor;

/// Unique identifier for AST nodes
pub type NodeId = usize;

static NEXT_NODE_ID: AtomicUsize = AtomicUsize::new(1);

fn fresh_id() -> NodeId {
    NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Identity and position shared by every node.
///
/// Deliberately not `Clone`: copying a node must go through
/// [`AstNode::deep_clone`] so that the copy receives fresh ids.
#[derive(Debug)]
pub struct NodeMeta {
    id: NodeId,
    parent: Option<NodeId>,
    location: SourceLocation,
}

impl NodeMeta {
    pub fn new(location: SourceLocation) -> Self {
        Self {
            id: fresh_id(),
            parent: None,
            location,
        }
    }

    /// Metadata for a copy of the node owning `self`, attached to `parent`.
    pub(crate) fn copied(&self, parent: Option<NodeId>) -> Self {
        Self {
            id: fresh_id(),
            parent,
            location: self.location,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }

    pub(crate) fn set_location(&mut self, location: SourceLocation) {
        self.location = location;
    }
}

impl Default for NodeMeta {
    fn default() -> Self {
        Self::new(SourceLocation::default())
    }
}

/// Tag of every concrete node variant.
///
/// [`NodeKind::as_str`] doubles as the `type` tag of the structured form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    BinaryExpression,
    UnaryExpression,
    TernaryOperator,
    OperatorExpression,
    Call,
    ExpressionList,
    LiteralBool,
    LiteralChar,
    LiteralInt,
    LiteralFloat,
    LiteralDouble,
    LiteralString,
    Variable,
    IndexAccess,
    FunctionParameter,
    Block,
    If,
    For,
    Function,
    Return,
    VariableDeclaration,
    Assignment,
}

impl NodeKind {
    pub const ALL: [NodeKind; 22] = [
        NodeKind::BinaryExpression,
        NodeKind::UnaryExpression,
        NodeKind::TernaryOperator,
        NodeKind::OperatorExpression,
        NodeKind::Call,
        NodeKind::ExpressionList,
        NodeKind::LiteralBool,
        NodeKind::LiteralChar,
        NodeKind::LiteralInt,
        NodeKind::LiteralFloat,
        NodeKind::LiteralDouble,
        NodeKind::LiteralString,
        NodeKind::Variable,
        NodeKind::IndexAccess,
        NodeKind::FunctionParameter,
        NodeKind::Block,
        NodeKind::If,
        NodeKind::For,
        NodeKind::Function,
        NodeKind::Return,
        NodeKind::VariableDeclaration,
        NodeKind::Assignment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::BinaryExpression => "BinaryExpression",
            NodeKind::UnaryExpression => "UnaryExpression",
            NodeKind::TernaryOperator => "TernaryOperator",
            NodeKind::OperatorExpression => "OperatorExpression",
            NodeKind::Call => "Call",
            NodeKind::ExpressionList => "ExpressionList",
            NodeKind::LiteralBool => "LiteralBool",
            NodeKind::LiteralChar => "LiteralChar",
            NodeKind::LiteralInt => "LiteralInt",
            NodeKind::LiteralFloat => "LiteralFloat",
            NodeKind::LiteralDouble => "LiteralDouble",
            NodeKind::LiteralString => "LiteralString",
            NodeKind::Variable => "Variable",
            NodeKind::IndexAccess => "IndexAccess",
            NodeKind::FunctionParameter => "FunctionParameter",
            NodeKind::Block => "Block",
            NodeKind::If => "If",
            NodeKind::For => "For",
            NodeKind::Function => "Function",
            NodeKind::Return => "Return",
            NodeKind::VariableDeclaration => "VariableDeclaration",
            NodeKind::Assignment => "Assignment",
        }
    }

    /// Look up a kind by its structured `type` tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            NodeKind::Block
                | NodeKind::If
                | NodeKind::For
                | NodeKind::Function
                | NodeKind::Return
                | NodeKind::VariableDeclaration
                | NodeKind::Assignment
        )
    }

    pub fn is_target(self) -> bool {
        matches!(
            self,
            NodeKind::Variable | NodeKind::IndexAccess | NodeKind::FunctionParameter
        )
    }

    /// Targets are expressions too.
    pub fn is_expression(self) -> bool {
        !self.is_statement()
    }

    /// The most specific category of this kind
    pub fn category(self) -> Category {
        if self.is_statement() {
            Category::Statement
        } else if self.is_target() {
            Category::Target
        } else {
            Category::Expression
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered direct children of a node
pub type Children<'a> = std::vec::IntoIter<NodeRef<'a>>;

/// Behaviour shared by every node type (concrete structs and the
/// capability enums that wrap them).
pub trait AstNode {
    fn meta(&self) -> &NodeMeta;

    fn meta_mut(&mut self) -> &mut NodeMeta;

    fn kind(&self) -> NodeKind;

    /// Borrowed handle for dispatch and heterogeneous iteration
    fn as_node(&self) -> NodeRef<'_>;

    /// Direct children in syntax order; absent optional children are skipped.
    fn children(&self) -> Children<'_>;

    /// Lossless structured form, tagged with `type`
    fn to_structured(&self) -> Value;

    /// Recursively copies the subtree. The copy gets fresh ids, its root is
    /// attached to `parent` and every copied child points at its copied owner.
    fn deep_clone(&self, parent: Option<NodeId>) -> Self
    where
        Self: Sized;

    /// Points every direct child at this node, then recurses.
    fn assign_parents(&mut self);

    /// Short human-readable description, without children
    fn label(&self) -> String;

    fn id(&self) -> NodeId {
        self.meta().id()
    }

    fn parent(&self) -> Option<NodeId> {
        self.meta().parent()
    }

    fn location(&self) -> SourceLocation {
        self.meta().location()
    }

    fn count_children(&self) -> usize {
        self.children().len()
    }

    fn child(&self, index: usize) -> Result<NodeRef<'_>, AstError> {
        let count = self.count_children();
        self.children()
            .nth(index)
            .ok_or(AstError::ChildOutOfRange {
                node: self.kind(),
                index,
                count,
            })
    }

    fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> Result<(), V::Error>
    where
        Self: Sized,
    {
        self.as_node().accept(visitor)
    }

    /// Builder-style location setter used by the parser
    fn at(mut self, location: SourceLocation) -> Self
    where
        Self: Sized,
    {
        self.meta_mut().set_location(location);
        self
    }
}

/// Attaches `child` to `parent` and fixes up the child's own subtree.
pub(crate) fn adopt<N: AstNode + ?Sized>(parent: NodeId, child: &mut N) {
    child.meta_mut().set_parent(Some(parent));
    child.assign_parents();
}

pub(crate) fn adopt_all<'n, N: AstNode + 'n>(
    parent: NodeId,
    children: impl IntoIterator<Item = &'n mut N>,
) {
    for child in children {
        adopt(parent, child);
    }
}

pub(crate) fn clone_optional<N: AstNode>(
    child: &Option<Box<N>>,
    parent: NodeId,
) -> Option<Box<N>> {
    child
        .as_ref()
        .map(|child| Box::new(child.deep_clone(Some(parent))))
}

pub(crate) fn clone_all<N: AstNode>(children: &[N], parent: NodeId) -> Vec<N> {
    children
        .iter()
        .map(|child| child.deep_clone(Some(parent)))
        .collect()
}

/// Getter body for an optional child
pub(crate) fn require<'n, N>(
    child: &'n Option<Box<N>>,
    node: NodeKind,
    name: &'static str,
) -> Result<&'n N, AstError> {
    child
        .as_deref()
        .ok_or(AstError::MissingChild { node, child: name })
}

/// Borrowed handle to any concrete node
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    BinaryExpression(&'a BinaryExpression),
    UnaryExpression(&'a UnaryExpression),
    TernaryOperator(&'a TernaryOperator),
    OperatorExpression(&'a OperatorExpression),
    Call(&'a Call),
    ExpressionList(&'a ExpressionList),
    LiteralBool(&'a LiteralBool),
    LiteralChar(&'a LiteralChar),
    LiteralInt(&'a LiteralInt),
    LiteralFloat(&'a LiteralFloat),
    LiteralDouble(&'a LiteralDouble),
    LiteralString(&'a LiteralString),
    Variable(&'a Variable),
    IndexAccess(&'a IndexAccess),
    FunctionParameter(&'a FunctionParameter),
    Block(&'a Block),
    If(&'a If),
    For(&'a For),
    Function(&'a Function),
    Return(&'a Return),
    VariableDeclaration(&'a VariableDeclaration),
    Assignment(&'a Assignment),
}

macro_rules! with_node {
    ($node_ref:expr, $node:ident => $body:expr) => {
        match $node_ref {
            NodeRef::BinaryExpression($node) => $body,
            NodeRef::UnaryExpression($node) => $body,
            NodeRef::TernaryOperator($node) => $body,
            NodeRef::OperatorExpression($node) => $body,
            NodeRef::Call($node) => $body,
            NodeRef::ExpressionList($node) => $body,
            NodeRef::LiteralBool($node) => $body,
            NodeRef::LiteralChar($node) => $body,
            NodeRef::LiteralInt($node) => $body,
            NodeRef::LiteralFloat($node) => $body,
            NodeRef::LiteralDouble($node) => $body,
            NodeRef::LiteralString($node) => $body,
            NodeRef::Variable($node) => $body,
            NodeRef::IndexAccess($node) => $body,
            NodeRef::FunctionParameter($node) => $body,
            NodeRef::Block($node) => $body,
            NodeRef::If($node) => $body,
            NodeRef::For($node) => $body,
            NodeRef::Function($node) => $body,
            NodeRef::Return($node) => $body,
            NodeRef::VariableDeclaration($node) => $body,
            NodeRef::Assignment($node) => $body,
        }
    };
}

impl<'a> NodeRef<'a> {
    pub fn meta(self) -> &'a NodeMeta {
        with_node!(self, node => node.meta())
    }

    pub fn id(self) -> NodeId {
        self.meta().id()
    }

    pub fn parent(self) -> Option<NodeId> {
        self.meta().parent()
    }

    pub fn location(self) -> SourceLocation {
        self.meta().location()
    }

    pub fn kind(self) -> NodeKind {
        with_node!(self, node => node.kind())
    }

    pub fn children(self) -> Children<'a> {
        with_node!(self, node => node.children())
    }

    pub fn count_children(self) -> usize {
        self.children().len()
    }

    pub fn label(self) -> String {
        with_node!(self, node => node.label())
    }

    pub fn to_structured(self) -> Value {
        with_node!(self, node => node.to_structured())
    }

    /// Double dispatch into `visitor`
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) -> Result<(), V::Error> {
        visitor.visit_node(self)
    }

    /// This node followed by all of its descendants, depth first
    pub fn descendants(self) -> Vec<NodeRef<'a>> {
        let mut nodes = Vec::new();
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            nodes.push(node);
            let children: Vec<_> = node.children().collect();
            pending.extend(children.into_iter().rev());
        }
        nodes
    }

    /// Finds a node by id in the subtree rooted here
    pub fn find(self, id: NodeId) -> Option<NodeRef<'a>> {
        self.descendants().into_iter().find(|node| node.id() == id)
    }
}

/// Implements [`AstNode`] for an enum whose variants each wrap one node type.
macro_rules! delegate_ast_node {
    ($enum:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::ast::node::AstNode for $enum {
            fn meta(&self) -> &$crate::ast::node::NodeMeta {
                match self { $(Self::$variant(node) => node.meta(),)+ }
            }

            fn meta_mut(&mut self) -> &mut $crate::ast::node::NodeMeta {
                match self { $(Self::$variant(node) => node.meta_mut(),)+ }
            }

            fn kind(&self) -> $crate::ast::node::NodeKind {
                match self { $(Self::$variant(node) => node.kind(),)+ }
            }

            fn as_node(&self) -> $crate::ast::node::NodeRef<'_> {
                match self { $(Self::$variant(node) => node.as_node(),)+ }
            }

            fn children(&self) -> $crate::ast::node::Children<'_> {
                match self { $(Self::$variant(node) => node.children(),)+ }
            }

            fn to_structured(&self) -> serde_json::Value {
                match self { $(Self::$variant(node) => node.to_structured(),)+ }
            }

            fn deep_clone(&self, parent: Option<$crate::ast::node::NodeId>) -> Self {
                match self { $(Self::$variant(node) => Self::$variant(node.deep_clone(parent)),)+ }
            }

            fn assign_parents(&mut self) {
                match self { $(Self::$variant(node) => node.assign_parents(),)+ }
            }

            fn label(&self) -> String {
                match self { $(Self::$variant(node) => node.label(),)+ }
            }
        }
    };
}

pub(crate) use delegate_ast_node;

/// Implements `Clone` through [`AstNode::deep_clone`], keeping the parent.
macro_rules! clone_via_deep_clone {
    ($($node:ty),+ $(,)?) => {
        $(
            impl Clone for $node {
                fn clone(&self) -> Self {
                    $crate::ast::node::AstNode::deep_clone(
                        self,
                        $crate::ast::node::AstNode::parent(self),
                    )
                }
            }
        )+
    };
}

pub(crate) use clone_via_deep_clone;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(NodeKind::from_tag(kind.as_str()), Some(kind));
        }
        assert_eq!(NodeKind::from_tag("While"), None);
    }

    #[test]
    fn test_capabilities() {
        assert!(NodeKind::Variable.is_target());
        assert!(NodeKind::Variable.is_expression());
        assert!(!NodeKind::Variable.is_statement());
        assert!(NodeKind::For.is_statement());
        assert!(!NodeKind::For.is_expression());
        assert_eq!(NodeKind::LiteralInt.category(), Category::Expression);
        assert_eq!(NodeKind::IndexAccess.category(), Category::Target);
    }

    #[test]
    fn test_fresh_ids_are_unique() {
        let a = NodeMeta::default();
        let b = NodeMeta::default();
        let c = a.copied(Some(b.id()));
        assert_ne!(a.id(), b.id());
        assert_ne!(a.id(), c.id());
        assert_eq!(c.parent(), Some(b.id()));
    }
}
