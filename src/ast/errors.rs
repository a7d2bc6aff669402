//! Structural and deserialization errors raised by the node model

use std::fmt;

use super::node::NodeKind;

/// Node categories used when a structured value must produce a specific kind
/// of node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Statement,
    Expression,
    Target,
    /// Any node at all
    Node,
    /// Exactly one concrete kind
    Kind(NodeKind),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Statement => "statement",
            Category::Expression => "expression",
            Category::Target => "target",
            Category::Node => "node",
            Category::Kind(kind) => kind.as_str(),
        };
        f.write_str(name)
    }
}

/// Misuse of the tree API (asking for children that are not there)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("{node} has no {child}")]
    MissingChild { node: NodeKind, child: &'static str },

    #[error("{node} has {count} children, index {index} is out of range")]
    ChildOutOfRange {
        node: NodeKind,
        index: usize,
        count: usize,
    },
}

/// Failure to rebuild a node from its structured form
#[derive(Debug, thiserror::Error)]
pub enum DeserializeError {
    #[error("structured node is empty")]
    EmptyNode,

    #[error("structured node has no \"type\" tag")]
    MissingType,

    #[error("type \"{tag}\" is not a valid {expected}")]
    UnsupportedType { tag: String, expected: Category },

    #[error("{node} is missing field \"{field}\"")]
    MissingField { node: NodeKind, field: &'static str },

    #[error("{node} has an invalid \"{field}\": {reason}")]
    InvalidField {
        node: NodeKind,
        field: &'static str,
        reason: String,
    },

    #[error("malformed structured input: {0}")]
    Json(#[from] serde_json::Error),
}
