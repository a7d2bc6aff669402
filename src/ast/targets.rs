//! Assignable expressions: variables, indexed accesses and parameters

use serde_json::{json, Value};

use super::datatype::Datatype;
use super::errors::DeserializeError;
use super::node::{adopt, AstNode, Children, NodeId, NodeKind, NodeMeta, NodeRef};
use super::structured::Fields;
use super::{Expression, Target};

#[derive(Debug)]
pub struct Variable {
    meta: NodeMeta,
    identifier: String,
}

impl Variable {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::default(),
            identifier: identifier.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Variable)?;
        Ok(Self::new(fields.string("identifier")?))
    }
}

impl AstNode for Variable {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Variable
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Variable(self)
    }

    fn children(&self) -> Children<'_> {
        Vec::new().into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "identifier": self.identifier,
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        Self {
            meta: self.meta.copied(parent),
            identifier: self.identifier.clone(),
        }
    }

    fn assign_parents(&mut self) {}

    fn label(&self) -> String {
        format!("Variable ({})", self.identifier)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier
    }
}

/// `target[index]`; chained accesses nest to the left, so `a[i][j]` is
/// `IndexAccess(IndexAccess(a, i), j)`.
#[derive(Debug)]
pub struct IndexAccess {
    meta: NodeMeta,
    target: Box<Target>,
    index: Box<Expression>,
}

impl IndexAccess {
    pub fn new(target: Target, index: Expression) -> Self {
        Self {
            meta: NodeMeta::default(),
            target: Box::new(target),
            index: Box::new(index),
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn index(&self) -> &Expression {
        &self.index
    }

    /// The variable at the bottom of a chain of accesses
    pub fn base(&self) -> Option<&Variable> {
        match self.target.as_ref() {
            Target::Variable(variable) => Some(variable),
            Target::IndexAccess(inner) => inner.base(),
            Target::Parameter(_) => None,
        }
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::IndexAccess)?;
        Ok(Self::new(
            Target::from_structured(fields.required("target")?)?,
            Expression::from_structured(fields.required("value")?)?,
        ))
    }
}

impl AstNode for IndexAccess {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::IndexAccess
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::IndexAccess(self)
    }

    fn children(&self) -> Children<'_> {
        vec![self.target.as_node(), self.index.as_node()].into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "target": self.target.to_structured(),
            "value": self.index.to_structured(),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            target: Box::new(self.target.deep_clone(Some(id))),
            index: Box::new(self.index.deep_clone(Some(id))),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt(id, self.target.as_mut());
        adopt(id, self.index.as_mut());
    }

    fn label(&self) -> String {
        "IndexAccess".to_string()
    }
}

impl PartialEq for IndexAccess {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.index == other.index
    }
}

/// Typed parameter of a function definition
#[derive(Debug)]
pub struct FunctionParameter {
    meta: NodeMeta,
    datatype: Datatype,
    identifier: String,
}

impl FunctionParameter {
    pub fn new(datatype: Datatype, identifier: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::default(),
            datatype,
            identifier: identifier.into(),
        }
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::FunctionParameter)?;
        Ok(Self::new(
            fields.parse("parameter_type")?,
            fields.string("identifier")?,
        ))
    }
}

impl AstNode for FunctionParameter {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::FunctionParameter
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::FunctionParameter(self)
    }

    fn children(&self) -> Children<'_> {
        Vec::new().into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "parameter_type": self.datatype,
            "identifier": self.identifier,
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        Self {
            meta: self.meta.copied(parent),
            datatype: self.datatype,
            identifier: self.identifier.clone(),
        }
    }

    fn assign_parents(&mut self) {}

    fn label(&self) -> String {
        format!("FunctionParameter ({} {})", self.datatype, self.identifier)
    }
}

impl PartialEq for FunctionParameter {
    fn eq(&self, other: &Self) -> bool {
        self.datatype == other.datatype && self.identifier == other.identifier
    }
}
