//! Expression nodes other than targets

use std::fmt;

use serde_json::{json, Value};

use super::errors::{AstError, DeserializeError};
use super::node::{
    adopt, adopt_all, clone_all, clone_optional, require, AstNode, Children, NodeId, NodeKind,
    NodeMeta, NodeRef,
};
use super::operator::Operator;
use super::structured::Fields;
use super::Expression;

fn structured_all(nodes: &[Expression]) -> Vec<Value> {
    nodes.iter().map(AstNode::to_structured).collect()
}

fn expressions_from(values: &[Value]) -> Result<Vec<Expression>, DeserializeError> {
    values.iter().map(Expression::from_structured).collect()
}

/// `left operator right`
#[derive(Debug)]
pub struct BinaryExpression {
    meta: NodeMeta,
    left: Box<Expression>,
    operator: Operator,
    right: Box<Expression>,
}

impl BinaryExpression {
    pub fn new(left: Expression, operator: Operator, right: Expression) -> Self {
        Self {
            meta: NodeMeta::default(),
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::BinaryExpression)?;
        Ok(Self::new(
            Expression::from_structured(fields.required("left")?)?,
            fields.parse("operator")?,
            Expression::from_structured(fields.required("right")?)?,
        ))
    }
}

impl AstNode for BinaryExpression {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::BinaryExpression
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::BinaryExpression(self)
    }

    fn children(&self) -> Children<'_> {
        vec![self.left.as_node(), self.right.as_node()].into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "left": self.left.to_structured(),
            "operator": self.operator,
            "right": self.right.to_structured(),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            left: Box::new(self.left.deep_clone(Some(id))),
            operator: self.operator,
            right: Box::new(self.right.deep_clone(Some(id))),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt(id, self.left.as_mut());
        adopt(id, self.right.as_mut());
    }

    fn label(&self) -> String {
        format!("BinaryExpression ({})", self.operator)
    }
}

impl PartialEq for BinaryExpression {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.left == other.left && self.right == other.right
    }
}

/// Prefix operator applied to one operand
#[derive(Debug)]
pub struct UnaryExpression {
    meta: NodeMeta,
    operand: Box<Expression>,
    operator: Operator,
}

impl UnaryExpression {
    pub fn new(operand: Expression, operator: Operator) -> Self {
        Self {
            meta: NodeMeta::default(),
            operand: Box::new(operand),
            operator,
        }
    }

    pub fn operand(&self) -> &Expression {
        &self.operand
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::UnaryExpression)?;
        Ok(Self::new(
            Expression::from_structured(fields.required("operand")?)?,
            fields.parse("operator")?,
        ))
    }
}

impl AstNode for UnaryExpression {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::UnaryExpression
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::UnaryExpression(self)
    }

    fn children(&self) -> Children<'_> {
        vec![self.operand.as_node()].into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "operand": self.operand.to_structured(),
            "operator": self.operator,
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            operand: Box::new(self.operand.deep_clone(Some(meta.id()))),
            operator: self.operator,
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt(self.meta.id(), self.operand.as_mut());
    }

    fn label(&self) -> String {
        format!("UnaryExpression ({})", self.operator)
    }
}

impl PartialEq for UnaryExpression {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.operand == other.operand
    }
}

/// `condition ? true_expression : false_expression`; every part may be absent
/// while a tree is under construction.
#[derive(Debug)]
pub struct TernaryOperator {
    meta: NodeMeta,
    condition: Option<Box<Expression>>,
    true_expression: Option<Box<Expression>>,
    false_expression: Option<Box<Expression>>,
}

impl TernaryOperator {
    pub fn new(
        condition: Option<Expression>,
        true_expression: Option<Expression>,
        false_expression: Option<Expression>,
    ) -> Self {
        Self {
            meta: NodeMeta::default(),
            condition: condition.map(Box::new),
            true_expression: true_expression.map(Box::new),
            false_expression: false_expression.map(Box::new),
        }
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn has_true_expression(&self) -> bool {
        self.true_expression.is_some()
    }

    pub fn has_false_expression(&self) -> bool {
        self.false_expression.is_some()
    }

    pub fn condition(&self) -> Result<&Expression, AstError> {
        require(&self.condition, self.kind(), "condition")
    }

    pub fn true_expression(&self) -> Result<&Expression, AstError> {
        require(&self.true_expression, self.kind(), "true expression")
    }

    pub fn false_expression(&self) -> Result<&Expression, AstError> {
        require(&self.false_expression, self.kind(), "false expression")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::TernaryOperator)?;
        let part = |name: &'static str| {
            fields
                .optional(name)
                .map(Expression::from_structured)
                .transpose()
        };
        Ok(Self::new(
            part("condition")?,
            part("trueExpression")?,
            part("falseExpression")?,
        ))
    }
}

impl AstNode for TernaryOperator {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::TernaryOperator
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::TernaryOperator(self)
    }

    fn children(&self) -> Children<'_> {
        [&self.condition, &self.true_expression, &self.false_expression]
            .into_iter()
            .flatten()
            .map(|part| part.as_node())
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({ "type": self.kind().as_str() });
        let parts = [
            ("condition", &self.condition),
            ("trueExpression", &self.true_expression),
            ("falseExpression", &self.false_expression),
        ];
        for (name, part) in parts {
            if let Some(part) = part {
                value[name] = part.to_structured();
            }
        }
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            condition: clone_optional(&self.condition, id),
            true_expression: clone_optional(&self.true_expression, id),
            false_expression: clone_optional(&self.false_expression, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.condition.as_deref_mut());
        adopt_all(id, self.true_expression.as_deref_mut());
        adopt_all(id, self.false_expression.as_deref_mut());
    }

    fn label(&self) -> String {
        "TernaryOperator".to_string()
    }
}

impl PartialEq for TernaryOperator {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition
            && self.true_expression == other.true_expression
            && self.false_expression == other.false_expression
    }
}

/// One operator applied to any number of operands
#[derive(Debug)]
pub struct OperatorExpression {
    meta: NodeMeta,
    operator: Operator,
    operands: Vec<Expression>,
}

impl OperatorExpression {
    pub fn new(operator: Operator, operands: Vec<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            operator,
            operands,
        }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[Expression] {
        &self.operands
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::OperatorExpression)?;
        Ok(Self::new(
            fields.parse("operator")?,
            expressions_from(fields.array("operands")?)?,
        ))
    }
}

impl AstNode for OperatorExpression {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::OperatorExpression
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::OperatorExpression(self)
    }

    fn children(&self) -> Children<'_> {
        self.operands
            .iter()
            .map(AstNode::as_node)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "operator": self.operator,
            "operands": structured_all(&self.operands),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            operator: self.operator,
            operands: clone_all(&self.operands, meta.id()),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt_all(self.meta.id(), self.operands.iter_mut());
    }

    fn label(&self) -> String {
        format!("OperatorExpression ({})", self.operator)
    }
}

impl PartialEq for OperatorExpression {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.operands == other.operands
    }
}

/// Named call, e.g. `rotate(v, 2)`
#[derive(Debug)]
pub struct Call {
    meta: NodeMeta,
    identifier: String,
    arguments: Vec<Expression>,
}

impl Call {
    pub fn new(identifier: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            identifier: identifier.into(),
            arguments,
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn arguments(&self) -> &[Expression] {
        &self.arguments
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Call)?;
        Ok(Self::new(
            fields.string("identifier")?,
            expressions_from(fields.array("arguments")?)?,
        ))
    }
}

impl AstNode for Call {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Call
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Call(self)
    }

    fn children(&self) -> Children<'_> {
        self.arguments
            .iter()
            .map(AstNode::as_node)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "identifier": self.identifier,
            "arguments": structured_all(&self.arguments),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            identifier: self.identifier.clone(),
            arguments: clone_all(&self.arguments, meta.id()),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt_all(self.meta.id(), self.arguments.iter_mut());
    }

    fn label(&self) -> String {
        format!("Call ({})", self.identifier)
    }
}

impl PartialEq for Call {
    fn eq(&self, other: &Self) -> bool {
        self.identifier == other.identifier && self.arguments == other.arguments
    }
}

/// Brace-enclosed list, e.g. `{1, 2, 3}`
#[derive(Debug)]
pub struct ExpressionList {
    meta: NodeMeta,
    expressions: Vec<Expression>,
}

impl ExpressionList {
    pub fn new(expressions: Vec<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            expressions,
        }
    }

    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::ExpressionList)?;
        Ok(Self::new(expressions_from(fields.array("expressions")?)?))
    }
}

impl AstNode for ExpressionList {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::ExpressionList
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::ExpressionList(self)
    }

    fn children(&self) -> Children<'_> {
        self.expressions
            .iter()
            .map(AstNode::as_node)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": self.kind().as_str(),
            "expressions": structured_all(&self.expressions),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            expressions: clone_all(&self.expressions, meta.id()),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt_all(self.meta.id(), self.expressions.iter_mut());
    }

    fn label(&self) -> String {
        "ExpressionList".to_string()
    }
}

impl PartialEq for ExpressionList {
    fn eq(&self, other: &Self) -> bool {
        self.expressions == other.expressions
    }
}

/// Value types a [`Literal`] can hold
pub trait LiteralValue: Clone + PartialEq + fmt::Debug + Sized {
    const KIND: NodeKind;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_>;

    fn into_expression(literal: Literal<Self>) -> Expression;

    fn to_structured(&self) -> Value;

    fn from_structured(value: &Value) -> Option<Self>;

    /// How the value appears in node labels
    fn describe(&self) -> String;
}

/// Constant of a primitive type
#[derive(Debug)]
pub struct Literal<T> {
    meta: NodeMeta,
    value: T,
}

pub type LiteralBool = Literal<bool>;
pub type LiteralChar = Literal<char>;
pub type LiteralInt = Literal<i32>;
pub type LiteralFloat = Literal<f32>;
pub type LiteralDouble = Literal<f64>;
pub type LiteralString = Literal<String>;

impl<T: LiteralValue> Literal<T> {
    pub fn new(value: T) -> Self {
        Self {
            meta: NodeMeta::default(),
            value,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, T::KIND)?;
        let literal = T::from_structured(fields.required("value")?)
            .ok_or_else(|| fields.invalid("value", format!("not a valid {}", T::KIND)))?;
        Ok(Self::new(literal))
    }
}

impl<T: LiteralValue> AstNode for Literal<T> {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        T::KIND
    }

    fn as_node(&self) -> NodeRef<'_> {
        T::node_ref(self)
    }

    fn children(&self) -> Children<'_> {
        Vec::new().into_iter()
    }

    fn to_structured(&self) -> Value {
        json!({
            "type": T::KIND.as_str(),
            "value": self.value.to_structured(),
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        Self {
            meta: self.meta.copied(parent),
            value: self.value.clone(),
        }
    }

    fn assign_parents(&mut self) {}

    fn label(&self) -> String {
        format!("{} ({})", T::KIND, self.value.describe())
    }
}

impl<T: LiteralValue> Clone for Literal<T> {
    fn clone(&self) -> Self {
        self.deep_clone(self.parent())
    }
}

impl<T: LiteralValue> PartialEq for Literal<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: LiteralValue> From<Literal<T>> for Expression {
    fn from(literal: Literal<T>) -> Self {
        T::into_expression(literal)
    }
}

impl LiteralValue for bool {
    const KIND: NodeKind = NodeKind::LiteralBool;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralBool(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::Bool(literal)
    }

    fn to_structured(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_structured(value: &Value) -> Option<Self> {
        value.as_bool()
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl LiteralValue for char {
    const KIND: NodeKind = NodeKind::LiteralChar;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralChar(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::Char(literal)
    }

    fn to_structured(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_structured(value: &Value) -> Option<Self> {
        let mut chars = value.as_str()?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl LiteralValue for i32 {
    const KIND: NodeKind = NodeKind::LiteralInt;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralInt(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::Int(literal)
    }

    fn to_structured(&self) -> Value {
        json!(self)
    }

    fn from_structured(value: &Value) -> Option<Self> {
        value.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl LiteralValue for f32 {
    const KIND: NodeKind = NodeKind::LiteralFloat;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralFloat(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::Float(literal)
    }

    fn to_structured(&self) -> Value {
        json!(self)
    }

    fn from_structured(value: &Value) -> Option<Self> {
        value.as_f64().map(|v| v as f32)
    }

    fn describe(&self) -> String {
        format!("{self:?}f")
    }
}

impl LiteralValue for f64 {
    const KIND: NodeKind = NodeKind::LiteralDouble;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralDouble(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::Double(literal)
    }

    fn to_structured(&self) -> Value {
        json!(self)
    }

    fn from_structured(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}

impl LiteralValue for String {
    const KIND: NodeKind = NodeKind::LiteralString;

    fn node_ref(literal: &Literal<Self>) -> NodeRef<'_> {
        NodeRef::LiteralString(literal)
    }

    fn into_expression(literal: Literal<Self>) -> Expression {
        Expression::String(literal)
    }

    fn to_structured(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_structured(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_string)
    }

    fn describe(&self) -> String {
        format!("{self:?}")
    }
}
