//! Statement nodes

use serde_json::{json, Value};

use super::datatype::Datatype;
use super::errors::{AstError, DeserializeError};
use super::node::{
    adopt, adopt_all, clone_all, clone_optional, require, AstNode, Children, NodeId, NodeKind,
    NodeMeta, NodeRef,
};
use super::structured::Fields;
use super::targets::{FunctionParameter, Variable};
use super::{Expression, Statement, Target};

/// Boxes `child` after pointing its subtree at `parent`.
fn attach<N: AstNode>(parent: NodeId, mut child: N) -> Box<N> {
    adopt(parent, &mut child);
    Box::new(child)
}

fn optional_block(fields: &Fields<'_>, field: &'static str) -> Result<Option<Block>, DeserializeError> {
    fields.optional(field).map(Block::from_structured).transpose()
}

fn optional_expression(
    fields: &Fields<'_>,
    field: &'static str,
) -> Result<Option<Expression>, DeserializeError> {
    fields
        .optional(field)
        .map(Expression::from_structured)
        .transpose()
}

/// Writes each present part into `value` under its field name.
fn insert_present<N: AstNode>(value: &mut Value, parts: &[(&str, Option<&N>)]) {
    for (name, part) in parts {
        if let Some(part) = part {
            value[*name] = part.to_structured();
        }
    }
}

fn push_present<'a, N: AstNode>(children: &mut Vec<NodeRef<'a>>, part: Option<&'a N>) {
    if let Some(part) = part {
        children.push(part.as_node());
    }
}

/// Ordered sequence of statements; also the root of every parsed program
#[derive(Debug)]
pub struct Block {
    meta: NodeMeta,
    statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self {
            meta: NodeMeta::default(),
            statements,
        }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn push(&mut self, mut statement: Statement) {
        adopt(self.meta.id(), &mut statement);
        self.statements.push(statement);
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Block)?;
        let statements = fields
            .array("statements")?
            .iter()
            .map(Statement::from_structured)
            .collect::<Result<_, _>>()?;
        Ok(Self::new(statements))
    }
}

impl AstNode for Block {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Block
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Block(self)
    }

    fn children(&self) -> Children<'_> {
        self.statements
            .iter()
            .map(AstNode::as_node)
            .collect::<Vec<_>>()
            .into_iter()
    }

    fn to_structured(&self) -> Value {
        let statements: Vec<Value> = self.statements.iter().map(AstNode::to_structured).collect();
        json!({
            "type": self.kind().as_str(),
            "statements": statements,
        })
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            statements: clone_all(&self.statements, meta.id()),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt_all(self.meta.id(), self.statements.iter_mut());
    }

    fn label(&self) -> String {
        "Block".to_string()
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}

/// Conditional with an optional else branch
#[derive(Debug)]
pub struct If {
    meta: NodeMeta,
    condition: Option<Box<Expression>>,
    then_branch: Option<Box<Block>>,
    else_branch: Option<Box<Block>>,
}

impl If {
    pub fn new(
        condition: Option<Expression>,
        then_branch: Option<Block>,
        else_branch: Option<Block>,
    ) -> Self {
        Self {
            meta: NodeMeta::default(),
            condition: condition.map(Box::new),
            then_branch: then_branch.map(Box::new),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn has_then_branch(&self) -> bool {
        self.then_branch.is_some()
    }

    pub fn has_else_branch(&self) -> bool {
        self.else_branch.is_some()
    }

    pub fn condition(&self) -> Result<&Expression, AstError> {
        require(&self.condition, self.kind(), "condition")
    }

    pub fn then_branch(&self) -> Result<&Block, AstError> {
        require(&self.then_branch, self.kind(), "then branch")
    }

    pub fn else_branch(&self) -> Result<&Block, AstError> {
        require(&self.else_branch, self.kind(), "else branch")
    }

    pub fn set_condition(&mut self, condition: Expression) {
        self.condition = Some(attach(self.meta.id(), condition));
    }

    pub fn set_then_branch(&mut self, then_branch: Block) {
        self.then_branch = Some(attach(self.meta.id(), then_branch));
    }

    pub fn set_else_branch(&mut self, else_branch: Block) {
        self.else_branch = Some(attach(self.meta.id(), else_branch));
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::If)?;
        Ok(Self::new(
            optional_expression(&fields, "condition")?,
            optional_block(&fields, "thenBranch")?,
            optional_block(&fields, "elseBranch")?,
        ))
    }
}

impl AstNode for If {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::If
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::If(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Vec::with_capacity(3);
        push_present(&mut children, self.condition.as_deref());
        push_present(&mut children, self.then_branch.as_deref());
        push_present(&mut children, self.else_branch.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({ "type": self.kind().as_str() });
        insert_present(&mut value, &[("condition", self.condition.as_deref())]);
        insert_present(
            &mut value,
            &[
                ("thenBranch", self.then_branch.as_deref()),
                ("elseBranch", self.else_branch.as_deref()),
            ],
        );
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            condition: clone_optional(&self.condition, id),
            then_branch: clone_optional(&self.then_branch, id),
            else_branch: clone_optional(&self.else_branch, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.condition.as_deref_mut());
        adopt_all(id, self.then_branch.as_deref_mut());
        adopt_all(id, self.else_branch.as_deref_mut());
    }

    fn label(&self) -> String {
        "If".to_string()
    }
}

impl PartialEq for If {
    fn eq(&self, other: &Self) -> bool {
        self.condition == other.condition
            && self.then_branch == other.then_branch
            && self.else_branch == other.else_branch
    }
}

/// `for (initializer; condition; update) body`
///
/// The initializer and update clauses are held as blocks of statements but do
/// not open scopes of their own: declarations in the initializer belong to the
/// scope of the loop.
#[derive(Debug)]
pub struct For {
    meta: NodeMeta,
    initializer: Option<Box<Block>>,
    condition: Option<Box<Expression>>,
    update: Option<Box<Block>>,
    body: Option<Box<Block>>,
}

impl For {
    pub fn new(
        initializer: Option<Block>,
        condition: Option<Expression>,
        update: Option<Block>,
        body: Option<Block>,
    ) -> Self {
        Self {
            meta: NodeMeta::default(),
            initializer: initializer.map(Box::new),
            condition: condition.map(Box::new),
            update: update.map(Box::new),
            body: body.map(Box::new),
        }
    }

    pub fn has_initializer(&self) -> bool {
        self.initializer.is_some()
    }

    pub fn has_condition(&self) -> bool {
        self.condition.is_some()
    }

    pub fn has_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn initializer(&self) -> Result<&Block, AstError> {
        require(&self.initializer, self.kind(), "initializer")
    }

    pub fn condition(&self) -> Result<&Expression, AstError> {
        require(&self.condition, self.kind(), "condition")
    }

    pub fn update(&self) -> Result<&Block, AstError> {
        require(&self.update, self.kind(), "update")
    }

    pub fn body(&self) -> Result<&Block, AstError> {
        require(&self.body, self.kind(), "body")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::For)?;
        Ok(Self::new(
            optional_block(&fields, "initializer")?,
            optional_expression(&fields, "condition")?,
            optional_block(&fields, "update")?,
            optional_block(&fields, "body")?,
        ))
    }
}

impl AstNode for For {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::For
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::For(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Vec::with_capacity(4);
        push_present(&mut children, self.initializer.as_deref());
        push_present(&mut children, self.condition.as_deref());
        push_present(&mut children, self.update.as_deref());
        push_present(&mut children, self.body.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({ "type": self.kind().as_str() });
        insert_present(&mut value, &[("initializer", self.initializer.as_deref())]);
        insert_present(&mut value, &[("condition", self.condition.as_deref())]);
        insert_present(
            &mut value,
            &[
                ("update", self.update.as_deref()),
                ("body", self.body.as_deref()),
            ],
        );
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            initializer: clone_optional(&self.initializer, id),
            condition: clone_optional(&self.condition, id),
            update: clone_optional(&self.update, id),
            body: clone_optional(&self.body, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.initializer.as_deref_mut());
        adopt_all(id, self.condition.as_deref_mut());
        adopt_all(id, self.update.as_deref_mut());
        adopt_all(id, self.body.as_deref_mut());
    }

    fn label(&self) -> String {
        "For".to_string()
    }
}

impl PartialEq for For {
    fn eq(&self, other: &Self) -> bool {
        self.initializer == other.initializer
            && self.condition == other.condition
            && self.update == other.update
            && self.body == other.body
    }
}

/// `public <type> name(params) { ... }`
#[derive(Debug)]
pub struct Function {
    meta: NodeMeta,
    return_type: Datatype,
    identifier: String,
    parameters: Vec<FunctionParameter>,
    body: Option<Box<Block>>,
}

impl Function {
    pub fn new(
        return_type: Datatype,
        identifier: impl Into<String>,
        parameters: Vec<FunctionParameter>,
        body: Option<Block>,
    ) -> Self {
        Self {
            meta: NodeMeta::default(),
            return_type,
            identifier: identifier.into(),
            parameters,
            body: body.map(Box::new),
        }
    }

    pub fn return_type(&self) -> Datatype {
        self.return_type
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn parameters(&self) -> &[FunctionParameter] {
        &self.parameters
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    pub fn body(&self) -> Result<&Block, AstError> {
        require(&self.body, self.kind(), "body")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Function)?;
        let parameters = fields
            .array("parameters")?
            .iter()
            .map(FunctionParameter::from_structured)
            .collect::<Result<_, _>>()?;
        Ok(Self::new(
            fields.parse("return_type")?,
            fields.string("identifier")?,
            parameters,
            optional_block(&fields, "body")?,
        ))
    }
}

impl AstNode for Function {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Function
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Function(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children: Vec<_> = self.parameters.iter().map(AstNode::as_node).collect();
        push_present(&mut children, self.body.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let parameters: Vec<Value> = self.parameters.iter().map(AstNode::to_structured).collect();
        let mut value = json!({
            "type": self.kind().as_str(),
            "return_type": self.return_type,
            "identifier": self.identifier,
            "parameters": parameters,
        });
        insert_present(&mut value, &[("body", self.body.as_deref())]);
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            return_type: self.return_type,
            identifier: self.identifier.clone(),
            parameters: clone_all(&self.parameters, id),
            body: clone_optional(&self.body, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.parameters.iter_mut());
        adopt_all(id, self.body.as_deref_mut());
    }

    fn label(&self) -> String {
        format!("Function ({} {})", self.return_type, self.identifier)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.return_type == other.return_type
            && self.identifier == other.identifier
            && self.parameters == other.parameters
            && self.body == other.body
    }
}

#[derive(Debug)]
pub struct Return {
    meta: NodeMeta,
    value: Option<Box<Expression>>,
}

impl Return {
    pub fn new(value: Option<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            value: value.map(Box::new),
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn value(&self) -> Result<&Expression, AstError> {
        require(&self.value, self.kind(), "value")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Return)?;
        Ok(Self::new(optional_expression(&fields, "value")?))
    }
}

impl AstNode for Return {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Return
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Return(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Vec::with_capacity(1);
        push_present(&mut children, self.value.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({ "type": self.kind().as_str() });
        insert_present(&mut value, &[("value", self.value.as_deref())]);
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        Self {
            value: clone_optional(&self.value, meta.id()),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        adopt_all(self.meta.id(), self.value.as_deref_mut());
    }

    fn label(&self) -> String {
        "Return".to_string()
    }
}

impl PartialEq for Return {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// `<type> name [= value]`
#[derive(Debug)]
pub struct VariableDeclaration {
    meta: NodeMeta,
    datatype: Datatype,
    target: Option<Box<Variable>>,
    value: Option<Box<Expression>>,
}

impl VariableDeclaration {
    pub fn new(datatype: Datatype, target: Option<Variable>, value: Option<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            datatype,
            target: target.map(Box::new),
            value: value.map(Box::new),
        }
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn target(&self) -> Result<&Variable, AstError> {
        require(&self.target, self.kind(), "target")
    }

    pub fn value(&self) -> Result<&Expression, AstError> {
        require(&self.value, self.kind(), "value")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::VariableDeclaration)?;
        let target = fields
            .optional("target")
            .map(Variable::from_structured)
            .transpose()?;
        Ok(Self::new(
            fields.parse("datatype")?,
            target,
            optional_expression(&fields, "value")?,
        ))
    }
}

impl AstNode for VariableDeclaration {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::VariableDeclaration
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::VariableDeclaration(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Vec::with_capacity(2);
        push_present(&mut children, self.target.as_deref());
        push_present(&mut children, self.value.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({
            "type": self.kind().as_str(),
            "datatype": self.datatype,
        });
        insert_present(&mut value, &[("target", self.target.as_deref())]);
        insert_present(&mut value, &[("value", self.value.as_deref())]);
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            datatype: self.datatype,
            target: clone_optional(&self.target, id),
            value: clone_optional(&self.value, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.target.as_deref_mut());
        adopt_all(id, self.value.as_deref_mut());
    }

    fn label(&self) -> String {
        match &self.target {
            Some(target) => format!(
                "VariableDeclaration ({} {})",
                self.datatype,
                target.identifier()
            ),
            None => format!("VariableDeclaration ({})", self.datatype),
        }
    }
}

impl PartialEq for VariableDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.datatype == other.datatype && self.target == other.target && self.value == other.value
    }
}

/// `target = value`
#[derive(Debug)]
pub struct Assignment {
    meta: NodeMeta,
    target: Option<Box<Target>>,
    value: Option<Box<Expression>>,
}

impl Assignment {
    pub fn new(target: Option<Target>, value: Option<Expression>) -> Self {
        Self {
            meta: NodeMeta::default(),
            target: target.map(Box::new),
            value: value.map(Box::new),
        }
    }

    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    pub fn target(&self) -> Result<&Target, AstError> {
        require(&self.target, self.kind(), "target")
    }

    pub fn value(&self) -> Result<&Expression, AstError> {
        require(&self.value, self.kind(), "value")
    }

    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let fields = Fields::of(value, NodeKind::Assignment)?;
        let target = fields
            .optional("target")
            .map(Target::from_structured)
            .transpose()?;
        Ok(Self::new(target, optional_expression(&fields, "value")?))
    }
}

impl AstNode for Assignment {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut NodeMeta {
        &mut self.meta
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Assignment
    }

    fn as_node(&self) -> NodeRef<'_> {
        NodeRef::Assignment(self)
    }

    fn children(&self) -> Children<'_> {
        let mut children = Vec::with_capacity(2);
        push_present(&mut children, self.target.as_deref());
        push_present(&mut children, self.value.as_deref());
        children.into_iter()
    }

    fn to_structured(&self) -> Value {
        let mut value = json!({ "type": self.kind().as_str() });
        insert_present(&mut value, &[("target", self.target.as_deref())]);
        insert_present(&mut value, &[("value", self.value.as_deref())]);
        value
    }

    fn deep_clone(&self, parent: Option<NodeId>) -> Self {
        let meta = self.meta.copied(parent);
        let id = meta.id();
        Self {
            target: clone_optional(&self.target, id),
            value: clone_optional(&self.value, id),
            meta,
        }
    }

    fn assign_parents(&mut self) {
        let id = self.meta.id();
        adopt_all(id, self.target.as_deref_mut());
        adopt_all(id, self.value.as_deref_mut());
    }

    fn label(&self) -> String {
        "Assignment".to_string()
    }
}

impl PartialEq for Assignment {
    fn eq(&self, other: &Self) -> bool {
        self.target == other.target && self.value == other.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LiteralBool, LiteralInt, PrimitiveType};

    fn single(statement: Statement) -> Block {
        Block::new(vec![statement])
    }

    fn assign(name: &str, value: i32) -> Statement {
        Assignment::new(
            Some(Variable::new(name).into()),
            Some(LiteralInt::new(value).into()),
        )
        .into()
    }

    #[test]
    fn test_if_children_without_else() {
        let node = If::new(
            Some(LiteralBool::new(true).into()),
            Some(single(assign("x", 1))),
            None,
        );

        let kinds: Vec<_> = node.children().map(|child| child.kind()).collect();
        assert_eq!(kinds, vec![NodeKind::LiteralBool, NodeKind::Block]);
        assert!(matches!(
            node.else_branch(),
            Err(AstError::MissingChild { node: NodeKind::If, .. })
        ));
        assert!(node.child(2).is_err());
    }

    #[test]
    fn test_if_children_with_else_in_order() {
        let node = If::new(
            Some(LiteralBool::new(false).into()),
            Some(single(assign("x", 1))),
            Some(single(assign("x", 2))),
        );

        assert_eq!(node.count_children(), 3);
        let else_branch = node.child(2).unwrap();
        assert_eq!(else_branch.kind(), NodeKind::Block);
        assert_eq!(
            else_branch.id(),
            node.else_branch().unwrap().id()
        );
        // Iteration is restartable
        assert_eq!(node.children().count(), node.children().count());
    }

    #[test]
    fn test_setters_attach_children() {
        let mut node = If::new(None, None, None);
        assert_eq!(node.count_children(), 0);

        node.set_condition(LiteralBool::new(true).into());
        node.set_else_branch(single(assign("y", 0)));

        assert!(node.has_condition());
        assert!(!node.has_then_branch());
        assert_eq!(node.else_branch().unwrap().parent(), Some(node.id()));
        let assignment = node.else_branch().unwrap().statements()[0].as_node();
        assert_eq!(assignment.parent(), Some(node.else_branch().unwrap().id()));
    }

    #[test]
    fn test_block_push_sets_parent() {
        let mut block = Block::new(Vec::new());
        block.push(assign("z", 3));
        assert_eq!(block.len(), 1);
        assert_eq!(block.statements()[0].parent(), Some(block.id()));
    }

    #[test]
    fn test_declaration_label() {
        let declaration = VariableDeclaration::new(
            Datatype::secret(PrimitiveType::Int),
            Some(Variable::new("x")),
            None,
        );
        assert_eq!(declaration.label(), "VariableDeclaration (secret int x)");
    }
}
