//! Abstract syntax tree
//!
//! Concrete node types live in [`expressions`], [`targets`] and
//! [`statements`]. The capability enums [`Expression`], [`Target`] and
//! [`Statement`] say where a node may appear; [`AnyNode`] holds a node of
//! unknown category (for example one rebuilt from its structured form).

pub mod datatype;
pub mod errors;
pub mod expressions;
pub mod node;
pub mod operator;
pub mod statements;
pub mod structured;
pub mod targets;

use serde_json::Value;

pub use datatype::{Datatype, PrimitiveType};
pub use errors::{AstError, Category, DeserializeError};
pub use expressions::{
    BinaryExpression, Call, ExpressionList, Literal, LiteralBool, LiteralChar, LiteralDouble,
    LiteralFloat, LiteralInt, LiteralString, LiteralValue, OperatorExpression, TernaryOperator,
    UnaryExpression,
};
pub use node::{AstNode, Children, NodeId, NodeKind, NodeMeta, NodeRef, SourceLocation};
pub use operator::{ArithmeticOp, LogicalOp, Operator, UnaryOp};
pub use statements::{Assignment, Block, For, Function, If, Return, VariableDeclaration};
pub use targets::{FunctionParameter, IndexAccess, Variable};

use node::{clone_via_deep_clone, delegate_ast_node};
use structured::node_kind;

clone_via_deep_clone!(
    BinaryExpression,
    UnaryExpression,
    TernaryOperator,
    OperatorExpression,
    Call,
    ExpressionList,
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
);

/// Anything that can be written to
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Variable(Variable),
    IndexAccess(IndexAccess),
    Parameter(FunctionParameter),
}

delegate_ast_node!(Target {
    Variable,
    IndexAccess,
    Parameter
});

impl Target {
    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let target = match node_kind(value, Category::Target)? {
            NodeKind::Variable => Target::Variable(Variable::from_structured(value)?),
            NodeKind::IndexAccess => Target::IndexAccess(IndexAccess::from_structured(value)?),
            NodeKind::FunctionParameter => {
                Target::Parameter(FunctionParameter::from_structured(value)?)
            }
            kind => {
                return Err(DeserializeError::UnsupportedType {
                    tag: kind.as_str().to_string(),
                    expected: Category::Target,
                })
            }
        };
        Ok(target)
    }
}

/// Any node that produces a value
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(BinaryExpression),
    Unary(UnaryExpression),
    Ternary(TernaryOperator),
    Operator(OperatorExpression),
    Call(Call),
    List(ExpressionList),
    Bool(LiteralBool),
    Char(LiteralChar),
    Int(LiteralInt),
    Float(LiteralFloat),
    Double(LiteralDouble),
    String(LiteralString),
    Target(Target),
}

delegate_ast_node!(Expression {
    Binary,
    Unary,
    Ternary,
    Operator,
    Call,
    List,
    Bool,
    Char,
    Int,
    Float,
    Double,
    String,
    Target,
});

impl Expression {
    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let expression = match node_kind(value, Category::Expression)? {
            NodeKind::BinaryExpression => {
                Expression::Binary(BinaryExpression::from_structured(value)?)
            }
            NodeKind::UnaryExpression => Expression::Unary(UnaryExpression::from_structured(value)?),
            NodeKind::TernaryOperator => {
                Expression::Ternary(TernaryOperator::from_structured(value)?)
            }
            NodeKind::OperatorExpression => {
                Expression::Operator(OperatorExpression::from_structured(value)?)
            }
            NodeKind::Call => Expression::Call(Call::from_structured(value)?),
            NodeKind::ExpressionList => Expression::List(ExpressionList::from_structured(value)?),
            NodeKind::LiteralBool => Expression::Bool(LiteralBool::from_structured(value)?),
            NodeKind::LiteralChar => Expression::Char(LiteralChar::from_structured(value)?),
            NodeKind::LiteralInt => Expression::Int(LiteralInt::from_structured(value)?),
            NodeKind::LiteralFloat => Expression::Float(LiteralFloat::from_structured(value)?),
            NodeKind::LiteralDouble => Expression::Double(LiteralDouble::from_structured(value)?),
            NodeKind::LiteralString => Expression::String(LiteralString::from_structured(value)?),
            kind if kind.is_target() => Expression::Target(Target::from_structured(value)?),
            kind => {
                return Err(DeserializeError::UnsupportedType {
                    tag: kind.as_str().to_string(),
                    expected: Category::Expression,
                })
            }
        };
        Ok(expression)
    }

    pub fn as_target(&self) -> Option<&Target> {
        match self {
            Expression::Target(target) => Some(target),
            _ => None,
        }
    }

    pub fn into_target(self) -> Result<Target, Expression> {
        match self {
            Expression::Target(target) => Ok(target),
            other => Err(other),
        }
    }
}

/// Anything that can appear in a block
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Block(Block),
    If(If),
    For(For),
    Function(Function),
    Return(Return),
    VariableDeclaration(VariableDeclaration),
    Assignment(Assignment),
}

delegate_ast_node!(Statement {
    Block,
    If,
    For,
    Function,
    Return,
    VariableDeclaration,
    Assignment,
});

impl Statement {
    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let statement = match node_kind(value, Category::Statement)? {
            NodeKind::Block => Statement::Block(Block::from_structured(value)?),
            NodeKind::If => Statement::If(If::from_structured(value)?),
            NodeKind::For => Statement::For(For::from_structured(value)?),
            NodeKind::Function => Statement::Function(Function::from_structured(value)?),
            NodeKind::Return => Statement::Return(Return::from_structured(value)?),
            NodeKind::VariableDeclaration => {
                Statement::VariableDeclaration(VariableDeclaration::from_structured(value)?)
            }
            NodeKind::Assignment => Statement::Assignment(Assignment::from_structured(value)?),
            kind => {
                return Err(DeserializeError::UnsupportedType {
                    tag: kind.as_str().to_string(),
                    expected: Category::Statement,
                })
            }
        };
        Ok(statement)
    }
}

/// A node of any category
#[derive(Debug, Clone, PartialEq)]
pub enum AnyNode {
    Statement(Statement),
    Expression(Expression),
}

delegate_ast_node!(AnyNode {
    Statement,
    Expression
});

impl AnyNode {
    /// Rebuilds a node of whatever category its tag names. Statements are
    /// tried first, then targets, then the remaining expressions.
    pub fn from_structured(value: &Value) -> Result<Self, DeserializeError> {
        let kind = node_kind(value, Category::Node)?;
        let node = if kind.is_statement() {
            AnyNode::Statement(Statement::from_structured(value)?)
        } else if kind.is_target() {
            AnyNode::Expression(Expression::Target(Target::from_structured(value)?))
        } else {
            AnyNode::Expression(Expression::from_structured(value)?)
        };
        Ok(node)
    }

    pub fn category(&self) -> Category {
        self.kind().category()
    }

    pub fn as_statement(&self) -> Option<&Statement> {
        match self {
            AnyNode::Statement(statement) => Some(statement),
            AnyNode::Expression(_) => None,
        }
    }

    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            AnyNode::Expression(expression) => Some(expression),
            AnyNode::Statement(_) => None,
        }
    }
}

macro_rules! impl_from {
    ($enum:ident :: $variant:ident ($node:ty)) => {
        impl From<$node> for $enum {
            fn from(node: $node) -> Self {
                $enum::$variant(node)
            }
        }
    };
}

impl_from!(Target::Variable(Variable));
impl_from!(Target::IndexAccess(IndexAccess));
impl_from!(Target::Parameter(FunctionParameter));

impl_from!(Expression::Binary(BinaryExpression));
impl_from!(Expression::Unary(UnaryExpression));
impl_from!(Expression::Ternary(TernaryOperator));
impl_from!(Expression::Operator(OperatorExpression));
impl_from!(Expression::Call(Call));
impl_from!(Expression::List(ExpressionList));
impl_from!(Expression::Target(Target));

impl_from!(Statement::Block(Block));
impl_from!(Statement::If(If));
impl_from!(Statement::For(For));
impl_from!(Statement::Function(Function));
impl_from!(Statement::Return(Return));
impl_from!(Statement::VariableDeclaration(VariableDeclaration));
impl_from!(Statement::Assignment(Assignment));

impl_from!(AnyNode::Statement(Statement));
impl_from!(AnyNode::Expression(Expression));

impl From<Variable> for Expression {
    fn from(variable: Variable) -> Self {
        Expression::Target(variable.into())
    }
}

impl From<IndexAccess> for Expression {
    fn from(access: IndexAccess) -> Self {
        Expression::Target(access.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_statement_rejects_expression_tags() {
        let value = json!({ "type": "LiteralInt", "value": 1 });
        let err = Statement::from_structured(&value).unwrap_err();
        assert!(matches!(
            err,
            DeserializeError::UnsupportedType { expected: Category::Statement, .. }
        ));
    }

    #[test]
    fn test_unknown_and_missing_tags() {
        assert!(matches!(
            AnyNode::from_structured(&json!({ "type": "While" })),
            Err(DeserializeError::UnsupportedType { .. })
        ));
        assert!(matches!(
            AnyNode::from_structured(&json!({ "value": 1 })),
            Err(DeserializeError::MissingType)
        ));
        assert!(matches!(
            AnyNode::from_structured(&json!({})),
            Err(DeserializeError::EmptyNode)
        ));
    }

    #[test]
    fn test_targets_are_expressions() {
        let value = json!({ "type": "Variable", "identifier": "x" });
        let node = AnyNode::from_structured(&value).unwrap();
        assert_eq!(node.category(), Category::Target);
        assert!(node.as_expression().and_then(Expression::as_target).is_some());
    }
}
