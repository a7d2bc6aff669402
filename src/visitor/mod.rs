//! Double-dispatch traversal over the AST
//!
//! [`NodeRef::accept`] hands a node to [`Visitor::visit_node`], which by
//! default dispatches to the `visit_*` method for the node's concrete type.
//! Every `visit_*` method defaults to visiting the node's children in syntax
//! order, so a specialised visitor overrides only the node types it cares
//! about:
//!
//! ```
//! use hefront::ast::{AstNode, Variable};
//! use hefront::visitor::Visitor;
//!
//! #[derive(Default)]
//! struct CountVariables(usize);
//!
//! impl Visitor for CountVariables {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_variable(&mut self, _node: &Variable) -> Result<(), Self::Error> {
//!         self.0 += 1;
//!         Ok(())
//!     }
//! }
//!
//! let root = hefront::parser::parse("int x = y + z;").unwrap();
//! let mut counter = CountVariables::default();
//! root.accept(&mut counter).unwrap();
//! assert_eq!(counter.0, 3);
//! ```

pub mod printer;
pub mod resolver;
pub mod scope;

use crate::ast::{
    Assignment, AstNode, BinaryExpression, Block, Call, ExpressionList, For, Function,
    FunctionParameter, If, IndexAccess, LiteralBool, LiteralChar, LiteralDouble, LiteralFloat,
    LiteralInt, LiteralString, NodeRef, OperatorExpression, Return, TernaryOperator,
    UnaryExpression, Variable, VariableDeclaration,
};

pub use printer::{render_tree, TreePrinter};
pub use resolver::{resolve_scopes, ScopeError, ScopeResolution, ScopeResolver};
pub use scope::{Declaration, DeclarationKind, Scope, ScopeId, ScopeTree};

/// A pass over the AST
pub trait Visitor {
    type Error;

    /// Entry point for every node; dispatches on the concrete type.
    fn visit_node(&mut self, node: NodeRef<'_>) -> Result<(), Self::Error> {
        dispatch(self, node)
    }

    // Expressions

    fn visit_binary_expression(&mut self, node: &BinaryExpression) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_unary_expression(&mut self, node: &UnaryExpression) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_ternary_operator(&mut self, node: &TernaryOperator) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_operator_expression(&mut self, node: &OperatorExpression) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_call(&mut self, node: &Call) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_expression_list(&mut self, node: &ExpressionList) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_bool(&mut self, node: &LiteralBool) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_char(&mut self, node: &LiteralChar) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_int(&mut self, node: &LiteralInt) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_float(&mut self, node: &LiteralFloat) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_double(&mut self, node: &LiteralDouble) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_literal_string(&mut self, node: &LiteralString) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    // Targets

    fn visit_variable(&mut self, node: &Variable) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_index_access(&mut self, node: &IndexAccess) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_function_parameter(&mut self, node: &FunctionParameter) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    // Statements

    fn visit_block(&mut self, node: &Block) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_if(&mut self, node: &If) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_for(&mut self, node: &For) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_function(&mut self, node: &Function) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_return(&mut self, node: &Return) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }

    fn visit_assignment(&mut self, node: &Assignment) -> Result<(), Self::Error> {
        walk_children(self, node.as_node())
    }
}

/// Calls the `visit_*` method matching the concrete type of `node`.
pub fn dispatch<V: Visitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) -> Result<(), V::Error> {
    match node {
        NodeRef::BinaryExpression(node) => visitor.visit_binary_expression(node),
        NodeRef::UnaryExpression(node) => visitor.visit_unary_expression(node),
        NodeRef::TernaryOperator(node) => visitor.visit_ternary_operator(node),
        NodeRef::OperatorExpression(node) => visitor.visit_operator_expression(node),
        NodeRef::Call(node) => visitor.visit_call(node),
        NodeRef::ExpressionList(node) => visitor.visit_expression_list(node),
        NodeRef::LiteralBool(node) => visitor.visit_literal_bool(node),
        NodeRef::LiteralChar(node) => visitor.visit_literal_char(node),
        NodeRef::LiteralInt(node) => visitor.visit_literal_int(node),
        NodeRef::LiteralFloat(node) => visitor.visit_literal_float(node),
        NodeRef::LiteralDouble(node) => visitor.visit_literal_double(node),
        NodeRef::LiteralString(node) => visitor.visit_literal_string(node),
        NodeRef::Variable(node) => visitor.visit_variable(node),
        NodeRef::IndexAccess(node) => visitor.visit_index_access(node),
        NodeRef::FunctionParameter(node) => visitor.visit_function_parameter(node),
        NodeRef::Block(node) => visitor.visit_block(node),
        NodeRef::If(node) => visitor.visit_if(node),
        NodeRef::For(node) => visitor.visit_for(node),
        NodeRef::Function(node) => visitor.visit_function(node),
        NodeRef::Return(node) => visitor.visit_return(node),
        NodeRef::VariableDeclaration(node) => visitor.visit_variable_declaration(node),
        NodeRef::Assignment(node) => visitor.visit_assignment(node),
    }
}

/// Visits the direct children of `node` in order, stopping at the first error.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) -> Result<(), V::Error> {
    for child in node.children() {
        child.accept(visitor)?;
    }
    Ok(())
}
