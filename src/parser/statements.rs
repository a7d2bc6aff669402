//! Statement parsing implementation
//!
//! This module handles parsing of all statement types:
//!
//! - Variable declarations: `secret int x = 42;`, `int xs[];`
//! - Assignments: `x = y + 1;`, `xs[i] = 0;`, `i++;`
//! - Control flow: `if`, `for`, `return`
//! - Function definitions: `public int f(int a) { ... }`
//! - Compound statements: `{ ... }`
//!
//! # Grammar
//!
//! ```text
//! statement   ::= for_stmt | if_stmt | block | function
//!               | return_stmt ";" | var_decl ";" | assignment ";"
//! for_stmt    ::= "for" "(" [statement {"," statement}] ";" expr ";"
//!                 [statement {"," statement}] ")" body
//! if_stmt     ::= "if" "(" expr ")" body ["else" body]
//! body        ::= block | statement
//! function    ::= "public" datatype ident "(" [param {"," param}] ")" block
//! var_decl    ::= datatype ident ["[" "]"] ["=" expr]
//! assignment  ::= target ("=" expr | "++" | "--")
//! datatype    ::= ["secret"] primitive
//! ```
//!
//! Statements inside a `for` header are parsed without their `;`.

use crate::ast::{
    Assignment, AstNode, BinaryExpression, Block, Datatype, Expression, For, Function, FunctionParameter,
    If, LiteralInt, Operator, PrimitiveType, Return, Statement, VariableDeclaration,
};
use crate::parser::lexer::Reserved;
use crate::parser::parse::{ParseError, Parser};

/// Whether a statement consumes its trailing `;`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminator {
    Consume,
    Leave,
}

impl Parser {
    /// Parse a statement
    pub(crate) fn parse_statement(&mut self, terminator: Terminator) -> Result<Statement, ParseError> {
        let statement = match self.peek().as_reserved() {
            Some(Reserved::For) => self.parse_for_statement()?.into(),
            Some(Reserved::If) => self.parse_if_statement()?.into(),
            Some(Reserved::LBrace) => self.parse_block_statement()?.into(),
            Some(Reserved::Public) => self.parse_function()?.into(),
            Some(Reserved::Return) => {
                let statement = self.parse_return_statement()?;
                self.end_statement(terminator, "after return")?;
                statement.into()
            }
            Some(reserved) if reserved.starts_datatype() => {
                let statement = self.parse_variable_declaration()?;
                self.end_statement(terminator, "after declaration")?;
                statement.into()
            }
            _ => {
                let statement = self.parse_assignment()?;
                self.end_statement(terminator, "after assignment")?;
                statement.into()
            }
        };
        Ok(statement)
    }

    fn end_statement(&mut self, terminator: Terminator, ctx: &str) -> Result<(), ParseError> {
        if terminator == Terminator::Consume {
            self.expect_token(Reserved::Semicolon, ctx)?;
        }
        Ok(())
    }

    /// Parse `{ statement* }`
    pub(crate) fn parse_block_statement(&mut self) -> Result<Block, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::LBrace, "to open block")?;

        let mut statements = Vec::new();
        while !self.check(Reserved::RBrace) {
            if !self.tokens.has_more() {
                return Err(self.syntax_error("expected '}' to close block"));
            }
            statements.push(self.parse_statement(Terminator::Consume)?);
        }
        self.advance()?;

        Ok(self.register(Block::new(statements).at(loc)))
    }

    /// A braced block, or a single statement wrapped in a block
    pub(crate) fn parse_block_or_single_statement(&mut self) -> Result<Block, ParseError> {
        if self.check(Reserved::LBrace) {
            return self.parse_block_statement();
        }

        let loc = self.current_location();
        let statement = self.parse_statement(Terminator::Consume)?;
        Ok(self.register(Block::new(vec![statement]).at(loc)))
    }

    fn parse_if_statement(&mut self) -> Result<If, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::If, "")?;
        self.expect_token(Reserved::LParen, "after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(Reserved::RParen, "after if condition")?;

        let then_branch = self.parse_block_or_single_statement()?;
        let else_branch = if self.match_token(Reserved::Else)? {
            Some(self.parse_block_or_single_statement()?)
        } else {
            None
        };

        Ok(self.register(If::new(Some(condition), Some(then_branch), else_branch).at(loc)))
    }

    /// Comma separated statements without terminators, as found in a `for`
    /// header
    fn parse_clause(&mut self, end: Reserved) -> Result<Block, ParseError> {
        let loc = self.current_location();
        let mut statements = Vec::new();

        if !self.check(end) {
            loop {
                statements.push(self.parse_statement(Terminator::Leave)?);
                if !self.match_token(Reserved::Comma)? {
                    break;
                }
            }
        }

        Ok(self.register(Block::new(statements).at(loc)))
    }

    fn parse_for_statement(&mut self) -> Result<For, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::For, "")?;
        self.expect_token(Reserved::LParen, "after 'for'")?;

        let initializer = self.parse_clause(Reserved::Semicolon)?;
        self.expect_token(Reserved::Semicolon, "after for initializer")?;

        let condition = self.parse_expression()?;
        self.expect_token(Reserved::Semicolon, "after for condition")?;

        let update = self.parse_clause(Reserved::RParen)?;
        self.expect_token(Reserved::RParen, "after for update")?;

        let body = self.parse_block_or_single_statement()?;

        Ok(self.register(
            For::new(Some(initializer), Some(condition), Some(update), Some(body)).at(loc),
        ))
    }

    fn parse_return_statement(&mut self) -> Result<Return, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::Return, "")?;

        let value = if self.check(Reserved::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };

        Ok(self.register(Return::new(value).at(loc)))
    }

    fn parse_function(&mut self) -> Result<Function, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::Public, "")?;
        let return_type = self.parse_datatype()?;
        let (name, _) = self.expect_identifier("for function name")?;

        self.expect_token(Reserved::LParen, "after function name")?;
        let mut parameters = Vec::new();
        if !self.check(Reserved::RParen) {
            loop {
                parameters.push(self.parse_function_parameter()?);
                if !self.match_token(Reserved::Comma)? {
                    break;
                }
            }
        }
        self.expect_token(Reserved::RParen, "after parameters")?;

        let body = self.parse_block_statement()?;

        Ok(self.register(Function::new(return_type, name, parameters, Some(body)).at(loc)))
    }

    fn parse_function_parameter(&mut self) -> Result<FunctionParameter, ParseError> {
        let loc = self.current_location();
        let datatype = self.parse_datatype()?;
        let (name, _) = self.expect_identifier("for parameter name")?;
        Ok(self.register(FunctionParameter::new(datatype, name).at(loc)))
    }

    /// `["secret"] primitive`
    pub(crate) fn parse_datatype(&mut self) -> Result<Datatype, ParseError> {
        let secret = self.match_token(Reserved::Secret)?;

        let primitive = match self.peek().as_reserved() {
            Some(Reserved::Bool) => PrimitiveType::Bool,
            Some(Reserved::Char) => PrimitiveType::Char,
            Some(Reserved::Int) => PrimitiveType::Int,
            Some(Reserved::Float) => PrimitiveType::Float,
            Some(Reserved::Double) => PrimitiveType::Double,
            Some(Reserved::String) => PrimitiveType::String,
            Some(Reserved::Void) => PrimitiveType::Void,
            _ => return Err(self.syntax_error("expected a datatype")),
        };
        self.advance()?;

        Ok(Datatype::new(primitive, secret))
    }

    fn parse_variable_declaration(&mut self) -> Result<VariableDeclaration, ParseError> {
        let loc = self.current_location();
        let datatype = self.parse_datatype()?;
        let target = self.parse_variable()?;

        if self.check(Reserved::LBracket) {
            let bracket = self.current_location();
            self.advance()?;
            if !self.match_token(Reserved::RBracket)? {
                return Err(ParseError::Unsupported {
                    feature: "fixed-size array declarations (e.g. int i[3])".to_string(),
                    hint: Some("declare the array without a size, e.g. int i[]".to_string()),
                    location: bracket,
                });
            }
        }

        let value = if self.match_token(Reserved::Assign)? {
            Some(self.parse_expression()?)
        } else {
            None
        };

        Ok(self.register(VariableDeclaration::new(datatype, Some(target), value).at(loc)))
    }

    /// `target = value`; `target++` and `target--` stand for
    /// `target = target + 1` and `target = target - 1`.
    fn parse_assignment(&mut self) -> Result<Assignment, ParseError> {
        let loc = self.current_location();
        let target = self.parse_target()?;

        let step = match self.peek().as_reserved() {
            Some(Reserved::PlusPlus) => Some(Operator::ADD),
            Some(Reserved::MinusMinus) => Some(Operator::SUB),
            _ => None,
        };

        let value = match step {
            Some(operator) => {
                let op_loc = self.current_location();
                self.advance()?;
                let operand: Expression = self.register_tree(target.deep_clone(None)).into();
                let one = self.register(LiteralInt::new(1).at(op_loc));
                self.register(BinaryExpression::new(operand, operator, one.into()).at(op_loc))
                    .into()
            }
            None => {
                self.expect_token(Reserved::Assign, "in assignment")?;
                self.parse_expression()?
            }
        };

        Ok(self.register(Assignment::new(Some(target), Some(value)).at(loc)))
    }
}
