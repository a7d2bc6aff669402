//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the public parse entry points.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `statements`: Parsing statements (blocks, if, for, functions, declarations)
//! - `expressions`: Parsing expressions with a shunting-yard operator stack
//!
//! Parser methods are split across these files using `impl Parser` blocks.
//!
//! # Node registry
//!
//! Every node the parser creates is recorded, in creation order, in a
//! registry owned by the `Parser` value. [`parse_with_nodes`] hands it back
//! together with the tree.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::ast::{AstNode, Block, NodeId, NodeRef, Operator, SourceLocation};
use crate::parser::lexer::{LexError, Reserved, Token, TokenCursor, TokenKind};
use crate::parser::statements::Terminator;

/// Why an expression could not be assembled
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionErrorKind {
    #[error("empty expression")]
    Empty,

    #[error("unresolved operands")]
    UnresolvedOperands,

    #[error("unresolved unary operator '{0}'")]
    UnresolvedUnary(Operator),

    #[error("missing operand for '{0}'")]
    MissingOperand(Operator),

    #[error("operator '{0}' is right associative but not unary")]
    NonUnaryRightAssociative(Operator),
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Lexical(#[from] LexError),

    #[error("syntax error at {location}: {message}, found {found}")]
    Syntax {
        message: String,
        found: String,
        location: SourceLocation,
    },

    #[error(
        "syntax error at {location}: {feature} not supported{}",
        .hint.as_ref().map(|hint| format!("; {hint}")).unwrap_or_default()
    )]
    Unsupported {
        feature: String,
        hint: Option<String>,
        location: SourceLocation,
    },

    #[error("expression error at {location}: {kind}")]
    Expression {
        kind: ExpressionErrorKind,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lexical(err) => err.location,
            ParseError::Syntax { location, .. }
            | ParseError::Unsupported { location, .. }
            | ParseError::Expression { location, .. } => *location,
        }
    }
}

/// A parsed program together with every node created while parsing it
#[derive(Debug)]
pub struct ParsedProgram {
    pub root: Block,
    pub created: Vec<NodeId>,
}

impl ParsedProgram {
    /// The registered nodes, in creation order
    pub fn created_nodes(&self) -> Vec<NodeRef<'_>> {
        let by_id: FxHashMap<NodeId, NodeRef<'_>> = self
            .root
            .as_node()
            .descendants()
            .into_iter()
            .map(|node| (node.id(), node))
            .collect();
        self.created
            .iter()
            .filter_map(|id| by_id.get(id).copied())
            .collect()
    }
}

/// Recursive descent parser
pub struct Parser {
    pub(crate) tokens: TokenCursor,
    created: Vec<NodeId>,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: TokenCursor::from_source(source)?,
            created: Vec::new(),
        })
    }

    /// Parser over tokens produced elsewhere
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        Self {
            tokens: TokenCursor::from_tokens(tokens),
            created: Vec::new(),
        }
    }

    /// Parse the entire program into a root block
    pub fn parse_program(mut self) -> Result<ParsedProgram, ParseError> {
        let location = self.current_location();
        let mut statements = Vec::new();

        while self.tokens.has_more() {
            statements.push(self.parse_statement(Terminator::Consume)?);
        }

        let mut root = self.register(Block::new(statements).at(location));
        root.assign_parents();
        debug!(
            statements = root.len(),
            nodes = self.created.len(),
            "parsed program"
        );

        Ok(ParsedProgram {
            root,
            created: self.created,
        })
    }

    // ===== Helper methods =====

    /// Records a freshly built node in the registry.
    pub(crate) fn register<N: AstNode>(&mut self, node: N) -> N {
        self.created.push(node.id());
        node
    }

    /// Records a node and all of its descendants.
    pub(crate) fn register_tree<N: AstNode>(&mut self, node: N) -> N {
        self.created
            .extend(node.as_node().descendants().into_iter().map(NodeRef::id));
        node
    }

    pub(crate) fn peek(&self) -> &Token {
        self.tokens.current()
    }

    pub(crate) fn check(&self, reserved: Reserved) -> bool {
        self.peek().is(reserved)
    }

    pub(crate) fn advance(&mut self) -> Result<Token, ParseError> {
        Ok(self.tokens.advance()?)
    }

    pub(crate) fn match_token(&mut self, reserved: Reserved) -> Result<bool, ParseError> {
        if self.check(reserved) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    pub(crate) fn syntax_error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            found: self.peek().to_string(),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, reserved: Reserved, ctx: &str) -> Result<Token, ParseError> {
        if self.check(reserved) {
            self.advance()
        } else {
            Err(self.syntax_error(format!("expected '{}' {}", reserved.as_str(), ctx)))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<(String, SourceLocation), ParseError> {
        if let TokenKind::Identifier(name) = &self.peek().kind {
            let name = name.clone();
            let location = self.current_location();
            self.advance()?;
            Ok((name, location))
        } else {
            Err(self.syntax_error(format!("expected identifier {}", ctx)))
        }
    }
}

/// Parses a program into its root block.
pub fn parse(source: &str) -> Result<Block, ParseError> {
    Ok(parse_with_nodes(source)?.root)
}

/// Parses a program and also returns the registry of created nodes.
pub fn parse_with_nodes(source: &str) -> Result<ParsedProgram, ParseError> {
    debug!(bytes = source.len(), "parsing program");
    Parser::new(source)?.parse_program()
}

/// Parses a program from an already tokenized form.
pub fn parse_tokens(tokens: Vec<Token>) -> Result<Block, ParseError> {
    Ok(Parser::from_tokens(tokens).parse_program()?.root)
}
