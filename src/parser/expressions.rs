//! Expression parsing implementation
//!
//! Expressions are assembled with an operator stack and an operand stack
//! (shunting-yard). Binary operators are left associative and reduce while
//! the operator on top of the stack binds at least as tightly as the incoming
//! one. Prefix operators (`!`, `~`) are reduced as soon as an operand follows
//! them.
//!
//! # Supported Expressions
//!
//! - Literals: bool, char, int, float, double, string; `-` directly before a
//!   numeric literal at the start of an expression folds into the literal
//! - Targets: `x`, `xs[i]`, `m[i][j]`
//! - Parenthesised sub-expressions and brace lists `{a, b, c}`
//! - `rotate(v, n)`
//! - Postfix `++`/`--`, which stand for `+ 1`/`- 1`
//!
//! Shifts, `..` and `\` are recognised but rejected.

use crate::ast::{
    ArithmeticOp, AstNode, BinaryExpression, Call, Expression, ExpressionList, IndexAccess,
    LiteralBool, LiteralChar, LiteralDouble, LiteralFloat, LiteralInt, LiteralString, LogicalOp,
    Operator, SourceLocation, Target, UnaryExpression, UnaryOp, Variable,
};
use crate::parser::lexer::{Reserved, Token, TokenKind};
use crate::parser::parse::{ExpressionErrorKind, ParseError, Parser};

/// Operator waiting on the stack, with the operand count at the time it was
/// pushed
#[derive(Debug, Clone, Copy)]
struct PendingOperator {
    operator: Operator,
    height: usize,
    location: SourceLocation,
}

/// How the current token takes part in an expression
enum Step {
    Binary(Operator),
    Prefix(Operator),
    Postfix(Operator),
    Unsupported(&'static str),
    Literal,
    Identifier,
    Group,
    List,
    Rotate,
    End,
}

fn classify(token: &Token) -> Step {
    if token.is_literal() {
        return Step::Literal;
    }
    let reserved = match &token.kind {
        TokenKind::Identifier(_) => return Step::Identifier,
        TokenKind::Reserved(reserved) => *reserved,
        _ => return Step::End,
    };

    match reserved {
        Reserved::Plus => Step::Binary(ArithmeticOp::Addition.into()),
        Reserved::Minus => Step::Binary(ArithmeticOp::Subtraction.into()),
        Reserved::Star => Step::Binary(ArithmeticOp::Multiplication.into()),
        Reserved::Slash => Step::Binary(ArithmeticOp::Division.into()),
        Reserved::Percent => Step::Binary(ArithmeticOp::Modulo.into()),
        Reserved::FheAdd => Step::Binary(ArithmeticOp::FheAddition.into()),
        Reserved::FheSub => Step::Binary(ArithmeticOp::FheSubtraction.into()),
        Reserved::FheMul => Step::Binary(ArithmeticOp::FheMultiplication.into()),
        Reserved::Amp => Step::Binary(LogicalOp::BitwiseAnd.into()),
        Reserved::Pipe => Step::Binary(LogicalOp::BitwiseOr.into()),
        Reserved::Caret => Step::Binary(LogicalOp::BitwiseXor.into()),
        Reserved::AndAnd => Step::Binary(LogicalOp::LogicalAnd.into()),
        Reserved::OrOr => Step::Binary(LogicalOp::LogicalOr.into()),
        Reserved::EqEq => Step::Binary(LogicalOp::Equal.into()),
        Reserved::NotEq => Step::Binary(LogicalOp::NotEqual.into()),
        Reserved::Lt => Step::Binary(LogicalOp::Less.into()),
        Reserved::Gt => Step::Binary(LogicalOp::Greater.into()),
        Reserved::Le => Step::Binary(LogicalOp::LessEqual.into()),
        Reserved::Ge => Step::Binary(LogicalOp::GreaterEqual.into()),
        Reserved::Bang => Step::Prefix(UnaryOp::LogicalNot.into()),
        Reserved::Tilde => Step::Prefix(UnaryOp::BitwiseNot.into()),
        Reserved::PlusPlus => Step::Postfix(Operator::ADD),
        Reserved::MinusMinus => Step::Postfix(Operator::SUB),
        Reserved::ShiftLeft | Reserved::ShiftRight => Step::Unsupported("shift operators"),
        Reserved::Concat => Step::Unsupported("string concatenation (..)"),
        Reserved::IntegerDiv => Step::Unsupported("integer division (\\)"),
        Reserved::LParen => Step::Group,
        Reserved::LBrace => Step::List,
        Reserved::Rotate => Step::Rotate,
        _ => Step::End,
    }
}

impl Parser {
    /// Parse an expression; stops at the first token that cannot continue it.
    pub(crate) fn parse_expression(&mut self) -> Result<Expression, ParseError> {
        let mut operands: Vec<Expression> = Vec::new();
        let mut operators: Vec<PendingOperator> = Vec::new();

        loop {
            let loc = self.current_location();
            match classify(self.peek()) {
                Step::End => break,
                Step::Binary(operator) => {
                    self.advance()?;
                    while operators
                        .last()
                        .is_some_and(|top| top.operator.binds_before(operator))
                    {
                        if let Some(pending) = operators.pop() {
                            self.reduce(&mut operands, pending)?;
                        }
                    }
                    operators.push(PendingOperator {
                        operator,
                        height: operands.len(),
                        location: loc,
                    });
                }
                Step::Prefix(operator) => {
                    self.advance()?;
                    operators.push(PendingOperator {
                        operator,
                        height: operands.len(),
                        location: loc,
                    });
                }
                Step::Postfix(operator) => {
                    self.advance()?;
                    let operand = operands.pop().ok_or(ParseError::Expression {
                        kind: ExpressionErrorKind::MissingOperand(operator),
                        location: loc,
                    })?;
                    let one = self.register(LiteralInt::new(1).at(loc));
                    let step = self.register(BinaryExpression::new(operand, operator, one.into()).at(loc));
                    operands.push(step.into());
                }
                Step::Unsupported(feature) => {
                    return Err(ParseError::Unsupported {
                        feature: feature.to_string(),
                        hint: None,
                        location: loc,
                    });
                }
                Step::Literal => {
                    let negate = operands.is_empty()
                        && operators
                            .last()
                            .is_some_and(|top| top.operator == Operator::SUB);
                    let literal = self.parse_literal(negate)?;
                    if negate {
                        operators.pop();
                    }
                    operands.push(literal);
                }
                Step::Identifier => {
                    let target = self.parse_target()?;
                    operands.push(target.into());
                }
                Step::Group => {
                    self.advance()?;
                    let inner = self.parse_expression()?;
                    self.expect_token(Reserved::RParen, "to close parenthesised expression")?;
                    operands.push(inner);
                }
                Step::List => {
                    let list = self.parse_expression_list()?;
                    operands.push(list.into());
                }
                Step::Rotate => {
                    let call = self.parse_rotate()?;
                    operands.push(call.into());
                }
            }

            self.reduce_ready_prefix(&mut operands, &mut operators)?;
        }

        while let Some(pending) = operators.pop() {
            if pending.operator.is_unary() {
                return Err(ParseError::Expression {
                    kind: ExpressionErrorKind::UnresolvedUnary(pending.operator),
                    location: pending.location,
                });
            }
            self.reduce(&mut operands, pending)?;
        }

        let location = self.current_location();
        let result = operands.pop().ok_or(ParseError::Expression {
            kind: ExpressionErrorKind::Empty,
            location,
        })?;
        if !operands.is_empty() {
            return Err(ParseError::Expression {
                kind: ExpressionErrorKind::UnresolvedOperands,
                location,
            });
        }
        Ok(result)
    }

    /// Reduces right-associative operators on top of the stack that have
    /// received their operand.
    fn reduce_ready_prefix(
        &mut self,
        operands: &mut Vec<Expression>,
        operators: &mut Vec<PendingOperator>,
    ) -> Result<(), ParseError> {
        while let Some(top) = operators.last() {
            if !top.operator.is_right_associative() || operands.len() <= top.height {
                break;
            }
            let Some(pending) = operators.pop() else {
                break;
            };
            if !pending.operator.is_unary() {
                return Err(ParseError::Expression {
                    kind: ExpressionErrorKind::NonUnaryRightAssociative(pending.operator),
                    location: pending.location,
                });
            }
            self.reduce(operands, pending)?;
        }
        Ok(())
    }

    /// Applies `pending` to the operands on top of the stack.
    fn reduce(&mut self, operands: &mut Vec<Expression>, pending: PendingOperator) -> Result<(), ParseError> {
        let missing = || ParseError::Expression {
            kind: ExpressionErrorKind::MissingOperand(pending.operator),
            location: pending.location,
        };

        let node: Expression = if pending.operator.is_unary() {
            if operands.len() <= pending.height {
                return Err(missing());
            }
            let operand = operands.pop().ok_or_else(missing)?;
            self.register(UnaryExpression::new(operand, pending.operator).at(pending.location))
                .into()
        } else {
            if operands.len() < 2 {
                return Err(missing());
            }
            let right = operands.pop().ok_or_else(missing)?;
            let left = operands.pop().ok_or_else(missing)?;
            self.register(BinaryExpression::new(left, pending.operator, right).at(pending.location))
                .into()
        };

        operands.push(node);
        Ok(())
    }

    /// Parse a literal token; `negate` folds a preceding minus sign into it.
    fn parse_literal(&mut self, negate: bool) -> Result<Expression, ParseError> {
        let loc = self.current_location();
        if negate
            && matches!(
                self.peek().kind,
                TokenKind::Bool(_) | TokenKind::Char(_) | TokenKind::Str(_)
            )
        {
            return Err(self.syntax_error("a minus sign may only precede a numeric literal"));
        }

        let token = self.advance()?;
        let literal: Expression = match token.kind {
            TokenKind::Int(value) => {
                let value = if negate { -value } else { value };
                self.register(LiteralInt::new(value).at(loc)).into()
            }
            TokenKind::Float(value) => {
                let value = if negate { -value } else { value };
                self.register(LiteralFloat::new(value).at(loc)).into()
            }
            TokenKind::Double(value) => {
                let value = if negate { -value } else { value };
                self.register(LiteralDouble::new(value).at(loc)).into()
            }
            TokenKind::Bool(value) => self.register(LiteralBool::new(value).at(loc)).into(),
            TokenKind::Char(value) => self.register(LiteralChar::new(value).at(loc)).into(),
            TokenKind::Str(value) => self.register(LiteralString::new(value).at(loc)).into(),
            _ => {
                return Err(ParseError::Syntax {
                    message: "expected a literal".to_string(),
                    found: token.to_string(),
                    location: loc,
                })
            }
        };
        Ok(literal)
    }

    pub(crate) fn parse_variable(&mut self) -> Result<Variable, ParseError> {
        let (name, loc) = self.expect_identifier("for variable")?;
        Ok(self.register(Variable::new(name).at(loc)))
    }

    /// Parse a variable followed by any number of `[index]` suffixes
    pub(crate) fn parse_target(&mut self) -> Result<Target, ParseError> {
        let mut target = Target::Variable(self.parse_variable()?);

        while self.check(Reserved::LBracket) {
            let loc = self.current_location();
            self.advance()?;
            let index = self.parse_expression()?;
            self.expect_token(Reserved::RBracket, "after index")?;
            target = self.register(IndexAccess::new(target, index).at(loc)).into();
        }

        Ok(target)
    }

    /// Parse `{ expr, expr, ... }`
    fn parse_expression_list(&mut self) -> Result<ExpressionList, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::LBrace, "to open expression list")?;

        let mut expressions = Vec::new();
        if !self.check(Reserved::RBrace) {
            loop {
                expressions.push(self.parse_expression()?);
                if !self.match_token(Reserved::Comma)? {
                    break;
                }
            }
        }
        self.expect_token(Reserved::RBrace, "to close expression list")?;

        Ok(self.register(ExpressionList::new(expressions).at(loc)))
    }

    /// Parse `rotate(value, amount)` into a call
    fn parse_rotate(&mut self) -> Result<Call, ParseError> {
        let loc = self.current_location();
        self.expect_token(Reserved::Rotate, "")?;
        self.expect_token(Reserved::LParen, "after 'rotate'")?;
        let value = self.parse_expression()?;
        self.expect_token(Reserved::Comma, "between rotate arguments")?;
        let amount = self.parse_expression()?;
        self.expect_token(Reserved::RParen, "after rotate arguments")?;

        Ok(self.register(Call::new("rotate", vec![value, amount]).at(loc)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(source: &str) -> Result<Expression, ParseError> {
        let mut parser = Parser::new(source).unwrap();
        parser.parse_expression()
    }

    fn binary(expression: &Expression) -> &BinaryExpression {
        match expression {
            Expression::Binary(binary) => binary,
            other => panic!("Expected binary expression, got {:?}", other),
        }
    }

    fn variable_name(expression: &Expression) -> &str {
        match expression {
            Expression::Target(Target::Variable(variable)) => variable.identifier(),
            other => panic!("Expected variable, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence() {
        let e = expr("a + b * c").unwrap();
        let add = binary(&e);
        assert_eq!(add.operator(), Operator::ADD);
        assert_eq!(variable_name(add.left()), "a");
        assert_eq!(binary(add.right()).operator(), Operator::MUL);
    }

    #[test]
    fn test_left_associativity() {
        let e = expr("a - b - c").unwrap();
        let outer = binary(&e);
        assert_eq!(variable_name(outer.right()), "c");
        let inner = binary(outer.left());
        assert_eq!(variable_name(inner.left()), "a");
        assert_eq!(variable_name(inner.right()), "b");
    }

    #[test]
    fn test_parentheses() {
        let e = expr("(a + b) * c").unwrap();
        let mul = binary(&e);
        assert_eq!(mul.operator(), Operator::MUL);
        assert_eq!(binary(mul.left()).operator(), Operator::ADD);
    }

    #[test]
    fn test_fhe_operators() {
        let e = expr("a +++ b *** c").unwrap();
        let add = binary(&e);
        assert_eq!(add.operator(), Operator::from(ArithmeticOp::FheAddition));
        assert_eq!(
            binary(add.right()).operator(),
            Operator::from(ArithmeticOp::FheMultiplication)
        );
    }

    #[test]
    fn test_prefix_operator_binds_to_next_operand() {
        let e = expr("a && !b").unwrap();
        let and = binary(&e);
        match and.right() {
            Expression::Unary(unary) => {
                assert_eq!(unary.operator(), Operator::from(UnaryOp::LogicalNot));
                assert_eq!(variable_name(unary.operand()), "b");
            }
            other => panic!("Expected unary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_literals() {
        assert_eq!(expr("-3").unwrap(), Expression::from(LiteralInt::new(-3)));
        assert_eq!(expr("-2.5").unwrap(), Expression::from(LiteralDouble::new(-2.5)));
        assert_eq!(expr("-1.5f").unwrap(), Expression::from(LiteralFloat::new(-1.5)));
        assert!(matches!(expr("-true"), Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_postfix_increment() {
        let e = expr("x++").unwrap();
        let add = binary(&e);
        assert_eq!(add.operator(), Operator::ADD);
        assert_eq!(variable_name(add.left()), "x");
        assert_eq!(*add.right(), Expression::from(LiteralInt::new(1)));
    }

    #[test]
    fn test_index_access_nests_left() {
        let e = expr("m[i][j]").unwrap();
        let Expression::Target(Target::IndexAccess(outer)) = e else {
            panic!("Expected index access");
        };
        assert_eq!(variable_name(outer.index()), "j");
        match outer.target() {
            Target::IndexAccess(inner) => assert_eq!(variable_name(inner.index()), "i"),
            other => panic!("Expected nested index access, got {:?}", other),
        }
        assert_eq!(outer.base().map(Variable::identifier), Some("m"));
    }

    #[test]
    fn test_lists_and_rotate() {
        match expr("{1, 2, 3}").unwrap() {
            Expression::List(list) => assert_eq!(list.expressions().len(), 3),
            other => panic!("Expected list, got {:?}", other),
        }
        match expr("{}").unwrap() {
            Expression::List(list) => assert!(list.expressions().is_empty()),
            other => panic!("Expected list, got {:?}", other),
        }
        match expr("rotate(v, 2)").unwrap() {
            Expression::Call(call) => {
                assert_eq!(call.identifier(), "rotate");
                assert_eq!(call.arguments().len(), 2);
            }
            other => panic!("Expected call, got {:?}", other),
        }
    }

    #[test]
    fn test_expression_errors() {
        let kind = |source: &str| match expr(source) {
            Err(ParseError::Expression { kind, .. }) => kind,
            other => panic!("Expected expression error for {source:?}, got {:?}", other),
        };

        assert_eq!(kind(";"), ExpressionErrorKind::Empty);
        assert_eq!(kind("a b"), ExpressionErrorKind::UnresolvedOperands);
        assert_eq!(kind("a +"), ExpressionErrorKind::MissingOperand(Operator::ADD));
        assert_eq!(
            kind("!"),
            ExpressionErrorKind::UnresolvedUnary(Operator::from(UnaryOp::LogicalNot))
        );
    }

    #[test]
    fn test_unsupported_operators() {
        for source in ["a << 1", "a >> 1", "s .. t", "a \\ b"] {
            assert!(
                matches!(expr(source), Err(ParseError::Unsupported { .. })),
                "{source}"
            );
        }
    }
}
