// Integration tests for expression parsing: precedence, associativity and
// the special cases around `-` and `++`

use hefront::ast::{
    AstNode, BinaryExpression, Expression, LiteralInt, LogicalOp, Operator, Statement, Target,
};
use hefront::parser::{parse, ExpressionErrorKind, ParseError};

/// Value of the single assignment in `source`
fn assigned_value(source: &str) -> Expression {
    let root = parse(source).expect("Parsing failed");
    match &root.statements()[0] {
        Statement::Assignment(assignment) => assignment.value().unwrap().clone(),
        Statement::VariableDeclaration(decl) => decl.value().unwrap().clone(),
        other => panic!("Expected assignment, got {:?}", other),
    }
}

fn binary(expression: &Expression) -> &BinaryExpression {
    match expression {
        Expression::Binary(binary) => binary,
        other => panic!("Expected binary expression, got {:?}", other),
    }
}

fn name(expression: &Expression) -> &str {
    match expression {
        Expression::Target(Target::Variable(variable)) => variable.identifier(),
        other => panic!("Expected variable, got {:?}", other),
    }
}

#[test]
fn test_multiplication_binds_tighter() {
    let value = assigned_value("x = a + b * c;");
    let add = binary(&value);
    assert_eq!(add.operator(), Operator::ADD);
    assert_eq!(name(add.left()), "a");

    let mul = binary(add.right());
    assert_eq!(mul.operator(), Operator::MUL);
    assert_eq!((name(mul.left()), name(mul.right())), ("b", "c"));
}

#[test]
fn test_subtraction_is_left_associative() {
    let value = assigned_value("x = a - b - c;");
    let outer = binary(&value);
    assert_eq!(outer.operator(), Operator::SUB);
    assert_eq!(name(outer.right()), "c");

    let inner = binary(outer.left());
    assert_eq!((name(inner.left()), name(inner.right())), ("a", "b"));
}

#[test]
fn test_logical_precedence_ladder() {
    // || < && < | < ^ < & < == < <
    let value = assigned_value("x = a || b && c | d ^ e & f == g < h;");
    let or = binary(&value);
    assert_eq!(or.operator(), Operator::from(LogicalOp::LogicalOr));

    let and = binary(or.right());
    assert_eq!(and.operator(), Operator::from(LogicalOp::LogicalAnd));

    let bit_or = binary(and.right());
    assert_eq!(bit_or.operator(), Operator::from(LogicalOp::BitwiseOr));

    let xor = binary(bit_or.right());
    assert_eq!(xor.operator(), Operator::from(LogicalOp::BitwiseXor));

    let bit_and = binary(xor.right());
    assert_eq!(bit_and.operator(), Operator::from(LogicalOp::BitwiseAnd));

    let eq = binary(bit_and.right());
    assert_eq!(eq.operator(), Operator::from(LogicalOp::Equal));

    let less = binary(eq.right());
    assert_eq!(less.operator(), Operator::from(LogicalOp::Less));
}

#[test]
fn test_negative_literal() {
    let value = assigned_value("x = -3;");
    assert_eq!(value, Expression::from(LiteralInt::new(-3)));
}

#[test]
fn test_minus_after_operand_is_subtraction() {
    let value = assigned_value("x = y -3;");
    let sub = binary(&value);
    assert_eq!(sub.operator(), Operator::SUB);
    assert_eq!(*sub.right(), Expression::from(LiteralInt::new(3)));
}

#[test]
fn test_for_update_increment_desugars() {
    let root = parse("for (int i = 0; i < 10; i++) { }").unwrap();
    let Statement::For(for_loop) = &root.statements()[0] else {
        panic!("Expected for");
    };

    let Statement::Assignment(update) = &for_loop.update().unwrap().statements()[0] else {
        panic!("Expected assignment in update");
    };
    let target = update.target().unwrap();
    assert!(matches!(target, Target::Variable(v) if v.identifier() == "i"));

    let step = binary(update.value().unwrap());
    assert_eq!(step.operator(), Operator::ADD);
    assert_eq!(name(step.left()), "i");
    assert_eq!(*step.right(), Expression::from(LiteralInt::new(1)));

    // The operand is a copy of the target, not the target itself
    assert_ne!(step.left().id(), target.id());
    assert_eq!(step.left().parent(), Some(step.id()));
}

#[test]
fn test_decrement_statement() {
    let value = assigned_value("n--;");
    let step = binary(&value);
    assert_eq!(step.operator(), Operator::SUB);
    assert_eq!(name(step.left()), "n");
}

#[test]
fn test_empty_expression() {
    let err = parse("x = ;").unwrap_err();
    assert!(
        matches!(
            err,
            ParseError::Expression {
                kind: ExpressionErrorKind::Empty,
                ..
            }
        ),
        "{err:?}"
    );
}

#[test]
fn test_missing_for_condition() {
    let err = parse("for (int i = 0; ; i++) { }").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Expression {
            kind: ExpressionErrorKind::Empty,
            ..
        }
    ));
}

#[test]
fn test_unsupported_operators() {
    let err = parse("x = a << 2;").unwrap_err();
    assert!(err.to_string().contains("shift operators"), "{err}");
}
