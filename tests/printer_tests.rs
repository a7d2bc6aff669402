// Snapshot tests for the indented tree rendering

use expect_test::{expect, Expect};
use hefront::ast::AstNode;
use hefront::parser::parse;
use hefront::visitor::render_tree;

fn check(source: &str, expected: Expect) {
    let root = parse(source).expect("Parsing failed");
    expected.assert_eq(&render_tree(root.as_node()));
}

#[test]
fn test_render_function() {
    check(
        "public int f(secret int a) { return a +++ 1; }",
        expect![[r#"
            Block
              Function (int f)
                FunctionParameter (secret int a)
                Block
                  Return
                    BinaryExpression (+++)
                      Variable (a)
                      LiteralInt (1)
        "#]],
    );
}

#[test]
fn test_render_for_loop() {
    check(
        "for (int i = 0; i < 3; i++) { xs[i] = 'c'; }",
        expect![[r#"
            Block
              For
                Block
                  VariableDeclaration (int i)
                    Variable (i)
                    LiteralInt (0)
                BinaryExpression (<)
                  Variable (i)
                  LiteralInt (3)
                Block
                  Assignment
                    Variable (i)
                    BinaryExpression (+)
                      Variable (i)
                      LiteralInt (1)
                Block
                  Assignment
                    IndexAccess
                      Variable (xs)
                      Variable (i)
                    LiteralChar ('c')
        "#]],
    );
}

#[test]
fn test_render_if_else_and_calls() {
    check(
        "if (!done) y = rotate(v, 2); else { y = {1, 2}; }",
        expect![[r#"
            Block
              If
                UnaryExpression (!)
                  Variable (done)
                Block
                  Assignment
                    Variable (y)
                    Call (rotate)
                      Variable (v)
                      LiteralInt (2)
                Block
                  Assignment
                    Variable (y)
                    ExpressionList
                      LiteralInt (1)
                      LiteralInt (2)
        "#]],
    );
}
