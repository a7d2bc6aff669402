// Integration tests for the structured (JSON) form

use hefront::ast::{AnyNode, AstNode, Category, DeserializeError, Expression, Statement};
use hefront::parser::{parse, parse_json, parse_structured};
use serde_json::json;

const PROGRAM: &str = r#"
    public secret int dot(secret int a[], secret int b[], int n) {
        secret int sum = 0;
        for (int i = 0; i < n; i++) {
            sum = sum +++ a[i] *** b[i];
        }
        if (n == 0) {
            return -1;
        } else {
            return sum;
        }
    }
    char c = 'x';
    double d = 2.5;
    float f = 1.5f;
    bool t = !false;
    string s = "text";
    int v[] = {1, 2, 3};
    v = rotate(v, 1);
"#;

#[test]
fn test_program_round_trip() {
    let root = parse(PROGRAM).unwrap();
    let value = root.to_structured();

    let rebuilt = parse_structured(&value).unwrap();
    assert_eq!(rebuilt, AnyNode::Statement(Statement::Block(root.clone())));
    assert_eq!(rebuilt.to_structured(), value);
}

#[test]
fn test_round_trip_through_text() {
    let root = parse(PROGRAM).unwrap();
    let text = serde_json::to_string(&root.to_structured()).unwrap();
    let rebuilt = parse_json(&text).unwrap();
    assert_eq!(rebuilt.as_statement(), Some(&Statement::Block(root)));
}

#[test]
fn test_field_shapes() {
    let root = parse("if (x) { y = 'a'; }").unwrap();
    assert_eq!(
        root.to_structured(),
        json!({
            "type": "Block",
            "statements": [{
                "type": "If",
                "condition": { "type": "Variable", "identifier": "x" },
                "thenBranch": {
                    "type": "Block",
                    "statements": [{
                        "type": "Assignment",
                        "target": { "type": "Variable", "identifier": "y" },
                        "value": { "type": "LiteralChar", "value": "a" }
                    }]
                }
            }]
        })
    );
}

#[test]
fn test_rebuilt_nodes_have_parents() {
    let value = json!({
        "type": "BinaryExpression",
        "left": { "type": "LiteralInt", "value": 1 },
        "operator": "***",
        "right": { "type": "Variable", "identifier": "k" }
    });
    let node = parse_structured(&value).unwrap();
    let Some(Expression::Binary(binary)) = node.as_expression() else {
        panic!("Expected binary expression");
    };
    assert_eq!(binary.left().parent(), Some(binary.id()));
    assert_eq!(binary.right().parent(), Some(binary.id()));
    assert_eq!(binary.operator().symbol(), "***");
}

#[test]
fn test_category_mismatch() {
    // A block must contain statements, not expressions
    let value = json!({
        "type": "Block",
        "statements": [{ "type": "LiteralInt", "value": 3 }]
    });
    let err = parse_structured(&value).unwrap_err();
    assert!(
        matches!(
            err,
            DeserializeError::UnsupportedType {
                ref tag,
                expected: Category::Statement
            } if tag == "LiteralInt"
        ),
        "{err:?}"
    );

    // An assignment target must be a target
    let value = json!({
        "type": "Assignment",
        "target": { "type": "LiteralBool", "value": true },
        "value": { "type": "LiteralInt", "value": 3 }
    });
    assert!(matches!(
        parse_structured(&value),
        Err(DeserializeError::UnsupportedType {
            expected: Category::Target,
            ..
        })
    ));
}

#[test]
fn test_malformed_nodes() {
    assert!(matches!(
        parse_structured(&json!({})),
        Err(DeserializeError::EmptyNode)
    ));
    assert!(matches!(
        parse_structured(&json!({ "value": 1 })),
        Err(DeserializeError::MissingType)
    ));
    assert!(matches!(
        parse_structured(&json!({ "type": "While" })),
        Err(DeserializeError::UnsupportedType { .. })
    ));
    assert!(matches!(
        parse_structured(&json!({ "type": "Variable" })),
        Err(DeserializeError::MissingField { field: "identifier", .. })
    ));
    assert!(matches!(
        parse_structured(&json!({
            "type": "UnaryExpression",
            "operand": { "type": "Variable", "identifier": "b" },
            "operator": "<<"
        })),
        Err(DeserializeError::InvalidField { .. })
    ));
}

#[test]
fn test_optional_children_absent_or_null() {
    let node = parse_structured(&json!({ "type": "Return", "value": null })).unwrap();
    let Some(Statement::Return(ret)) = node.as_statement() else {
        panic!("Expected return");
    };
    assert!(!ret.has_value());
    assert_eq!(ret.to_structured(), json!({ "type": "Return" }));
}
