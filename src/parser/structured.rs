//! Re-entry from the structured (JSON) form
//!
//! A tree written with [`AstNode::to_structured`] can be read back here. The
//! `type` tag decides the category: statements are tried first, then targets,
//! then the remaining expressions. Parents are assigned before returning.

use serde_json::Value;
use tracing::debug;

use crate::ast::{AnyNode, AstNode, DeserializeError};

/// Rebuilds a node (and its subtree) from its structured form.
pub fn parse_structured(value: &Value) -> Result<AnyNode, DeserializeError> {
    let mut node = AnyNode::from_structured(value)?;
    node.assign_parents();
    debug!(
        kind = %node.kind(),
        nodes = node.as_node().descendants().len(),
        "rebuilt tree from structured form"
    );
    Ok(node)
}

/// Like [`parse_structured`], reading the value from JSON text first.
pub fn parse_json(text: &str) -> Result<AnyNode, DeserializeError> {
    let value: Value = serde_json::from_str(text)?;
    parse_structured(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Category, Expression, Statement};
    use serde_json::json;

    #[test]
    fn test_statement_tag() {
        let value = json!({
            "type": "Return",
            "value": { "type": "LiteralInt", "value": 4 }
        });
        let node = parse_structured(&value).unwrap();
        let Some(Statement::Return(ret)) = node.as_statement() else {
            panic!("Expected return statement, got {:?}", node);
        };
        assert_eq!(ret.value().unwrap().parent(), Some(ret.id()));
    }

    #[test]
    fn test_expression_tag() {
        let node = parse_json(r#"{ "type": "LiteralBool", "value": true }"#).unwrap();
        assert_eq!(node.category(), Category::Expression);
        assert!(matches!(node.as_expression(), Some(Expression::Bool(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_json("{ \"type\": "),
            Err(DeserializeError::Json(_))
        ));
    }
}
