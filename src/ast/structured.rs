//! Field access for the structured (JSON) node form

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::errors::{Category, DeserializeError};
use super::node::NodeKind;

/// Reads the `type` tag of a structured node.
pub fn type_tag(value: &Value) -> Result<&str, DeserializeError> {
    let object = match value {
        Value::Object(object) if !object.is_empty() => object,
        Value::Object(_) | Value::Null => return Err(DeserializeError::EmptyNode),
        _ => return Err(DeserializeError::MissingType),
    };
    object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DeserializeError::MissingType)
}

/// Resolves the tag of `value` to a kind, failing with `expected` when the tag
/// is unknown.
pub(crate) fn node_kind(value: &Value, expected: Category) -> Result<NodeKind, DeserializeError> {
    let tag = type_tag(value)?;
    NodeKind::from_tag(tag).ok_or_else(|| DeserializeError::UnsupportedType {
        tag: tag.to_string(),
        expected,
    })
}

/// The fields of a structured node already checked to carry the right tag
pub(crate) struct Fields<'v> {
    node: NodeKind,
    object: &'v Map<String, Value>,
}

impl<'v> Fields<'v> {
    pub(crate) fn of(value: &'v Value, node: NodeKind) -> Result<Self, DeserializeError> {
        let tag = type_tag(value)?;
        if tag != node.as_str() {
            return Err(DeserializeError::UnsupportedType {
                tag: tag.to_string(),
                expected: Category::Kind(node),
            });
        }
        let object = value.as_object().ok_or(DeserializeError::EmptyNode)?;
        Ok(Self { node, object })
    }

    /// Absent and `null` fields both read as missing.
    pub(crate) fn optional(&self, field: &'static str) -> Option<&'v Value> {
        self.object.get(field).filter(|value| !value.is_null())
    }

    pub(crate) fn required(&self, field: &'static str) -> Result<&'v Value, DeserializeError> {
        self.optional(field).ok_or(DeserializeError::MissingField {
            node: self.node,
            field,
        })
    }

    pub(crate) fn string(&self, field: &'static str) -> Result<String, DeserializeError> {
        self.required(field)?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.invalid(field, "expected a string"))
    }

    pub(crate) fn array(&self, field: &'static str) -> Result<&'v [Value], DeserializeError> {
        self.required(field)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.invalid(field, "expected an array"))
    }

    /// Deserializes a leaf field (operator, datatype) through serde.
    pub(crate) fn parse<T: DeserializeOwned>(&self, field: &'static str) -> Result<T, DeserializeError> {
        let value = self.required(field)?;
        serde_json::from_value(value.clone()).map_err(|err| self.invalid(field, err.to_string()))
    }

    pub(crate) fn invalid(&self, field: &'static str, reason: impl Into<String>) -> DeserializeError {
        DeserializeError::InvalidField {
            node: self.node,
            field,
            reason: reason.into(),
        }
    }
}
