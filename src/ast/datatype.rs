//! Primitive types and the `secret` qualifier

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Base types of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    Bool,
    Char,
    Int,
    Float,
    Double,
    String,
    Void,
}

impl PrimitiveType {
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveType::Bool => "bool",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
            PrimitiveType::String => "string",
            PrimitiveType::Void => "void",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let primitive = match keyword {
            "bool" => PrimitiveType::Bool,
            "char" => PrimitiveType::Char,
            "int" => PrimitiveType::Int,
            "float" => PrimitiveType::Float,
            "double" => PrimitiveType::Double,
            "string" => PrimitiveType::String,
            "void" => PrimitiveType::Void,
            _ => return None,
        };
        Some(primitive)
    }
}

/// A primitive type, optionally qualified as `secret`.
///
/// The textual form is `"int"` or `"secret int"`; it is also the serialized
/// form. `void` is never secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Datatype {
    primitive: PrimitiveType,
    secret: bool,
}

impl Datatype {
    pub fn new(primitive: PrimitiveType, secret: bool) -> Self {
        Self {
            primitive,
            secret: secret && primitive != PrimitiveType::Void,
        }
    }

    pub fn plain(primitive: PrimitiveType) -> Self {
        Self::new(primitive, false)
    }

    pub fn secret(primitive: PrimitiveType) -> Self {
        Self::new(primitive, true)
    }

    pub fn primitive(&self) -> PrimitiveType {
        self.primitive
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.secret {
            write!(f, "secret {}", self.primitive.keyword())
        } else {
            f.write_str(self.primitive.keyword())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid datatype \"{0}\"")]
pub struct InvalidDatatype(pub String);

impl FromStr for Datatype {
    type Err = InvalidDatatype;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDatatype(text.to_string());
        let mut words = text.split_whitespace();
        let mut word = words.next().ok_or_else(invalid)?;

        let secret = word == "secret";
        if secret {
            word = words.next().ok_or_else(invalid)?;
        }
        if words.next().is_some() {
            return Err(invalid());
        }

        let primitive = PrimitiveType::from_keyword(word).ok_or_else(invalid)?;
        Ok(Datatype::new(primitive, secret))
    }
}

impl TryFrom<String> for Datatype {
    type Error = InvalidDatatype;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Datatype> for String {
    fn from(datatype: Datatype) -> Self {
        datatype.to_string()
    }
}
