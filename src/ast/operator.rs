//! Operators, their symbols and their precedence

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulo,
    // Homomorphic variants
    FheAddition,
    FheSubtraction,
    FheMultiplication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOp {
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Equal,
    NotEqual,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    LogicalNot,
    BitwiseNot,
}

/// An operator as it appears in expression nodes.
///
/// Serializes as its source symbol, e.g. `"+"` or `"***"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Arithmetic(ArithmeticOp),
    Logical(LogicalOp),
    Unary(UnaryOp),
}

const SYMBOLS: [(Operator, &str); 21] = [
    (Operator::Arithmetic(ArithmeticOp::Addition), "+"),
    (Operator::Arithmetic(ArithmeticOp::Subtraction), "-"),
    (Operator::Arithmetic(ArithmeticOp::Multiplication), "*"),
    (Operator::Arithmetic(ArithmeticOp::Division), "/"),
    (Operator::Arithmetic(ArithmeticOp::Modulo), "%"),
    (Operator::Arithmetic(ArithmeticOp::FheAddition), "+++"),
    (Operator::Arithmetic(ArithmeticOp::FheSubtraction), "---"),
    (Operator::Arithmetic(ArithmeticOp::FheMultiplication), "***"),
    (Operator::Logical(LogicalOp::BitwiseAnd), "&"),
    (Operator::Logical(LogicalOp::BitwiseOr), "|"),
    (Operator::Logical(LogicalOp::BitwiseXor), "^"),
    (Operator::Logical(LogicalOp::LogicalAnd), "&&"),
    (Operator::Logical(LogicalOp::LogicalOr), "||"),
    (Operator::Logical(LogicalOp::Equal), "=="),
    (Operator::Logical(LogicalOp::NotEqual), "!="),
    (Operator::Logical(LogicalOp::Less), "<"),
    (Operator::Logical(LogicalOp::Greater), ">"),
    (Operator::Logical(LogicalOp::LessEqual), "<="),
    (Operator::Logical(LogicalOp::GreaterEqual), ">="),
    (Operator::Unary(UnaryOp::LogicalNot), "!"),
    (Operator::Unary(UnaryOp::BitwiseNot), "~"),
];

impl Operator {
    pub const ADD: Operator = Operator::Arithmetic(ArithmeticOp::Addition);
    pub const SUB: Operator = Operator::Arithmetic(ArithmeticOp::Subtraction);
    pub const MUL: Operator = Operator::Arithmetic(ArithmeticOp::Multiplication);

    pub fn symbol(self) -> &'static str {
        SYMBOLS
            .iter()
            .find(|(operator, _)| *operator == self)
            .map(|(_, symbol)| *symbol)
            .unwrap_or("?")
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        SYMBOLS
            .iter()
            .find(|(_, candidate)| *candidate == symbol)
            .map(|(operator, _)| *operator)
    }

    /// Binding strength; higher binds tighter
    pub fn precedence(self) -> u8 {
        use ArithmeticOp::*;
        use LogicalOp::*;

        match self {
            Operator::Unary(_) => 14,
            Operator::Arithmetic(Multiplication | Division | Modulo | FheMultiplication) => 12,
            Operator::Arithmetic(Addition | Subtraction | FheAddition | FheSubtraction) => 11,
            Operator::Logical(Less | Greater | LessEqual | GreaterEqual) => 9,
            Operator::Logical(Equal | NotEqual) => 8,
            Operator::Logical(BitwiseAnd) => 7,
            Operator::Logical(BitwiseXor) => 6,
            Operator::Logical(BitwiseOr) => 5,
            Operator::Logical(LogicalAnd) => 4,
            Operator::Logical(LogicalOr) => 3,
        }
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Unary(_))
    }

    /// Only the prefix operators associate to the right.
    pub fn is_right_associative(self) -> bool {
        self.is_unary()
    }

    pub fn compare_precedence(self, other: Operator) -> Ordering {
        self.precedence().cmp(&other.precedence())
    }

    /// Whether `self`, waiting on the operator stack, must be reduced before
    /// `incoming` is pushed.
    pub fn binds_before(self, incoming: Operator) -> bool {
        match self.compare_precedence(incoming) {
            Ordering::Greater => true,
            Ordering::Equal => !incoming.is_right_associative(),
            Ordering::Less => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<ArithmeticOp> for Operator {
    fn from(op: ArithmeticOp) -> Self {
        Operator::Arithmetic(op)
    }
}

impl From<LogicalOp> for Operator {
    fn from(op: LogicalOp) -> Self {
        Operator::Logical(op)
    }
}

impl From<UnaryOp> for Operator {
    fn from(op: UnaryOp) -> Self {
        Operator::Unary(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown operator \"{0}\"")]
pub struct UnknownOperator(pub String);

impl TryFrom<String> for Operator {
    type Error = UnknownOperator;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        Operator::from_symbol(&symbol).ok_or(UnknownOperator(symbol))
    }
}

impl From<Operator> for String {
    fn from(operator: Operator) -> Self {
        operator.symbol().to_string()
    }
}
