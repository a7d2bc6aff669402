//! Lexer (tokenizer) for program source
//!
//! Produces [`Token`]s lazily from a [`PushBackStream`]. Reserved words,
//! punctuation and operators share one [`Reserved`] table; operators are
//! matched greedily, so `+++` is the FHE addition operator and never `++ +`.
//! [`TokenCursor`] wraps either a lexer or a pre-built token sequence and is
//! what the parser reads from.

use std::fmt;

use tracing::trace;

use super::stream::{PushBackStream, SourceStream};
use crate::ast::SourceLocation;

/// Keywords, punctuation and operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reserved {
    // Keywords
    For,
    If,
    Else,
    Return,
    Public,
    Secret,
    Bool,
    Char,
    Int,
    Float,
    Double,
    String,
    Void,
    Rotate,

    // Punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Assign,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Amp,
    Pipe,
    Caret,
    AndAnd,
    OrOr,
    EqEq,
    NotEq,
    Lt,
    Gt,
    Le,
    Ge,
    Bang,
    Tilde,
    PlusPlus,
    MinusMinus,
    FheAdd, // +++
    FheSub, // ---
    FheMul, // ***

    // Recognised only so the parser can reject them
    ShiftLeft,
    ShiftRight,
    Concat,     // ..
    IntegerDiv, // \
}

const KEYWORDS: [(&str, Reserved); 14] = [
    ("for", Reserved::For),
    ("if", Reserved::If),
    ("else", Reserved::Else),
    ("return", Reserved::Return),
    ("public", Reserved::Public),
    ("secret", Reserved::Secret),
    ("bool", Reserved::Bool),
    ("char", Reserved::Char),
    ("int", Reserved::Int),
    ("float", Reserved::Float),
    ("double", Reserved::Double),
    ("string", Reserved::String),
    ("void", Reserved::Void),
    ("rotate", Reserved::Rotate),
];

const PUNCTUATION: [(&str, Reserved); 36] = [
    ("(", Reserved::LParen),
    (")", Reserved::RParen),
    ("{", Reserved::LBrace),
    ("}", Reserved::RBrace),
    ("[", Reserved::LBracket),
    ("]", Reserved::RBracket),
    (";", Reserved::Semicolon),
    (",", Reserved::Comma),
    ("=", Reserved::Assign),
    ("+", Reserved::Plus),
    ("-", Reserved::Minus),
    ("*", Reserved::Star),
    ("/", Reserved::Slash),
    ("%", Reserved::Percent),
    ("&", Reserved::Amp),
    ("|", Reserved::Pipe),
    ("^", Reserved::Caret),
    ("&&", Reserved::AndAnd),
    ("||", Reserved::OrOr),
    ("==", Reserved::EqEq),
    ("!=", Reserved::NotEq),
    ("<", Reserved::Lt),
    (">", Reserved::Gt),
    ("<=", Reserved::Le),
    (">=", Reserved::Ge),
    ("!", Reserved::Bang),
    ("~", Reserved::Tilde),
    ("++", Reserved::PlusPlus),
    ("--", Reserved::MinusMinus),
    ("+++", Reserved::FheAdd),
    ("---", Reserved::FheSub),
    ("***", Reserved::FheMul),
    ("<<", Reserved::ShiftLeft),
    (">>", Reserved::ShiftRight),
    ("..", Reserved::Concat),
    ("\\", Reserved::IntegerDiv),
];

impl Reserved {
    pub fn as_str(self) -> &'static str {
        KEYWORDS
            .iter()
            .chain(PUNCTUATION.iter())
            .find(|(_, reserved)| *reserved == self)
            .map(|(text, _)| *text)
            .unwrap_or("?")
    }

    pub fn keyword(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| *keyword == text)
            .map(|(_, reserved)| *reserved)
    }

    /// Whether this word can begin a datatype
    pub fn starts_datatype(self) -> bool {
        matches!(
            self,
            Reserved::Secret
                | Reserved::Bool
                | Reserved::Char
                | Reserved::Int
                | Reserved::Float
                | Reserved::Double
                | Reserved::String
                | Reserved::Void
        )
    }
}

fn punctuation(text: &str) -> Option<Reserved> {
    PUNCTUATION
        .iter()
        .find(|(symbol, _)| *symbol == text)
        .map(|(_, reserved)| *reserved)
}

fn is_punctuation_prefix(text: &str) -> bool {
    PUNCTUATION.iter().any(|(symbol, _)| symbol.starts_with(text))
}

/// What a token is, without its position
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Reserved(Reserved),
    Bool(bool),
    Char(char),
    Int(i32),
    Float(f32),
    Double(f64),
    Str(String),
    Identifier(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is(&self, reserved: Reserved) -> bool {
        self.kind == TokenKind::Reserved(reserved)
    }

    pub fn as_reserved(&self) -> Option<Reserved> {
        match self.kind {
            TokenKind::Reserved(reserved) => Some(reserved),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Bool(_)
                | TokenKind::Char(_)
                | TokenKind::Int(_)
                | TokenKind::Float(_)
                | TokenKind::Double(_)
                | TokenKind::Str(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TokenKind::Reserved(reserved) => write!(f, "'{}'", reserved.as_str()),
            TokenKind::Bool(b) => write!(f, "bool literal {}", b),
            TokenKind::Char(c) => write!(f, "char literal {:?}", c),
            TokenKind::Int(n) => write!(f, "int literal {}", n),
            TokenKind::Float(x) => write!(f, "float literal {}f", x),
            TokenKind::Double(x) => write!(f, "double literal {}", x),
            TokenKind::Str(s) => write!(f, "string literal {:?}", s),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("lexical error at {location}: {message}")]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

impl LexError {
    fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
        }
    }
}

/// Lazy tokenizer over a character stream
pub struct Lexer<I: Iterator<Item = char>> {
    stream: PushBackStream<I>,
}

impl Lexer<std::vec::IntoIter<char>> {
    pub fn new(source: &str) -> Self {
        Self::from_stream(SourceStream::from_source(source))
    }
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn from_stream(stream: PushBackStream<I>) -> Self {
        Self { stream }
    }

    /// Tokenize the entire input; the last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Next token; `Eof` once the input is exhausted, every time it is asked.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        let Some((ch, loc)) = self.skip_whitespace_and_comments()? else {
            let end = self.stream.location();
            return Ok(Token::new(
                TokenKind::Eof,
                SourceLocation::new(end.line, end.column + 1),
            ));
        };

        let kind = match ch {
            '"' => TokenKind::Str(self.string_literal(loc)?),
            '\'' => TokenKind::Char(self.char_literal(loc)?),
            '0'..='9' => self.number_literal(ch, loc)?,
            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),
            _ => TokenKind::Reserved(self.operator(ch, loc)?),
        };

        trace!(?kind, line = loc.line, column = loc.column, "token");
        Ok(Token::new(kind, loc))
    }

    /// Skips whitespace and comments, returning the first significant
    /// character and where it was read. The location is taken before any
    /// lookahead moves the stream on.
    fn skip_whitespace_and_comments(&mut self) -> Result<Option<(char, SourceLocation)>, LexError> {
        while let Some(ch) = self.stream.next() {
            let loc = self.stream.location();
            match ch {
                c if c.is_whitespace() => {}
                '/' => match self.stream.peek() {
                    Some('/') => self.skip_line_comment(),
                    Some('*') => self.skip_block_comment()?,
                    _ => return Ok(Some((ch, loc))),
                },
                _ => return Ok(Some((ch, loc))),
            }
        }
        Ok(None)
    }

    fn skip_line_comment(&mut self) {
        for ch in self.stream.by_ref() {
            if ch == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), LexError> {
        let start_loc = self.stream.location();
        self.stream.next(); // skip '*'

        let mut previous = None;
        for ch in self.stream.by_ref() {
            if previous == Some('*') && ch == '/' {
                return Ok(());
            }
            previous = Some(ch);
        }

        Err(LexError::new("unterminated block comment", start_loc))
    }

    /// Longest match against the punctuation table
    fn operator(&mut self, first: char, loc: SourceLocation) -> Result<Reserved, LexError> {
        let mut text = String::from(first);
        while let Some(ch) = self.stream.next() {
            text.push(ch);
            if !is_punctuation_prefix(&text) {
                text.pop();
                self.stream.push_back(ch);
                break;
            }
        }

        while !text.is_empty() {
            if let Some(reserved) = punctuation(&text) {
                return Ok(reserved);
            }
            if text.chars().count() == 1 {
                break;
            }
            if let Some(ch) = text.pop() {
                self.stream.push_back(ch);
            }
        }

        Err(LexError::new(
            format!("unexpected character '{}'", first),
            loc,
        ))
    }

    fn escape(&mut self, literal: &str) -> Result<char, LexError> {
        let escaped = self.stream.next().ok_or_else(|| {
            LexError::new(
                format!("unexpected end of input in {} literal", literal),
                self.stream.location(),
            )
        })?;

        let unescaped = match escaped {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            '0' => '\0',
            _ => {
                return Err(LexError::new(
                    format!("unknown escape sequence: \\{}", escaped),
                    self.stream.location(),
                ))
            }
        };
        Ok(unescaped)
    }

    fn string_literal(&mut self, loc: SourceLocation) -> Result<String, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.stream.next() {
            match ch {
                '"' => return Ok(string),
                '\\' => string.push(self.escape("string")?),
                _ => string.push(ch),
            }
        }

        Err(LexError::new("unterminated string literal", loc))
    }

    fn char_literal(&mut self, loc: SourceLocation) -> Result<char, LexError> {
        let value = match self.stream.next() {
            Some('\\') => self.escape("char")?,
            Some('\'') => return Err(LexError::new("empty character literal", loc)),
            Some(ch) => ch,
            None => return Err(LexError::new("unterminated character literal", loc)),
        };

        if self.stream.next() != Some('\'') {
            return Err(LexError::new(
                "expected closing quote in character literal",
                self.stream.location(),
            ));
        }

        Ok(value)
    }

    /// `123` is an int, `1.5` a double, `1.5f` and `2f` floats.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut digits = String::from(first_digit);
        self.take_digits(&mut digits);

        let mut fractional = false;
        if self.stream.peek() == Some('.') {
            self.stream.next();
            match self.stream.peek() {
                Some(ch) if ch.is_ascii_digit() => {
                    fractional = true;
                    digits.push('.');
                    self.take_digits(&mut digits);
                }
                _ => {
                    return Err(LexError::new(
                        format!("malformed number literal: {}.", digits),
                        loc,
                    ))
                }
            }
        }

        let float = self.stream.peek() == Some('f');
        if float {
            self.stream.next();
        }

        if let Some(ch) = self.stream.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                return Err(LexError::new(
                    format!("invalid character '{}' in number literal", ch),
                    loc,
                ));
            }
        }

        let malformed = || LexError::new(format!("invalid number literal: {}", digits), loc);
        // Float parsing saturates to infinity instead of failing
        let kind = if float {
            let value: f32 = digits.parse().map_err(|_| malformed())?;
            if !value.is_finite() {
                return Err(malformed());
            }
            TokenKind::Float(value)
        } else if fractional {
            let value: f64 = digits.parse().map_err(|_| malformed())?;
            if !value.is_finite() {
                return Err(malformed());
            }
            TokenKind::Double(value)
        } else {
            TokenKind::Int(digits.parse().map_err(|_| malformed())?)
        };
        Ok(kind)
    }

    fn take_digits(&mut self, digits: &mut String) {
        while let Some(ch) = self.stream.next() {
            if ch.is_ascii_digit() {
                digits.push(ch);
            } else {
                self.stream.push_back(ch);
                break;
            }
        }
    }

    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::from(first_char);

        while let Some(ch) = self.stream.next() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
            } else {
                self.stream.push_back(ch);
                break;
            }
        }

        match ident.as_str() {
            "true" => TokenKind::Bool(true),
            "false" => TokenKind::Bool(false),
            _ => match Reserved::keyword(&ident) {
                Some(reserved) => TokenKind::Reserved(reserved),
                None => TokenKind::Identifier(ident),
            },
        }
    }
}

impl<I: Iterator<Item = char>> fmt::Debug for Lexer<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("location", &self.stream.location())
            .finish_non_exhaustive()
    }
}

enum TokenSource {
    Lexer(Box<Lexer<std::vec::IntoIter<char>>>),
    Buffered {
        tokens: std::vec::IntoIter<Token>,
        end: SourceLocation,
    },
}

/// Read position over a token sequence: one current token plus the rest.
pub struct TokenCursor {
    source: TokenSource,
    current: Token,
}

impl TokenCursor {
    /// Tokenizes `source` lazily.
    pub fn from_source(source: &str) -> Result<Self, LexError> {
        let mut lexer = Box::new(Lexer::new(source));
        let current = lexer.next_token()?;
        Ok(Self {
            source: TokenSource::Lexer(lexer),
            current,
        })
    }

    /// Re-enters the parser over tokens produced elsewhere. A missing trailing
    /// `Eof` is supplied after the last token.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let end = tokens
            .last()
            .map(|token| token.location)
            .unwrap_or_default();
        let mut tokens = tokens.into_iter();
        let current = tokens
            .next()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, end));
        Self {
            source: TokenSource::Buffered { tokens, end },
            current,
        }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Moves to the next token and returns the one just consumed.
    pub fn advance(&mut self) -> Result<Token, LexError> {
        if self.current.is_eof() {
            return Ok(self.current.clone());
        }
        let next = match &mut self.source {
            TokenSource::Lexer(lexer) => lexer.next_token()?,
            TokenSource::Buffered { tokens, end } => tokens
                .next()
                .unwrap_or_else(|| Token::new(TokenKind::Eof, *end)),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub fn has_more(&self) -> bool {
        !self.current.is_eof()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    fn reserved(r: Reserved) -> TokenKind {
        TokenKind::Reserved(r)
    }

    #[test]
    fn test_simple_tokens() {
        let tokens = kinds("secret int x = 42;");
        assert_eq!(
            tokens,
            vec![
                reserved(Reserved::Secret),
                reserved(Reserved::Int),
                TokenKind::Identifier("x".into()),
                reserved(Reserved::Assign),
                TokenKind::Int(42),
                reserved(Reserved::Semicolon),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_greedy_operators() {
        let tokens = kinds("a+++b *** c --- d ++ -- <= == ! ~ && ||");
        assert_eq!(tokens[1], reserved(Reserved::FheAdd));
        assert_eq!(tokens[3], reserved(Reserved::FheMul));
        assert_eq!(tokens[5], reserved(Reserved::FheSub));
        assert_eq!(tokens[7], reserved(Reserved::PlusPlus));
        assert_eq!(tokens[8], reserved(Reserved::MinusMinus));
        assert_eq!(tokens[9], reserved(Reserved::Le));
        assert_eq!(tokens[10], reserved(Reserved::EqEq));
        assert_eq!(tokens[11], reserved(Reserved::Bang));
        assert_eq!(tokens[12], reserved(Reserved::Tilde));
        assert_eq!(tokens[13], reserved(Reserved::AndAnd));
        assert_eq!(tokens[14], reserved(Reserved::OrOr));
    }

    #[test]
    fn test_unsupported_operators_are_tokens() {
        let tokens = kinds("a << b >> c .. d \\ e");
        assert_eq!(tokens[1], reserved(Reserved::ShiftLeft));
        assert_eq!(tokens[3], reserved(Reserved::ShiftRight));
        assert_eq!(tokens[5], reserved(Reserved::Concat));
        assert_eq!(tokens[7], reserved(Reserved::IntegerDiv));
    }

    #[test]
    fn test_literals() {
        let tokens = kinds(r#"true false 'c' '\n' "hi\t" 7 2.5 1.5f 3f"#);
        assert_eq!(
            tokens,
            vec![
                TokenKind::Bool(true),
                TokenKind::Bool(false),
                TokenKind::Char('c'),
                TokenKind::Char('\n'),
                TokenKind::Str("hi\t".into()),
                TokenKind::Int(7),
                TokenKind::Double(2.5),
                TokenKind::Float(1.5),
                TokenKind::Float(3.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = kinds("for if else return public rotate fortune");
        assert_eq!(tokens[0], reserved(Reserved::For));
        assert_eq!(tokens[4], reserved(Reserved::Public));
        assert_eq!(tokens[5], reserved(Reserved::Rotate));
        assert_eq!(tokens[6], TokenKind::Identifier("fortune".into()));
    }

    #[test]
    fn test_comments() {
        let tokens = kinds("x // line\n/* block\n comment */ y / z");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::Identifier("y".into()),
                reserved(Reserved::Slash),
                TokenKind::Identifier("z".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("int x;\n  x = 10;").tokenize().unwrap();
        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(1, 6));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[5].location, SourceLocation::new(2, 7));
    }

    #[test]
    fn test_slash_location() {
        let tokens = Lexer::new("a / b\n  c /* x */ / d").tokenize().unwrap();
        assert_eq!(tokens[1].kind, reserved(Reserved::Slash));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 3));
        assert_eq!(tokens[4].kind, reserved(Reserved::Slash));
        assert_eq!(tokens[4].location, SourceLocation::new(2, 13));
    }

    #[test]
    fn test_out_of_range_floats() {
        let float = format!("float f = {}.0f;", "9".repeat(40));
        let err = Lexer::new(&float).tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 11));

        let double = format!("double d = 1{}.0;", "0".repeat(400));
        let err = Lexer::new(&double).tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 12));

        let large = format!("{}.0", "9".repeat(300));
        match kinds(&large)[0] {
            TokenKind::Double(value) => assert!(value.is_finite()),
            ref other => panic!("Expected double, got {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        assert!(Lexer::new("int $x;").tokenize().is_err());
        assert!(Lexer::new("\"open").tokenize().is_err());
        assert!(Lexer::new("1.").tokenize().is_err());
        assert!(Lexer::new("99999999999").tokenize().is_err());
        assert!(Lexer::new("/* never closed").tokenize().is_err());
        assert!(Lexer::new("a . b").tokenize().is_err());

        let err = Lexer::new("x = @;").tokenize().unwrap_err();
        assert_eq!(err.location, SourceLocation::new(1, 5));
    }

    #[test]
    fn test_cursor_from_tokens_appends_eof() {
        let loc = SourceLocation::new(1, 1);
        let mut cursor = TokenCursor::from_tokens(vec![Token::new(
            TokenKind::Identifier("x".into()),
            loc,
        )]);
        assert!(cursor.has_more());
        let consumed = cursor.advance().unwrap();
        assert_eq!(consumed.kind, TokenKind::Identifier("x".into()));
        assert!(!cursor.has_more());
        assert!(cursor.advance().unwrap().is_eof());
    }
}
