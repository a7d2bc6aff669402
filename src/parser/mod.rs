//! Source code parser
//!
//! This module transforms program text into an AST (see [`crate::ast`]):
//! - [`stream`]: character source with pushback
//! - [`lexer`]: tokenization (characters → tokens)
//! - [`parse`]: parser entry points, errors and helpers
//! - `statements` / `expressions`: the grammar, as `impl Parser` blocks
//! - [`structured`]: rebuilding trees from their structured (JSON) form
//!
//! # Supported language
//!
//! - Types: `bool`, `char`, `int`, `float`, `double`, `string`, `void`, each
//!   optionally `secret`; unsized arrays `int xs[]`
//! - Statements: declarations, assignments, `i++`/`i--`, `if`/`else`, `for`,
//!   `return`, `public` functions, nested blocks
//! - Expressions: arithmetic, FHE arithmetic (`+++`, `---`, `***`), logical,
//!   bitwise and relational operators, indexing, brace lists, `rotate(v, n)`
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent for statements, shunting-yard for
//! expressions. No external parser generator dependencies.

use std::path::{Path, PathBuf};

pub(crate) mod expressions;
pub mod lexer;
pub mod parse;
pub(crate) mod statements;
pub mod stream;
pub mod structured;

pub use lexer::{LexError, Lexer, Reserved, Token, TokenCursor, TokenKind};
pub use parse::{
    parse, parse_tokens, parse_with_nodes, ExpressionErrorKind, ParseError, ParsedProgram, Parser,
};
pub use stream::{PushBackStream, SourceStream};
pub use structured::{parse_json, parse_structured};

/// Failure to read a program file
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reads a program file into memory.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, SourceError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => SourceError::NotFound {
            path: path.to_path_buf(),
        },
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
