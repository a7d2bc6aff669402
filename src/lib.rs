//! # Introduction
//!
//! hefront is the front end of a compiler for a small imperative language
//! with explicit primitive types and a `secret` type qualifier, used to mark
//! values meant for homomorphic evaluation. It turns source text into a fully
//! built AST, resolves lexical scopes over it, and lets you explore the result
//! in a terminal UI built with [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Source → Stream → Lexer → Parser → AST → Visitors (scopes, printing, lowering)
//! ```
//!
//! 1. [`parser`] - character stream, tokenizer, recursive descent statement
//!    parser with a shunting-yard expression parser, and re-entry from the
//!    structured (JSON) form.
//! 2. [`ast`] - the node model: typed nodes grouped into
//!    [`ast::Statement`], [`ast::Expression`] and [`ast::Target`], with deep
//!    cloning, structural equality and structured (de)serialization.
//! 3. [`visitor`] - double-dispatch traversal, the scope resolution pass and
//!    a tree printer.
//! 4. [`ui`] - ratatui-based explorer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use hefront::ast::AstNode;
//!
//! let root = hefront::parser::parse("secret int x = 1 +++ 2;").unwrap();
//! let resolution = hefront::visitor::resolve_scopes(root.as_node()).unwrap();
//! let scopes = resolution.scopes.unwrap();
//! assert!(scopes.get(scopes.root()).unwrap().contains("x"));
//! ```
//!
//! ## Language
//!
//! Types: `bool`, `char`, `int`, `float`, `double`, `string`, `void`, each
//! optionally `secret`. Control flow: `if/else`, `for`, `return`. Functions
//! are declared `public`. FHE arithmetic uses `+++`, `---` and `***`.

pub mod ast;
pub mod parser;
pub mod ui;
pub mod visitor;
