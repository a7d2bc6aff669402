//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** - application state, keyboard event loop, pane focus
//! - **[`outline`]** - the tree flattened into selectable rows
//! - **[`panes`]** - stateless render functions for each visible pane (AST, source,
//!   scopes, status bar)
//! - **[`theme`]** - centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a resolved tree
//! and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod outline;
pub mod panes;
pub mod theme;

pub use app::App;
