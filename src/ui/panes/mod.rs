//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with syntax highlighting and the selected node's line
//! - [`tree`]: AST outline with the selected node
//! - [`scopes`]: Scope chain of the selected node and the names visible in it
//! - [`status`]: Status bar with keybindings and the selected node's position
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and the data it shows. Panes hold no state of their own; scroll offsets
//! live in [`crate::ui::App`].

pub mod scopes;
pub mod source;
pub mod status;
pub mod tree;

pub use scopes::render_scopes_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;

use ratatui::style::{Modifier, Style};

use crate::ui::theme::DEFAULT_THEME;

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// First row to show so that `selected` stays inside a window of `height`
/// rows, moving `offset` as little as possible.
pub(crate) fn follow_selection(offset: usize, selected: usize, height: usize) -> usize {
    let height = height.max(1);
    if selected < offset {
        selected
    } else if selected >= offset + height {
        selected + 1 - height
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_selection() {
        assert_eq!(follow_selection(0, 3, 10), 0);
        assert_eq!(follow_selection(0, 12, 10), 3);
        assert_eq!(follow_selection(5, 2, 10), 2);
        assert_eq!(follow_selection(0, 0, 0), 0);
    }
}
