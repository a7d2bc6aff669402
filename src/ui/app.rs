//! Main TUI application state and logic

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

use super::outline::{build_outline, OutlineRow};
use super::panes;
use crate::ast::{AnyNode, AstNode, NodeRef};
use crate::visitor::{Declaration, ScopeResolution};

/// Rows moved by PageUp/PageDown
const PAGE: usize = 10;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Source,
    Scopes,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> source -> scopes)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Scopes,
            FocusedPane::Scopes => FocusedPane::Tree,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Scopes,
            FocusedPane::Source => FocusedPane::Tree,
            FocusedPane::Scopes => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The explored tree
    pub root: AnyNode,

    /// The program text, empty when the tree was loaded from JSON
    pub source_code: String,

    pub resolution: ScopeResolution,

    /// One row per node, in preorder
    pub rows: Vec<OutlineRow>,

    /// Index of the selected row
    pub selected: usize,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub source_scroll: usize,
    pub scopes_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app over a resolved tree and the text it came from
    pub fn new(root: AnyNode, resolution: ScopeResolution, source_code: String) -> Self {
        let rows = build_outline(root.as_node(), &resolution);
        App {
            root,
            source_code,
            resolution,
            rows,
            selected: 0,
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            source_scroll: 0,
            scopes_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    pub fn selected_row(&self) -> Option<&OutlineRow> {
        self.rows.get(self.selected)
    }

    pub fn selected_node(&self) -> Option<NodeRef<'_>> {
        let row = self.selected_row()?;
        self.root.as_node().find(row.id)
    }

    /// The declaration the selected node refers to, when it is a variable use
    pub fn selected_declaration(&self) -> Option<&Declaration> {
        match self.selected_node()? {
            NodeRef::Variable(variable) => self
                .resolution
                .declaration_of(variable)
                .map(|(_, declaration)| declaration),
            _ => None,
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: AST | right column: Source (top), Scopes (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        panes::render_tree_pane(
            frame,
            columns[0],
            &self.rows,
            self.selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let row = self.rows.get(self.selected);
        panes::render_source_pane(
            frame,
            right_rows[0],
            &self.source_code,
            row.map_or(0, |row| row.line),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_scopes_pane(
            frame,
            right_rows[1],
            self.resolution.scopes.as_ref(),
            row.and_then(|row| row.scope),
            self.selected_declaration(),
            self.focused_pane == FocusedPane::Scopes,
            self.scopes_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            row,
            self.rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected.saturating_sub(1)),
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_sub(1);
                }
                FocusedPane::Scopes => {
                    self.scopes_scroll = self.scopes_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Tree => self.select(self.selected + 1),
                FocusedPane::Source => {
                    self.source_scroll = self.source_scroll.saturating_add(1);
                }
                FocusedPane::Scopes => {
                    self.scopes_scroll = self.scopes_scroll.saturating_add(1);
                }
            },
            KeyCode::PageUp => self.select(self.selected.saturating_sub(PAGE)),
            KeyCode::PageDown => self.select(self.selected + PAGE),
            KeyCode::Home => self.select(0),
            KeyCode::End => self.select(usize::MAX),
            _ => {}
        }
    }

    /// Selects row `index`, clamped to the outline
    fn select(&mut self, index: usize) {
        self.selected = index.min(self.rows.len().saturating_sub(1));
        self.scopes_scroll = 0;
        self.status_message = match self.selected_row() {
            Some(row) => match self.selected_declaration() {
                Some(declaration) => format!(
                    "{} → declared at {}",
                    row.label, declaration.location
                ),
                None => row.label.clone(),
            },
            None => String::from("Empty tree"),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, Statement};
    use crate::parser::parse;
    use crate::visitor::resolve_scopes;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn app(source: &str) -> App {
        let root = parse(source).unwrap();
        let resolution = resolve_scopes(root.as_node()).unwrap();
        App::new(
            AnyNode::Statement(Statement::Block(root)),
            resolution,
            source.to_string(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut app = app("int x = 1;");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::End);
        assert_eq!(app.selected, app.rows.len() - 1);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, app.rows.len() - 1);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.selected_row().map(|row| row.kind), Some(NodeKind::Block));
    }

    #[test]
    fn test_variable_selection_resolves_declaration() {
        let mut app = app("int x = 1;\nx = x + 1;");
        let use_row = app
            .rows
            .iter()
            .rposition(|row| row.kind == NodeKind::Variable)
            .unwrap();
        app.select(use_row);

        let declaration = app.selected_declaration().unwrap();
        assert_eq!(declaration.location.line, 1);
        assert!(app.status_message.contains("declared at line 1"));
    }

    #[test]
    fn test_focus_and_quit() {
        let mut app = app("x = 1;");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Source);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_smoke() {
        let mut app = app("public int f(secret int a) {\n  return a +++ 1;\n}");
        press(&mut app, KeyCode::End);
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
    }
}
