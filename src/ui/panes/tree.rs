//! AST outline pane

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{border_style, follow_selection};
use crate::ast::NodeKind;
use crate::ui::outline::OutlineRow;
use crate::ui::theme::DEFAULT_THEME;

fn kind_style(kind: NodeKind) -> Style {
    if kind.is_statement() {
        Style::default().fg(DEFAULT_THEME.statement)
    } else if kind.is_target() {
        Style::default().fg(DEFAULT_THEME.target)
    } else {
        match kind {
            NodeKind::LiteralBool
            | NodeKind::LiteralChar
            | NodeKind::LiteralInt
            | NodeKind::LiteralFloat
            | NodeKind::LiteralDouble => Style::default().fg(DEFAULT_THEME.literal),
            NodeKind::LiteralString => Style::default().fg(DEFAULT_THEME.string),
            NodeKind::Call => Style::default().fg(DEFAULT_THEME.function),
            _ => Style::default().fg(DEFAULT_THEME.expression),
        }
    }
}

/// Render the AST pane, keeping `selected` in view
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[OutlineRow],
    selected: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(format!(" AST ({} nodes) ", rows.len()))
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll = follow_selection(*scroll, selected, visible_height);

    let lines: Vec<Line> = rows
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, row)| {
            let mut style = kind_style(row.kind);
            let marker = if idx == selected {
                style = style
                    .bg(DEFAULT_THEME.selection_bg)
                    .add_modifier(Modifier::BOLD);
                "▶ "
            } else {
                "  "
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.marker)),
                Span::raw("  ".repeat(row.depth)),
                Span::styled(row.label.clone(), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
