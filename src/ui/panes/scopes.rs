//! Scope pane: the scope chain of the selected node

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::border_style;
use crate::ui::theme::DEFAULT_THEME;
use crate::visitor::{Declaration, DeclarationKind, ScopeId, ScopeTree};

/// Lines describing `scope` and every scope enclosing it, innermost first.
/// `resolved` marks the declaration the selected variable refers to.
pub fn scope_chain_lines(
    tree: &ScopeTree,
    scope: ScopeId,
    resolved: Option<&Declaration>,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for id in tree.ancestors(scope) {
        let Some(scope) = tree.get(id) else {
            continue;
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("scope {}", id.0),
                Style::default()
                    .fg(DEFAULT_THEME.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({})", scope.owner_kind),
                Style::default().fg(DEFAULT_THEME.muted),
            ),
        ]));

        let identifiers = scope.identifiers();
        if identifiers.is_empty() {
            lines.push(Line::styled(
                "    (no declarations)",
                Style::default().fg(DEFAULT_THEME.muted),
            ));
        }
        for (name, declaration) in identifiers {
            let is_resolved = resolved.is_some_and(|target| target.node == declaration.node);
            let type_color = if declaration.datatype.is_secret() {
                DEFAULT_THEME.secret
            } else {
                DEFAULT_THEME.datatype
            };
            let origin = match declaration.kind {
                DeclarationKind::Parameter => "param",
                DeclarationKind::Variable => "var",
            };

            let mut name_style = Style::default().fg(DEFAULT_THEME.text);
            if is_resolved {
                name_style = name_style
                    .fg(DEFAULT_THEME.resolved)
                    .add_modifier(Modifier::BOLD);
            }

            lines.push(Line::from(vec![
                Span::raw(if is_resolved { "  → " } else { "    " }),
                Span::styled(format!("{} ", declaration.datatype), Style::default().fg(type_color)),
                Span::styled(name.to_string(), name_style),
                Span::styled(
                    format!("  {} @ {}", origin, declaration.location),
                    Style::default().fg(DEFAULT_THEME.muted),
                ),
            ]));
        }
    }

    lines
}

/// Render the scope pane
pub fn render_scopes_pane(
    frame: &mut Frame,
    area: Rect,
    tree: Option<&ScopeTree>,
    scope: Option<ScopeId>,
    resolved: Option<&Declaration>,
    is_focused: bool,
    scroll: usize,
) {
    let block = Block::default()
        .title(" Scopes ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines = match (tree, scope) {
        (Some(tree), Some(scope)) => scope_chain_lines(tree, scope, resolved),
        _ => vec![Line::styled(
            "No scope at this node",
            Style::default().fg(DEFAULT_THEME.muted),
        )],
    };

    let scroll = scroll.min(lines.len().saturating_sub(1)) as u16;
    frame.render_widget(Paragraph::new(lines).block(block).scroll((scroll, 0)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::AstNode;
    use crate::parser::parse;
    use crate::visitor::resolve_scopes;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_chain_lists_innermost_first() {
        let root = parse("secret int k = 1;\npublic int f(int a) { return a; }").unwrap();
        let resolution = resolve_scopes(root.as_node()).unwrap();
        let tree = resolution.scopes.as_ref().unwrap();

        let body = ScopeId(2);
        let lines: Vec<String> = scope_chain_lines(tree, body, None)
            .iter()
            .map(text)
            .collect();

        assert_eq!(lines[0], "scope 2 (Block)");
        assert_eq!(lines[1], "    (no declarations)");
        assert_eq!(lines[2], "scope 1 (Function)");
        assert!(lines[3].contains("int a") && lines[3].contains("param"));
        assert_eq!(lines[4], "scope 0 (Block)");
        assert!(lines[5].contains("secret int k"));
    }
}
