//! Source code pane rendering with syntax highlighting
//!
//! Displays the program text with line numbers and highlights the line of the
//! node selected in the AST pane. Highlighting uses a simple
//! character-by-character scan rather than the lexer, so that lines which do
//! not lex on their own still render.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{border_style, follow_selection};
use crate::ui::theme::DEFAULT_THEME;

/// Moves a finished word into `spans`.
fn flush(word: &mut String, spans: &mut Vec<Span<'static>>, is_function: bool) {
    if !word.is_empty() {
        let style = get_keyword_style(word, is_function);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

/// Simple syntax highlighting for one source line
fn highlight_source_code(line: &str) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Comments run to the end of the line
        if c == '/' && chars.get(i + 1) == Some(&'/') {
            flush(&mut current_word, &mut spans, false);
            spans.push(Span::styled(
                chars[i..].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.muted),
            ));
            break;
        }

        if c == '"' || c == '\'' {
            flush(&mut current_word, &mut spans, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += if chars[end] == '\\' { 2 } else { 1 };
            }
            let end = (end + 1).min(chars.len());
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' && !(c == '.' && is_number(&current_word)) {
            flush(&mut current_word, &mut spans, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.accent),
                _ => Style::default().fg(DEFAULT_THEME.text),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush(&mut current_word, &mut spans, false);
    Line::from(spans)
}

fn is_number(word: &str) -> bool {
    word.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "bool" | "char" | "int" | "float" | "double" | "string" | "void" => {
            Style::default().fg(DEFAULT_THEME.datatype)
        }
        "secret" => Style::default()
            .fg(DEFAULT_THEME.secret)
            .add_modifier(Modifier::BOLD),
        "for" | "if" | "else" | "return" | "public" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" => Style::default().fg(DEFAULT_THEME.literal),
        _ if is_number(word) => Style::default().fg(DEFAULT_THEME.literal),
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.text),
    }
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    selected_line: usize,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let lines: Vec<&str> = source_code.lines().collect();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if selected_line > 0 {
        *scroll = follow_selection(*scroll, selected_line - 1, visible_height);
    }
    *scroll = (*scroll).min(lines.len().saturating_sub(1));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_selected = line_num == selected_line;

            let num_style = if is_selected {
                Style::default()
                    .fg(DEFAULT_THEME.marker)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.muted)
            };

            let mut content = highlight_source_code(line);
            if is_selected {
                let background = Style::default().bg(DEFAULT_THEME.selection_bg);
                for span in &mut content.spans {
                    span.style = span.style.patch(background);
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &Line<'static>) -> Vec<String> {
        line.spans
            .iter()
            .map(|span| span.content.to_string())
            .filter(|text| !text.trim().is_empty())
            .collect()
    }

    #[test]
    fn test_highlight_splits_tokens() {
        let line = highlight_source_code("secret int x = 1.5; // note");
        assert_eq!(
            words(&line),
            vec!["secret", "int", "x", "=", "1.5", ";", "// note"]
        );
    }

    #[test]
    fn test_highlight_styles() {
        let line = highlight_source_code("y = rotate(v, 2);");
        let style_of = |text: &str| {
            line.spans
                .iter()
                .find(|span| span.content == text)
                .map(|span| span.style)
        };
        assert_eq!(
            style_of("rotate").and_then(|style| style.fg),
            Some(DEFAULT_THEME.function)
        );
        assert_eq!(
            style_of("2").and_then(|style| style.fg),
            Some(DEFAULT_THEME.literal)
        );
    }
}
