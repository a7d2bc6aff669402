//! Colour palette shared by every pane

use ratatui::style::Color;

pub struct Theme {
    pub text: Color,
    pub muted: Color,
    /// Titles, brackets and the status bar badge
    pub accent: Color,
    /// Selection marker and current-line number
    pub marker: Color,
    /// A declaration that a selected use resolves to
    pub resolved: Color,
    pub keyword: Color,
    pub string: Color,
    pub literal: Color,
    pub function: Color,
    pub datatype: Color,
    pub secret: Color,

    // Node categories in the outline
    pub statement: Color,
    pub expression: Color,
    pub target: Color,

    pub border_focused: Color,
    pub border_normal: Color,
    pub selection_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    text: Color::Rgb(205, 214, 244),
    muted: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(137, 180, 250),
    marker: Color::Rgb(250, 179, 135),
    resolved: Color::Rgb(166, 227, 161),
    keyword: Color::Rgb(203, 166, 247),
    string: Color::Rgb(166, 227, 161),
    literal: Color::Rgb(250, 179, 135),
    function: Color::Rgb(249, 226, 175),
    datatype: Color::Rgb(148, 226, 213),
    secret: Color::Rgb(245, 194, 231), // Pink, stands out against datatypes

    statement: Color::Rgb(137, 180, 250),
    expression: Color::Rgb(148, 226, 213),
    target: Color::Rgb(205, 214, 244),

    border_focused: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    selection_bg: Color::Rgb(50, 50, 70),
};
