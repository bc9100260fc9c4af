use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::util::colors;

/// One line of inline feedback under a form or table.
pub enum StatusLine<'a> {
    Error(&'a str),
    Notice(&'a str),
}

impl<'a> StatusLine<'a> {
    /// Errors win over notices; `None` when there is nothing to say.
    pub fn pick(error: Option<&'a str>, notice: Option<&'a str>) -> Option<Self> {
        error
            .map(StatusLine::Error)
            .or_else(|| notice.map(StatusLine::Notice))
    }
}

impl Widget for StatusLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (text, style) = match self {
            StatusLine::Error(text) => (
                text,
                Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
            ),
            StatusLine::Notice(text) => (text, Style::default().fg(colors::SECONDARY)),
        };

        Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
