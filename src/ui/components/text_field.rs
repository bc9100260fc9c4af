use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::util::colors;

/// Bordered single-line input. Focused fields get the primary colour.
pub struct TextField<'a> {
    label: &'a str,
    value: &'a str,
    masked: bool,
    focused: bool,
    placeholder: Option<&'a str>,
}

impl<'a> TextField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            masked: false,
            focused: false,
            placeholder: None,
        }
    }

    pub fn masked(mut self, masked: bool) -> Self {
        self.masked = masked;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    fn display(&self) -> String {
        if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.to_string()
        }
    }

    /// Where the terminal cursor belongs when this field has focus.
    pub fn cursor(&self, area: Rect) -> Position {
        let width = self.display().width() as u16;
        let max_x = area.x + area.width.saturating_sub(2);
        Position::new((area.x + 1 + width).min(max_x), area.y + 1)
    }
}

impl Widget for TextField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused {
            Style::default().fg(colors::PRIMARY)
        } else {
            Style::default().fg(colors::NEUTRAL)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.label)
            .border_style(border);

        let text = self.display();
        let paragraph = match (text.is_empty(), self.placeholder) {
            (true, Some(placeholder)) => {
                Paragraph::new(placeholder).style(Style::default().fg(colors::NEUTRAL))
            }
            _ => Paragraph::new(text),
        };

        paragraph.block(block).render(area, buf);
    }
}
