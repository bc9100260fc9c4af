use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    symbols::border,
    widgets::{Block, Borders, Clear},
};

use crate::util::colors;

/// Clears a centred box over `area` and returns the area inside its border.
pub fn render_modal(f: &mut Frame, area: Rect, title: &str, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(colors::PRIMARY))
        .style(Style::default().bg(colors::BACKGROUND))
        .title(title);

    let inner = block.inner(modal);
    f.render_widget(Clear, modal);
    f.render_widget(block, modal);
    inner
}
