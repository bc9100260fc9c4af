use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    shell::Screen,
    ui::{app::App, components::Spinner},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(area);

        let header_area = chunks[0];
        let content_area = chunks[1];
        let footer_area = chunks[2];

        let header_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL))
            .title(env!("CARGO_PKG_NAME"))
            .title_alignment(Alignment::Center);
        let greeting = self.app.state.shell.welcome().unwrap_or_default();
        let account = if self.app.state.session.is_authenticated() {
            "signed in"
        } else {
            "signed out"
        };
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    greeting,
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  ({account})"), Style::default().fg(colors::NEUTRAL)),
            ]))
            .alignment(Alignment::Center)
            .block(header_block),
            header_area,
        );

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .border_style(Style::default().fg(colors::NEUTRAL));
        let content_inner = content_block.inner(content_area);
        f.render_widget(content_block, content_area);

        match &self.app.screen {
            Screen::Loading => {
                let spinner = Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("Connecting...");
                f.render_widget(spinner, content_inner);
            }
            Screen::Failed(message) => {
                f.render_widget(
                    Paragraph::new(message.as_str())
                        .style(Style::default().fg(colors::ERROR))
                        .alignment(Alignment::Center)
                        .wrap(Wrap { trim: true }),
                    content_inner,
                );
            }
            Screen::SignIn | Screen::Library => {
                self.app
                    .router
                    .render(f, content_inner, &self.app.state, &self.app.ctx);
            }
        }

        let hints = self
            .app
            .router
            .active_view()
            .map(|view| view.hints())
            .unwrap_or("q quit");
        f.render_widget(
            Paragraph::new(hints).style(Style::default().fg(colors::NEUTRAL)),
            footer_area,
        );
    }
}
