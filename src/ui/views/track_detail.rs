use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use crate::{
    event::events::Event,
    track::TrackDetail,
    ui::{
        components::{StatusLine, render_modal},
        context::AppContext,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

/// Dialog with one record's metadata and its stream link.
pub struct TrackDetailView {
    detail: TrackDetail,
    error: Option<String>,
    notice: Option<String>,
}

impl TrackDetailView {
    pub fn new(detail: TrackDetail) -> Self {
        Self {
            detail,
            error: None,
            notice: None,
        }
    }
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{label:>8}  "),
            Style::default().fg(colors::NEUTRAL),
        ),
        Span::raw(value),
    ])
}

#[async_trait]
impl View for TrackDetailView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let width = area.width.saturating_sub(10).min(90);
        let inner = render_modal(f, area, "Details", width, area.height.min(16));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let item = &self.detail.item;
        f.render_widget(
            Paragraph::new(Span::styled(
                item.title.as_str(),
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(colors::PRIMARY),
            )),
            chunks[0],
        );

        let cover = self
            .detail
            .cover_url
            .as_ref()
            .map(|url| url.to_string())
            .unwrap_or_else(|| "none".to_string());
        let lines = vec![
            field("Artist", item.artist_name.clone()),
            field("Album", item.album_name.clone()),
            field("Genre", self.detail.genre().to_string()),
            field("Length", item.length.to_string()),
            field("Added", item.time.to_string()),
            field("Cover", cover),
            field("Stream", self.detail.display_stream_url().to_string()),
        ];
        f.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: false }),
            chunks[1],
        );

        let status = StatusLine::pick(self.error.as_deref(), self.notice.as_deref());
        if let Some(line) = status {
            f.render_widget(line, chunks[2]);
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Esc => Some(Action::CloseOverlay),
            KeyCode::Enter | KeyCode::Char('p') => {
                self.error = None;
                self.notice = Some(format!("Opening {}", self.detail.item.title));
                Some(Action::Play(self.detail.stream_url.clone()))
            }
            KeyCode::Char('d') => Some(Action::Download(self.detail.item.title.clone())),
            _ => None,
        }
    }

    async fn on_event(
        &mut self,
        event: &Event,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        if let Event::PlaybackFailed(message) = event {
            self.notice = None;
            self.error = Some(message.clone());
        }
        None
    }

    fn hints(&self) -> &'static str {
        "Enter/p play · d download · Esc close"
    }
}
