use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{List, ListItem, Paragraph},
};

use crate::{
    event::events::Event,
    ui::{
        components::{Spinner, StatusLine, TextField, render_modal},
        context::AppContext,
        input::edit_text,
        state::AppState,
        traits::{Action, View},
    },
    upload::{UploadDialog, UploadOutcome},
    util::colors,
};

/// Modal for picking files by path and sending them in one request.
#[derive(Default)]
pub struct UploadView {
    dialog: UploadDialog,
    path: String,
}

impl UploadView {
    fn add_path(&mut self) {
        let path = self.path.trim();
        if !path.is_empty() {
            self.dialog.add_file(path);
        }
        self.path.clear();
    }
}

#[async_trait]
impl View for UploadView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let height = (self.dialog.files().len() as u16 + 10).min(area.height);
        let inner = render_modal(f, area, "Upload", area.width.saturating_sub(10).min(80), height);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let field = TextField::new("File path", &self.path)
            .focused(!self.dialog.is_loading())
            .placeholder("type or paste a path, Enter to add");
        if !self.dialog.is_loading() {
            f.set_cursor_position(field.cursor(chunks[0]));
        }
        f.render_widget(field, chunks[0]);

        if self.dialog.files().is_empty() {
            f.render_widget(
                Paragraph::new("No files selected").style(Style::default().fg(colors::NEUTRAL)),
                chunks[1],
            );
        } else {
            let items: Vec<ListItem> = self
                .dialog
                .files()
                .iter()
                .map(|path| ListItem::new(Line::from(path.display().to_string())))
                .collect();
            f.render_widget(List::new(items), chunks[1]);
        }

        if let Some(line) = StatusLine::pick(self.dialog.error(), None) {
            f.render_widget(line, chunks[2]);
        }

        if self.dialog.is_loading() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Uploading...");
            f.render_widget(spinner, chunks[3]);
        } else {
            f.render_widget(
                Paragraph::new("[ Ctrl+S ] Upload").style(
                    Style::default()
                        .fg(colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                ),
                chunks[3],
            );
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Esc if self.dialog.is_loading() => Some(Action::None),
            KeyCode::Esc => Some(Action::CloseOverlay),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !self.path.trim().is_empty() {
                    self.add_path();
                }
                Some(
                    self.dialog
                        .begin_submit()
                        .map(Action::Upload)
                        .unwrap_or(Action::None),
                )
            }
            _ if self.dialog.is_loading() => Some(Action::None),
            KeyCode::Enter => {
                self.add_path();
                Some(Action::None)
            }
            KeyCode::Backspace if self.path.is_empty() => {
                self.dialog.remove_last();
                Some(Action::None)
            }
            _ => {
                edit_text(&mut self.path, key);
                Some(Action::None)
            }
        }
    }

    fn on_paste(&mut self, text: &str) -> Option<Action> {
        self.path.push_str(text.trim_end_matches(['\n', '\r']));
        Some(Action::None)
    }

    async fn on_event(
        &mut self,
        event: &Event,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match event {
            Event::UploadFinished(result) => match self.dialog.finish_submit(result.clone()) {
                UploadOutcome::Completed => Some(Action::CloseOverlay),
                UploadOutcome::Failed | UploadOutcome::Skipped => None,
            },
            _ => None,
        }
    }

    fn hints(&self) -> &'static str {
        if self.dialog.is_loading() {
            "Uploading..."
        } else {
            "Enter add · Backspace remove last · Ctrl+S upload · Esc close"
        }
    }
}
