use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Cell, Row, Table, TableState},
};

use crate::{
    event::events::Event,
    library::{MediaTable, SortKey},
    ui::{
        components::{Spinner, StatusLine, TextField},
        context::AppContext,
        input::edit_text,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

const COLUMN_WIDTHS: [Constraint; 6] = [
    Constraint::Percentage(28),
    Constraint::Length(8),
    Constraint::Percentage(18),
    Constraint::Percentage(18),
    Constraint::Percentage(12),
    Constraint::Length(20),
];

/// The signed-in user's media, with search and column sort.
#[derive(Default)]
pub struct LibraryView {
    table: MediaTable,
    table_state: TableState,
    editing_query: bool,
}

impl LibraryView {
    fn selected_title(&self) -> Option<String> {
        let index = self.table_state.selected()?;
        self.table.activate(index).map(|item| item.title)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.table.items().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let next = match self.table_state.selected() {
            Some(current) => (current as isize + delta).clamp(0, len as isize - 1) as usize,
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        let len = self.table.items().len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            None => self.table_state.select(Some(0)),
            _ => {}
        }
    }

    fn handle_query_input(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing_query = false;
                Some(Action::None)
            }
            _ => {
                let mut query = self.table.query().to_string();
                if edit_text(&mut query, key) {
                    Some(Action::Fetch(self.table.set_query(query)))
                } else {
                    Some(Action::None)
                }
            }
        }
    }

    fn header(&self) -> Row<'static> {
        let sort = self.table.sort();
        let cells = SortKey::ALL.iter().enumerate().map(|(i, key)| {
            let mut label = format!("{} {}", i + 1, key.label());
            let mut style = Style::default().fg(colors::HEADER);
            if *key == sort.key {
                label.push(' ');
                label.push_str(sort.direction.arrow());
                style = style.fg(colors::PRIMARY).add_modifier(Modifier::BOLD);
            }
            Cell::from(label).style(style)
        });
        Row::new(cells).height(1).bottom_margin(1)
    }
}

#[async_trait]
impl View for LibraryView {
    async fn on_mount(&mut self, _state: &AppState, _ctx: &AppContext) -> Option<Action> {
        Some(Action::Fetch(self.table.begin_fetch()))
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(area);

        let search = TextField::new("Search", self.table.query())
            .focused(self.editing_query)
            .placeholder("press / to search");
        if self.editing_query {
            f.set_cursor_position(search.cursor(chunks[0]));
        }
        f.render_widget(search, chunks[0]);

        if let Some(line) = StatusLine::pick(self.table.error(), self.table.notice()) {
            f.render_widget(line, chunks[1]);
        }

        if self.table.is_loading() && self.table.items().is_empty() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Loading...");
            f.render_widget(spinner, chunks[2]);
            return;
        }

        let sorted = self.table.sorted();
        if sorted.is_empty() {
            f.render_widget(Line::from("No media yet. Press 'a' to upload."), chunks[2]);
            return;
        }

        let rows: Vec<Row> = sorted
            .iter()
            .map(|item| {
                Row::new(vec![
                    Cell::from(item.title.clone()),
                    Cell::from(item.length.to_string()),
                    Cell::from(item.artist_name.clone()),
                    Cell::from(item.album_name.clone()),
                    Cell::from(item.genre.clone().unwrap_or_default()),
                    Cell::from(item.time.to_string()),
                ])
            })
            .collect();

        let table = Table::new(rows, COLUMN_WIDTHS)
            .header(self.header())
            .row_highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        self.clamp_selection();
        f.render_stateful_widget(table, chunks[2], &mut self.table_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        if self.editing_query {
            return self.handle_query_input(key);
        }

        match key.code {
            KeyCode::Char('/') => {
                self.editing_query = true;
                Some(Action::None)
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                Some(Action::None)
            }
            KeyCode::Char('g') => {
                self.move_selection(isize::MIN / 2);
                Some(Action::None)
            }
            KeyCode::Char('G') => {
                self.move_selection(isize::MAX / 2);
                Some(Action::None)
            }
            KeyCode::Char(c @ '1'..='6') => {
                let index = c as usize - '1' as usize;
                self.table.request_sort(SortKey::ALL[index]);
                Some(Action::None)
            }
            KeyCode::Enter => {
                let item = self
                    .table_state
                    .selected()
                    .and_then(|i| self.table.activate(i));
                Some(item.map(Action::OpenDetail).unwrap_or(Action::None))
            }
            KeyCode::Char('d') => Some(
                self.selected_title()
                    .map(Action::Download)
                    .unwrap_or(Action::None),
            ),
            KeyCode::Char('x') | KeyCode::Delete => Some(
                self.selected_title()
                    .map(Action::Delete)
                    .unwrap_or(Action::None),
            ),
            KeyCode::Char('a') => Some(Action::OpenUpload),
            KeyCode::Char('r') => Some(Action::Fetch(self.table.begin_fetch())),
            KeyCode::Char('L') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Logout)
            }
            _ => None,
        }
    }

    fn on_paste(&mut self, text: &str) -> Option<Action> {
        if !self.editing_query {
            return None;
        }
        let query = format!("{}{}", self.table.query(), text.trim());
        Some(Action::Fetch(self.table.set_query(query)))
    }

    async fn on_event(
        &mut self,
        event: &Event,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match event {
            Event::MediaFetched { generation, result } => {
                self.table.finish_fetch(*generation, result.clone());
                self.clamp_selection();
                None
            }
            Event::MediaDeleted { title, result } => {
                self.table.finish_delete(title, result.clone());
                self.clamp_selection();
                None
            }
            Event::MediaDownloaded { title, result } => {
                self.table.finish_download(title, result.clone());
                None
            }
            Event::UploadFinished(Ok(())) | Event::RefreshMedia => {
                Some(Action::Fetch(self.table.begin_fetch()))
            }
            _ => None,
        }
    }

    fn hints(&self) -> &'static str {
        if self.editing_query {
            "type to search · Enter/Esc done"
        } else {
            "/ search · 1-6 sort · Enter details · a upload · d download · x delete · r reload · L logout · q quit"
        }
    }
}
