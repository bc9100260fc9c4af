use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    auth::{FormStatus, LoginForm, RegistrationForm},
    event::events::Event,
    ui::{
        components::{StatusLine, TextField},
        context::AppContext,
        input::edit_text,
        state::AppState,
        traits::{Action, View},
    },
    util::colors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    RegisterEmail,
    RegisterPassword,
    RegisterConfirm,
    LoginEmail,
    LoginPassword,
}

impl Field {
    const ORDER: [Field; 5] = [
        Field::RegisterEmail,
        Field::RegisterPassword,
        Field::RegisterConfirm,
        Field::LoginEmail,
        Field::LoginPassword,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn is_login(self) -> bool {
        matches!(self, Field::LoginEmail | Field::LoginPassword)
    }
}

/// Registration and login side by side.
pub struct AuthView {
    register: RegistrationForm,
    login: LoginForm,
    focus: Field,
}

impl Default for AuthView {
    fn default() -> Self {
        Self {
            register: RegistrationForm::default(),
            login: LoginForm::default(),
            focus: Field::LoginEmail,
        }
    }
}

impl AuthView {
    fn focused_value(&mut self) -> &mut String {
        match self.focus {
            Field::RegisterEmail => &mut self.register.email,
            Field::RegisterPassword => &mut self.register.password,
            Field::RegisterConfirm => &mut self.register.confirmation,
            Field::LoginEmail => &mut self.login.email,
            Field::LoginPassword => &mut self.login.password,
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if self.focus.is_login() {
            self.login.begin_submit().map(Action::Login)
        } else {
            self.register.begin_submit().map(Action::Register)
        }
    }

    fn render_form(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        fields: &[(Field, &str, &str, bool)],
        status: &FormStatus,
        busy_label: &str,
    ) {
        let active = fields.iter().any(|(field, ..)| *field == self.focus);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(if active {
                Style::default().fg(colors::PRIMARY)
            } else {
                Style::default().fg(colors::NEUTRAL)
            });
        let inner = block.inner(area);
        f.render_widget(block, area);

        let mut constraints = vec![Constraint::Length(3); fields.len()];
        constraints.push(Constraint::Length(2));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        for (i, (field, label, value, masked)) in fields.iter().enumerate() {
            let focused = *field == self.focus;
            let widget = TextField::new(label, value).masked(*masked).focused(focused);
            if focused {
                f.set_cursor_position(widget.cursor(rows[i]));
            }
            f.render_widget(widget, rows[i]);
        }

        if let Some(line) = StatusLine::pick(status.error(), None) {
            f.render_widget(line, rows[fields.len()]);
        }

        let button = if status.is_loading() {
            Paragraph::new(busy_label).style(Style::default().fg(colors::NEUTRAL))
        } else {
            Paragraph::new(format!("[ Enter ] {}", title)).style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        };
        f.render_widget(button, rows[fields.len() + 1]);
    }
}

#[async_trait]
impl View for AuthView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, _ctx: &AppContext) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.render_form(
            f,
            columns[0],
            "Register",
            &[
                (Field::RegisterEmail, "Email Address", self.register.email.as_str(), false),
                (Field::RegisterPassword, "Password", self.register.password.as_str(), true),
                (
                    Field::RegisterConfirm,
                    "Confirm Password",
                    self.register.confirmation.as_str(),
                    true,
                ),
            ],
            self.register.status(),
            "Registering...",
        );
        self.render_form(
            f,
            columns[1],
            "Login",
            &[
                (Field::LoginEmail, "Email Address", self.login.email.as_str(), false),
                (Field::LoginPassword, "Password", self.login.password.as_str(), true),
            ],
            self.login.status(),
            "Logging in...",
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => None,
            KeyCode::Esc => None,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = self.focus.next();
                Some(Action::None)
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.prev();
                Some(Action::None)
            }
            KeyCode::Enter => Some(self.submit().unwrap_or(Action::None)),
            _ => {
                edit_text(self.focused_value(), key);
                Some(Action::None)
            }
        }
    }

    fn on_paste(&mut self, text: &str) -> Option<Action> {
        self.focused_value().push_str(text.trim_end_matches(['\n', '\r']));
        Some(Action::None)
    }

    async fn on_event(
        &mut self,
        event: &Event,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match event {
            Event::RegistrationFinished(result) => {
                self.register.finish_submit(result.clone()).map(Action::SetToken)
            }
            Event::LoginFinished(result) => {
                self.login.finish_submit(result.clone()).map(Action::SetToken)
            }
            _ => None,
        }
    }

    fn hints(&self) -> &'static str {
        "Tab/↑↓ field · Enter submit · Ctrl+C quit"
    }
}
