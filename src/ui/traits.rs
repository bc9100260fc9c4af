use async_trait::async_trait;
use ratatui::crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use crate::{
    event::events::Event,
    library::FetchRequest,
    model::{Credentials, MediaItem},
    ui::{context::AppContext, state::AppState},
    upload::UploadBatch,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Register(Credentials),
    Login(Credentials),
    SetToken(String),
    Logout,
    Fetch(FetchRequest),
    Download(String),
    Delete(String),
    OpenUpload,
    Upload(UploadBatch),
    OpenDetail(MediaItem),
    Play(reqwest::Url),
    CloseOverlay,
    None,
}

#[async_trait]
pub trait View: Send {
    async fn on_mount(&mut self, _state: &AppState, _ctx: &AppContext) -> Option<Action> {
        None
    }

    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext);

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action>;

    async fn on_event(
        &mut self,
        _event: &Event,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        None
    }

    /// Bracketed paste from the terminal.
    fn on_paste(&mut self, _text: &str) -> Option<Action> {
        None
    }

    /// Short key reference shown in the footer.
    fn hints(&self) -> &'static str {
        ""
    }
}
