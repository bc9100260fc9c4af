use std::{collections::VecDeque, future::Future};

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use tracing::{debug, info, warn};

use crate::{
    event::events::Event,
    library::download_to,
    shell::Screen,
    track::TrackDetail,
    ui::{
        app::App,
        input::InputHandler,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::{AuthView, LibraryView, TrackDetailView, UploadView},
    },
    upload::send_batch,
};

const FETCH_TASK: &str = "media_fetch";
const REGISTER_TASK: &str = "register";
const LOGIN_TASK: &str = "login";
const UPLOAD_TASK: &str = "upload";
const SESSION_TASK: &str = "session_check";
const WELCOME_TASK: &str = "welcome";

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => Self::init(app).await,
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Paste(text) => {
                if let Some(action) = app.router.handle_paste(&text) {
                    Self::dispatch_action(app, action).await;
                }
            }
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    /// Fetches the greeting and starts checking a persisted token.
    pub async fn init(app: &mut App) {
        let api = app.ctx.api.clone();
        Self::spawn(app, WELCOME_TASK, async move {
            Event::WelcomeFetched(api.welcome().await)
        });
        Self::settle(app).await;
    }

    pub async fn handle_action(app: &mut App, evt: Event) {
        let actions = app.router.on_event(&evt, &app.state, &app.ctx).await;

        match &evt {
            Event::WelcomeFetched(result) => app.state.shell.finish_welcome(result.clone()),
            Event::SessionChecked { token, result } => {
                app.state
                    .session
                    .apply_identity_check(token, result.clone())
            }
            Event::MediaDeleted { title, result: Ok(()) } => info!("Deleted '{}'", title),
            Event::MediaDownloaded {
                title,
                result: Ok(path),
            } => info!("Downloaded '{}' to {}", title, path.display()),
            Event::UploadFinished(Err(e)) => warn!("Upload failed: {}", e),
            _ => {}
        }

        for action in actions {
            Self::dispatch_action(app, action).await;
        }
        Self::settle(app).await;
    }

    /// Syncs the screen and runs whatever the newly mounted view asks for.
    async fn settle(app: &mut App) {
        if let Some(action) = Self::sync(app).await {
            Self::dispatch_action(app, action).await;
        }
    }

    pub async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        let action = app.router.handle_input(evt, &app.state, &app.ctx).await;
        if let Some(action) = action {
            Self::dispatch_action(app, action).await;
            return;
        }

        if let Some(action) = InputHandler::handle_key(evt) {
            Self::dispatch_action(app, action).await;
        }
    }

    /// Runs `action` and everything it leads to, including views mounted
    /// along the way.
    pub async fn dispatch_action(app: &mut App, action: Action) {
        let mut pending = VecDeque::from([action]);
        while let Some(action) = pending.pop_front() {
            pending.extend(Self::apply(app, action).await);
            pending.extend(Self::sync(app).await);
        }
    }

    async fn apply(app: &mut App, action: Action) -> Option<Action> {
        match action {
            Action::Quit => app.should_quit = true,
            Action::None => {}
            Action::Register(credentials) => {
                let api = app.ctx.api.clone();
                Self::spawn(app, REGISTER_TASK, async move {
                    Event::RegistrationFinished(api.register(&credentials).await)
                });
            }
            Action::Login(credentials) => {
                let api = app.ctx.api.clone();
                Self::spawn(app, LOGIN_TASK, async move {
                    Event::LoginFinished(api.login(&credentials).await)
                });
            }
            Action::SetToken(token) => app.state.session.set_token(Some(token)),
            Action::Logout => app.state.session.set_token(None),
            Action::Fetch(request) => {
                let token = Self::token(app)?;
                let api = app.ctx.api.clone();
                Self::spawn(app, FETCH_TASK, async move {
                    Event::MediaFetched {
                        generation: request.generation(),
                        result: request.execute(api.as_ref(), &token).await,
                    }
                });
            }
            Action::Download(title) => {
                let token = Self::token(app)?;
                let api = app.ctx.api.clone();
                let dir = app.ctx.download_dir.clone();
                let key = format!("download:{title}");
                Self::spawn(app, &key, async move {
                    let result = download_to(api.as_ref(), &token, &title, &dir).await;
                    Event::MediaDownloaded { title, result }
                });
            }
            Action::Delete(title) => {
                let token = Self::token(app)?;
                let api = app.ctx.api.clone();
                let key = format!("delete:{title}");
                Self::spawn(app, &key, async move {
                    let result = api.delete_media(&token, &title).await;
                    Event::MediaDeleted { title, result }
                });
            }
            Action::OpenUpload => {
                return app
                    .router
                    .set_overlay(Box::new(UploadView::default()), &app.state, &app.ctx)
                    .await;
            }
            Action::Upload(batch) => {
                let token = Self::token(app)?;
                let api = app.ctx.api.clone();
                Self::spawn(app, UPLOAD_TASK, async move {
                    Event::UploadFinished(send_batch(api.as_ref(), &token, &batch).await)
                });
            }
            Action::OpenDetail(item) => {
                let token = Self::token(app)?;
                let detail = TrackDetail::open(Some(&item), &token, &app.ctx.endpoints)?;
                return app
                    .router
                    .set_overlay(Box::new(TrackDetailView::new(detail)), &app.state, &app.ctx)
                    .await;
            }
            Action::Play(url) => {
                if let Err(e) = app.ctx.player.open(&url) {
                    warn!("Playback failed: {}", e);
                    let _ = app.event_tx.send(Event::PlaybackFailed(e.to_string()));
                }
            }
            Action::CloseOverlay => app.router.clear_overlay(),
        }
        None
    }

    /// Starts a pending identity check and swaps the root view when the
    /// screen changes kind.
    async fn sync(app: &mut App) -> Option<Action> {
        if let Some(token) = app.state.session.take_pending_check() {
            let api = app.ctx.api.clone();
            Self::spawn(app, SESSION_TASK, async move {
                let result = api.current_user(&token).await;
                Event::SessionChecked { token, result }
            });
        }

        let screen = app.state.shell.screen(&app.state.session);
        if screen.is_same_kind(&app.screen) {
            app.screen = screen;
            return None;
        }

        debug!("Switching screen to {:?}", screen);
        let leaving_library = matches!(app.screen, Screen::Library);
        app.screen = screen;

        if leaving_library {
            info!("Signed out, cancelling outstanding requests");
            app.task_manager.abort_all();
        }

        match &app.screen {
            Screen::Loading | Screen::Failed(_) => {
                app.router.clear();
                None
            }
            Screen::SignIn => {
                app.router
                    .reset(Box::new(AuthView::default()), &app.state, &app.ctx)
                    .await
            }
            Screen::Library => {
                app.router
                    .reset(Box::new(LibraryView::default()), &app.state, &app.ctx)
                    .await
            }
        }
    }

    fn token(app: &App) -> Option<String> {
        let token = app.state.session.token().map(str::to_string);
        if token.is_none() {
            debug!("Ignoring request without a session");
        }
        token
    }

    fn spawn<F>(app: &mut App, key: &str, task: F)
    where
        F: Future<Output = Event> + Send + 'static,
    {
        let tx = app.event_tx.clone();
        app.task_manager.spawn(
            key,
            tokio::spawn(async move {
                let _ = tx.send_async(task.await).await;
            }),
        );
    }
}
