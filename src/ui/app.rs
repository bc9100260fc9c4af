use std::{path::PathBuf, sync::Arc};

use flume::{Receiver, Sender};
use ratatui::Frame;
use tracing::info;

use crate::{
    config::{ClientConfig, TokenStoreKind},
    event::events::Event,
    http::{ApiService, Endpoints, MediaApi},
    playback::Player,
    session::{FileStore, KeyValueStore, SessionStore},
    shell::Screen,
    util::task::TaskManager,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::AppState,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub router: Router,
    pub task_manager: TaskManager,
    pub screen: Screen,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &ClientConfig) -> color_eyre::Result<Self> {
        let endpoints = Endpoints::new(config.server_url.clone())?;
        let api = Arc::new(ApiService::new(endpoints.clone())?);
        let session = SessionStore::new(open_token_store(config));
        info!("Using server {}", endpoints.origin());

        Ok(Self::with_parts(
            api,
            endpoints,
            session,
            Player::new(&config.player),
            config.download_dir.clone(),
        ))
    }

    pub fn with_parts(
        api: Arc<dyn MediaApi>,
        endpoints: Endpoints,
        session: SessionStore,
        player: Player,
        download_dir: PathBuf,
    ) -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let ctx = AppContext {
            api,
            endpoints,
            player,
            download_dir,
            event_tx: event_tx.clone(),
        };

        Self {
            event_rx,
            event_tx,
            ctx,
            state: AppState::new(session),
            router: Router::new(),
            task_manager: TaskManager::new(),
            screen: Screen::Loading,
            has_focus: true,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?.paste(true);
        tui.enter()?;

        EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            tui.draw(|f| {
                self.ui(f);
            })?;

            EventHandler::handle_events(self, &mut tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}

fn open_token_store(config: &ClientConfig) -> Arc<dyn KeyValueStore> {
    match config.token_store {
        TokenStoreKind::File => Arc::new(FileStore::new(config.data_dir.clone())),
        #[cfg(any(target_os = "linux", target_os = "macos", target_os = "windows"))]
        TokenStoreKind::Keyring => {
            Arc::new(crate::session::KeyringStore::new(env!("CARGO_PKG_NAME")))
        }
        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        TokenStoreKind::Keyring => {
            tracing::warn!("Keyring is not available on this platform, using file store");
            Arc::new(FileStore::new(config.data_dir.clone()))
        }
    }
}
