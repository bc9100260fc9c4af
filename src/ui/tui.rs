use std::{
    ops::{Deref, DerefMut},
    time::Duration,
};

use color_eyre::eyre::Result;

use crossterm::event::EventStream;
use flume::{Receiver, Sender};
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::{
    cursor,
    event::{
        DisableBracketedPaste, DisableFocusChange, EnableBracketedPaste, EnableFocusChange,
        Event as CrosstermEvent, KeyEvent, KeyEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend as Backend, crossterm};

const DEFAULT_TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TerminalEvent {
    Init,
    Tick,
    FocusGained,
    FocusLost,
    Paste(String),
    Key(KeyEvent),
    Resize(u16, u16),
}

impl TerminalEvent {
    /// Key presses only; repeats and releases are dropped along with mouse
    /// input.
    pub fn from_crossterm(evt: CrosstermEvent) -> Option<Self> {
        match evt {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Self::Key(key)),
            CrosstermEvent::Resize(w, h) => Some(Self::Resize(w, h)),
            CrosstermEvent::FocusLost => Some(Self::FocusLost),
            CrosstermEvent::FocusGained => Some(Self::FocusGained),
            CrosstermEvent::Paste(text) => Some(Self::Paste(text)),
            _ => None,
        }
    }
}

/// Raw-mode terminal plus a background reader feeding [`TerminalEvent`]s.
pub struct Tui {
    pub terminal: ratatui::Terminal<Backend<std::io::Stdout>>,
    event_rx: Receiver<TerminalEvent>,
    event_tx: Sender<TerminalEvent>,
    tick_rate: Duration,
    paste: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = ratatui::Terminal::new(Backend::new(std::io::stdout()))?;
        let (event_tx, event_rx) = flume::unbounded();

        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            tick_rate: DEFAULT_TICK,
            paste: false,
        })
    }

    pub fn tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Bracketed paste, so a pasted path arrives as one event.
    pub fn paste(mut self, paste: bool) -> Self {
        self.paste = paste;
        self
    }

    fn start(&mut self) {
        tokio::spawn(read_terminal(self.event_tx.clone(), self.tick_rate));
    }

    pub fn enter(&mut self) -> Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        crossterm::execute!(
            std::io::stdout(),
            EnterAlternateScreen,
            EnableFocusChange,
            cursor::Hide
        )?;
        if self.paste {
            crossterm::execute!(std::io::stdout(), EnableBracketedPaste)?;
        }
        self.start();
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !crossterm::terminal::is_raw_mode_enabled()? {
            return Ok(());
        }
        self.flush()?;
        if self.paste {
            crossterm::execute!(std::io::stdout(), DisableBracketedPaste)?;
        }
        Self::restore()
    }

    /// Leaves raw mode and the alternate screen. Safe to call from a panic
    /// hook.
    pub fn restore() -> Result<()> {
        crossterm::execute!(
            std::io::stdout(),
            DisableFocusChange,
            LeaveAlternateScreen,
            cursor::Show
        )?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }

    #[allow(clippy::should_implement_trait)]
    pub async fn next(&self) -> Option<TerminalEvent> {
        self.event_rx.recv_async().await.ok()
    }
}

async fn read_terminal(event_tx: Sender<TerminalEvent>, tick_rate: Duration) {
    let mut reader = EventStream::new();
    let mut ticks = tokio::time::interval(tick_rate);
    loop {
        let event = tokio::select! {
            _ = ticks.tick() => Some(TerminalEvent::Tick),
            next = reader.next().fuse() => match next {
                Some(Ok(evt)) => TerminalEvent::from_crossterm(evt),
                Some(Err(e)) => {
                    tracing::warn!("Terminal read failed: {}", e);
                    None
                }
                None => break,
            },
        };

        if let Some(event) = event {
            if event_tx.send_async(event).await.is_err() {
                break;
            }
        }
    }
}

impl Deref for Tui {
    type Target = ratatui::Terminal<Backend<std::io::Stdout>>;

    fn deref(&self) -> &Self::Target {
        &self.terminal
    }
}

impl DerefMut for Tui {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.terminal
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::error!("Failed to restore terminal: {}", e);
        }
    }
}
