use crate::{http::ApiError, session::SessionStore};

const WELCOME_FAILED: &str = "Failed to fetch welcome message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Failed(String),
    SignIn,
    Library,
}

impl Screen {
    pub fn is_same_kind(&self, other: &Screen) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Greeting fetch plus the gate between the sign-in forms and the library.
#[derive(Debug, Clone)]
pub struct Shell {
    welcome: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self {
            welcome: None,
            loading: true,
            error: None,
        }
    }

    pub fn welcome(&self) -> Option<&str> {
        self.welcome.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn finish_welcome(&mut self, result: Result<String, ApiError>) {
        self.loading = false;
        match result {
            Ok(message) => self.welcome = Some(message),
            Err(e) => {
                tracing::warn!("Welcome request failed: {}", e);
                self.error = Some(e.detail_or(WELCOME_FAILED));
            }
        }
    }

    pub fn screen(&self, session: &SessionStore) -> Screen {
        if self.loading {
            Screen::Loading
        } else if let Some(error) = &self.error {
            Screen::Failed(error.clone())
        } else if session.is_authenticated() {
            Screen::Library
        } else {
            Screen::SignIn
        }
    }
}
