use crate::{session::SessionStore, shell::Shell};

pub struct AppState {
    pub session: SessionStore,
    pub shell: Shell,
}

impl AppState {
    pub fn new(session: SessionStore) -> Self {
        Self {
            session,
            shell: Shell::new(),
        }
    }
}
