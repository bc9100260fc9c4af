use std::path::PathBuf;

use crate::{
    http::ApiError,
    model::{MediaItem, User},
};

/// Results of background tasks and view requests, delivered to the UI loop.
#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum Event {
    // Results
    WelcomeFetched(Result<String, ApiError>),
    SessionChecked {
        token: String,
        result: Result<User, ApiError>,
    },
    RegistrationFinished(Result<String, ApiError>),
    LoginFinished(Result<String, ApiError>),
    MediaFetched {
        generation: u64,
        result: Result<Vec<MediaItem>, ApiError>,
    },
    MediaDeleted {
        title: String,
        result: Result<(), ApiError>,
    },
    MediaDownloaded {
        title: String,
        result: Result<PathBuf, ApiError>,
    },
    UploadFinished(Result<(), ApiError>),
    PlaybackFailed(String),

    // Commands
    RefreshMedia,
}
