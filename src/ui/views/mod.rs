pub mod auth;
pub mod library;
pub mod track_detail;
pub mod upload;

pub use auth::AuthView;
pub use library::LibraryView;
pub use track_detail::TrackDetailView;
pub use upload::UploadView;
