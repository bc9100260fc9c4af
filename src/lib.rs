pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod http;
pub mod library;
pub mod model;
pub mod playback;
pub mod session;
pub mod shell;
pub mod track;
pub mod ui;
pub mod upload;
pub mod util;
