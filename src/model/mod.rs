pub mod media;
pub mod user;

pub use media::{AddedAt, Length, MediaItem};
pub use user::{AccessToken, Credentials, UploadFile, User, Welcome};
