pub mod message;
pub mod modal;
pub mod spinner;
pub mod text_field;

pub use message::StatusLine;
pub use modal::render_modal;
pub use spinner::Spinner;
pub use text_field::TextField;
