use thiserror::Error;

/// Failures caught locally, before any request is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Check your password. They should be both equal and greater than 5 characters.")]
    PasswordMismatch,

    #[error("Check your password. They should be both equal and greater than 5 characters.")]
    PasswordTooShort,

    #[error("Please select a file to upload.")]
    NoFilesSelected,
}
