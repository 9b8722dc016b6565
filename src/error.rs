use thiserror::Error;

/// Every outcome a library operation reports back to the user.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Please {0}.")]
    Validation(&'static str),

    #[error("Book not found: {0}")]
    NotFound(String),

    #[error("Book \"{0}\" is already borrowed.")]
    AlreadyBorrowed(String),

    #[error("Error fetching data: {0}")]
    Transport(String),

    #[error("Failed to add book cover image from {0}")]
    ImageFetch(String),
}

impl LibraryError {
    pub(crate) fn transport(err: anyhow::Error) -> Self {
        LibraryError::Transport(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, LibraryError>;
