use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Quote already in favorites: {0}")]
    AlreadyFavorited(String),

    #[error("Storage read error: {0}")]
    StorageRead(String),

    #[error("Storage write error: {0}")]
    StorageWrite(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Native sharing is unavailable")]
    ShareUnavailable,

    #[error("Share failed: {0}")]
    Share(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
