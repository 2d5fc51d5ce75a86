use thiserror::Error;

/// Preference-layer errors. Kept separate from the core error type so the
/// Telegram layer can log them without coupling the crates.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Unknown toggle key: {0}")]
    UnknownToggleKey(String),
}

pub type Result<T> = std::result::Result<T, PrefsError>;
