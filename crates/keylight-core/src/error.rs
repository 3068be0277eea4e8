use thiserror::Error;

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("config is not valid JSON: {0}")]
    ConfigParse(#[from] serde_json::Error),
    #[error("invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),
    #[error("note {0} is configured more than once")]
    DuplicateNote(u8),
    #[error("note {0} is outside the piano range 21..=108")]
    NoteOutOfRange(u8),
    #[error("saving config failed: {0}")]
    Persist(String),
}

pub type Result<T> = std::result::Result<T, OverlayError>;
