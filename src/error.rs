use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Task text cannot be empty")]
    EmptyText,

    #[error("Unable to find task with id: {0}")]
    NotFound(u64),

    #[error("Invalid custom directory: {0}")]
    InvalidDirectory(String),

    #[error("Missing todolite-dir flag value")]
    MissingDataDirValue,
}

pub type Result<T> = std::result::Result<T, TodoError>;
