use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read store file '{0}'")]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Failed to write store file '{0}'")]
    Write(PathBuf, #[source] std::io::Error),

    #[error("Failed to decode favorites from '{0}'")]
    Decode(PathBuf, #[source] Box<bincode::error::DecodeError>),

    #[error("Failed to encode favorites")]
    Encode(#[source] Box<bincode::error::EncodeError>),

    #[error("Invalid preferences JSON in '{0}'")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
