use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Import payload was not a JSON array of well-formed groups.
    /// Nothing was applied.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A reorder request was not a permutation of the current text sets.
    #[error("reorder is not a permutation of the group's text sets")]
    InvalidReorder,

    #[error("failed to encode snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Database(#[from] tokio_rusqlite::Error),
}
