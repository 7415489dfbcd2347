/// Errors that can occur operating the optical-depth store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Error from the underlying SQLite library
    #[error("SQLite error: {0}")]
    SqliteError(#[from] rusqlite::Error),
}
