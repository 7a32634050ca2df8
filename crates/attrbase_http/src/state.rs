//! Shared request state.
//!
//! SQLite calls block, so every storage closure runs on tokio's blocking pool
//! while holding the connection mutex.

use std::sync::{Arc, Mutex};

use attrbase_core::RepoResult;
use rusqlite::Connection;

use crate::error::ApiError;

/// Shared server state: one migrated SQLite connection.
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    /// Wraps a connection opened via `attrbase_core::db::open_db*`.
    pub fn new(conn: Connection) -> Arc<Self> {
        Arc::new(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Runs `f` with exclusive access to the connection on the blocking pool.
    ///
    /// Requests are serialized on the connection, so one ingestion batch is
    /// never interleaved with another.
    pub async fn with_connection<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| ApiError::persistence("connection mutex poisoned"))?;
            f(&guard).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::persistence(format!("storage task failed: {err}")))?
    }
}
