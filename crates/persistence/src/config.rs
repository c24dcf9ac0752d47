// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `PersistenceConfig::in_memory()` receives a unique
/// sequential ID so concurrently running tests never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Default number of pooled connections for file databases.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 8;

/// Where the database lives and how the pool reaches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceConfig {
    /// `SQLite` path or URI.
    pub database_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a checkout waits for a free connection.
    pub connection_timeout: Duration,
    /// How long a statement waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Switch the database to write-ahead logging on start-up.
    pub enable_wal: bool,
}

impl PersistenceConfig {
    /// Configuration for a file database.
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            database_url: path.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            enable_wal: true,
        }
    }

    /// Configuration for a private, shared-cache in-memory database.
    ///
    /// Shared-cache databases lock whole tables, so the pool holds a single
    /// connection.
    #[must_use]
    pub fn in_memory() -> Self {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        Self {
            database_url: format!("file:hackathon_memdb_{db_id}?mode=memory&cache=shared"),
            max_connections: 1,
            connection_timeout: Duration::from_secs(30),
            busy_timeout: Duration::from_secs(5),
            enable_wal: false,
        }
    }

    /// Overrides the pool size.
    #[must_use]
    pub const fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Returns true if the database only exists while a connection is open.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.database_url == ":memory:" || self.database_url.contains("mode=memory")
    }
}
