// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module contains SQLite-specific pool setup, migration, and
//! connection configuration that cannot be expressed in Diesel DSL.
//!
//! ## Backend-Specific Code
//!
//! This module is limited to:
//! - Pool construction and per-connection configuration (PRAGMA statements)
//! - Migration execution
//! - Journal mode selection for file databases
//!
//! All domain queries and mutations live in `queries/` or `mutations/`.

use std::time::Duration;

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::sql_types::Integer;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::config::PersistenceConfig;
use crate::error::PersistenceError;

/// Embedded schema migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pool of `SQLite` connections.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// A connection checked out of the pool. Returned to the pool on drop.
pub type PooledSqliteConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Helper row struct for PRAGMA queries.
///
/// This is a justified use of raw SQL as Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct PragmaRow {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Settings applied to every connection the pool opens.
///
/// `SQLite` scopes `foreign_keys` and `busy_timeout` to a connection, so a
/// pool must apply them each time it establishes one.
#[derive(Debug, Clone, Copy)]
struct ConnectionSettings {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionSettings {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(conn)
            .map_err(diesel::r2d2::Error::QueryError)?;
        diesel::sql_query(format!(
            "PRAGMA busy_timeout = {}",
            self.busy_timeout.as_millis()
        ))
        .execute(conn)
        .map_err(diesel::r2d2::Error::QueryError)?;
        Ok(())
    }
}

/// Verifies that foreign key enforcement is enabled.
///
/// # Arguments
///
/// * `conn` - The database connection to check
///
/// # Errors
///
/// Returns an error if foreign key enforcement is not enabled.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    let foreign_keys_enabled: i32 = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<PragmaRow>(conn)?
        .foreign_keys;

    if foreign_keys_enabled == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

/// Run pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(())
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// The journal mode is stored in the database file, so this only needs to
/// run once per database.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // NOTE: PRAGMA is raw SQL (justified - Diesel has no PRAGMA DSL)
    diesel::sql_query("PRAGMA journal_mode = WAL")
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(e.to_string()))?;
    Ok(())
}

/// Build a connection pool, bring the schema up to date and check that the
/// connections enforce foreign keys.
///
/// # Arguments
///
/// * `config` - Database location and pool sizing
///
/// # Errors
///
/// Returns an error if the pool cannot be built or migrations fail.
pub fn initialize_pool(config: &PersistenceConfig) -> Result<SqlitePool, PersistenceError> {
    info!(
        database_url = %config.database_url,
        max_connections = config.max_connections,
        "Initializing SQLite connection pool"
    );

    let manager = ConnectionManager::<SqliteConnection>::new(config.database_url.as_str());
    let mut builder = SqlitePool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.connection_timeout)
        .connection_customizer(Box::new(ConnectionSettings {
            busy_timeout: config.busy_timeout,
        }));
    // A shared in-memory database disappears with its last connection
    if config.is_in_memory() {
        builder = builder.idle_timeout(None).max_lifetime(None);
    }
    let pool: SqlitePool = builder.build(manager)?;

    let mut pooled: PooledSqliteConnection = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;

    if config.enable_wal {
        enable_wal_mode(conn)?;
    }
    run_migrations(conn)?;
    verify_foreign_key_enforcement(conn)?;

    Ok(pool)
}
