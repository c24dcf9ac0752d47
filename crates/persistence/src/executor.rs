// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Statement execution strategies.
//!
//! Queries and mutations take a bare `&mut SqliteConnection` and never decide
//! for themselves whether they run inside a transaction. The `Persistence`
//! adapter picks an `Executor` per operation:
//!
//! - `Direct` runs the statements on the checked-out connection as-is.
//! - `Transactional` wraps them in a single transaction that commits only if
//!   every statement succeeded and the operation was not cancelled.

use diesel::{Connection, SqliteConnection};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::PersistenceError;

/// Runs a unit of work against one connection.
pub trait Executor {
    /// Executes `op` on `conn` under this strategy.
    ///
    /// # Errors
    ///
    /// Returns whatever `op` returns, or a storage error raised while
    /// beginning or finishing the unit of work.
    fn execute<T, F>(&self, conn: &mut SqliteConnection, op: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>;
}

/// Runs statements without a surrounding transaction.
///
/// Only suitable for single-statement work, where `SQLite` already gives
/// statement-level atomicity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Direct;

impl Executor for Direct {
    fn execute<T, F>(&self, conn: &mut SqliteConnection, op: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    {
        op(conn)
    }
}

/// Lock mode a transaction starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionMode {
    /// `BEGIN` (deferred): a consistent snapshot for multi-statement reads.
    Read,
    /// `BEGIN IMMEDIATE`: takes the write lock up front, so a
    /// check-then-write sequence cannot interleave with another writer.
    Write,
}

/// Runs statements inside one transaction.
///
/// The transaction is rolled back if `op` fails or if the cancellation
/// token fires before commit.
#[derive(Debug, Clone, Copy)]
pub struct Transactional<'a> {
    mode: TransactionMode,
    cancellation: Option<&'a CancellationToken>,
}

impl<'a> Transactional<'a> {
    #[must_use]
    pub const fn read(cancellation: Option<&'a CancellationToken>) -> Self {
        Self {
            mode: TransactionMode::Read,
            cancellation,
        }
    }

    #[must_use]
    pub const fn write(cancellation: Option<&'a CancellationToken>) -> Self {
        Self {
            mode: TransactionMode::Write,
            cancellation,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> TransactionMode {
        self.mode
    }

    fn ensure_not_cancelled(&self) -> Result<(), PersistenceError> {
        match self.cancellation {
            Some(token) if token.is_cancelled() => Err(PersistenceError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl Executor for Transactional<'_> {
    fn execute<T, F>(&self, conn: &mut SqliteConnection, op: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    {
        self.ensure_not_cancelled()?;

        let body = |conn: &mut SqliteConnection| -> Result<T, PersistenceError> {
            let value = op(conn)?;
            // Last chance to abandon the work before it becomes visible
            self.ensure_not_cancelled()?;
            Ok(value)
        };

        let result = match self.mode {
            TransactionMode::Read => conn.transaction(body),
            TransactionMode::Write => conn.immediate_transaction(body),
        };

        if let Err(PersistenceError::Cancelled) = &result {
            debug!("Transaction rolled back after cancellation");
        }
        result
    }
}
