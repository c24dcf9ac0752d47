// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use hackathon_domain::{ApplicationStatus, DomainError};

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Stored data could not be turned back into domain values.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// Input was rejected before any statement ran.
    Validation(DomainError),
    /// The requested hackathon was not found.
    HackathonNotFound(i64),
    /// The requested event was not found.
    EventNotFound(i64),
    /// No application exists for this hackathon and user.
    ApplicationNotFound { hackathon_id: i64, user_id: i64 },
    /// The user already applied to this hackathon.
    ApplicationAlreadyExists { hackathon_id: i64, user_id: i64 },
    /// The application was already accepted or denied.
    ApplicantAlreadyDecided {
        hackathon_id: i64,
        user_id: i64,
        status: ApplicationStatus,
    },
    /// A uniqueness constraint was violated.
    Conflict(String),
    /// The requested resource was not found.
    NotFound(String),
    /// The operation was cancelled before it could commit.
    Cancelled,
}

impl PersistenceError {
    /// Returns true if the error means the addressed entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound(_)
                | Self::HackathonNotFound(_)
                | Self::EventNotFound(_)
                | Self::ApplicationNotFound { .. }
        )
    }

    /// Returns true if the error reports a clash with existing state.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::Conflict(_)
                | Self::ApplicationAlreadyExists { .. }
                | Self::ApplicantAlreadyDecided { .. }
        )
    }

    /// Returns true if the caller supplied invalid input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Stored data is invalid: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::Validation(err) => write!(f, "Validation failed: {err}"),
            Self::HackathonNotFound(id) => write!(f, "Hackathon not found: {id}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::ApplicationNotFound {
                hackathon_id,
                user_id,
            } => write!(
                f,
                "No application found for hackathon {hackathon_id} and user {user_id}"
            ),
            Self::ApplicationAlreadyExists {
                hackathon_id,
                user_id,
            } => write!(
                f,
                "User {user_id} has already applied to hackathon {hackathon_id}"
            ),
            Self::ApplicantAlreadyDecided {
                hackathon_id,
                user_id,
                status,
            } => write!(
                f,
                "Application of user {user_id} to hackathon {hackathon_id} is already {status}"
            ),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Cancelled => write!(f, "Operation cancelled"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::Conflict(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::Validation(err)
    }
}
