// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hackathon_domain::{DomainError, MAX_TERM_YEAR, MIN_TERM_YEAR};
use hackathon_persistence::PersistenceError;
use tracing::error;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller's identity could not be established.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's identity could not be established.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The request clashes with existing state.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err)
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidSemester(value) => ApiError::InvalidInput {
            field: String::from("semester"),
            message: format!("Unknown semester '{value}'. Must be FALL, SPRING, or SUMMER"),
        },
        DomainError::InvalidTermYear(year) => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!(
                "Term year {year} is outside {MIN_TERM_YEAR}..={MAX_TERM_YEAR}"
            ),
        },
        DomainError::InvalidApplicationStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!(
                "Unknown application status '{value}'. Must be WAITING, ACCEPTED, or REJECTED"
            ),
        },
        err @ DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("application_decided_once"),
            message: err.to_string(),
        },
        err @ DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("end_date"),
            message: err.to_string(),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::EmptyUpdate => ApiError::InvalidInput {
            field: String::from("input"),
            message: String::from("Update contains no changes"),
        },
        DomainError::InvalidCursor(value) => ApiError::InvalidInput {
            field: String::from("after"),
            message: format!("Malformed cursor '{value}'"),
        },
        DomainError::InvalidPageSize(first) => ApiError::InvalidInput {
            field: String::from("first"),
            message: format!("Page size must be at least 1, got {first}"),
        },
        DomainError::InvalidApplicationId(value) => ApiError::InvalidInput {
            field: String::from("id"),
            message: format!("Malformed application id '{value}'"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are logged here and surface only as `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Validation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::HackathonNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Hackathon"),
            message: format!("Hackathon {id} does not exist"),
        },
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist"),
        },
        PersistenceError::ApplicationNotFound {
            hackathon_id,
            user_id,
        } => ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("User {user_id} has not applied to hackathon {hackathon_id}"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::ApplicationAlreadyExists {
            hackathon_id,
            user_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("single_application"),
            message: format!("User {user_id} already applied to hackathon {hackathon_id}"),
        },
        PersistenceError::ApplicantAlreadyDecided {
            hackathon_id,
            user_id,
            status,
        } => ApiError::DomainRuleViolation {
            rule: String::from("application_decided_once"),
            message: format!(
                "Application of user {user_id} to hackathon {hackathon_id} is already {status}"
            ),
        },
        PersistenceError::Conflict(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message,
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
