// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Semester token is not one of `FALL`, `SPRING`, `SUMMER`.
    InvalidSemester(String),
    /// Term year is outside the supported range.
    InvalidTermYear(i32),
    /// Application status token is not recognized.
    InvalidApplicationStatus(String),
    /// Application status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Reason the transition was rejected.
        reason: String,
    },
    /// Hackathon end date precedes its start date.
    InvalidDateRange {
        /// The start date.
        start_date: time::Date,
        /// The end date.
        end_date: time::Date,
    },
    /// A date string could not be parsed.
    DateParseError {
        /// The string that failed to parse.
        date_string: String,
        /// Parser error message.
        error: String,
    },
    /// A hackathon update carried no changes at all.
    EmptyUpdate,
    /// A pagination cursor could not be decoded.
    InvalidCursor(String),
    /// Requested page size is not positive.
    InvalidPageSize(i64),
    /// Application identifier is not of the form `<hackathon_id>-<user_id>`.
    InvalidApplicationId(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSemester(value) => {
                write!(f, "Invalid semester '{value}': expected FALL, SPRING or SUMMER")
            }
            Self::InvalidTermYear(year) => write!(f, "Invalid term year: {year}"),
            Self::InvalidApplicationStatus(value) => {
                write!(f, "Invalid application status: {value}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::InvalidDateRange {
                start_date,
                end_date,
            } => write!(
                f,
                "Hackathon end date {end_date} is before start date {start_date}"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::EmptyUpdate => write!(f, "Update contains no changes"),
            Self::InvalidCursor(cursor) => write!(f, "Invalid pagination cursor: {cursor}"),
            Self::InvalidPageSize(first) => {
                write!(f, "Invalid page size {first}: must be at least 1")
            }
            Self::InvalidApplicationId(value) => {
                write!(f, "Invalid application identifier: {value}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
