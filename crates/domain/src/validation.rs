// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::inputs::{HackathonCreateInput, HackathonUpdateInput};

/// Earliest term year accepted.
pub const MIN_TERM_YEAR: i32 = 1900;

/// Latest term year accepted. Dates are stored with four-digit years.
pub const MAX_TERM_YEAR: i32 = 9999;

/// Validates that a term year is a plausible calendar year.
///
/// # Errors
///
/// Returns `DomainError::InvalidTermYear` if the year is outside
/// `MIN_TERM_YEAR..=MAX_TERM_YEAR`.
pub const fn validate_term_year(year: i32) -> Result<(), DomainError> {
    if year < MIN_TERM_YEAR || year > MAX_TERM_YEAR {
        return Err(DomainError::InvalidTermYear(year));
    }
    Ok(())
}

/// Validates a hackathon creation request.
///
/// # Arguments
///
/// * `input` - The requested term and dates
///
/// # Errors
///
/// Returns an error if:
/// - The term year is out of range
/// - The end date falls before the start date
pub fn validate_create_input(input: &HackathonCreateInput) -> Result<(), DomainError> {
    validate_term_year(input.term.year)?;

    // Single-day hackathons are allowed
    if input.end_date < input.start_date {
        return Err(DomainError::InvalidDateRange {
            start_date: input.start_date,
            end_date: input.end_date,
        });
    }

    Ok(())
}

/// Validates a hackathon update request before any storage is touched.
///
/// # Errors
///
/// Returns an error if:
/// - The input carries no changes
/// - A new term year is out of range
pub fn validate_update_input(input: &HackathonUpdateInput) -> Result<(), DomainError> {
    if input.is_empty() {
        return Err(DomainError::EmptyUpdate);
    }

    if let Some(year) = input.year {
        validate_term_year(year)?;
    }

    Ok(())
}
