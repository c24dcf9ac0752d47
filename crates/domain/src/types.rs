// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Storage and wire format for calendar dates.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` date.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value, DATE_FORMAT).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the date cannot be rendered,
/// which only happens for years outside four digits.
pub fn format_date(date: Date) -> Result<String, DomainError> {
    date.format(DATE_FORMAT)
        .map_err(|e| DomainError::DateParseError {
            date_string: date.to_string(),
            error: e.to_string(),
        })
}

/// Academic semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semester {
    Fall,
    Spring,
    Summer,
}

impl Semester {
    /// Returns the canonical token used in storage and on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fall => "FALL",
            Self::Spring => "SPRING",
            Self::Summer => "SUMMER",
        }
    }
}

impl FromStr for Semester {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FALL" => Ok(Self::Fall),
            "SPRING" => Ok(Self::Spring),
            "SUMMER" => Ok(Self::Summer),
            _ => Err(DomainError::InvalidSemester(s.to_string())),
        }
    }
}

impl std::fmt::Display for Semester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An academic term: a year paired with a semester.
///
/// Terms are values. Two terms with the same year and semester are the
/// same term, and storage enforces that pairing to be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    pub year: i32,
    pub semester: Semester,
}

impl Term {
    #[must_use]
    pub const fn new(year: i32, semester: Semester) -> Self {
        Self { year, semester }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.semester, self.year)
    }
}

/// Where a hackathon sits relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HackathonStatus {
    /// Starts after the reference day.
    Future,
    /// The reference day falls within the hackathon's dates.
    Present,
    /// Ended before the reference day.
    Past,
}

impl HackathonStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Future => "FUTURE",
            Self::Present => "PRESENT",
            Self::Past => "PAST",
        }
    }
}

/// A hackathon held during one term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hackathon {
    pub id: i64,
    pub term: Term,
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
}

impl Hackathon {
    /// Classifies the hackathon against `today`.
    ///
    /// Both the start and end dates count as part of the hackathon.
    #[must_use]
    pub fn status(&self, today: Date) -> HackathonStatus {
        if today < self.start_date {
            HackathonStatus::Future
        } else if today > self.end_date {
            HackathonStatus::Past
        } else {
            HackathonStatus::Present
        }
    }
}

/// An event, optionally attached to a hackathon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub hackathon_id: Option<i64>,
}

/// A sponsor. Sponsor details belong to the sponsor service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: i64,
}

/// A user. User details belong to the user service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
}
