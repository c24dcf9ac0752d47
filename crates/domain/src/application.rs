// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hackathon applications and their review lifecycle.
//!
//! An application starts out `WAITING` and is decided exactly once, either
//! `ACCEPTED` or `REJECTED`. Decided applications never change status again.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Review status of a hackathon application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Submitted and not yet reviewed.
    Waiting,
    /// Applicant was accepted and now attends the hackathon.
    Accepted,
    /// Applicant was denied.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Returns true if this status has been decided and cannot change.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` unless the application
    /// is `WAITING` and the target is a decision.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "application has already been decided".to_string(),
            });
        }

        if new_status.is_terminal() {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "applications can only move to ACCEPTED or REJECTED".to_string(),
            })
        }
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(Self::Waiting),
            "ACCEPTED" => Ok(Self::Accepted),
            "REJECTED" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidApplicationStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identifier of an application, rendered as `<hackathon_id>-<user_id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId {
    pub hackathon_id: i64,
    pub user_id: i64,
}

impl ApplicationId {
    #[must_use]
    pub const fn new(hackathon_id: i64, user_id: i64) -> Self {
        Self {
            hackathon_id,
            user_id,
        }
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.hackathon_id, self.user_id)
    }
}

impl FromStr for ApplicationId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidApplicationId(s.to_string());
        let (hackathon, user) = s.split_once('-').ok_or_else(invalid)?;
        let hackathon_id: i64 = hackathon.parse().map_err(|_| invalid())?;
        let user_id: i64 = user.parse().map_err(|_| invalid())?;
        Ok(Self::new(hackathon_id, user_id))
    }
}

impl Serialize for ApplicationId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A user's application to one hackathon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HackathonApplication {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    pub why_attend: Vec<String>,
    pub what_do_you_want_to_learn: Vec<String>,
    pub share_info_with_sponsors: bool,
    /// Reference to the résumé held in blob storage, if one was uploaded.
    pub resume_blob_id: Option<String>,
}

impl HackathonApplication {
    #[must_use]
    pub const fn hackathon_id(&self) -> i64 {
        self.id.hackathon_id
    }

    #[must_use]
    pub const fn user_id(&self) -> i64 {
        self.id.user_id
    }
}
