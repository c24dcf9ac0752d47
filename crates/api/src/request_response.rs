// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw strings where the caller may send something invalid,
//! so that handlers can report which field was wrong.

use hackathon_domain::{ApplicationStatus, Hackathon, HackathonApplication, HackathonStatus};

/// Default page size when a listing request names none.
pub const DEFAULT_PAGE_SIZE: i64 = 25;

const fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// API request to create a hackathon.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateHackathonRequest {
    /// The term year (e.g., 2023).
    pub year: i32,
    /// The term semester (`FALL`, `SPRING`, `SUMMER`).
    pub semester: String,
    /// First day (ISO 8601).
    pub start_date: String,
    /// Last day (ISO 8601).
    pub end_date: String,
}

/// API request to change a hackathon. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UpdateHackathonRequest {
    pub year: Option<i32>,
    pub semester: Option<String>,
    pub add_events: Vec<i64>,
    pub remove_events: Vec<i64>,
    pub add_sponsors: Vec<i64>,
    pub remove_sponsors: Vec<i64>,
    pub add_participants: Vec<i64>,
    pub remove_participants: Vec<i64>,
}

/// Query for listing hackathons in a term year.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListHackathonsRequest {
    pub year: i32,
    pub semester: Option<String>,
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PageQuery {
    /// Page size (at least 1).
    #[serde(default = "default_page_size")]
    pub first: i64,
    /// Opaque cursor from a previous page's `end_cursor`.
    pub after: Option<String>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            first: DEFAULT_PAGE_SIZE,
            after: None,
        }
    }
}

/// One page of a hackathon's applications in a status.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationsQuery {
    /// `WAITING`, `ACCEPTED`, or `REJECTED`.
    pub status: String,
    #[serde(default = "default_page_size")]
    pub first: i64,
    pub after: Option<String>,
}

/// API request carrying an applicant's answers.
///
/// On apply, absent answers are stored empty. On update, absent answers are
/// left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ApplicationRequest {
    pub why_attend: Option<Vec<String>>,
    pub what_do_you_want_to_learn: Option<Vec<String>>,
    pub share_info_with_sponsors: Option<bool>,
    /// Reference to a resume uploaded elsewhere.
    pub resume_blob_id: Option<String>,
}

/// A hackathon as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HackathonInfo {
    pub id: i64,
    pub year: i32,
    pub semester: String,
    /// First day (ISO 8601).
    pub start_date: String,
    /// Last day (ISO 8601).
    pub end_date: String,
    /// `FUTURE`, `PRESENT`, or `PAST` relative to the day of the request.
    pub status: String,
}

impl HackathonInfo {
    /// Renders a hackathon, deriving its status relative to `today`.
    #[must_use]
    pub fn from_hackathon(hackathon: &Hackathon, today: time::Date) -> Self {
        let status: &str = match hackathon.status(today) {
            HackathonStatus::Future => "FUTURE",
            HackathonStatus::Present => "PRESENT",
            HackathonStatus::Past => "PAST",
        };
        Self {
            id: hackathon.id,
            year: hackathon.term.year,
            semester: hackathon.term.semester.to_string(),
            start_date: hackathon.start_date.to_string(),
            end_date: hackathon.end_date.to_string(),
            status: status.to_string(),
        }
    }
}

/// API response listing hackathons.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListHackathonsResponse {
    pub hackathons: Vec<HackathonInfo>,
}

/// API response for a deleted hackathon.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteHackathonResponse {
    pub hackathon_id: i64,
    /// False if no hackathon had this identifier.
    pub deleted: bool,
    pub message: String,
}

/// An application as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationInfo {
    /// Composite identifier `"{hackathon_id}-{user_id}"`.
    pub id: String,
    pub hackathon_id: i64,
    pub user_id: i64,
    pub status: String,
    pub why_attend: Vec<String>,
    pub what_do_you_want_to_learn: Vec<String>,
    pub share_info_with_sponsors: bool,
    pub resume_blob_id: Option<String>,
}

impl From<&HackathonApplication> for ApplicationInfo {
    fn from(application: &HackathonApplication) -> Self {
        Self {
            id: application.id.to_string(),
            hackathon_id: application.hackathon_id(),
            user_id: application.user_id(),
            status: application.status.to_string(),
            why_attend: application.why_attend.clone(),
            what_do_you_want_to_learn: application.what_do_you_want_to_learn.clone(),
            share_info_with_sponsors: application.share_info_with_sponsors,
            resume_blob_id: application.resume_blob_id.clone(),
        }
    }
}

/// API response listing applications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListApplicationsResponse {
    pub applications: Vec<ApplicationInfo>,
}

/// API response for a submitted application.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplyResponse {
    pub hackathon_id: i64,
    pub user_id: i64,
    pub success: bool,
    pub message: String,
}

/// API response for an accepted or denied applicant.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecisionResponse {
    pub hackathon_id: i64,
    pub user_id: i64,
    pub status: String,
    pub success: bool,
    pub message: String,
}

impl DecisionResponse {
    #[must_use]
    pub fn new(hackathon_id: i64, user_id: i64, status: ApplicationStatus) -> Self {
        let verb: &str = match status {
            ApplicationStatus::Accepted => "Accepted",
            ApplicationStatus::Rejected => "Denied",
            ApplicationStatus::Waiting => "Reopened",
        };
        Self {
            hackathon_id,
            user_id,
            status: status.to_string(),
            success: true,
            message: format!("{verb} user {user_id} for hackathon {hackathon_id}"),
        }
    }
}
