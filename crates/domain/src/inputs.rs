// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Semester, Term};
use serde::Deserialize;
use time::Date;

/// Everything needed to create a hackathon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HackathonCreateInput {
    pub term: Term,
    pub start_date: Date,
    pub end_date: Date,
}

/// An incremental change to a hackathon.
///
/// Absent scalar fields and empty lists leave the corresponding state alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HackathonUpdateInput {
    pub year: Option<i32>,
    pub semester: Option<Semester>,
    pub add_events: Vec<i64>,
    pub remove_events: Vec<i64>,
    pub add_sponsors: Vec<i64>,
    pub remove_sponsors: Vec<i64>,
    pub add_participants: Vec<i64>,
    pub remove_participants: Vec<i64>,
}

impl HackathonUpdateInput {
    /// Returns true if applying this input would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.semester.is_none()
            && self.add_events.is_empty()
            && self.remove_events.is_empty()
            && self.add_sponsors.is_empty()
            && self.remove_sponsors.is_empty()
            && self.add_participants.is_empty()
            && self.remove_participants.is_empty()
    }

    /// Returns true if the hackathon's term is changed in place.
    #[must_use]
    pub const fn changes_term(&self) -> bool {
        self.year.is_some() || self.semester.is_some()
    }
}

/// Application answers supplied when applying or editing an application.
///
/// When applying, absent lists are stored empty and an absent flag is
/// stored as `false`. When editing, absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HackathonApplicationInput {
    pub why_attend: Option<Vec<String>>,
    pub what_do_you_want_to_learn: Option<Vec<String>>,
    pub share_info_with_sponsors: Option<bool>,
    pub resume_blob_id: Option<String>,
}

impl HackathonApplicationInput {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.why_attend.is_none()
            && self.what_do_you_want_to_learn.is_none()
            && self.share_info_with_sponsors.is_none()
            && self.resume_blob_id.is_none()
    }
}

/// Selects hackathons by term year and, optionally, semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct HackathonFilter {
    pub year: i32,
    pub semester: Option<Semester>,
}
