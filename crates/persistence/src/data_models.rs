// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes read from and written to storage, and their conversion into
//! domain values.

use diesel::prelude::*;
use hackathon_domain::{
    ApplicationId, ApplicationStatus, Hackathon, HackathonApplication, Semester, Term, parse_date,
};

use crate::diesel_schema::{hackathon_applications, hackathons, terms};
use crate::error::PersistenceError;

/// A hackathon row as stored, before its term is attached.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hackathons)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HackathonRow {
    pub id: i64,
    pub term_id: i64,
    pub start_date: String,
    pub end_date: String,
}

impl HackathonRow {
    /// Attaches the resolved term and parses the stored dates.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if a stored date is
    /// malformed.
    pub fn into_hackathon(self, term: Term) -> Result<Hackathon, PersistenceError> {
        Ok(Hackathon {
            id: self.id,
            term,
            start_date: parse_stored_date(&self.start_date)?,
            end_date: parse_stored_date(&self.end_date)?,
        })
    }
}

/// A term row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = terms)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TermRow {
    pub id: i64,
    pub year: i32,
    pub semester: String,
}

impl TermRow {
    /// # Errors
    ///
    /// Returns `PersistenceError::ReconstructionError` if the stored semester
    /// is not a known token.
    pub fn to_term(&self) -> Result<Term, PersistenceError> {
        let semester: Semester = self.semester.parse().map_err(|e| {
            PersistenceError::ReconstructionError(format!("term {}: {e}", self.id))
        })?;
        Ok(Term::new(self.year, semester))
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = terms)]
pub struct NewTerm<'a> {
    pub year: i32,
    pub semester: &'a str,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = hackathons)]
pub struct NewHackathon {
    pub term_id: i64,
    pub start_date: String,
    pub end_date: String,
}

/// An application row as stored.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = hackathon_applications)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ApplicationRow {
    pub hackathon_id: i64,
    pub user_id: i64,
    pub why_attend: String,
    pub what_do_you_want_to_learn: String,
    pub share_info_with_sponsors: i32,
    pub application_status: String,
    pub resume_blob_id: Option<String>,
}

impl TryFrom<ApplicationRow> for HackathonApplication {
    type Error = PersistenceError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let id = ApplicationId::new(row.hackathon_id, row.user_id);
        let status: ApplicationStatus = row
            .application_status
            .parse()
            .map_err(|e| PersistenceError::ReconstructionError(format!("application {id}: {e}")))?;

        Ok(Self {
            id,
            status,
            why_attend: decode_string_list(&row.why_attend)?,
            what_do_you_want_to_learn: decode_string_list(&row.what_do_you_want_to_learn)?,
            share_info_with_sponsors: row.share_info_with_sponsors != 0,
            resume_blob_id: row.resume_blob_id,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = hackathon_applications)]
pub struct NewApplication<'a> {
    pub hackathon_id: i64,
    pub user_id: i64,
    pub why_attend: String,
    pub what_do_you_want_to_learn: String,
    pub share_info_with_sponsors: i32,
    pub application_status: &'a str,
    pub resume_blob_id: Option<&'a str>,
    pub created_at: String,
}

fn parse_stored_date(value: &str) -> Result<time::Date, PersistenceError> {
    parse_date(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Encodes a list of free-text answers for a TEXT column.
///
/// # Errors
///
/// Returns `PersistenceError::SerializationError` if encoding fails.
pub fn encode_string_list(values: &[String]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(values)?)
}

fn decode_string_list(value: &str) -> Result<Vec<String>, PersistenceError> {
    serde_json::from_str(value)
        .map_err(|e| PersistenceError::ReconstructionError(format!("string list: {e}")))
}
