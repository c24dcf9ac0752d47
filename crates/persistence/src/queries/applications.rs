// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::HackathonApplication;

use crate::data_models::ApplicationRow;
use crate::diesel_schema::hackathon_applications;
use crate::error::PersistenceError;

/// Loads one user's application to a hackathon.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn find_application(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
) -> Result<Option<HackathonApplication>, PersistenceError> {
    hackathon_applications::table
        .find((hackathon_id, user_id))
        .select(ApplicationRow::as_select())
        .first::<ApplicationRow>(conn)
        .optional()?
        .map(HackathonApplication::try_from)
        .transpose()
}

/// Lists every application a user has submitted, newest hackathon first.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn list_applications_by_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Vec<HackathonApplication>, PersistenceError> {
    hackathon_applications::table
        .filter(hackathon_applications::user_id.eq(user_id))
        .order(hackathon_applications::hackathon_id.desc())
        .select(ApplicationRow::as_select())
        .load::<ApplicationRow>(conn)?
        .into_iter()
        .map(HackathonApplication::try_from)
        .collect()
}

/// Loads the applications of the given users to a hackathon, ordered by
/// user identifier descending.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn list_applications_for_users(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_ids: &[i64],
) -> Result<Vec<HackathonApplication>, PersistenceError> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    hackathon_applications::table
        .filter(hackathon_applications::hackathon_id.eq(hackathon_id))
        .filter(hackathon_applications::user_id.eq_any(user_ids))
        .order(hackathon_applications::user_id.desc())
        .select(ApplicationRow::as_select())
        .load::<ApplicationRow>(conn)?
        .into_iter()
        .map(HackathonApplication::try_from)
        .collect()
}
