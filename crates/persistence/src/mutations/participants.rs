// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participation roster mutations.
//!
//! A participation row with no `accepted_at` marks an applicant; once
//! `accepted_at` is set the user attends the hackathon.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::diesel_schema::hackathon_participants;
use crate::error::PersistenceError;

/// Adds a pending participant. Existing rows, accepted or not, are kept.
///
/// # Errors
///
/// Returns an error if the insert fails, for example because the user does
/// not exist.
pub fn add_pending_participant(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(hackathon_participants::table)
        .values((
            hackathon_participants::hackathon_id.eq(hackathon_id),
            hackathon_participants::user_id.eq(user_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Removes a participant, pending or accepted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn remove_participant(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(hackathon_participants::table.find((hackathon_id, user_id))).execute(conn)?;
    Ok(())
}

/// Removes a participant only while they are still pending.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn remove_pending_participant(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(
        hackathon_participants::table
            .find((hackathon_id, user_id))
            .filter(hackathon_participants::accepted_at.is_null()),
    )
    .execute(conn)?;
    Ok(())
}

/// Marks a participant as accepted, creating the row if needed.
///
/// An already accepted participant keeps the original timestamp.
///
/// # Errors
///
/// Returns an error if a statement fails.
pub fn mark_participant_accepted(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
    accepted_at: &str,
) -> Result<(), PersistenceError> {
    add_pending_participant(conn, hackathon_id, user_id)?;
    diesel::update(
        hackathon_participants::table
            .find((hackathon_id, user_id))
            .filter(hackathon_participants::accepted_at.is_null()),
    )
    .set(hackathon_participants::accepted_at.eq(accepted_at))
    .execute(conn)?;
    Ok(())
}
