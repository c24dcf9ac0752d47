// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hackathon, event and sponsor mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::format_date;
use time::Date;

use crate::data_models::NewHackathon;
use crate::diesel_schema::{events, hackathon_sponsors, hackathons};
use crate::error::PersistenceError;

/// Inserts a hackathon row and returns its identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_hackathon(
    conn: &mut SqliteConnection,
    term_id: i64,
    start_date: Date,
    end_date: Date,
) -> Result<i64, PersistenceError> {
    let row = NewHackathon {
        term_id,
        start_date: format_date(start_date)?,
        end_date: format_date(end_date)?,
    };

    Ok(diesel::insert_into(hackathons::table)
        .values(&row)
        .returning(hackathons::id)
        .get_result(conn)?)
}

/// Deletes a hackathon. Returns the number of rows removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_hackathon(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
) -> Result<usize, PersistenceError> {
    Ok(diesel::delete(hackathons::table.find(hackathon_id)).execute(conn)?)
}

/// Reads the term identifier of a hackathon.
///
/// # Errors
///
/// Returns `PersistenceError::HackathonNotFound` if the hackathon does not
/// exist.
pub fn term_id_of(conn: &mut SqliteConnection, hackathon_id: i64) -> Result<i64, PersistenceError> {
    hackathons::table
        .find(hackathon_id)
        .select(hackathons::term_id)
        .first::<i64>(conn)
        .optional()?
        .ok_or(PersistenceError::HackathonNotFound(hackathon_id))
}

/// Points an event at a hackathon, or detaches it with `None`.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the event does not exist.
pub fn assign_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    hackathon_id: Option<i64>,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(events::table.find(event_id))
        .set(events::hackathon_id.eq(hackathon_id))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::EventNotFound(event_id));
    }
    Ok(())
}

/// Links a sponsor to a hackathon. Linking twice is a no-op.
///
/// # Errors
///
/// Returns an error if the insert fails, for example because the sponsor
/// does not exist.
pub fn add_sponsor(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    sponsor_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_or_ignore_into(hackathon_sponsors::table)
        .values((
            hackathon_sponsors::hackathon_id.eq(hackathon_id),
            hackathon_sponsors::sponsor_id.eq(sponsor_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Unlinks a sponsor from a hackathon. Unlinking a missing link is a no-op.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn remove_sponsor(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    sponsor_id: i64,
) -> Result<(), PersistenceError> {
    diesel::delete(hackathon_sponsors::table.find((hackathon_id, sponsor_id))).execute(conn)?;
    Ok(())
}
