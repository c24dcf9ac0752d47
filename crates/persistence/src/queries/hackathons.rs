// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Hackathon queries.
//!
//! Single-hackathon lookups read the bare row and resolve its term through
//! the term cache. Listings join the terms table instead and feed every term
//! they see back into the cache.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::{Hackathon, HackathonFilter};

use crate::data_models::{HackathonRow, TermRow};
use crate::diesel_schema::{events, hackathon_sponsors, hackathons, terms};
use crate::error::PersistenceError;
use crate::queries::terms::term_for_id;
use crate::term_cache::TermSnapshot;

/// Builds a domain hackathon from a stored row.
///
/// # Errors
///
/// Returns an error if the term cannot be resolved or stored data is invalid.
pub fn hydrate(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    row: HackathonRow,
) -> Result<Hackathon, PersistenceError> {
    let term = term_for_id(conn, cache, row.term_id)?;
    row.into_hackathon(term)
}

fn hydrate_joined(
    cache: &TermSnapshot<'_>,
    rows: Vec<(HackathonRow, TermRow)>,
) -> Result<Vec<Hackathon>, PersistenceError> {
    rows.into_iter()
        .map(|(hackathon_row, term_row)| {
            let term = term_row.to_term()?;
            cache.remember(term_row.id, term);
            hackathon_row.into_hackathon(term)
        })
        .collect()
}

/// Loads the stored row of a hackathon.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_hackathon_row(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
) -> Result<Option<HackathonRow>, PersistenceError> {
    Ok(hackathons::table
        .find(hackathon_id)
        .select(HackathonRow::as_select())
        .first(conn)
        .optional()?)
}

/// Loads a hackathon by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn find_hackathon(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    hackathon_id: i64,
) -> Result<Option<Hackathon>, PersistenceError> {
    find_hackathon_row(conn, hackathon_id)?
        .map(|row| hydrate(conn, cache, row))
        .transpose()
}

/// Loads the hackathon held during a term.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn find_hackathon_by_term_id(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    term_id: i64,
) -> Result<Option<Hackathon>, PersistenceError> {
    hackathons::table
        .filter(hackathons::term_id.eq(term_id))
        .order(hackathons::id.asc())
        .select(HackathonRow::as_select())
        .first(conn)
        .optional()?
        .map(|row| hydrate(conn, cache, row))
        .transpose()
}

/// Loads the hackathon an event belongs to.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn find_hackathon_by_event(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    event_id: i64,
) -> Result<Option<Hackathon>, PersistenceError> {
    hackathons::table
        .inner_join(events::table)
        .filter(events::id.eq(event_id))
        .select(HackathonRow::as_select())
        .first(conn)
        .optional()?
        .map(|row| hydrate(conn, cache, row))
        .transpose()
}

/// Loads the next hackathon that has not yet ended.
///
/// A hackathon ending on `today` is considered over. Dates are stored as
/// `YYYY-MM-DD`, so text comparison orders them chronologically.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn find_current_hackathon(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    today: &str,
) -> Result<Option<Hackathon>, PersistenceError> {
    hackathons::table
        .filter(hackathons::end_date.gt(today))
        .order((hackathons::end_date.asc(), hackathons::id.asc()))
        .select(HackathonRow::as_select())
        .first(conn)
        .optional()?
        .map(|row| hydrate(conn, cache, row))
        .transpose()
}

/// Lists hackathons whose term matches the filter, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn list_hackathons(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    filter: HackathonFilter,
) -> Result<Vec<Hackathon>, PersistenceError> {
    let mut query = hackathons::table
        .inner_join(terms::table)
        .filter(terms::year.eq(filter.year))
        .select((HackathonRow::as_select(), TermRow::as_select()))
        .into_boxed();
    if let Some(semester) = filter.semester {
        query = query.filter(terms::semester.eq(semester.as_str()));
    }

    let rows = query
        .order(hackathons::id.asc())
        .load::<(HackathonRow, TermRow)>(conn)?;
    hydrate_joined(cache, rows)
}

/// Lists the hackathons a sponsor supports, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or stored data is invalid.
pub fn list_hackathons_by_sponsor(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    sponsor_id: i64,
) -> Result<Vec<Hackathon>, PersistenceError> {
    let rows = hackathons::table
        .inner_join(hackathon_sponsors::table)
        .inner_join(terms::table)
        .filter(hackathon_sponsors::sponsor_id.eq(sponsor_id))
        .order(hackathons::id.asc())
        .select((HackathonRow::as_select(), TermRow::as_select()))
        .load::<(HackathonRow, TermRow)>(conn)?;
    hydrate_joined(cache, rows)
}
