// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Term mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::{Semester, Term};
use tracing::{debug, warn};

use crate::data_models::NewTerm;
use crate::diesel_schema::{hackathons, terms};
use crate::error::PersistenceError;
use crate::queries::terms::{find_term, find_term_id};
use crate::term_cache::TermSnapshot;

/// Outcome of resolving a term inside a write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermResolution {
    pub term_id: i64,
    /// True if the pairing did not come from the cache. The caller should
    /// remember it once the transaction has committed.
    pub learned: bool,
}

/// Resolves a term to its identifier, inserting the term if it is new.
///
/// The cache is only read here. A term inserted by a transaction that later
/// rolls back must never end up cached.
///
/// Terms can be edited in place, so a cache hit is checked against the
/// stored row before it is used. A hit that disagrees is forgotten and the
/// term is resolved from storage instead.
///
/// # Errors
///
/// Returns an error if a query or the insert fails.
pub fn resolve_or_create_term(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    term: Term,
) -> Result<TermResolution, PersistenceError> {
    if let Some(term_id) = cache.resolve(term.year, term.semester) {
        if find_term(conn, term_id)? == Some(term) {
            return Ok(TermResolution {
                term_id,
                learned: false,
            });
        }
        warn!(term_id, %term, "Cached term disagrees with storage");
        cache.forget(term_id);
    }

    if let Some(term_id) = find_term_id(conn, term)? {
        return Ok(TermResolution {
            term_id,
            learned: true,
        });
    }

    let term_id: i64 = diesel::insert_into(terms::table)
        .values(&NewTerm {
            year: term.year,
            semester: term.semester.as_str(),
        })
        .returning(terms::id)
        .get_result(conn)?;
    debug!(term_id, %term, "Inserted term");

    Ok(TermResolution {
        term_id,
        learned: true,
    })
}

/// Changes the year of the term a hackathon is held in.
///
/// The term row itself is updated, so every hackathon sharing the term
/// moves with it.
///
/// # Errors
///
/// Returns `PersistenceError::HackathonNotFound` if no term row was updated,
/// or a storage error (including a uniqueness conflict with another term).
pub fn update_term_year_for_hackathon(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    year: i32,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        terms::table.filter(
            terms::id.eq_any(
                hackathons::table
                    .filter(hackathons::id.eq(hackathon_id))
                    .select(hackathons::term_id),
            ),
        ),
    )
    .set(terms::year.eq(year))
    .execute(conn)?;

    if updated != 1 {
        return Err(PersistenceError::HackathonNotFound(hackathon_id));
    }
    Ok(())
}

/// Changes the semester of the term a hackathon is held in.
///
/// # Errors
///
/// Returns `PersistenceError::HackathonNotFound` if no term row was updated,
/// or a storage error (including a uniqueness conflict with another term).
pub fn update_term_semester_for_hackathon(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    semester: Semester,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(
        terms::table.filter(
            terms::id.eq_any(
                hackathons::table
                    .filter(hackathons::id.eq(hackathon_id))
                    .select(hackathons::term_id),
            ),
        ),
    )
    .set(terms::semester.eq(semester.as_str()))
    .execute(conn)?;

    if updated != 1 {
        return Err(PersistenceError::HackathonNotFound(hackathon_id));
    }
    Ok(())
}
