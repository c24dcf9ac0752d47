// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Term queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::Term;

use crate::data_models::TermRow;
use crate::diesel_schema::terms;
use crate::error::PersistenceError;
use crate::term_cache::TermSnapshot;

/// Finds the stored identifier of a term.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_term_id(conn: &mut SqliteConnection, term: Term) -> Result<Option<i64>, PersistenceError> {
    Ok(terms::table
        .filter(terms::year.eq(term.year))
        .filter(terms::semester.eq(term.semester.as_str()))
        .select(terms::id)
        .first::<i64>(conn)
        .optional()?)
}

/// Loads a term by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the stored semester is invalid.
pub fn find_term(conn: &mut SqliteConnection, term_id: i64) -> Result<Option<Term>, PersistenceError> {
    terms::table
        .find(term_id)
        .select(TermRow::as_select())
        .first::<TermRow>(conn)
        .optional()?
        .map(|row| row.to_term())
        .transpose()
}

/// Resolves a term identifier to its term, consulting the cache first.
///
/// A term read from storage is remembered for later lookups.
///
/// # Errors
///
/// Returns `PersistenceError::ReconstructionError` if no such term exists;
/// term identifiers only ever come from foreign keys, so a dangling one
/// means the stored data is inconsistent.
pub fn term_for_id(
    conn: &mut SqliteConnection,
    cache: &TermSnapshot<'_>,
    term_id: i64,
) -> Result<Term, PersistenceError> {
    if let Some(term) = cache.lookup(term_id) {
        return Ok(term);
    }

    let term = find_term(conn, term_id)?.ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("term {term_id} does not exist"))
    })?;
    cache.remember(term_id, term);
    Ok(term)
}
