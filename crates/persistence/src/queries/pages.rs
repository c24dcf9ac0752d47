// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Keyset pagination over a hackathon's relations.
//!
//! Every relation is paged the same way:
//!
//! 1. Select the relation's keys for the hackathon, strictly below the
//!    `after` key when one is given, in descending order, limited to
//!    `first + 1` rows. The extra row only signals that another page exists
//!    and is dropped.
//! 2. Count all of the relation's rows for the hackathon, ignoring `after`.
//!
//! Callers run both steps in one read transaction so the count and the page
//! describe the same snapshot.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::{ApplicationStatus, PageRequest};

use crate::diesel_schema::{events, hackathon_applications, hackathon_participants, hackathon_sponsors};
use crate::error::PersistenceError;

/// A relation of a hackathon that can be listed page by page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Sponsors linked to the hackathon, keyed by sponsor id.
    Sponsors,
    /// Events attached to the hackathon, keyed by event id.
    Events,
    /// Participants not yet accepted, keyed by user id.
    Applicants,
    /// Accepted participants, keyed by user id.
    Attendees,
    /// Applications in one status, keyed by user id.
    Applications(ApplicationStatus),
}

impl Relation {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sponsors => "sponsors",
            Self::Events => "events",
            Self::Applicants => "applicants",
            Self::Attendees => "attendees",
            Self::Applications(_) => "applications",
        }
    }
}

/// Keys of one page plus what is needed to describe it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPage {
    pub keys: Vec<i64>,
    pub total_count: i64,
    pub has_next_page: bool,
}

/// Fetches one page of keys and the relation's total size.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `hackathon_id` - The hackathon owning the relation
/// * `relation` - Which relation to page through
/// * `request` - Page size and starting cursor
///
/// # Errors
///
/// Returns an error if either query fails.
pub fn fetch_key_page(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    relation: Relation,
    request: &PageRequest,
) -> Result<KeyPage, PersistenceError> {
    let mut keys = load_keys(conn, hackathon_id, relation, request)?;
    let total_count = count_relation(conn, hackathon_id, relation)?;

    let page_len = usize::try_from(request.first()).unwrap_or(usize::MAX);
    let has_next_page = keys.len() > page_len;
    keys.truncate(page_len);

    Ok(KeyPage {
        keys,
        total_count,
        has_next_page,
    })
}

fn load_keys(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    relation: Relation,
    request: &PageRequest,
) -> QueryResult<Vec<i64>> {
    let limit = request.probe_limit();
    let after = request.after();

    match relation {
        Relation::Sponsors => {
            let mut query = hackathon_sponsors::table
                .filter(hackathon_sponsors::hackathon_id.eq(hackathon_id))
                .select(hackathon_sponsors::sponsor_id)
                .into_boxed();
            if let Some(after) = after {
                query = query.filter(hackathon_sponsors::sponsor_id.lt(after));
            }
            query
                .order(hackathon_sponsors::sponsor_id.desc())
                .limit(limit)
                .load(conn)
        }
        Relation::Events => {
            let mut query = events::table
                .filter(events::hackathon_id.eq(hackathon_id))
                .select(events::id)
                .into_boxed();
            if let Some(after) = after {
                query = query.filter(events::id.lt(after));
            }
            query.order(events::id.desc()).limit(limit).load(conn)
        }
        Relation::Applicants | Relation::Attendees => {
            let mut query = hackathon_participants::table
                .filter(hackathon_participants::hackathon_id.eq(hackathon_id))
                .select(hackathon_participants::user_id)
                .into_boxed();
            query = if relation == Relation::Attendees {
                query.filter(hackathon_participants::accepted_at.is_not_null())
            } else {
                query.filter(hackathon_participants::accepted_at.is_null())
            };
            if let Some(after) = after {
                query = query.filter(hackathon_participants::user_id.lt(after));
            }
            query
                .order(hackathon_participants::user_id.desc())
                .limit(limit)
                .load(conn)
        }
        Relation::Applications(status) => {
            let mut query = hackathon_applications::table
                .filter(hackathon_applications::hackathon_id.eq(hackathon_id))
                .filter(hackathon_applications::application_status.eq(status.as_str()))
                .select(hackathon_applications::user_id)
                .into_boxed();
            if let Some(after) = after {
                query = query.filter(hackathon_applications::user_id.lt(after));
            }
            query
                .order(hackathon_applications::user_id.desc())
                .limit(limit)
                .load(conn)
        }
    }
}

fn count_relation(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    relation: Relation,
) -> QueryResult<i64> {
    match relation {
        Relation::Sponsors => hackathon_sponsors::table
            .filter(hackathon_sponsors::hackathon_id.eq(hackathon_id))
            .count()
            .get_result(conn),
        Relation::Events => events::table
            .filter(events::hackathon_id.eq(hackathon_id))
            .count()
            .get_result(conn),
        Relation::Applicants => hackathon_participants::table
            .filter(hackathon_participants::hackathon_id.eq(hackathon_id))
            .filter(hackathon_participants::accepted_at.is_null())
            .count()
            .get_result(conn),
        Relation::Attendees => hackathon_participants::table
            .filter(hackathon_participants::hackathon_id.eq(hackathon_id))
            .filter(hackathon_participants::accepted_at.is_not_null())
            .count()
            .get_result(conn),
        Relation::Applications(status) => hackathon_applications::table
            .filter(hackathon_applications::hackathon_id.eq(hackathon_id))
            .filter(hackathon_applications::application_status.eq(status.as_str()))
            .count()
            .get_result(conn),
    }
}
