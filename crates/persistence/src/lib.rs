// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data access core for hackathons.
//!
//! This crate maps the relational schema (terms, hackathons, events,
//! sponsors, users, participation and applications) onto the domain types
//! of `hackathon-domain`. It is built on Diesel over `SQLite` with an `r2d2`
//! connection pool.
//!
//! ## Structure
//!
//! - `queries/` and `mutations/` hold the individual statements. They take a
//!   bare connection and never open transactions.
//! - `executor` decides how a group of statements runs: `Direct` for single
//!   statements, `Transactional` for anything that must be atomic or must
//!   read a consistent snapshot.
//! - `term_cache` remembers term identifiers in both directions.
//! - `Persistence` (this module) is the only public entry point. Each of its
//!   operations checks out exactly one pooled connection.
//!
//! ## Cancellation
//!
//! A `Persistence` handle may carry a `CancellationToken`. Transactions check
//! it before they begin and again before they commit, so work abandoned by
//! its caller is rolled back instead of half-applied.
//!
//! ## Testing
//!
//! Tests run against private in-memory databases (`new_in_memory()`), each
//! with its own name so tests never observe each other.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod backend;
mod config;
mod data_models;
mod diesel_schema;
mod error;
mod executor;
mod mutations;
mod queries;
mod term_cache;

#[cfg(test)]
mod tests;

use std::path::Path;
use std::sync::Arc;

use diesel::SqliteConnection;
use hackathon_domain::{
    ApplicationStatus, Connection, Event, Hackathon, HackathonApplication,
    HackathonApplicationInput, HackathonCreateInput, HackathonFilter, HackathonUpdateInput,
    PageKey, PageRequest, Semester, Sponsor, Term, User, format_date, validate_create_input,
    validate_update_input,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use backend::sqlite::SqlitePool;

pub use config::{DEFAULT_MAX_CONNECTIONS, PersistenceConfig};
pub use error::PersistenceError;
pub use executor::{Direct, Executor, TransactionMode, Transactional};
pub use queries::{KeyPage, Relation};
pub use term_cache::{TermCache, TermSnapshot};

/// Persistence adapter for the hackathon data core.
///
/// Cloning is cheap: clones share the connection pool and the term cache.
#[derive(Debug, Clone)]
pub struct Persistence {
    pool: SqlitePool,
    term_cache: Arc<TermCache>,
    cancellation: Option<CancellationToken>,
}

impl Persistence {
    /// Creates a new persistence adapter with a private in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        Self::new_with_config(&PersistenceConfig::in_memory())
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;
        Self::new_with_config(&PersistenceConfig::file(path_str))
    }

    /// Creates a new persistence adapter from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built or migrations fail.
    pub fn new_with_config(config: &PersistenceConfig) -> Result<Self, PersistenceError> {
        let pool = backend::sqlite::initialize_pool(config)?;
        Ok(Self {
            pool,
            term_cache: Arc::new(TermCache::new()),
            cancellation: None,
        })
    }

    /// Returns a handle whose transactions roll back once `token` is
    /// cancelled. The pool and term cache stay shared.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            pool: self.pool.clone(),
            term_cache: Arc::clone(&self.term_cache),
            cancellation: Some(token),
        }
    }

    /// The term cache shared by every clone of this adapter.
    #[must_use]
    pub fn term_cache(&self) -> &TermCache {
        &self.term_cache
    }

    /// Verifies that foreign key enforcement is enabled on a pooled
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&self) -> Result<(), PersistenceError> {
        self.run(&Direct, backend::sqlite::verify_foreign_key_enforcement)
    }

    /// Checks out one connection and runs `op` on it under `executor`.
    fn run<T, E, F>(&self, executor: &E, op: F) -> Result<T, PersistenceError>
    where
        E: Executor,
        F: FnOnce(&mut SqliteConnection) -> Result<T, PersistenceError>,
    {
        let mut pooled = self.pool.get()?;
        executor.execute(&mut pooled, op)
    }

    fn read_transaction(&self) -> Transactional<'_> {
        Transactional::read(self.cancellation.as_ref())
    }

    fn write_transaction(&self) -> Transactional<'_> {
        Transactional::write(self.cancellation.as_ref())
    }

    // ========================================================================
    // Hackathon mutations
    // ========================================================================

    /// Creates a hackathon, creating its term first if the term is new.
    ///
    /// # Arguments
    ///
    /// * `input` - The term and dates of the hackathon
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Validation` for invalid input, or a storage
    /// error. Nothing is written unless every step succeeds.
    pub fn create_hackathon(
        &self,
        input: &HackathonCreateInput,
    ) -> Result<Hackathon, PersistenceError> {
        validate_create_input(input)?;
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();

        let (hackathon, resolution) = self.run(&self.write_transaction(), |conn| {
            let resolution = mutations::terms::resolve_or_create_term(conn, cache, input.term)?;
            let id = mutations::hackathons::insert_hackathon(
                conn,
                resolution.term_id,
                input.start_date,
                input.end_date,
            )?;
            let hackathon = Hackathon {
                id,
                term: input.term,
                start_date: input.start_date,
                end_date: input.end_date,
            };
            Ok((hackathon, resolution))
        })?;

        if resolution.learned {
            cache.remember(resolution.term_id, input.term);
        }

        info!(
            hackathon_id = hackathon.id,
            term_id = resolution.term_id,
            term = %hackathon.term,
            "Created hackathon"
        );
        Ok(hackathon)
    }

    /// Applies an incremental update to a hackathon.
    ///
    /// Statements run in a fixed order: term year, term semester, added
    /// events, removed events, sponsors, participants. The updated hackathon
    /// is read back inside the same transaction.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::Validation` for an empty update (before
    /// touching storage), `PersistenceError::HackathonNotFound`,
    /// `PersistenceError::EventNotFound`, or a storage error. Any error rolls
    /// back every statement.
    pub fn update_hackathon(
        &self,
        hackathon_id: i64,
        input: &HackathonUpdateInput,
    ) -> Result<Hackathon, PersistenceError> {
        validate_update_input(input)?;
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();

        let (hackathon, term_id) = self.run(&self.write_transaction(), |conn| {
            let term_id = mutations::hackathons::term_id_of(conn, hackathon_id)?;

            if let Some(year) = input.year {
                mutations::terms::update_term_year_for_hackathon(conn, hackathon_id, year)?;
            }
            if let Some(semester) = input.semester {
                mutations::terms::update_term_semester_for_hackathon(conn, hackathon_id, semester)?;
            }
            for &event_id in &input.add_events {
                mutations::hackathons::assign_event(conn, event_id, Some(hackathon_id))?;
            }
            for &event_id in &input.remove_events {
                mutations::hackathons::assign_event(conn, event_id, None)?;
            }
            for &sponsor_id in &input.add_sponsors {
                mutations::hackathons::add_sponsor(conn, hackathon_id, sponsor_id)?;
            }
            for &sponsor_id in &input.remove_sponsors {
                mutations::hackathons::remove_sponsor(conn, hackathon_id, sponsor_id)?;
            }
            for &user_id in &input.add_participants {
                mutations::participants::add_pending_participant(conn, hackathon_id, user_id)?;
            }
            for &user_id in &input.remove_participants {
                mutations::participants::remove_participant(conn, hackathon_id, user_id)?;
            }

            let row = queries::hackathons::find_hackathon_row(conn, hackathon_id)?
                .ok_or(PersistenceError::HackathonNotFound(hackathon_id))?;
            // A term edited above is stale in the cache until commit
            let term = if input.changes_term() {
                queries::terms::find_term(conn, term_id)?.ok_or_else(|| {
                    PersistenceError::ReconstructionError(format!("term {term_id} does not exist"))
                })?
            } else {
                queries::terms::term_for_id(conn, cache, term_id)?
            };
            Ok((row.into_hackathon(term)?, term_id))
        })?;

        if input.changes_term() {
            self.term_cache.forget(term_id);
        }

        info!(hackathon_id, term_id, "Updated hackathon");
        Ok(hackathon)
    }

    /// Deletes a hackathon. Related rows are removed by the schema's cascades
    /// and its events are detached.
    ///
    /// Returns true if exactly one hackathon was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_hackathon(&self, hackathon_id: i64) -> Result<bool, PersistenceError> {
        let deleted = self.run(&Direct, |conn| {
            mutations::hackathons::delete_hackathon(conn, hackathon_id)
        })?;
        info!(hackathon_id, deleted, "Deleted hackathon");
        Ok(deleted == 1)
    }

    // ========================================================================
    // Hackathon queries
    // ========================================================================

    /// Loads a hackathon by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon(&self, hackathon_id: i64) -> Result<Option<Hackathon>, PersistenceError> {
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        self.run(&self.read_transaction(), |conn| {
            queries::hackathons::find_hackathon(conn, cache, hackathon_id)
        })
    }

    /// Loads the hackathon held in a term. Never creates the term.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_by_term(
        &self,
        year: i32,
        semester: Semester,
    ) -> Result<Option<Hackathon>, PersistenceError> {
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        let term = Term::new(year, semester);

        self.run(&self.read_transaction(), |conn| {
            let term_id = if let Some(term_id) = cache.resolve(year, semester) {
                term_id
            } else {
                let Some(term_id) = queries::terms::find_term_id(conn, term)? else {
                    debug!(%term, "No such term");
                    return Ok(None);
                };
                cache.remember(term_id, term);
                term_id
            };
            queries::hackathons::find_hackathon_by_term_id(conn, cache, term_id)
        })
    }

    /// Loads the hackathon an event is attached to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_by_event(
        &self,
        event_id: i64,
    ) -> Result<Option<Hackathon>, PersistenceError> {
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        self.run(&self.read_transaction(), |conn| {
            queries::hackathons::find_hackathon_by_event(conn, cache, event_id)
        })
    }

    /// Loads the next hackathon that ends after `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_current_hackathon(
        &self,
        today: time::Date,
    ) -> Result<Option<Hackathon>, PersistenceError> {
        let today = format_date(today)?;
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        self.run(&self.read_transaction(), |conn| {
            queries::hackathons::find_current_hackathon(conn, cache, &today)
        })
    }

    /// Lists hackathons by term year and optional semester.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_hackathons(
        &self,
        filter: HackathonFilter,
    ) -> Result<Vec<Hackathon>, PersistenceError> {
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        self.run(&Direct, |conn| {
            queries::hackathons::list_hackathons(conn, cache, filter)
        })
    }

    /// Lists the hackathons a sponsor is linked to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_hackathons_by_sponsor(
        &self,
        sponsor_id: i64,
    ) -> Result<Vec<Hackathon>, PersistenceError> {
        let cache: &TermSnapshot<'_> = &self.term_cache.snapshot();
        self.run(&Direct, |conn| {
            queries::hackathons::list_hackathons_by_sponsor(conn, cache, sponsor_id)
        })
    }

    // ========================================================================
    // Paged relations
    // ========================================================================

    /// Runs the pagination engine and turns the page's keys into items.
    fn page<T, F>(
        &self,
        hackathon_id: i64,
        relation: Relation,
        request: &PageRequest,
        load_items: F,
    ) -> Result<Connection<T>, PersistenceError>
    where
        T: PageKey,
        F: FnOnce(&mut SqliteConnection, &[i64]) -> Result<Vec<T>, PersistenceError>,
    {
        let connection = self.run(&self.read_transaction(), |conn| {
            let page = queries::pages::fetch_key_page(conn, hackathon_id, relation, request)?;
            let items = load_items(conn, &page.keys)?;
            Ok(Connection::from_page(
                items,
                page.total_count,
                page.has_next_page,
            ))
        })?;

        debug!(
            hackathon_id,
            relation = relation.name(),
            first = request.first(),
            after = ?request.after(),
            returned = connection.items.len(),
            total_count = connection.total_count,
            "Fetched page"
        );
        Ok(connection)
    }

    /// Pages through the sponsors of a hackathon.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_sponsors(
        &self,
        hackathon_id: i64,
        request: &PageRequest,
    ) -> Result<Connection<Sponsor>, PersistenceError> {
        self.page(hackathon_id, Relation::Sponsors, request, |_, keys| {
            Ok(keys.iter().map(|&id| Sponsor { id }).collect())
        })
    }

    /// Pages through the events of a hackathon.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_events(
        &self,
        hackathon_id: i64,
        request: &PageRequest,
    ) -> Result<Connection<Event>, PersistenceError> {
        self.page(hackathon_id, Relation::Events, request, |_, keys| {
            Ok(keys
                .iter()
                .map(|&id| Event {
                    id,
                    hackathon_id: Some(hackathon_id),
                })
                .collect())
        })
    }

    /// Pages through the participants of a hackathon who are not yet
    /// accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_applicants(
        &self,
        hackathon_id: i64,
        request: &PageRequest,
    ) -> Result<Connection<User>, PersistenceError> {
        self.page(hackathon_id, Relation::Applicants, request, |_, keys| {
            Ok(keys.iter().map(|&id| User { id }).collect())
        })
    }

    /// Pages through the accepted participants of a hackathon.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_hackathon_attendees(
        &self,
        hackathon_id: i64,
        request: &PageRequest,
    ) -> Result<Connection<User>, PersistenceError> {
        self.page(hackathon_id, Relation::Attendees, request, |_, keys| {
            Ok(keys.iter().map(|&id| User { id }).collect())
        })
    }

    /// Pages through a hackathon's applications in one status.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_applications_by_hackathon(
        &self,
        hackathon_id: i64,
        status: ApplicationStatus,
        request: &PageRequest,
    ) -> Result<Connection<HackathonApplication>, PersistenceError> {
        self.page(
            hackathon_id,
            Relation::Applications(status),
            request,
            |conn, keys| {
                queries::applications::list_applications_for_users(conn, hackathon_id, keys)
            },
        )
    }

    // ========================================================================
    // Application workflow
    // ========================================================================

    /// Submits a user's application to a hackathon.
    ///
    /// The application starts `WAITING` and the user joins the hackathon's
    /// applicants.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::HackathonNotFound`,
    /// `PersistenceError::ApplicationAlreadyExists`, or a storage error.
    pub fn apply_to_hackathon(
        &self,
        hackathon_id: i64,
        user_id: i64,
        input: &HackathonApplicationInput,
    ) -> Result<bool, PersistenceError> {
        let created_at = now_timestamp()?;

        self.run(&self.write_transaction(), |conn| {
            if queries::hackathons::find_hackathon_row(conn, hackathon_id)?.is_none() {
                return Err(PersistenceError::HackathonNotFound(hackathon_id));
            }
            if queries::applications::find_application(conn, hackathon_id, user_id)?.is_some() {
                return Err(PersistenceError::ApplicationAlreadyExists {
                    hackathon_id,
                    user_id,
                });
            }
            mutations::applications::insert_application(
                conn,
                hackathon_id,
                user_id,
                input,
                created_at,
            )?;
            mutations::participants::add_pending_participant(conn, hackathon_id, user_id)
        })?;

        info!(hackathon_id, user_id, "Application submitted");
        Ok(true)
    }

    /// Edits the answers of an existing application. Fields absent from
    /// `input` are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ApplicationNotFound` or a storage error.
    pub fn update_application(
        &self,
        hackathon_id: i64,
        user_id: i64,
        input: &HackathonApplicationInput,
    ) -> Result<HackathonApplication, PersistenceError> {
        let not_found = PersistenceError::ApplicationNotFound {
            hackathon_id,
            user_id,
        };

        let application = self.run(&self.write_transaction(), |conn| {
            if queries::applications::find_application(conn, hackathon_id, user_id)?.is_none() {
                return Err(not_found.clone());
            }
            mutations::applications::update_application_fields(conn, hackathon_id, user_id, input)?;
            queries::applications::find_application(conn, hackathon_id, user_id)?.ok_or(not_found)
        })?;

        info!(hackathon_id, user_id, "Application updated");
        Ok(application)
    }

    /// Loads one application.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_application(
        &self,
        hackathon_id: i64,
        user_id: i64,
    ) -> Result<Option<HackathonApplication>, PersistenceError> {
        self.run(&Direct, |conn| {
            queries::applications::find_application(conn, hackathon_id, user_id)
        })
    }

    /// Lists every application a user has submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<HackathonApplication>, PersistenceError> {
        self.run(&Direct, |conn| {
            queries::applications::list_applications_by_user(conn, user_id)
        })
    }

    /// Accepts a waiting applicant: the application becomes `ACCEPTED` and the
    /// user becomes an attendee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ApplicationNotFound`,
    /// `PersistenceError::ApplicantAlreadyDecided`, or a storage error.
    pub fn accept_applicant(&self, hackathon_id: i64, user_id: i64) -> Result<bool, PersistenceError> {
        self.decide_application(hackathon_id, user_id, ApplicationStatus::Accepted)
    }

    /// Denies a waiting applicant: the application becomes `REJECTED` and the
    /// user leaves the applicants.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ApplicationNotFound`,
    /// `PersistenceError::ApplicantAlreadyDecided`, or a storage error.
    pub fn deny_applicant(&self, hackathon_id: i64, user_id: i64) -> Result<bool, PersistenceError> {
        self.decide_application(hackathon_id, user_id, ApplicationStatus::Rejected)
    }

    fn decide_application(
        &self,
        hackathon_id: i64,
        user_id: i64,
        decision: ApplicationStatus,
    ) -> Result<bool, PersistenceError> {
        let decided_at = now_timestamp()?;

        self.run(&self.write_transaction(), |conn| {
            let application =
                queries::applications::find_application(conn, hackathon_id, user_id)?.ok_or(
                    PersistenceError::ApplicationNotFound {
                        hackathon_id,
                        user_id,
                    },
                )?;

            if application.status.validate_transition(decision).is_err() {
                return Err(PersistenceError::ApplicantAlreadyDecided {
                    hackathon_id,
                    user_id,
                    status: application.status,
                });
            }

            mutations::applications::set_application_status(conn, hackathon_id, user_id, decision)?;
            if decision == ApplicationStatus::Accepted {
                mutations::participants::mark_participant_accepted(
                    conn,
                    hackathon_id,
                    user_id,
                    &decided_at,
                )
            } else {
                mutations::participants::remove_pending_participant(conn, hackathon_id, user_id)
            }
        })?;

        info!(hackathon_id, user_id, status = %decision, "Application decided");
        Ok(true)
    }
}

/// Current UTC time as an RFC 3339 string.
fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}
