// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use hackathon_domain::{Semester, Term};
use tokio_util::sync::CancellationToken;

use super::{create_test_hackathon, create_test_persistence, seed_sponsors, with_conn};
use crate::diesel_schema::terms;
use crate::mutations::terms::resolve_or_create_term;
use crate::{Direct, PersistenceError, TermCache, Transactional};

fn count_terms(persistence: &crate::Persistence) -> i64 {
    with_conn(persistence, |conn| {
        terms::table.count().get_result::<i64>(conn).unwrap()
    })
}

#[test]
fn test_direct_runs_statements_as_is() {
    let persistence = create_test_persistence();
    let cache = TermCache::new();

    let result = persistence.run(&Direct, |conn| {
        resolve_or_create_term(conn, &cache.snapshot(), Term::new(2030, Semester::Fall))
    });

    assert!(result.unwrap().learned);
    assert_eq!(count_terms(&persistence), 1);
}

#[test]
fn test_transaction_rolls_back_on_error() {
    let persistence = create_test_persistence();
    let cache = TermCache::new();

    let result: Result<(), PersistenceError> =
        persistence.run(&Transactional::write(None), |conn| {
            resolve_or_create_term(conn, &cache.snapshot(), Term::new(2030, Semester::Fall))?;
            Err(PersistenceError::EventNotFound(1))
        });

    assert_eq!(result, Err(PersistenceError::EventNotFound(1)));
    assert_eq!(count_terms(&persistence), 0);
}

#[test]
fn test_cancelled_token_prevents_start() {
    let persistence = create_test_persistence();
    let token = CancellationToken::new();
    token.cancel();

    let mut ran = false;
    let result = persistence.run(&Transactional::read(Some(&token)), |_| {
        ran = true;
        Ok(())
    });

    assert_eq!(result, Err(PersistenceError::Cancelled));
    assert!(!ran);
}

#[test]
fn test_cancellation_during_work_rolls_back() {
    let persistence = create_test_persistence();
    let cache = TermCache::new();
    let token = CancellationToken::new();

    let result = persistence.run(&Transactional::write(Some(&token)), |conn| {
        let resolution =
            resolve_or_create_term(conn, &cache.snapshot(), Term::new(2030, Semester::Fall))?;
        token.cancel();
        Ok(resolution)
    });

    assert_eq!(result, Err(PersistenceError::Cancelled));
    assert_eq!(count_terms(&persistence), 0);
}

#[test]
fn test_cancelled_handle_cannot_mutate() {
    let persistence = create_test_persistence();
    let hackathon = create_test_hackathon(&persistence);
    seed_sponsors(&persistence, &[1]);

    let token = CancellationToken::new();
    let cancelled = persistence.with_cancellation(token.clone());
    token.cancel();

    let result = cancelled.update_hackathon(
        hackathon.id,
        &hackathon_domain::HackathonUpdateInput {
            add_sponsors: vec![1],
            ..Default::default()
        },
    );
    assert_eq!(result, Err(PersistenceError::Cancelled));

    // The original handle is unaffected and sees no sponsor link
    let sponsors = persistence
        .get_hackathon_sponsors(hackathon.id, &super::page_request(10, None))
        .unwrap();
    assert_eq!(sponsors.total_count, 0);
}

#[test]
fn test_transaction_modes() {
    assert_eq!(
        Transactional::read(None).mode(),
        crate::TransactionMode::Read
    );
    assert_eq!(
        Transactional::write(None).mode(),
        crate::TransactionMode::Write
    );
}
