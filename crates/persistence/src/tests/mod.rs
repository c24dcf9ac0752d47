// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod executor_tests;
mod initialization_tests;

use diesel::SqliteConnection;
use diesel::prelude::*;
use hackathon_domain::{
    Connection, Hackathon, HackathonCreateInput, PageKey, PageRequest, Semester, Term,
};
use time::Date;
use time::macros::date;

use crate::diesel_schema::{events, sponsors, users};
use crate::{Persistence, PersistenceError};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Runs `op` on a pooled connection outside any transaction.
pub fn with_conn<T>(persistence: &Persistence, op: impl FnOnce(&mut SqliteConnection) -> T) -> T {
    let mut pooled = persistence.pool.get().expect("pooled connection");
    op(&mut pooled)
}

pub fn create_input(year: i32, semester: Semester, start: Date, end: Date) -> HackathonCreateInput {
    HackathonCreateInput {
        term: Term::new(year, semester),
        start_date: start,
        end_date: end,
    }
}

/// The Fall 2023 hackathon, October 10th through 17th.
pub fn create_test_hackathon(persistence: &Persistence) -> Hackathon {
    persistence
        .create_hackathon(&create_input(
            2023,
            Semester::Fall,
            date!(2023 - 10 - 10),
            date!(2023 - 10 - 17),
        ))
        .expect("create hackathon")
}

pub fn seed_users(persistence: &Persistence, ids: &[i64]) {
    with_conn(persistence, |conn| {
        let rows: Vec<_> = ids.iter().map(|&id| users::id.eq(id)).collect();
        diesel::insert_into(users::table)
            .values(&rows)
            .execute(conn)
            .expect("seed users");
    });
}

pub fn seed_sponsors(persistence: &Persistence, ids: &[i64]) {
    with_conn(persistence, |conn| {
        let rows: Vec<_> = ids.iter().map(|&id| sponsors::id.eq(id)).collect();
        diesel::insert_into(sponsors::table)
            .values(&rows)
            .execute(conn)
            .expect("seed sponsors");
    });
}

/// Seeds unassigned events.
pub fn seed_events(persistence: &Persistence, ids: &[i64]) {
    with_conn(persistence, |conn| {
        let rows: Vec<_> = ids.iter().map(|&id| events::id.eq(id)).collect();
        diesel::insert_into(events::table)
            .values(&rows)
            .execute(conn)
            .expect("seed events");
    });
}

pub fn page_request(first: i64, after: Option<&str>) -> PageRequest {
    PageRequest::new(first, after).expect("valid page request")
}

/// Follows `end_cursor` until the last page and returns every key seen, in
/// order, together with the `total_count` reported by the first page.
pub fn collect_all_keys<T, F>(first: i64, mut fetch: F) -> (Vec<i64>, i64)
where
    T: PageKey,
    F: FnMut(&PageRequest) -> Result<Connection<T>, PersistenceError>,
{
    let mut keys = Vec::new();
    let mut after: Option<String> = None;
    let mut total_count = None;

    loop {
        let request = page_request(first, after.as_deref());
        let page = fetch(&request).expect("page");
        total_count.get_or_insert(page.total_count);
        keys.extend(page.items.iter().map(PageKey::page_key));

        if !page.page_info.has_next_page() {
            break;
        }
        after = page
            .page_info
            .end_cursor()
            .map(|cursor| cursor.as_str().to_string());
    }

    (keys, total_count.unwrap_or(0))
}
