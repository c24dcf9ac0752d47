// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use diesel::prelude::*;
use diesel::sql_query;
use hackathon_persistence::{Persistence, PersistenceConfig};

use crate::{AuthenticatedActor, CreateHackathonRequest, HackathonInfo, Role, create_hackathon};

pub const ADMIN_ID: i64 = 1;
pub const APPLICANT_ID: i64 = 2;
pub const OTHER_USER_ID: i64 = 3;

/// A fresh database together with a side connection to it for seeding rows
/// that other services own (users, sponsors, events).
pub struct TestDatabase {
    pub persistence: Persistence,
    seed: SqliteConnection,
}

impl TestDatabase {
    pub fn new() -> Self {
        let config: PersistenceConfig = PersistenceConfig::in_memory();
        let persistence: Persistence =
            Persistence::new_with_config(&config).expect("in-memory persistence");
        let seed: SqliteConnection =
            SqliteConnection::establish(&config.database_url).expect("seed connection");
        let mut db: Self = Self { persistence, seed };
        db.seed("users", &[ADMIN_ID, APPLICANT_ID, OTHER_USER_ID]);
        db
    }

    pub fn seed(&mut self, table: &str, ids: &[i64]) {
        for id in ids {
            sql_query(format!("INSERT INTO {table} (id) VALUES ({id})"))
                .execute(&mut self.seed)
                .expect("seed row");
        }
    }
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(ADMIN_ID, Role::Admin)
}

pub fn create_test_applicant() -> AuthenticatedActor {
    AuthenticatedActor::new(APPLICANT_ID, Role::Normal)
}

pub fn create_test_other_user() -> AuthenticatedActor {
    AuthenticatedActor::new(OTHER_USER_ID, Role::Normal)
}

pub fn create_test_sponsor() -> AuthenticatedActor {
    AuthenticatedActor::new(OTHER_USER_ID, Role::Sponsor)
}

pub fn create_valid_request() -> CreateHackathonRequest {
    CreateHackathonRequest {
        year: 2023,
        semester: String::from("FALL"),
        start_date: String::from("2023-10-10"),
        end_date: String::from("2023-10-17"),
    }
}

pub fn create_test_hackathon(persistence: &Persistence) -> HackathonInfo {
    create_hackathon(persistence, &create_valid_request(), &create_test_admin())
        .expect("create hackathon")
}
