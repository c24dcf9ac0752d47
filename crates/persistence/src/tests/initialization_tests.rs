// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;

use super::{create_test_hackathon, create_test_persistence, with_conn};
use crate::diesel_schema::hackathon_sponsors;
use crate::{Persistence, PersistenceConfig};

#[test]
fn test_in_memory_database_initializes() {
    let persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
    assert!(persistence.term_cache().is_empty());
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let first = create_test_persistence();
    let second = create_test_persistence();

    let hackathon = create_test_hackathon(&first);

    assert!(first.get_hackathon(hackathon.id).unwrap().is_some());
    assert!(second.get_hackathon(hackathon.id).unwrap().is_none());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let persistence = create_test_persistence();

    let result = with_conn(&persistence, |conn| {
        diesel::insert_into(hackathon_sponsors::table)
            .values((
                hackathon_sponsors::hackathon_id.eq(999),
                hackathon_sponsors::sponsor_id.eq(999),
            ))
            .execute(conn)
    });

    assert!(result.is_err(), "dangling join row must be rejected");
}

#[test]
fn test_clones_share_pool_and_cache() {
    let persistence = create_test_persistence();
    let clone = persistence.clone();

    let hackathon = create_test_hackathon(&clone);

    assert_eq!(persistence.term_cache().len(), 1);
    assert_eq!(
        persistence.get_hackathon(hackathon.id).unwrap(),
        Some(hackathon)
    );
}

#[test]
fn test_file_database_persists_across_adapters() {
    let path = std::env::temp_dir().join(format!(
        "hackathon_core_init_test_{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let hackathon = {
        let persistence = Persistence::new_with_file(&path).unwrap();
        create_test_hackathon(&persistence)
    };

    let reopened = Persistence::new_with_file(&path).unwrap();
    assert_eq!(reopened.get_hackathon(hackathon.id).unwrap(), Some(hackathon));

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

#[test]
fn test_in_memory_config_uses_unique_names() {
    let first = PersistenceConfig::in_memory();
    let second = PersistenceConfig::in_memory();
    assert_ne!(first.database_url, second.database_url);
    assert!(first.is_in_memory());
    assert!(!PersistenceConfig::file("/tmp/hackathons.db").is_in_memory());
}
