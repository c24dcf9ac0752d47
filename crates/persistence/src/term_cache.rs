// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bidirectional cache between term identifiers and (year, semester) pairs.
//!
//! Terms are looked up on nearly every hackathon read and write, but change
//! almost never. The cache remembers every pairing it has seen and is never
//! evicted. It is advisory: a miss simply falls through to storage, and a
//! term changed in place must be `forget`-ed by whoever changed it.
//!
//! Both directions live behind one lock so readers can never observe a
//! pairing that is present in one direction and missing from the other.
//!
//! Every `forget` advances an epoch. Operations take a `TermSnapshot` before
//! touching storage and cache what they read through it; a pairing read
//! before a concurrent `forget` is discarded instead of cached, since the
//! row it came from may already have been edited.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use hackathon_domain::{Semester, Term};
use tracing::debug;

#[derive(Debug, Default)]
struct TermMaps {
    by_id: HashMap<i64, Term>,
    by_term: HashMap<Term, i64>,
    epoch: u64,
}

impl TermMaps {
    fn insert(&mut self, term_id: i64, term: Term) {
        if let Some(previous_term) = self.by_id.insert(term_id, term) {
            if previous_term != term {
                self.by_term.remove(&previous_term);
            }
        }
        if let Some(previous_id) = self.by_term.insert(term, term_id) {
            if previous_id != term_id {
                self.by_id.remove(&previous_id);
            }
        }
    }
}

/// Process-wide term cache. Share it with `Arc`.
#[derive(Debug, Default)]
pub struct TermCache {
    maps: RwLock<TermMaps>,
}

impl TermCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // The maps are updated pairwise under the lock, so a panic elsewhere
    // cannot leave them inconsistent and a poisoned lock is safe to reuse.
    fn read(&self) -> RwLockReadGuard<'_, TermMaps> {
        self.maps.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, TermMaps> {
        self.maps.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the cached identifier of a term, if known.
    #[must_use]
    pub fn resolve(&self, year: i32, semester: Semester) -> Option<i64> {
        self.read()
            .by_term
            .get(&Term::new(year, semester))
            .copied()
    }

    /// Returns the cached term for an identifier, if known.
    #[must_use]
    pub fn lookup(&self, term_id: i64) -> Option<Term> {
        self.read().by_id.get(&term_id).copied()
    }

    /// Records that `term_id` identifies `term`.
    ///
    /// Any stale pairing involving either side is dropped first, so the cache
    /// stays a one-to-one mapping.
    pub fn remember(&self, term_id: i64, term: Term) {
        self.write().insert(term_id, term);
        debug!(term_id, %term, "Cached term");
    }

    /// Records that `term_id` identifies `term`, unless some pairing was
    /// forgotten after `epoch`.
    pub fn remember_at(&self, epoch: u64, term_id: i64, term: Term) {
        let mut maps = self.write();
        if maps.epoch != epoch {
            debug!(
                term_id,
                %term,
                epoch,
                current = maps.epoch,
                "Skipped caching term read before an eviction"
            );
            return;
        }
        maps.insert(term_id, term);
        debug!(term_id, %term, "Cached term");
    }

    /// Drops any pairing for `term_id` and advances the epoch.
    ///
    /// The epoch advances even if nothing was cached, because a reader may
    /// be about to cache what it read before the term changed.
    pub fn forget(&self, term_id: i64) {
        let mut maps = self.write();
        maps.epoch += 1;
        if let Some(term) = maps.by_id.remove(&term_id) {
            maps.by_term.remove(&term);
            debug!(term_id, %term, "Evicted cached term");
        }
    }

    /// Current eviction epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.read().epoch
    }

    /// Starts a view of the cache for one operation.
    ///
    /// Take the snapshot before the operation reads storage.
    #[must_use]
    pub fn snapshot(&self) -> TermSnapshot<'_> {
        TermSnapshot {
            cache: self,
            epoch: self.epoch(),
        }
    }

    /// Number of cached pairings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().by_id.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The term cache as seen by a single operation.
///
/// Lookups read the live cache. Pairings learned from storage are cached only
/// if no term was forgotten since the snapshot was taken.
#[derive(Debug, Clone, Copy)]
pub struct TermSnapshot<'a> {
    cache: &'a TermCache,
    epoch: u64,
}

impl TermSnapshot<'_> {
    #[must_use]
    pub fn resolve(&self, year: i32, semester: Semester) -> Option<i64> {
        self.cache.resolve(year, semester)
    }

    #[must_use]
    pub fn lookup(&self, term_id: i64) -> Option<Term> {
        self.cache.lookup(term_id)
    }

    /// Caches a pairing read from storage. See `TermCache::remember_at`.
    pub fn remember(&self, term_id: i64, term: Term) {
        self.cache.remember_at(self.epoch, term_id, term);
    }

    /// Drops a pairing found to disagree with storage.
    pub fn forget(&self, term_id: i64) {
        self.cache.forget(term_id);
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }
}
