// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `terms`: Term lookups, cache-aware
//! - `hackathons`: Single hackathon lookups and listings
//! - `applications`: Application lookups
//! - `pages`: Keyset pagination over a hackathon's relations

pub mod applications;
pub mod hackathons;
pub mod pages;
pub mod terms;

pub use pages::{KeyPage, Relation};
