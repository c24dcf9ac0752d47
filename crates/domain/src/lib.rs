// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the hackathon data core.
//!
//! Everything here is pure: terms, hackathons and their related entities,
//! the application review lifecycle, input validation and the cursor
//! format used by paged listings. Nothing in this crate touches storage.

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

mod application;
mod error;
mod inputs;
mod pagination;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use application::{ApplicationId, ApplicationStatus, HackathonApplication};
pub use error::DomainError;
pub use inputs::{
    HackathonApplicationInput, HackathonCreateInput, HackathonFilter, HackathonUpdateInput,
};
pub use pagination::{Connection, Cursor, PageInfo, PageKey, PageRequest};
pub use types::{
    Event, Hackathon, HackathonStatus, Semester, Sponsor, Term, User, format_date, parse_date,
};
pub use validation::{
    MAX_TERM_YEAR, MIN_TERM_YEAR, validate_create_input, validate_term_year,
    validate_update_input,
};
