// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

//! API boundary for the hackathon data access core.
//!
//! Handlers in this crate sit between a transport and the persistence layer.
//! They are transport-agnostic: identity arrives as an `AuthenticatedActor`,
//! requests and responses are plain DTOs, and failures are `ApiError`s.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthenticationService, AuthorizationService, Role};
pub use error::{ApiError, AuthError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    accept_applicant, apply_to_hackathon, create_hackathon, delete_hackathon, deny_applicant,
    get_application, get_applications_by_hackathon, get_current_hackathon, get_hackathon,
    get_hackathon_applicants, get_hackathon_attendees, get_hackathon_by_event,
    get_hackathon_by_term, get_hackathon_events, get_hackathon_sponsors, list_applications_by_user,
    list_hackathons, list_hackathons_by_sponsor, parse_semester, update_application,
    update_hackathon,
};
pub use request_response::{
    ApplicationInfo, ApplicationRequest, ApplicationsQuery, ApplyResponse, CreateHackathonRequest,
    DEFAULT_PAGE_SIZE, DecisionResponse, DeleteHackathonResponse, HackathonInfo,
    ListApplicationsResponse, ListHackathonsRequest, ListHackathonsResponse, PageQuery,
    UpdateHackathonRequest,
};

/// Result alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
