// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each handler authorizes the actor where the operation requires it,
//! parses raw request fields into domain values, and translates every
//! lower-layer error into an `ApiError`.

use hackathon_domain::{
    ApplicationStatus, Connection, Event, Hackathon, HackathonApplication,
    HackathonApplicationInput, HackathonCreateInput, HackathonFilter, HackathonUpdateInput,
    PageRequest, Semester, Sponsor, Term, User, parse_date,
};
use hackathon_persistence::Persistence;
use time::{Date, OffsetDateTime};
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{
    ApplicationInfo, ApplicationRequest, ApplicationsQuery, ApplyResponse,
    CreateHackathonRequest, DecisionResponse, DeleteHackathonResponse, HackathonInfo,
    ListApplicationsResponse, ListHackathonsRequest, ListHackathonsResponse, PageQuery,
    UpdateHackathonRequest,
};

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Parses a semester token, accepting any letter case.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown semester.
pub fn parse_semester(value: &str) -> Result<Semester, ApiError> {
    value
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(translate_domain_error)
}

fn parse_date_field(value: &str, field: &str) -> Result<Date, ApiError> {
    parse_date(value.trim()).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: e.to_string(),
    })
}

fn parse_status(value: &str) -> Result<ApplicationStatus, ApiError> {
    value
        .trim()
        .to_ascii_uppercase()
        .parse()
        .map_err(translate_domain_error)
}

fn page_request(first: i64, after: Option<&str>) -> Result<PageRequest, ApiError> {
    PageRequest::new(first, after).map_err(translate_domain_error)
}

fn hackathon_not_found(message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Hackathon"),
        message,
    }
}

fn application_input(request: &ApplicationRequest) -> HackathonApplicationInput {
    HackathonApplicationInput {
        why_attend: request.why_attend.clone(),
        what_do_you_want_to_learn: request.what_do_you_want_to_learn.clone(),
        share_info_with_sponsors: request.share_info_with_sponsors,
        resume_blob_id: request.resume_blob_id.clone(),
    }
}

fn application_infos(applications: &[HackathonApplication]) -> ListApplicationsResponse {
    ListApplicationsResponse {
        applications: applications.iter().map(ApplicationInfo::from).collect(),
    }
}

fn hackathon_infos(hackathons: &[Hackathon]) -> ListHackathonsResponse {
    let today: Date = today();
    ListHackathonsResponse {
        hackathons: hackathons
            .iter()
            .map(|h| HackathonInfo::from_hackathon(h, today))
            .collect(),
    }
}

// ============================================================================
// Hackathons
// ============================================================================

/// Creates a hackathon, creating its term if the term is new.
///
/// # Errors
///
/// Returns an error if:
/// - the actor is not an admin
/// - the semester or a date is malformed
/// - the term year is out of range or the dates are reversed
pub fn create_hackathon(
    persistence: &Persistence,
    request: &CreateHackathonRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<HackathonInfo, ApiError> {
    AuthorizationService::authorize_create_hackathon(authenticated_actor)?;

    let input: HackathonCreateInput = HackathonCreateInput {
        term: Term::new(request.year, parse_semester(&request.semester)?),
        start_date: parse_date_field(&request.start_date, "start_date")?,
        end_date: parse_date_field(&request.end_date, "end_date")?,
    };

    let hackathon: Hackathon = persistence.create_hackathon(&input)?;

    info!(
        actor = authenticated_actor.user_id,
        hackathon_id = hackathon.id,
        term = %hackathon.term,
        "Hackathon created"
    );
    Ok(HackathonInfo::from_hackathon(&hackathon, today()))
}

/// Applies an incremental update to a hackathon.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the request is empty or
/// malformed, the hackathon or an added event does not exist, or the new
/// term collides with an existing one.
pub fn update_hackathon(
    persistence: &Persistence,
    hackathon_id: i64,
    request: &UpdateHackathonRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<HackathonInfo, ApiError> {
    AuthorizationService::authorize_update_hackathon(authenticated_actor)?;

    let semester: Option<Semester> = request
        .semester
        .as_deref()
        .map(parse_semester)
        .transpose()?;

    let input: HackathonUpdateInput = HackathonUpdateInput {
        year: request.year,
        semester,
        add_events: request.add_events.clone(),
        remove_events: request.remove_events.clone(),
        add_sponsors: request.add_sponsors.clone(),
        remove_sponsors: request.remove_sponsors.clone(),
        add_participants: request.add_participants.clone(),
        remove_participants: request.remove_participants.clone(),
    };

    let hackathon: Hackathon = persistence.update_hackathon(hackathon_id, &input)?;

    info!(
        actor = authenticated_actor.user_id,
        hackathon_id, "Hackathon updated"
    );
    Ok(HackathonInfo::from_hackathon(&hackathon, today()))
}

/// Deletes a hackathon. Deleting an unknown hackathon is not an error; the
/// response reports `deleted: false`.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or the delete fails.
pub fn delete_hackathon(
    persistence: &Persistence,
    hackathon_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DeleteHackathonResponse, ApiError> {
    AuthorizationService::authorize_delete_hackathon(authenticated_actor)?;

    let deleted: bool = persistence.delete_hackathon(hackathon_id)?;
    let message: String = if deleted {
        format!("Deleted hackathon {hackathon_id}")
    } else {
        format!("Hackathon {hackathon_id} does not exist")
    };

    Ok(DeleteHackathonResponse {
        hackathon_id,
        deleted,
        message,
    })
}

/// Loads a hackathon by identifier.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if there is no such hackathon.
pub fn get_hackathon(
    persistence: &Persistence,
    hackathon_id: i64,
) -> Result<HackathonInfo, ApiError> {
    let hackathon: Hackathon = persistence
        .get_hackathon(hackathon_id)?
        .ok_or_else(|| hackathon_not_found(format!("Hackathon {hackathon_id} does not exist")))?;
    Ok(HackathonInfo::from_hackathon(&hackathon, today()))
}

/// Loads the hackathon held in a term.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown semester and
/// `ApiError::ResourceNotFound` if the term holds no hackathon.
pub fn get_hackathon_by_term(
    persistence: &Persistence,
    year: i32,
    semester: &str,
) -> Result<HackathonInfo, ApiError> {
    let semester: Semester = parse_semester(semester)?;
    let hackathon: Hackathon = persistence
        .get_hackathon_by_term(year, semester)?
        .ok_or_else(|| hackathon_not_found(format!("No hackathon in {semester} {year}")))?;
    Ok(HackathonInfo::from_hackathon(&hackathon, today()))
}

/// Loads the hackathon an event belongs to.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the event is unknown or unassigned.
pub fn get_hackathon_by_event(
    persistence: &Persistence,
    event_id: i64,
) -> Result<HackathonInfo, ApiError> {
    let hackathon: Hackathon = persistence
        .get_hackathon_by_event(event_id)?
        .ok_or_else(|| hackathon_not_found(format!("Event {event_id} has no hackathon")))?;
    Ok(HackathonInfo::from_hackathon(&hackathon, today()))
}

/// Loads the running or next upcoming hackathon as of `today`.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if every hackathon has ended.
pub fn get_current_hackathon(
    persistence: &Persistence,
    today: Date,
) -> Result<HackathonInfo, ApiError> {
    let hackathon: Hackathon = persistence
        .get_current_hackathon(today)?
        .ok_or_else(|| hackathon_not_found(format!("No hackathon ends after {today}")))?;
    Ok(HackathonInfo::from_hackathon(&hackathon, today))
}

/// Lists the hackathons of a term year, optionally narrowed to a semester.
///
/// # Errors
///
/// Returns an error if the semester is unknown or the query fails.
pub fn list_hackathons(
    persistence: &Persistence,
    request: &ListHackathonsRequest,
) -> Result<ListHackathonsResponse, ApiError> {
    let filter: HackathonFilter = HackathonFilter {
        year: request.year,
        semester: request
            .semester
            .as_deref()
            .map(parse_semester)
            .transpose()?,
    };
    let hackathons: Vec<Hackathon> = persistence.list_hackathons(filter)?;
    Ok(hackathon_infos(&hackathons))
}

/// Lists the hackathons a sponsor supports.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_hackathons_by_sponsor(
    persistence: &Persistence,
    sponsor_id: i64,
) -> Result<ListHackathonsResponse, ApiError> {
    let hackathons: Vec<Hackathon> = persistence.list_hackathons_by_sponsor(sponsor_id)?;
    Ok(hackathon_infos(&hackathons))
}

// ============================================================================
// Paged relations
// ============================================================================

/// Pages through a hackathon's sponsors.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad page size or cursor.
pub fn get_hackathon_sponsors(
    persistence: &Persistence,
    hackathon_id: i64,
    query: &PageQuery,
) -> Result<Connection<Sponsor>, ApiError> {
    let request: PageRequest = page_request(query.first, query.after.as_deref())?;
    Ok(persistence.get_hackathon_sponsors(hackathon_id, &request)?)
}

/// Pages through a hackathon's events.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad page size or cursor.
pub fn get_hackathon_events(
    persistence: &Persistence,
    hackathon_id: i64,
    query: &PageQuery,
) -> Result<Connection<Event>, ApiError> {
    let request: PageRequest = page_request(query.first, query.after.as_deref())?;
    Ok(persistence.get_hackathon_events(hackathon_id, &request)?)
}

/// Pages through a hackathon's pending participants.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad page size or cursor.
pub fn get_hackathon_applicants(
    persistence: &Persistence,
    hackathon_id: i64,
    query: &PageQuery,
) -> Result<Connection<User>, ApiError> {
    let request: PageRequest = page_request(query.first, query.after.as_deref())?;
    Ok(persistence.get_hackathon_applicants(hackathon_id, &request)?)
}

/// Pages through a hackathon's accepted participants.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for a bad page size or cursor.
pub fn get_hackathon_attendees(
    persistence: &Persistence,
    hackathon_id: i64,
    query: &PageQuery,
) -> Result<Connection<User>, ApiError> {
    let request: PageRequest = page_request(query.first, query.after.as_deref())?;
    Ok(persistence.get_hackathon_attendees(hackathon_id, &request)?)
}

/// Pages through a hackathon's applications in one status.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, or the status, page size,
/// or cursor is malformed.
pub fn get_applications_by_hackathon(
    persistence: &Persistence,
    hackathon_id: i64,
    query: &ApplicationsQuery,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Connection<ApplicationInfo>, ApiError> {
    AuthorizationService::authorize_list_applications(authenticated_actor)?;

    let status: ApplicationStatus = parse_status(&query.status)?;
    let request: PageRequest = page_request(query.first, query.after.as_deref())?;
    let page: Connection<HackathonApplication> =
        persistence.get_applications_by_hackathon(hackathon_id, status, &request)?;

    Ok(Connection {
        items: page.items.iter().map(ApplicationInfo::from).collect(),
        total_count: page.total_count,
        page_info: page.page_info,
    })
}

// ============================================================================
// Applications
// ============================================================================

/// Submits the actor's own application to a hackathon.
///
/// # Errors
///
/// Returns an error if the hackathon does not exist or the actor already
/// applied.
pub fn apply_to_hackathon(
    persistence: &Persistence,
    hackathon_id: i64,
    request: &ApplicationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApplyResponse, ApiError> {
    let user_id: i64 = authenticated_actor.user_id;
    persistence.apply_to_hackathon(hackathon_id, user_id, &application_input(request))?;

    Ok(ApplyResponse {
        hackathon_id,
        user_id,
        success: true,
        message: format!("User {user_id} applied to hackathon {hackathon_id}"),
    })
}

/// Loads one application.
///
/// # Errors
///
/// Returns an error if the actor is neither an admin nor the applicant, or
/// `ApiError::ResourceNotFound` if the user has not applied.
pub fn get_application(
    persistence: &Persistence,
    hackathon_id: i64,
    user_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApplicationInfo, ApiError> {
    AuthorizationService::authorize_view_application(authenticated_actor, user_id)?;

    let application: HackathonApplication = persistence
        .get_application(hackathon_id, user_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Application"),
            message: format!("User {user_id} has not applied to hackathon {hackathon_id}"),
        })?;
    Ok(ApplicationInfo::from(&application))
}

/// Edits the answers of an existing application.
///
/// # Errors
///
/// Returns an error if the actor is neither an admin nor the applicant, or
/// the hackathon or application does not exist.
pub fn update_application(
    persistence: &Persistence,
    hackathon_id: i64,
    user_id: i64,
    request: &ApplicationRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ApplicationInfo, ApiError> {
    AuthorizationService::authorize_update_application(authenticated_actor, user_id)?;

    if persistence.get_hackathon(hackathon_id)?.is_none() {
        return Err(hackathon_not_found(format!(
            "Hackathon {hackathon_id} does not exist"
        )));
    }

    let application: HackathonApplication =
        persistence.update_application(hackathon_id, user_id, &application_input(request))?;

    info!(
        actor = authenticated_actor.user_id,
        hackathon_id, user_id, "Application updated"
    );
    Ok(ApplicationInfo::from(&application))
}

/// Lists every application a user has submitted.
///
/// # Errors
///
/// Returns an error if the actor is neither an admin nor that user.
pub fn list_applications_by_user(
    persistence: &Persistence,
    user_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListApplicationsResponse, ApiError> {
    AuthorizationService::authorize_list_user_applications(authenticated_actor, user_id)?;

    let applications: Vec<HackathonApplication> =
        persistence.list_applications_by_user(user_id)?;
    Ok(application_infos(&applications))
}

/// Accepts a waiting applicant.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the application does not
/// exist, or it was already decided.
pub fn accept_applicant(
    persistence: &Persistence,
    hackathon_id: i64,
    user_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DecisionResponse, ApiError> {
    AuthorizationService::authorize_accept_applicant(authenticated_actor)?;

    persistence.accept_applicant(hackathon_id, user_id)?;

    info!(
        actor = authenticated_actor.user_id,
        hackathon_id, user_id, "Applicant accepted"
    );
    Ok(DecisionResponse::new(
        hackathon_id,
        user_id,
        ApplicationStatus::Accepted,
    ))
}

/// Denies a waiting applicant.
///
/// # Errors
///
/// Returns an error if the actor is not an admin, the application does not
/// exist, or it was already decided.
pub fn deny_applicant(
    persistence: &Persistence,
    hackathon_id: i64,
    user_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<DecisionResponse, ApiError> {
    AuthorizationService::authorize_deny_applicant(authenticated_actor)?;

    persistence.deny_applicant(hackathon_id, user_id)?;

    info!(
        actor = authenticated_actor.user_id,
        hackathon_id, user_id, "Applicant denied"
    );
    Ok(DecisionResponse::new(
        hackathon_id,
        user_id,
        ApplicationStatus::Rejected,
    ))
}
