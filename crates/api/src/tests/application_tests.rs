// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    APPLICANT_ID, OTHER_USER_ID, TestDatabase, create_test_admin, create_test_applicant,
    create_test_hackathon, create_test_other_user,
};
use crate::{
    ApiError, ApplicationRequest, ApplicationsQuery, PageQuery, accept_applicant,
    apply_to_hackathon, deny_applicant, get_application, get_applications_by_hackathon,
    get_hackathon_applicants, get_hackathon_attendees, list_applications_by_user,
    update_application,
};

fn why_attend(reason: &str) -> ApplicationRequest {
    ApplicationRequest {
        why_attend: Some(vec![reason.to_string()]),
        ..ApplicationRequest::default()
    }
}

#[test]
fn test_apply_uses_actor_identity() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);

    let response = apply_to_hackathon(
        &db.persistence,
        hackathon.id,
        &why_attend("fun"),
        &create_test_applicant(),
    )
    .unwrap();

    assert!(response.success);
    assert_eq!(response.user_id, APPLICANT_ID);

    let info = get_application(
        &db.persistence,
        hackathon.id,
        APPLICANT_ID,
        &create_test_applicant(),
    )
    .unwrap();
    assert_eq!(info.id, format!("{}-{APPLICANT_ID}", hackathon.id));
    assert_eq!(info.status, "WAITING");
    assert_eq!(info.why_attend, vec!["fun".to_string()]);
}

#[test]
fn test_full_decision_flow() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);
    let admin = create_test_admin();
    let applicant = create_test_applicant();

    apply_to_hackathon(&db.persistence, hackathon.id, &why_attend("fun"), &applicant).unwrap();
    assert!(matches!(
        apply_to_hackathon(&db.persistence, hackathon.id, &why_attend("again"), &applicant),
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "single_application"
    ));

    let accepted = accept_applicant(&db.persistence, hackathon.id, APPLICANT_ID, &admin).unwrap();
    assert_eq!(accepted.status, "ACCEPTED");

    assert!(matches!(
        deny_applicant(&db.persistence, hackathon.id, APPLICANT_ID, &admin),
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "application_decided_once"
    ));

    let attendees =
        get_hackathon_attendees(&db.persistence, hackathon.id, &PageQuery::default()).unwrap();
    assert_eq!(attendees.total_count, 1);
    assert_eq!(attendees.items[0].id, APPLICANT_ID);
    let applicants =
        get_hackathon_applicants(&db.persistence, hackathon.id, &PageQuery::default()).unwrap();
    assert_eq!(applicants.total_count, 0);
}

#[test]
fn test_deny_then_list_by_status() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);
    let admin = create_test_admin();

    apply_to_hackathon(
        &db.persistence,
        hackathon.id,
        &why_attend("a"),
        &create_test_applicant(),
    )
    .unwrap();
    apply_to_hackathon(
        &db.persistence,
        hackathon.id,
        &why_attend("b"),
        &create_test_other_user(),
    )
    .unwrap();

    let denied = deny_applicant(&db.persistence, hackathon.id, OTHER_USER_ID, &admin).unwrap();
    assert_eq!(denied.status, "REJECTED");

    let rejected = get_applications_by_hackathon(
        &db.persistence,
        hackathon.id,
        &ApplicationsQuery {
            status: String::from("rejected"),
            first: 10,
            after: None,
        },
        &admin,
    )
    .unwrap();
    assert_eq!(rejected.total_count, 1);
    assert_eq!(rejected.items[0].user_id, OTHER_USER_ID);

    let waiting = get_applications_by_hackathon(
        &db.persistence,
        hackathon.id,
        &ApplicationsQuery {
            status: String::from("WAITING"),
            first: 10,
            after: None,
        },
        &admin,
    )
    .unwrap();
    assert_eq!(waiting.total_count, 1);
    assert_eq!(waiting.items[0].user_id, APPLICANT_ID);
}

#[test]
fn test_unknown_status_is_invalid_input() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);

    let result = get_applications_by_hackathon(
        &db.persistence,
        hackathon.id,
        &ApplicationsQuery {
            status: String::from("PENDING"),
            first: 10,
            after: None,
        },
        &create_test_admin(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "status"
    ));
}

#[test]
fn test_apply_to_missing_hackathon() {
    let db = TestDatabase::new();

    let result = apply_to_hackathon(
        &db.persistence,
        99,
        &why_attend("fun"),
        &create_test_applicant(),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_update_application_by_applicant() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);
    let applicant = create_test_applicant();
    apply_to_hackathon(&db.persistence, hackathon.id, &why_attend("fun"), &applicant).unwrap();

    let updated = update_application(
        &db.persistence,
        hackathon.id,
        APPLICANT_ID,
        &ApplicationRequest {
            share_info_with_sponsors: Some(true),
            resume_blob_id: Some(String::from("resume-2")),
            ..ApplicationRequest::default()
        },
        &applicant,
    )
    .unwrap();

    assert_eq!(updated.why_attend, vec!["fun".to_string()]);
    assert!(updated.share_info_with_sponsors);
    assert_eq!(updated.resume_blob_id.as_deref(), Some("resume-2"));
}

#[test]
fn test_update_application_checks_hackathon_first() {
    let db = TestDatabase::new();

    let result = update_application(
        &db.persistence,
        12,
        APPLICANT_ID,
        &why_attend("x"),
        &create_test_admin(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Hackathon"
    ));
}

#[test]
fn test_update_application_not_submitted() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);

    let result = update_application(
        &db.persistence,
        hackathon.id,
        APPLICANT_ID,
        &why_attend("x"),
        &create_test_applicant(),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { resource_type, .. }) if resource_type == "Application"
    ));
}

#[test]
fn test_other_users_cannot_touch_an_application() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);
    apply_to_hackathon(
        &db.persistence,
        hackathon.id,
        &why_attend("mine"),
        &create_test_applicant(),
    )
    .unwrap();
    let intruder = create_test_other_user();

    assert!(matches!(
        get_application(&db.persistence, hackathon.id, APPLICANT_ID, &intruder),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        update_application(
            &db.persistence,
            hackathon.id,
            APPLICANT_ID,
            &why_attend("theirs"),
            &intruder
        ),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        accept_applicant(&db.persistence, hackathon.id, APPLICANT_ID, &intruder),
        Err(ApiError::Unauthorized { .. })
    ));

    // Admins may read it
    let info = get_application(
        &db.persistence,
        hackathon.id,
        APPLICANT_ID,
        &create_test_admin(),
    )
    .unwrap();
    assert_eq!(info.why_attend, vec!["mine".to_string()]);
}

#[test]
fn test_list_applications_by_user() {
    let db = TestDatabase::new();
    let hackathon = create_test_hackathon(&db.persistence);
    let applicant = create_test_applicant();
    apply_to_hackathon(&db.persistence, hackathon.id, &why_attend("fun"), &applicant).unwrap();

    let own = list_applications_by_user(&db.persistence, APPLICANT_ID, &applicant).unwrap();
    assert_eq!(own.applications.len(), 1);
    assert_eq!(own.applications[0].hackathon_id, hackathon.id);

    assert!(matches!(
        list_applications_by_user(&db.persistence, APPLICANT_ID, &create_test_other_user()),
        Err(ApiError::Unauthorized { .. })
    ));
    let by_admin =
        list_applications_by_user(&db.persistence, APPLICANT_ID, &create_test_admin()).unwrap();
    assert_eq!(by_admin, own);
}
