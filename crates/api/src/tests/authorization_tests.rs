// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    APPLICANT_ID, OTHER_USER_ID, create_test_admin, create_test_applicant, create_test_sponsor,
};
use crate::{AuthError, AuthenticatedActor, AuthenticationService, AuthorizationService, Role};

#[test]
fn test_role_parsing_ignores_case() {
    assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
    assert_eq!("Sponsor".parse::<Role>().unwrap(), Role::Sponsor);
    assert_eq!("NORMAL".parse::<Role>().unwrap(), Role::Normal);
    assert!(matches!(
        "root".parse::<Role>(),
        Err(AuthError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_authenticate_from_claims() {
    let actor = AuthenticationService::authenticate(Some(" 42 "), Some("admin")).unwrap();

    assert_eq!(actor, AuthenticatedActor::new(42, Role::Admin));
}

#[test]
fn test_authenticate_rejects_missing_or_malformed_claims() {
    for (user_id, role) in [
        (None, Some("ADMIN")),
        (Some("7"), None),
        (Some("seven"), Some("ADMIN")),
        (Some("7"), Some("OWNER")),
    ] {
        assert!(
            matches!(
                AuthenticationService::authenticate(user_id, role),
                Err(AuthError::AuthenticationFailed { .. })
            ),
            "{user_id:?} {role:?}"
        );
    }
}

#[test]
fn test_admin_only_actions() {
    let admin = create_test_admin();
    let checks: [fn(&AuthenticatedActor) -> Result<(), AuthError>; 6] = [
        AuthorizationService::authorize_create_hackathon,
        AuthorizationService::authorize_update_hackathon,
        AuthorizationService::authorize_delete_hackathon,
        AuthorizationService::authorize_accept_applicant,
        AuthorizationService::authorize_deny_applicant,
        AuthorizationService::authorize_list_applications,
    ];

    for check in checks {
        assert!(check(&admin).is_ok());
        assert!(matches!(
            check(&create_test_applicant()),
            Err(AuthError::Unauthorized { .. })
        ));
        assert!(matches!(
            check(&create_test_sponsor()),
            Err(AuthError::Unauthorized { .. })
        ));
    }
}

#[test]
fn test_admin_or_self_actions() {
    let applicant = create_test_applicant();

    assert!(AuthorizationService::authorize_view_application(&applicant, APPLICANT_ID).is_ok());
    assert!(AuthorizationService::authorize_update_application(&applicant, APPLICANT_ID).is_ok());
    assert!(
        AuthorizationService::authorize_list_user_applications(&applicant, APPLICANT_ID).is_ok()
    );

    assert!(AuthorizationService::authorize_view_application(&applicant, OTHER_USER_ID).is_err());
    assert!(
        AuthorizationService::authorize_update_application(&applicant, OTHER_USER_ID).is_err()
    );

    let admin = create_test_admin();
    assert!(AuthorizationService::authorize_view_application(&admin, OTHER_USER_ID).is_ok());
    assert!(AuthorizationService::authorize_update_application(&admin, OTHER_USER_ID).is_ok());
}

#[test]
fn test_unauthorized_error_names_action() {
    let err = AuthorizationService::authorize_delete_hackathon(&create_test_applicant())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Unauthorized: 'delete_hackathon' requires ADMIN"
    );
}
