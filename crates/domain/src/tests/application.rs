// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApplicationId, ApplicationStatus, DomainError};

#[test]
fn test_status_tokens() {
    for status in [
        ApplicationStatus::Waiting,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ] {
        let parsed: ApplicationStatus = status.as_str().parse().unwrap();
        assert_eq!(parsed, status);
    }
    assert!(matches!(
        "PENDING".parse::<ApplicationStatus>(),
        Err(DomainError::InvalidApplicationStatus(_))
    ));
}

#[test]
fn test_terminal_states() {
    assert!(!ApplicationStatus::Waiting.is_terminal());
    assert!(ApplicationStatus::Accepted.is_terminal());
    assert!(ApplicationStatus::Rejected.is_terminal());
}

#[test]
fn test_waiting_can_be_decided() {
    assert!(
        ApplicationStatus::Waiting
            .validate_transition(ApplicationStatus::Accepted)
            .is_ok()
    );
    assert!(
        ApplicationStatus::Waiting
            .validate_transition(ApplicationStatus::Rejected)
            .is_ok()
    );
}

#[test]
fn test_waiting_to_waiting_is_rejected() {
    assert!(
        ApplicationStatus::Waiting
            .validate_transition(ApplicationStatus::Waiting)
            .is_err()
    );
}

#[test]
fn test_decided_applications_are_final() {
    for from in [ApplicationStatus::Accepted, ApplicationStatus::Rejected] {
        for to in [
            ApplicationStatus::Waiting,
            ApplicationStatus::Accepted,
            ApplicationStatus::Rejected,
        ] {
            let result = from.validate_transition(to);
            assert!(
                matches!(result, Err(DomainError::InvalidStatusTransition { .. })),
                "{from} -> {to} should be rejected"
            );
        }
    }
}

#[test]
fn test_application_id_format() {
    let id = ApplicationId::new(12, 345);
    assert_eq!(id.to_string(), "12-345");
    assert_eq!("12-345".parse::<ApplicationId>().unwrap(), id);
}

#[test]
fn test_application_id_rejects_malformed_values() {
    assert!("12".parse::<ApplicationId>().is_err());
    assert!("a-1".parse::<ApplicationId>().is_err());
    assert!("1-b".parse::<ApplicationId>().is_err());
}
