// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::DomainError;

#[test]
fn test_display_messages() {
    assert_eq!(
        DomainError::EmptyUpdate.to_string(),
        "Update contains no changes"
    );
    assert_eq!(
        DomainError::InvalidCursor(String::from("abc")).to_string(),
        "Invalid pagination cursor: abc"
    );
    assert_eq!(
        DomainError::InvalidSemester(String::from("WINTER")).to_string(),
        "Invalid semester 'WINTER': expected FALL, SPRING or SUMMER"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidPageSize(0));
    assert_eq!(err.to_string(), "Invalid page size 0: must be at least 1");
}
