// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.
//!
//! Identity is established upstream. This layer only turns the forwarded
//! claims into an `AuthenticatedActor` and decides what that actor may do.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Organizers: manage hackathons and decide applications.
    Admin,
    /// Sponsor representatives.
    Sponsor,
    /// Everyone else, including applicants.
    Normal,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Sponsor => "SPONSOR",
            Self::Normal => "NORMAL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "SPONSOR" => Ok(Self::Sponsor),
            "NORMAL" => Ok(Self::Normal),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!("Unknown role '{s}'"),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user this actor acts as.
    pub user_id: i64,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(user_id: i64, role: Role) -> Self {
        Self { user_id, role }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Turns forwarded identity claims into an actor.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Builds an actor from the raw user id and role claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if either claim is missing
    /// or malformed.
    pub fn authenticate(
        user_id: Option<&str>,
        role: Option<&str>,
    ) -> Result<AuthenticatedActor, AuthError> {
        let user_id: &str = user_id.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("missing user id"),
        })?;
        let role: &str = role.ok_or_else(|| AuthError::AuthenticationFailed {
            reason: String::from("missing role"),
        })?;

        let user_id: i64 = user_id
            .trim()
            .parse()
            .map_err(|_| AuthError::AuthenticationFailed {
                reason: format!("malformed user id '{user_id}'"),
            })?;

        Ok(AuthenticatedActor::new(user_id, role.trim().parse()?))
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("ADMIN"),
            })
        }
    }

    fn require_admin_or_self(
        actor: &AuthenticatedActor,
        user_id: i64,
        action: &str,
    ) -> Result<(), AuthError> {
        if actor.is_admin() || actor.user_id == user_id {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("ADMIN or the applicant"),
            })
        }
    }

    /// Only admins may create hackathons.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_create_hackathon(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "create_hackathon")
    }

    /// Only admins may update hackathons.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_update_hackathon(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "update_hackathon")
    }

    /// Only admins may delete hackathons.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_delete_hackathon(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "delete_hackathon")
    }

    /// Only admins may accept applicants.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_accept_applicant(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "accept_applicant")
    }

    /// Only admins may deny applicants.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_deny_applicant(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "deny_applicant")
    }

    /// Only admins may page through a hackathon's applications.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_list_applications(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "list_applications")
    }

    /// Admins may read any application; other users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an admin nor the applicant.
    pub fn authorize_view_application(
        actor: &AuthenticatedActor,
        user_id: i64,
    ) -> Result<(), AuthError> {
        Self::require_admin_or_self(actor, user_id, "get_application")
    }

    /// Admins may edit any application; other users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an admin nor the applicant.
    pub fn authorize_update_application(
        actor: &AuthenticatedActor,
        user_id: i64,
    ) -> Result<(), AuthError> {
        Self::require_admin_or_self(actor, user_id, "update_application")
    }

    /// Admins may list anyone's applications; other users only their own.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor is neither an admin nor the applicant.
    pub fn authorize_list_user_applications(
        actor: &AuthenticatedActor,
        user_id: i64,
    ) -> Result<(), AuthError> {
        Self::require_admin_or_self(actor, user_id, "list_user_applications")
    }
}
