// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity extraction for the server.
//!
//! Tokens are verified by the gateway in front of this service, which
//! forwards the resulting claims as plain headers.

use axum::{extract::FromRequestParts, http::request::Parts};
use hackathon_api::{AuthenticatedActor, AuthenticationService};
use tracing::{debug, warn};

use crate::HttpError;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";
/// Header carrying the caller's role.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Extractor for the calling actor.
///
/// # Errors
///
/// Rejects with HTTP 401 if either header is missing, is not valid ASCII,
/// or does not parse.
pub struct CallerActor(pub AuthenticatedActor);

impl<S: Send + Sync> FromRequestParts<S> for CallerActor {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
        };

        let actor: AuthenticatedActor =
            AuthenticationService::authenticate(header(USER_ID_HEADER), header(USER_ROLE_HEADER))
                .map_err(|e| {
                    warn!(error = %e, "Rejected caller claims");
                    HttpError::from(hackathon_api::ApiError::from(e))
                })?;

        debug!(user_id = actor.user_id, role = %actor.role, "Caller identified");
        Ok(Self(actor))
    }
}
