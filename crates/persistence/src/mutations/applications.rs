// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Application mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use hackathon_domain::{ApplicationStatus, HackathonApplicationInput};

use crate::data_models::{NewApplication, encode_string_list};
use crate::diesel_schema::hackathon_applications;
use crate::error::PersistenceError;

/// Inserts a new `WAITING` application.
///
/// Absent answer lists are stored empty and an absent sharing flag is
/// stored as `false`.
///
/// # Errors
///
/// Returns `PersistenceError::ApplicationAlreadyExists` if the user already
/// applied, or a storage error.
pub fn insert_application(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
    input: &HackathonApplicationInput,
    created_at: String,
) -> Result<(), PersistenceError> {
    let row = NewApplication {
        hackathon_id,
        user_id,
        why_attend: encode_string_list(input.why_attend.as_deref().unwrap_or_default())?,
        what_do_you_want_to_learn: encode_string_list(
            input
                .what_do_you_want_to_learn
                .as_deref()
                .unwrap_or_default(),
        )?,
        share_info_with_sponsors: i32::from(input.share_info_with_sponsors.unwrap_or(false)),
        application_status: ApplicationStatus::Waiting.as_str(),
        resume_blob_id: input.resume_blob_id.as_deref(),
        created_at,
    };

    match diesel::insert_into(hackathon_applications::table)
        .values(&row)
        .execute(conn)
    {
        Ok(_) => Ok(()),
        Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
            Err(PersistenceError::ApplicationAlreadyExists {
                hackathon_id,
                user_id,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Writes each field present in `input`, one statement per field.
///
/// # Errors
///
/// Returns `PersistenceError::ApplicationNotFound` if a statement matched no
/// row, or a storage error.
pub fn update_application_fields(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
    input: &HackathonApplicationInput,
) -> Result<(), PersistenceError> {
    let target = || hackathon_applications::table.find((hackathon_id, user_id));
    let mut updates: Vec<usize> = Vec::new();

    if let Some(why_attend) = &input.why_attend {
        updates.push(
            diesel::update(target())
                .set(hackathon_applications::why_attend.eq(encode_string_list(why_attend)?))
                .execute(conn)?,
        );
    }
    if let Some(what_do_you_want_to_learn) = &input.what_do_you_want_to_learn {
        updates.push(
            diesel::update(target())
                .set(
                    hackathon_applications::what_do_you_want_to_learn
                        .eq(encode_string_list(what_do_you_want_to_learn)?),
                )
                .execute(conn)?,
        );
    }
    if let Some(share) = input.share_info_with_sponsors {
        updates.push(
            diesel::update(target())
                .set(hackathon_applications::share_info_with_sponsors.eq(i32::from(share)))
                .execute(conn)?,
        );
    }
    if let Some(resume_blob_id) = &input.resume_blob_id {
        updates.push(
            diesel::update(target())
                .set(hackathon_applications::resume_blob_id.eq(Some(resume_blob_id.as_str())))
                .execute(conn)?,
        );
    }

    if updates.contains(&0) {
        return Err(PersistenceError::ApplicationNotFound {
            hackathon_id,
            user_id,
        });
    }
    Ok(())
}

/// Overwrites the status of an application.
///
/// # Errors
///
/// Returns `PersistenceError::ApplicationNotFound` if no row was updated, or
/// a storage error.
pub fn set_application_status(
    conn: &mut SqliteConnection,
    hackathon_id: i64,
    user_id: i64,
    status: ApplicationStatus,
) -> Result<(), PersistenceError> {
    let updated = diesel::update(hackathon_applications::table.find((hackathon_id, user_id)))
        .set(hackathon_applications::application_status.eq(status.as_str()))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ApplicationNotFound {
            hackathon_id,
            user_id,
        });
    }
    Ok(())
}
