// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use squad_roster_domain::{Enrollment, Squad, UserId};
use tracing::debug;

use crate::data_models::to_i64;
use crate::diesel_schema::{enrollments, event_managers};
use crate::error::PersistenceError;

/// Inserts an enrollment.
///
/// # Errors
///
/// Returns an error if the insert fails. The `UNIQUE(event_id, user_id)`
/// constraint rejects a second entry for the same user.
pub fn insert_enrollment(
    conn: &mut SqliteConnection,
    event_id: i64,
    entry: &Enrollment,
) -> Result<(), PersistenceError> {
    let user_id: i64 = to_i64("user_id", entry.user_id.value())?;
    diesel::insert_into(enrollments::table)
        .values((
            enrollments::event_id.eq(event_id),
            enrollments::user_id.eq(user_id),
            enrollments::team.eq(entry.team.as_str()),
            enrollments::slot_type.eq(entry.slot.slot_type()),
            enrollments::squad.eq(entry.slot.squad().map(|squad: Squad| squad.as_str())),
            enrollments::is_commander.eq(entry.slot.is_commander()),
            enrollments::joined_at.eq(entry.joined_at),
        ))
        .execute(conn)?;

    debug!(event_id, user_id, slot = %entry.slot, "Inserted enrollment");
    Ok(())
}

/// Rewrites an enrollment in place. Its `entry_id` is kept.
///
/// # Errors
///
/// Returns an error if the update fails or the user has no enrollment.
pub fn update_enrollment(
    conn: &mut SqliteConnection,
    event_id: i64,
    entry: &Enrollment,
) -> Result<(), PersistenceError> {
    let user_id: i64 = to_i64("user_id", entry.user_id.value())?;
    let rows_affected: usize = diesel::update(
        enrollments::table
            .filter(enrollments::event_id.eq(event_id))
            .filter(enrollments::user_id.eq(user_id)),
    )
    .set((
        enrollments::team.eq(entry.team.as_str()),
        enrollments::slot_type.eq(entry.slot.slot_type()),
        enrollments::squad.eq(entry.slot.squad().map(|squad: Squad| squad.as_str())),
        enrollments::is_commander.eq(entry.slot.is_commander()),
        enrollments::joined_at.eq(entry.joined_at),
    ))
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "enrollment of user {user_id} in event row {event_id}"
        )));
    }
    debug!(event_id, user_id, slot = %entry.slot, "Updated enrollment");
    Ok(())
}

/// Deletes a user's enrollment.
///
/// # Errors
///
/// Returns an error if the delete fails or the user has no enrollment.
pub fn delete_enrollment(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: UserId,
) -> Result<(), PersistenceError> {
    let user_id: i64 = to_i64("user_id", user_id.value())?;
    let rows_affected: usize = diesel::delete(
        enrollments::table
            .filter(enrollments::event_id.eq(event_id))
            .filter(enrollments::user_id.eq(user_id)),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "enrollment of user {user_id} in event row {event_id}"
        )));
    }
    debug!(event_id, user_id, "Deleted enrollment");
    Ok(())
}

/// Deletes every enrollment of an event.
///
/// # Returns
///
/// The number of rows deleted.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn clear_enrollments(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<usize, PersistenceError> {
    let cleared: usize =
        diesel::delete(enrollments::table.filter(enrollments::event_id.eq(event_id)))
            .execute(conn)?;
    debug!(event_id, cleared, "Cleared enrollments");
    Ok(cleared)
}

/// Adds a user to an event's manager set.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_manager(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: UserId,
) -> Result<(), PersistenceError> {
    let user_id: i64 = to_i64("user_id", user_id.value())?;
    diesel::insert_into(event_managers::table)
        .values((
            event_managers::event_id.eq(event_id),
            event_managers::user_id.eq(user_id),
        ))
        .execute(conn)?;
    debug!(event_id, user_id, "Added manager");
    Ok(())
}

/// Removes a user from an event's manager set.
///
/// # Errors
///
/// Returns an error if the delete fails or the user is not in the set.
pub fn delete_manager(
    conn: &mut SqliteConnection,
    event_id: i64,
    user_id: UserId,
) -> Result<(), PersistenceError> {
    let user_id: i64 = to_i64("user_id", user_id.value())?;
    let rows_affected: usize = diesel::delete(
        event_managers::table
            .filter(event_managers::event_id.eq(event_id))
            .filter(event_managers::user_id.eq(user_id)),
    )
    .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "manager {user_id} of event row {event_id}"
        )));
    }
    debug!(event_id, user_id, "Removed manager");
    Ok(())
}
