// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use squad_roster_domain::{Enrollment, UserId};

use crate::data_models::{EnrollmentRow, user_id_from_column};
use crate::diesel_schema::{enrollments, event_managers};
use crate::error::PersistenceError;

/// Loads an event's enrollments in insertion order.
///
/// `entry_id` order is what breaks `joined_at` ties during promotion.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn load_enrollments(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Enrollment>, PersistenceError> {
    enrollments::table
        .filter(enrollments::event_id.eq(event_id))
        .order(enrollments::entry_id.asc())
        .select(EnrollmentRow::as_select())
        .load::<EnrollmentRow>(conn)?
        .into_iter()
        .map(EnrollmentRow::into_enrollment)
        .collect()
}

/// Loads an event's manager set, excluding the creator.
///
/// # Errors
///
/// Returns an error if the query fails or a user id is invalid.
pub fn load_managers(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<UserId>, PersistenceError> {
    event_managers::table
        .filter(event_managers::event_id.eq(event_id))
        .order(event_managers::user_id.asc())
        .select(event_managers::user_id)
        .load::<i64>(conn)?
        .into_iter()
        .map(user_id_from_column)
        .collect()
}
