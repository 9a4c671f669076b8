// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use squad_roster::RosterChange;

use super::enrollments::{
    clear_enrollments, delete_enrollment, delete_manager, insert_enrollment, insert_manager,
    update_enrollment,
};
use super::events::update_event;
use crate::error::PersistenceError;

/// Writes the changes of one transition, in order.
///
/// Must run inside the caller's transaction so a failure part-way leaves
/// nothing behind.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn apply_changes(
    conn: &mut SqliteConnection,
    event_id: i64,
    changes: &[RosterChange],
) -> Result<(), PersistenceError> {
    for change in changes {
        match change {
            RosterChange::Insert(entry) => insert_enrollment(conn, event_id, entry)?,
            RosterChange::Update(entry) => update_enrollment(conn, event_id, entry)?,
            RosterChange::Remove(user_id) => delete_enrollment(conn, event_id, *user_id)?,
            RosterChange::ClearEnrollments => {
                clear_enrollments(conn, event_id)?;
            }
            RosterChange::UpdateEvent(event) => update_event(conn, event_id, event)?,
            RosterChange::AddManager(user_id) => insert_manager(conn, event_id, *user_id)?,
            RosterChange::RemoveManager(user_id) => delete_manager(conn, event_id, *user_id)?,
        }
    }
    Ok(())
}
