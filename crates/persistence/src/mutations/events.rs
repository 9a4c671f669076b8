// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use squad_roster_domain::Event;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{EventValues, to_i64};
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Inserts a new event row.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event` - The validated event
/// * `created_at` - The creation timestamp (RFC 3339)
///
/// # Returns
///
/// The event id assigned by the database.
///
/// # Errors
///
/// Returns an error if a value does not fit its column or the insert fails,
/// including when the `(guild_id, name)` key is already taken.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &Event,
    created_at: &str,
) -> Result<i64, PersistenceError> {
    let values: EventValues = EventValues::from_event(event)?;
    let guild_id: i64 = to_i64("guild_id", event.key.guild_id.value())?;
    let created_by: i64 = to_i64("created_by", event.created_by.value())?;

    diesel::insert_into(events::table)
        .values((
            events::guild_id.eq(guild_id),
            events::name.eq(event.key.name.value()),
            events::teams_count.eq(values.teams_count),
            events::squad_a_size.eq(values.squad_a_size),
            events::squad_a_commanders.eq(values.squad_a_commanders),
            events::squad_b_size.eq(values.squad_b_size),
            events::squad_b_commanders.eq(values.squad_b_commanders),
            events::backup_size.eq(values.backup_size),
            events::status.eq(values.status),
            events::created_by.eq(created_by),
            events::team_a_label.eq(values.team_a_label),
            events::team_b_label.eq(values.team_b_label),
            events::starts_at.eq(values.starts_at),
            events::team_a_time_text.eq(values.team_a_time_text),
            events::team_a_time_unix.eq(values.team_a_time_unix),
            events::team_b_time_text.eq(values.team_b_time_text),
            events::team_b_time_unix.eq(values.team_b_time_unix),
            events::time_editor_role_id.eq(values.time_editor_role_id),
            events::display_channel_id.eq(values.display_channel_id),
            events::display_message_id.eq(values.display_message_id),
            events::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, guild_id, name = event.key.name.value(), "Inserted event");
    Ok(event_id)
}

/// Rewrites an event's mutable columns.
///
/// # Errors
///
/// Returns an error if a value does not fit its column, the update fails,
/// or no row has this id.
pub fn update_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    event: &Event,
) -> Result<(), PersistenceError> {
    let values: EventValues = EventValues::from_event(event)?;

    let rows_affected: usize = diesel::update(events::table.filter(events::event_id.eq(event_id)))
        .set((
            events::teams_count.eq(values.teams_count),
            events::squad_a_size.eq(values.squad_a_size),
            events::squad_a_commanders.eq(values.squad_a_commanders),
            events::squad_b_size.eq(values.squad_b_size),
            events::squad_b_commanders.eq(values.squad_b_commanders),
            events::backup_size.eq(values.backup_size),
            events::status.eq(values.status),
            events::team_a_label.eq(values.team_a_label),
            events::team_b_label.eq(values.team_b_label),
            events::starts_at.eq(values.starts_at),
            events::team_a_time_text.eq(values.team_a_time_text),
            events::team_a_time_unix.eq(values.team_a_time_unix),
            events::team_b_time_text.eq(values.team_b_time_text),
            events::team_b_time_unix.eq(values.team_b_time_unix),
            events::time_editor_role_id.eq(values.time_editor_role_id),
            events::display_channel_id.eq(values.display_channel_id),
            events::display_message_id.eq(values.display_message_id),
        ))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("event row {event_id}")));
    }
    debug!(event_id, status = values.status, "Updated event");
    Ok(())
}
