// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use squad_roster_domain::{Event, EventKey, GuildId};
use tracing::debug;

use crate::data_models::{EventRow, to_i64};
use crate::diesel_schema::events;
use crate::error::PersistenceError;

/// Finds an event by its `(guild, name)` key.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn find_event(
    conn: &mut SqliteConnection,
    key: &EventKey,
) -> Result<Option<Event>, PersistenceError> {
    let guild_id: i64 = to_i64("guild_id", key.guild_id.value())?;
    let row: Option<EventRow> = events::table
        .filter(events::guild_id.eq(guild_id))
        .filter(events::name.eq(key.name.value()))
        .select(EventRow::as_select())
        .first::<EventRow>(conn)
        .optional()?;

    debug!(guild_id, name = key.name.value(), found = row.is_some(), "Looked up event");
    row.map(EventRow::into_event).transpose()
}

/// Lists a guild's events, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_events(
    conn: &mut SqliteConnection,
    guild_id: GuildId,
) -> Result<Vec<Event>, PersistenceError> {
    let guild_id: i64 = to_i64("guild_id", guild_id.value())?;
    let rows: Vec<EventRow> = events::table
        .filter(events::guild_id.eq(guild_id))
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load::<EventRow>(conn)?;

    debug!(guild_id, count = rows.len(), "Listed events");
    rows.into_iter().map(EventRow::into_event).collect()
}
