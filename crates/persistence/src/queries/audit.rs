// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use num_traits::ToPrimitive;
use squad_roster_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use squad_roster_domain::{EventKey, EventName, GuildId};

use crate::data_models::{ActionData, ActorData, AuditRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Retrieves the audit timeline of an event, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event row id
///
/// # Errors
///
/// Returns an error if the query fails or a record cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_log::table
        .filter(audit_log::event_id.eq(event_id))
        .order(audit_log::audit_id.asc())
        .select(AuditRow::as_select())
        .load::<AuditRow>(conn)?
        .into_iter()
        .map(audit_event_from_row)
        .collect()
}

fn audit_event_from_row(row: AuditRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let guild_id: GuildId = row
        .guild_id
        .to_u64()
        .ok_or_else(|| PersistenceError::ReconstructionError("guild_id out of range".to_string()))
        .and_then(|value| {
            GuildId::new(value).map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
        })?;
    let name: EventName = EventName::new(&row.event_name)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

    Ok(AuditEvent::new(
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        EventKey::new(guild_id, name),
    )
    .persisted(row.audit_id, row.created_at))
}
