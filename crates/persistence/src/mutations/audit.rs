// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use squad_roster_audit::AuditEvent;
use tracing::debug;

use crate::backend::get_last_insert_rowid;
use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData, to_i64};
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Persists an audit event against an event row.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `event_id` - The event row the record belongs to
/// * `event` - The audit event to persist
/// * `recorded_at` - The record timestamp (RFC 3339)
///
/// # Returns
///
/// The audit event with its assigned id and timestamp attached.
///
/// # Errors
///
/// Returns an error if persistence or serialization fails.
pub fn persist_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
    event: AuditEvent,
    recorded_at: &str,
) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = ActorData {
        id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
    };
    let cause_data: CauseData = CauseData {
        id: event.cause.id.clone(),
        description: event.cause.description.clone(),
    };
    let action_data: ActionData = ActionData {
        name: event.action.name.clone(),
        details: event.action.details.clone(),
    };
    let before_data: StateSnapshotData = StateSnapshotData {
        data: event.before.data.clone(),
    };
    let after_data: StateSnapshotData = StateSnapshotData {
        data: event.after.data.clone(),
    };

    let actor_json: String = serde_json::to_string(&actor_data)?;
    let cause_json: String = serde_json::to_string(&cause_data)?;
    let action_json: String = serde_json::to_string(&action_data)?;
    let before_json: String = serde_json::to_string(&before_data)?;
    let after_json: String = serde_json::to_string(&after_data)?;
    let guild_id: i64 = to_i64("guild_id", event.scope.guild_id.value())?;

    diesel::insert_into(audit_log::table)
        .values((
            audit_log::event_id.eq(event_id),
            audit_log::guild_id.eq(guild_id),
            audit_log::event_name.eq(event.scope.name.value()),
            audit_log::actor_json.eq(actor_json),
            audit_log::cause_json.eq(cause_json),
            audit_log::action_json.eq(action_json),
            audit_log::before_snapshot_json.eq(before_json),
            audit_log::after_snapshot_json.eq(after_json),
            audit_log::created_at.eq(recorded_at),
        ))
        .execute(conn)?;

    let audit_id: i64 = get_last_insert_rowid(conn)?;
    debug!(audit_id, event_id, action = %event.action.name, "Persisted audit event");
    Ok(event.persisted(audit_id, recorded_at.to_string()))
}
