// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and the conversions between rows and domain values.
//!
//! Domain counts are `u32` and platform identifiers `u64`; the store keeps
//! them in signed `INTEGER`/`BIGINT` columns. Every crossing goes through
//! `ToPrimitive` so an out-of-range value is an error, never a wrap.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use squad_roster_domain::{
    DisplaySurface, DomainError, Enrollment, Event, EventConfig, EventKey, EventName,
    EventStatus, GuildId, Slot, Squad, SquadLimits, Team, TeamCount, TeamLabels, TeamTime,
    TeamTimes, UserId,
};

use crate::diesel_schema::{audit_log, enrollments, events};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A full `events` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
pub struct EventRow {
    pub event_id: i64,
    pub guild_id: i64,
    pub name: String,
    pub teams_count: i32,
    pub squad_a_size: i32,
    pub squad_a_commanders: i32,
    pub squad_b_size: Option<i32>,
    pub squad_b_commanders: Option<i32>,
    pub backup_size: i32,
    pub status: String,
    pub created_by: i64,
    pub team_a_label: Option<String>,
    pub team_b_label: Option<String>,
    pub starts_at: Option<String>,
    pub team_a_time_text: Option<String>,
    pub team_a_time_unix: Option<i64>,
    pub team_b_time_text: Option<String>,
    pub team_b_time_unix: Option<i64>,
    pub time_editor_role_id: Option<i64>,
    pub display_channel_id: Option<i64>,
    pub display_message_id: Option<i64>,
    pub created_at: String,
}

impl EventRow {
    /// Rebuilds the domain event.
    ///
    /// # Errors
    ///
    /// Returns an error if any column holds a value the domain rejects.
    pub fn into_event(self) -> Result<Event, PersistenceError> {
        let guild_id: GuildId =
            GuildId::new(to_u64("guild_id", self.guild_id)?).map_err(reconstruction)?;
        let name: EventName = EventName::new(&self.name).map_err(reconstruction)?;
        let teams_count: u8 = self.teams_count.to_u8().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "teams_count out of range: {}",
                self.teams_count
            ))
        })?;
        let squad_b: Option<SquadLimits> = match (self.squad_b_size, self.squad_b_commanders) {
            (Some(size), Some(quota)) => Some(SquadLimits::new(
                to_u32("squad_b_size", size)?,
                to_u32("squad_b_commanders", quota)?,
            )),
            (None, None) => None,
            _ => {
                return Err(PersistenceError::ReconstructionError(String::from(
                    "squad_b_size and squad_b_commanders must be set together",
                )));
            }
        };
        let config: EventConfig = EventConfig {
            teams: TeamCount::from_count(teams_count).map_err(reconstruction)?,
            squad_a: SquadLimits::new(
                to_u32("squad_a_size", self.squad_a_size)?,
                to_u32("squad_a_commanders", self.squad_a_commanders)?,
            ),
            squad_b,
            backup_size: to_u32("backup_size", self.backup_size)?,
        };
        let display: Option<DisplaySurface> = match self.display_channel_id {
            Some(channel_id) => Some(DisplaySurface {
                channel_id: to_u64("display_channel_id", channel_id)?,
                message_id: self
                    .display_message_id
                    .map(|id| to_u64("display_message_id", id))
                    .transpose()?,
            }),
            None => None,
        };

        Ok(Event {
            event_id: Some(self.event_id),
            key: EventKey::new(guild_id, name),
            config,
            status: self.status.parse::<EventStatus>().map_err(reconstruction)?,
            created_by: user_id_from_column(self.created_by)?,
            labels: TeamLabels {
                team_a: self.team_a_label,
                team_b: self.team_b_label,
            },
            starts_at: self.starts_at,
            team_times: TeamTimes {
                team_a: team_time_from_columns(
                    "team_a_time",
                    self.team_a_time_text,
                    self.team_a_time_unix,
                )?,
                team_b: team_time_from_columns(
                    "team_b_time",
                    self.team_b_time_text,
                    self.team_b_time_unix,
                )?,
            },
            time_editor_role: self
                .time_editor_role_id
                .map(|id| to_u64("time_editor_role_id", id))
                .transpose()?,
            display,
            created_at: Some(self.created_at),
        })
    }
}

/// Column values for writing an `events` row.
///
/// The key, creator and creation time are written once by the insert;
/// updates only touch the mutable columns.
#[derive(Debug, Clone)]
pub struct EventValues {
    pub teams_count: i32,
    pub squad_a_size: i32,
    pub squad_a_commanders: i32,
    pub squad_b_size: Option<i32>,
    pub squad_b_commanders: Option<i32>,
    pub backup_size: i32,
    pub status: &'static str,
    pub team_a_label: Option<String>,
    pub team_b_label: Option<String>,
    pub starts_at: Option<String>,
    pub team_a_time_text: Option<String>,
    pub team_a_time_unix: Option<i64>,
    pub team_b_time_text: Option<String>,
    pub team_b_time_unix: Option<i64>,
    pub time_editor_role_id: Option<i64>,
    pub display_channel_id: Option<i64>,
    pub display_message_id: Option<i64>,
}

impl EventValues {
    /// Converts the mutable part of an event to column values.
    ///
    /// # Errors
    ///
    /// Returns an error if a count or identifier does not fit its column.
    pub fn from_event(event: &Event) -> Result<Self, PersistenceError> {
        let config: &EventConfig = &event.config;
        Ok(Self {
            teams_count: i32::from(config.teams.count()),
            squad_a_size: to_i32("squad_a_size", config.squad_a.size)?,
            squad_a_commanders: to_i32("squad_a_commanders", config.squad_a.commander_quota)?,
            squad_b_size: config
                .squad_b
                .map(|limits| to_i32("squad_b_size", limits.size))
                .transpose()?,
            squad_b_commanders: config
                .squad_b
                .map(|limits| to_i32("squad_b_commanders", limits.commander_quota))
                .transpose()?,
            backup_size: to_i32("backup_size", config.backup_size)?,
            status: event.status.as_str(),
            team_a_label: event.labels.team_a.clone(),
            team_b_label: event.labels.team_b.clone(),
            starts_at: event.starts_at.clone(),
            team_a_time_text: team_time_text(event.team_times.get(Team::A)),
            team_a_time_unix: team_time_unix(event.team_times.get(Team::A)),
            team_b_time_text: team_time_text(event.team_times.get(Team::B)),
            team_b_time_unix: team_time_unix(event.team_times.get(Team::B)),
            time_editor_role_id: event
                .time_editor_role
                .map(|id| to_i64("time_editor_role_id", id))
                .transpose()?,
            display_channel_id: event
                .display
                .map(|display| to_i64("display_channel_id", display.channel_id))
                .transpose()?,
            display_message_id: event
                .display
                .and_then(|display| display.message_id)
                .map(|id| to_i64("display_message_id", id))
                .transpose()?,
        })
    }
}

/// A full `enrollments` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = enrollments)]
pub struct EnrollmentRow {
    #[allow(dead_code)]
    pub entry_id: i64,
    #[allow(dead_code)]
    pub event_id: i64,
    pub user_id: i64,
    pub team: String,
    pub slot_type: String,
    pub squad: Option<String>,
    pub is_commander: bool,
    pub joined_at: i64,
}

impl EnrollmentRow {
    /// Rebuilds the domain enrollment.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot columns describe an impossible slot.
    pub fn into_enrollment(self) -> Result<Enrollment, PersistenceError> {
        let squad: Option<Squad> = self
            .squad
            .as_deref()
            .map(str::parse::<Squad>)
            .transpose()
            .map_err(reconstruction)?;
        let slot: Slot =
            Slot::from_parts(&self.slot_type, squad, self.is_commander).map_err(reconstruction)?;
        Ok(Enrollment::new(
            user_id_from_column(self.user_id)?,
            self.team.parse::<Team>().map_err(reconstruction)?,
            slot,
            self.joined_at,
        ))
    }
}

/// A full `audit_log` row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_log)]
pub struct AuditRow {
    pub audit_id: i64,
    #[allow(dead_code)]
    pub event_id: i64,
    pub guild_id: i64,
    pub event_name: String,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

fn reconstruction(err: DomainError) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

fn to_u32(field: &str, value: i32) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{field} out of range: {value}"))
    })
}

fn to_u64(field: &str, value: i64) -> Result<u64, PersistenceError> {
    value.to_u64().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{field} out of range: {value}"))
    })
}

/// Rebuilds a team time from its text and unix columns; at most one is set.
fn team_time_from_columns(
    field: &str,
    text: Option<String>,
    unix: Option<i64>,
) -> Result<Option<TeamTime>, PersistenceError> {
    match (text, unix) {
        (None, None) => Ok(None),
        (Some(text), None) => Ok(Some(TeamTime::Text(text))),
        (None, Some(seconds)) => Ok(Some(TeamTime::Unix(seconds))),
        (Some(_), Some(_)) => Err(PersistenceError::ReconstructionError(format!(
            "{field} has both text and unix values"
        ))),
    }
}

fn team_time_text(time: Option<&TeamTime>) -> Option<String> {
    match time {
        Some(TeamTime::Text(text)) => Some(text.clone()),
        _ => None,
    }
}

const fn team_time_unix(time: Option<&TeamTime>) -> Option<i64> {
    match time {
        Some(TeamTime::Unix(seconds)) => Some(*seconds),
        _ => None,
    }
}

/// Converts a stored user id column.
///
/// # Errors
///
/// Returns an error if the value is not a valid user id.
pub fn user_id_from_column(value: i64) -> Result<UserId, PersistenceError> {
    UserId::new(to_u64("user_id", value)?).map_err(reconstruction)
}

/// Converts a count to an `INTEGER` column value.
///
/// # Errors
///
/// Returns an error if the value does not fit.
pub fn to_i32(field: &str, value: u32) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{field} does not fit a column: {value}"))
    })
}

/// Converts an identifier to a `BIGINT` column value.
///
/// # Errors
///
/// Returns an error if the value does not fit.
pub fn to_i64(field: &str, value: u64) -> Result<i64, PersistenceError> {
    value.to_i64().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{field} does not fit a column: {value}"))
    })
}
