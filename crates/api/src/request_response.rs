// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Requests carry raw codes and numbers; the handlers validate them.
//! Responses carry plain values only, never domain types.

use serde::{Deserialize, Serialize};
use squad_roster::{RosterSnapshot, SquadRoster, TeamRoster};
use squad_roster_audit::AuditEvent;
use squad_roster_domain::{Event, Team, TeamTime, UserId};

use crate::context::RequestContext;

/// Capacity fields shared by event creation and capacity updates.
///
/// Every field is optional; omitted fields keep their current (or default)
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CapacityFields {
    /// Number of teams, 1 or 2.
    pub teams: Option<i64>,
    /// Squad A size, commanders included.
    pub squad_a_size: Option<i64>,
    /// Squad A commander quota.
    pub squad_a_commanders: Option<i64>,
    /// Squad B size, commanders included.
    pub squad_b_size: Option<i64>,
    /// Squad B commander quota.
    pub squad_b_commanders: Option<i64>,
    /// Backup pool size per team.
    pub backup_size: Option<i64>,
    /// Drops squad B.
    #[serde(default)]
    pub remove_squad_b: bool,
}

/// API request to create an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEventRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The owning guild.
    pub guild_id: u64,
    /// The event name, unique within the guild.
    pub name: String,
    /// Capacity configuration; defaults apply to omitted fields.
    #[serde(flatten)]
    pub capacity: CapacityFields,
    /// Label for team A.
    pub team_a_label: Option<String>,
    /// Label for team B.
    pub team_b_label: Option<String>,
    /// Free-text start time.
    pub starts_at: Option<String>,
}

/// API request to join an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinRequest {
    /// Requester and cause. The requester is the user who joins.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Team code.
    pub team: String,
    /// Preferred squad code, if any.
    pub squad: Option<String>,
    /// Join the backup pool directly.
    #[serde(default)]
    pub force_backup: bool,
}

/// API request to remove another user's enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RemoveMemberRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The user to remove.
    pub user_id: u64,
}

/// API request to promote the earliest backup into a squad.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromoteRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Team code.
    pub team: String,
    /// Squad code.
    pub squad: String,
}

/// API request to make a user a squad commander.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignCommanderRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Team code.
    pub team: String,
    /// Squad code.
    pub squad: String,
    /// The new commander.
    pub user_id: u64,
}

/// API request to clear a user's commander flag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnassignCommanderRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Team code.
    pub team: String,
    /// The commander.
    pub user_id: u64,
    /// Move the user to backups when the squad has no regular main slot left.
    #[serde(default)]
    pub demote_if_needed: bool,
}

/// API request to lock or unlock an event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetStatusRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// `open` or `locked`.
    pub status: String,
}

/// API request to clear an event's roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResetRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Also forget the live display surface.
    #[serde(default)]
    pub detach_display: bool,
}

/// API request to replace an event's capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateCapacityRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Fields to change.
    #[serde(flatten)]
    pub capacity: CapacityFields,
}

/// API request to replace team labels. A missing or blank label restores
/// the default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetTeamLabelsRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// Label for team A.
    pub team_a_label: Option<String>,
    /// Label for team B.
    pub team_b_label: Option<String>,
}

/// API request to replace the free-text start time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetStartsAtRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The start time; missing or blank clears it.
    pub starts_at: Option<String>,
}

/// API request to replace one team's display time.
///
/// Give the time as text or as a Unix timestamp in seconds; give neither
/// to clear it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetTeamTimeRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The team code.
    pub team: String,
    /// Free-text time.
    pub time_text: Option<String>,
    /// Unix timestamp in seconds.
    pub time_unix: Option<i64>,
}

/// API request to delegate team-time editing to a chat role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetTimeEditorRoleRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The role; missing revokes the delegation.
    pub role_id: Option<u64>,
}

/// API request to attach or detach the live display surface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SetDisplayRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The channel; missing detaches the display.
    pub channel_id: Option<u64>,
    /// The posted roster message, if any.
    pub message_id: Option<u64>,
}

/// API request to add or remove an event manager.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManagerRequest {
    /// Requester and cause.
    #[serde(flatten)]
    pub context: RequestContext,
    /// The manager.
    pub user_id: u64,
}

/// API response for any roster command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// The command name.
    pub action: String,
    /// Whether anything was written.
    pub changed: bool,
    /// A human-readable summary.
    pub message: String,
    /// Where a join landed or the slot already held: `commander`, `main` or `backup`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// The slot category a departing user held.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed_category: Option<String>,
    /// A backup promoted as a result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted_user_id: Option<u64>,
    /// What a commander command did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    /// The audit record written, if anything changed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit_id: Option<i64>,
}

/// Event information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    /// The canonical numeric identifier.
    pub event_id: Option<i64>,
    /// The owning guild.
    pub guild_id: u64,
    /// The event name.
    pub name: String,
    /// `open` or `locked`.
    pub status: String,
    /// Number of teams.
    pub teams: u8,
    /// Squad A size.
    pub squad_a_size: u32,
    /// Squad A commander quota.
    pub squad_a_commanders: u32,
    /// Squad B size, if configured.
    pub squad_b_size: Option<u32>,
    /// Squad B commander quota, if configured.
    pub squad_b_commanders: Option<u32>,
    /// Backup pool size per team.
    pub backup_size: u32,
    /// Effective label of team A.
    pub team_a_label: String,
    /// Effective label of team B.
    pub team_b_label: String,
    /// Free-text start time.
    pub starts_at: Option<String>,
    /// Display times of the event's teams.
    pub team_times: Vec<TeamTimeInfo>,
    /// The role allowed to edit team times besides managers.
    pub time_editor_role_id: Option<u64>,
    /// Display channel.
    pub display_channel_id: Option<u64>,
    /// Display message.
    pub display_message_id: Option<u64>,
    /// The creator.
    pub created_by: u64,
    /// Creation timestamp (RFC 3339).
    pub created_at: Option<String>,
}

impl From<&Event> for EventInfo {
    fn from(event: &Event) -> Self {
        Self {
            event_id: event.event_id,
            guild_id: event.key.guild_id.value(),
            name: event.key.name.value().to_string(),
            status: event.status.as_str().to_string(),
            teams: event.config.teams.count(),
            squad_a_size: event.config.squad_a.size,
            squad_a_commanders: event.config.squad_a.commander_quota,
            squad_b_size: event.config.squad_b.map(|limits| limits.size),
            squad_b_commanders: event.config.squad_b.map(|limits| limits.commander_quota),
            backup_size: event.config.backup_size,
            team_a_label: event.labels.label(Team::A).to_string(),
            team_b_label: event.labels.label(Team::B).to_string(),
            starts_at: event.starts_at.clone(),
            team_times: event
                .config
                .teams
                .teams()
                .iter()
                .map(|team| TeamTimeInfo::new(*team, event.team_times.get(*team)))
                .collect(),
            time_editor_role_id: event.time_editor_role,
            display_channel_id: event.display.map(|display| display.channel_id),
            display_message_id: event.display.and_then(|display| display.message_id),
            created_by: event.created_by.value(),
            created_at: event.created_at.clone(),
        }
    }
}

/// One team's display time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTimeInfo {
    /// `A` or `B`.
    pub team: String,
    /// Free-text time, if set as text.
    pub time_text: Option<String>,
    /// Unix timestamp in seconds, if set as one.
    pub time_unix: Option<i64>,
}

impl TeamTimeInfo {
    fn new(team: Team, time: Option<&TeamTime>) -> Self {
        let (time_text, time_unix): (Option<String>, Option<i64>) = match time {
            Some(TeamTime::Text(text)) => (Some(text.clone()), None),
            Some(TeamTime::Unix(seconds)) => (None, Some(*seconds)),
            None => (None, None),
        };
        Self {
            team: team.as_str().to_string(),
            time_text,
            time_unix,
        }
    }
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateEventResponse {
    /// The created event.
    pub event: EventInfo,
    /// A success message.
    pub message: String,
}

/// API response listing a guild's events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEventsResponse {
    /// The guild.
    pub guild_id: u64,
    /// Events, oldest first.
    pub events: Vec<EventInfo>,
}

/// One squad in a roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadSnapshot {
    /// `SA` or `SB`.
    pub squad: String,
    /// Squad size.
    pub size: u32,
    /// Commander quota.
    pub commander_quota: u32,
    /// Commanders, earliest first.
    pub commanders: Vec<u64>,
    /// Regular mains, earliest first.
    pub mains: Vec<u64>,
}

/// One team in a roster snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    /// `A` or `B`.
    pub team: String,
    /// Effective label.
    pub label: String,
    /// Configured squads.
    pub squads: Vec<SquadSnapshot>,
    /// Backups, earliest first.
    pub backups: Vec<u64>,
    /// Backup pool size.
    pub backup_capacity: u32,
}

/// API response with an event's full roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    /// The event.
    pub event: EventInfo,
    /// Configured teams.
    pub teams: Vec<TeamSnapshot>,
}

fn raw_ids(users: &[UserId]) -> Vec<u64> {
    users.iter().map(UserId::value).collect()
}

impl From<&SquadRoster> for SquadSnapshot {
    fn from(squad: &SquadRoster) -> Self {
        Self {
            squad: squad.squad.as_str().to_string(),
            size: squad.size,
            commander_quota: squad.commander_quota,
            commanders: raw_ids(&squad.commanders),
            mains: raw_ids(&squad.mains),
        }
    }
}

impl From<&TeamRoster> for TeamSnapshot {
    fn from(team: &TeamRoster) -> Self {
        Self {
            team: team.team.as_str().to_string(),
            label: team.label.clone(),
            squads: team.squads.iter().map(SquadSnapshot::from).collect(),
            backups: raw_ids(&team.backups),
            backup_capacity: team.backup_capacity,
        }
    }
}

impl From<&RosterSnapshot> for SnapshotResponse {
    fn from(snapshot: &RosterSnapshot) -> Self {
        Self {
            event: EventInfo::from(&snapshot.event),
            teams: snapshot.teams.iter().map(TeamSnapshot::from).collect(),
        }
    }
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The record identifier.
    pub audit_id: Option<i64>,
    /// Who acted.
    pub actor_id: String,
    /// `user` or `system`.
    pub actor_type: String,
    /// The triggering interaction.
    pub cause_id: String,
    /// Its description.
    pub cause_description: String,
    /// The command name.
    pub action: String,
    /// What happened.
    pub details: Option<String>,
    /// Roster summary before.
    pub before: String,
    /// Roster summary after.
    pub after: String,
    /// When the record was written (RFC 3339).
    pub recorded_at: Option<String>,
}

impl From<&AuditEvent> for AuditEventInfo {
    fn from(event: &AuditEvent) -> Self {
        Self {
            audit_id: event.audit_id,
            actor_id: event.actor.id.clone(),
            actor_type: event.actor.actor_type.clone(),
            cause_id: event.cause.id.clone(),
            cause_description: event.cause.description.clone(),
            action: event.action.name.clone(),
            details: event.action.details.clone(),
            before: event.before.data.clone(),
            after: event.after.data.clone(),
            recorded_at: event.recorded_at.clone(),
        }
    }
}

/// API response with an event's audit timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTimelineResponse {
    /// The event name.
    pub name: String,
    /// Records, oldest first.
    pub events: Vec<AuditEventInfo>,
}
