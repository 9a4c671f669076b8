// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request handlers.
//!
//! Every write handler follows the same path: validate the request,
//! execute one command atomically through the store, render the outcome.
//! Authorization happens inside the core, against the freshly loaded roster.

use squad_roster::{
    Command, CreateEventResult, EventManagers, NewEvent, Requester, RosterState, TransitionResult,
};
use squad_roster_audit::AuditEvent;
use squad_roster_domain::{
    DisplaySurface, Event, EventConfig, EventKey, EventStatus, GuildId, Squad, Team, TeamTime,
    UserId,
};
use squad_roster_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::context::RequestContext;
use crate::error::{ApiError, translate_core_error, translate_persistence_error};
use crate::input::{
    parse_capacity, parse_display, parse_event_key, parse_guild_id, parse_optional_squad,
    parse_role_id, parse_squad, parse_status, parse_team, parse_team_time, parse_user_id,
};
use crate::outcome::command_response;
use crate::request_response::{
    AssignCommanderRequest, AuditEventInfo, AuditTimelineResponse, CommandResponse,
    CreateEventRequest, CreateEventResponse, EventInfo, JoinRequest, ListEventsResponse,
    ManagerRequest, PromoteRequest, RemoveMemberRequest, ResetRequest, SetDisplayRequest,
    SetStartsAtRequest, SetStatusRequest, SetTeamLabelsRequest, SetTeamTimeRequest,
    SetTimeEditorRoleRequest, SnapshotResponse, UnassignCommanderRequest, UpdateCapacityRequest,
};

fn event_not_found(key: &EventKey) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Event"),
        message: format!("Event {key} not found"),
    }
}

/// Executes one command and renders its outcome.
fn run_command(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    context: &RequestContext,
    command: Command,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let key: EventKey = parse_event_key(guild_id, name)?;
    let requester: Requester = context.requester()?;
    let action: &'static str = command.name();

    let result: TransitionResult = match persistence.execute_command(
        &key,
        command,
        &requester,
        &EventManagers,
        context.cause(),
        now,
    ) {
        Ok(Ok(result)) => result,
        Ok(Err(rejection)) => {
            warn!(
                event = %key,
                action,
                requester = %requester.user_id,
                error = %rejection,
                "Command rejected"
            );
            return Err(translate_core_error(rejection));
        }
        Err(err) => return Err(translate_persistence_error(err)),
    };

    let response: CommandResponse = command_response(action, &result);
    if response.changed {
        info!(
            event = %key,
            action,
            requester = %requester.user_id,
            message = %response.message,
            "Command committed"
        );
    }
    Ok(response)
}

/// Creates an event.
///
/// Capacity fields omitted from the request take the defaults: two teams,
/// squad A of 20 with 3 commanders, no squad B, 10 backups per team.
///
/// # Errors
///
/// Returns an error if the input is invalid, the requester is not a guild
/// administrator, the name is taken in the guild, or the store fails.
pub fn create_event(
    persistence: &mut Persistence,
    request: &CreateEventRequest,
    now: OffsetDateTime,
) -> Result<CreateEventResponse, ApiError> {
    let key: EventKey = parse_event_key(request.guild_id, &request.name)?;
    let requester: Requester = request.context.requester()?;
    let config: EventConfig = parse_capacity(&request.capacity, EventConfig::default())?;

    let new_event: NewEvent = NewEvent {
        key: key.clone(),
        config,
        team_a_label: request.team_a_label.clone(),
        team_b_label: request.team_b_label.clone(),
        starts_at: request.starts_at.clone(),
    };

    let result: CreateEventResult =
        match persistence.create_event(new_event, &requester, request.context.cause(), now) {
            Ok(Ok(result)) => result,
            Ok(Err(rejection)) => {
                warn!(event = %key, requester = %requester.user_id, error = %rejection, "Event creation rejected");
                return Err(translate_core_error(rejection));
            }
            Err(err) => return Err(translate_persistence_error(err)),
        };

    info!(event = %key, requester = %requester.user_id, "Event created");
    Ok(CreateEventResponse {
        message: format!("Created event '{}'.", result.event.key.name),
        event: EventInfo::from(&result.event),
    })
}

/// Lists a guild's events, oldest first.
///
/// # Errors
///
/// Returns an error if the guild id is invalid or the store fails.
pub fn list_events(
    persistence: &mut Persistence,
    guild_id: u64,
) -> Result<ListEventsResponse, ApiError> {
    let guild: GuildId = parse_guild_id(guild_id)?;
    let events: Vec<Event> = persistence
        .list_events(guild)
        .map_err(translate_persistence_error)?;
    Ok(ListEventsResponse {
        guild_id,
        events: events.iter().map(EventInfo::from).collect(),
    })
}

/// Returns an event's roster.
///
/// # Errors
///
/// Returns an error if the key is invalid, the event does not exist, or the
/// store fails.
pub fn get_snapshot(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
) -> Result<SnapshotResponse, ApiError> {
    let key: EventKey = parse_event_key(guild_id, name)?;
    let state: RosterState = persistence
        .load_roster(&key)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(&key))?;
    Ok(SnapshotResponse::from(&state.snapshot()))
}

/// Returns an event's audit timeline, oldest first.
///
/// # Errors
///
/// Returns an error if the key is invalid, the event does not exist, or the
/// store fails.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
) -> Result<AuditTimelineResponse, ApiError> {
    let key: EventKey = parse_event_key(guild_id, name)?;
    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(&key)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(&key))?;
    Ok(AuditTimelineResponse {
        name: key.name.value().to_string(),
        events: events.iter().map(AuditEventInfo::from).collect(),
    })
}

/// Joins the requester to a team.
///
/// # Errors
///
/// Returns an error if the input is invalid, the join is refused, or the
/// store fails.
pub fn join(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &JoinRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let team: Team = parse_team(&request.team)?;
    let squad: Option<Squad> = parse_optional_squad(request.squad.as_deref())?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::Join {
            team,
            squad,
            force_backup: request.force_backup,
        },
        now,
    )
}

/// Removes the requester's own enrollment.
///
/// # Errors
///
/// Returns an error if the requester is not enrolled or the store fails.
pub fn leave(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    context: &RequestContext,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    run_command(persistence, guild_id, name, context, Command::Leave, now)
}

/// Removes another user's enrollment. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the command is refused, or the
/// store fails.
pub fn remove_member(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &RemoveMemberRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", request.user_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::RemoveMember { user_id },
        now,
    )
}

/// Promotes the earliest backup into a squad. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the command is refused, or the
/// store fails.
pub fn promote(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &PromoteRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let team: Team = parse_team(&request.team)?;
    let squad: Squad = parse_squad(&request.squad)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::Promote { team, squad },
        now,
    )
}

/// Makes a user a squad commander. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the command is refused, or the
/// store fails.
pub fn assign_commander(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &AssignCommanderRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let team: Team = parse_team(&request.team)?;
    let squad: Squad = parse_squad(&request.squad)?;
    let user_id: UserId = parse_user_id("user_id", request.user_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::AssignCommander {
            team,
            squad,
            user_id,
        },
        now,
    )
}

/// Clears a user's commander flag. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the command is refused, or the
/// store fails.
pub fn unassign_commander(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &UnassignCommanderRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let team: Team = parse_team(&request.team)?;
    let user_id: UserId = parse_user_id("user_id", request.user_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::UnassignCommander {
            team,
            user_id,
            demote_if_needed: request.demote_if_needed,
        },
        now,
    )
}

/// Locks or unlocks an event. Manager only.
///
/// # Errors
///
/// Returns an error if the status is invalid, the command is refused, or the
/// store fails.
pub fn set_status(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetStatusRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let status: EventStatus = parse_status(&request.status)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetStatus { status },
        now,
    )
}

/// Clears every enrollment and reopens the event. Manager only.
///
/// # Errors
///
/// Returns an error if the command is refused or the store fails.
pub fn reset(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &ResetRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::Reset {
            detach_display: request.detach_display,
        },
        now,
    )
}

/// Replaces an event's capacity configuration. Manager only.
///
/// Omitted fields keep their current value. The current configuration is
/// read first; the command itself re-checks occupancy inside its
/// transaction.
///
/// # Errors
///
/// Returns an error if the input is invalid, the new limits do not fit the
/// current roster, the command is refused, or the store fails.
pub fn update_capacity(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &UpdateCapacityRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let key: EventKey = parse_event_key(guild_id, name)?;
    let current: EventConfig = persistence
        .load_roster(&key)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| event_not_found(&key))?
        .event
        .config;
    let config: EventConfig = parse_capacity(&request.capacity, current)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::UpdateCapacity { config },
        now,
    )
}

/// Replaces both team labels. Manager only.
///
/// # Errors
///
/// Returns an error if a label is too long, the command is refused, or the
/// store fails.
pub fn set_team_labels(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetTeamLabelsRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetTeamLabels {
            team_a: request.team_a_label.clone(),
            team_b: request.team_b_label.clone(),
        },
        now,
    )
}

/// Replaces the free-text start time. Manager only.
///
/// # Errors
///
/// Returns an error if the text is too long, the command is refused, or the
/// store fails.
pub fn set_starts_at(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetStartsAtRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetStartsAt {
            starts_at: request.starts_at.clone(),
        },
        now,
    )
}

/// Replaces one team's display time.
///
/// Managers and holders of the event's time-editor role may call this.
///
/// # Errors
///
/// Returns an error if the input is invalid, the team is not part of the
/// event, the command is refused, or the store fails.
pub fn set_team_time(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetTeamTimeRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let team: Team = parse_team(&request.team)?;
    let time: Option<TeamTime> = parse_team_time(request.time_text.as_deref(), request.time_unix)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetTeamTime { team, time },
        now,
    )
}

/// Delegates team-time editing to a chat role, or revokes it. Manager only.
///
/// # Errors
///
/// Returns an error if the role id is invalid, the command is refused, or
/// the store fails.
pub fn set_time_editor_role(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetTimeEditorRoleRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let role_id: Option<u64> = request.role_id.map(parse_role_id).transpose()?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetTimeEditorRole { role_id },
        now,
    )
}

/// Attaches or detaches the live display surface. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the command is refused, or the
/// store fails.
pub fn set_display(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &SetDisplayRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let display: Option<DisplaySurface> = parse_display(request.channel_id, request.message_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::SetDisplay { display },
        now,
    )
}

/// Adds an event manager. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the user already manages the
/// event, the command is refused, or the store fails.
pub fn add_manager(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &ManagerRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", request.user_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::AddManager { user_id },
        now,
    )
}

/// Removes an event manager. The creator cannot be removed. Manager only.
///
/// # Errors
///
/// Returns an error if the input is invalid, the user is not a removable
/// manager, the command is refused, or the store fails.
pub fn remove_manager(
    persistence: &mut Persistence,
    guild_id: u64,
    name: &str,
    request: &ManagerRequest,
    now: OffsetDateTime,
) -> Result<CommandResponse, ApiError> {
    let user_id: UserId = parse_user_id("user_id", request.user_id)?;
    run_command(
        persistence,
        guild_id,
        name,
        &request.context,
        Command::RemoveManager { user_id },
        now,
    )
}
