// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::admin;
use crate::allocation::{join, leave};
use crate::auth::{Authorizer, Requester};
use crate::command::{Command, NewEvent};
use crate::commander::{assign_commander, unassign_commander};
use crate::draft::RosterDraft;
use crate::error::CoreError;
use crate::lifecycle::{reset, set_status};
use crate::promotion::promote_fifo;
use crate::state::{
    AssignAction, CreateEventResult, Outcome, Placement, RosterChange, RosterState,
    TransitionResult, UnassignAction,
};
use squad_roster_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use squad_roster_domain::{
    DomainError, Event, TeamLabels, UserId, normalize_label, normalize_starts_at, unix_millis,
    validate_event_config,
};
use time::OffsetDateTime;

/// Applies a command to an event's roster, producing the new state, the
/// writes that reach it and an audit event.
///
/// The command's [`Capability`](crate::Capability) is checked against
/// `authorizer` before any engine runs. The function is pure: `state` is never modified, and a rejected
/// command yields no changes at all.
///
/// # Arguments
///
/// * `state` - The current roster (immutable)
/// * `command` - The command to apply
/// * `requester` - The user issuing the command
/// * `authorizer` - The manager capability policy
/// * `cause` - The cause or reason for this action
/// * `now` - The current time; joins and inserted commanders take it as `joined_at`
///
/// # Errors
///
/// Returns an error if the requester is not allowed to issue the command
/// or the command violates a roster rule.
pub fn apply<A>(
    state: &RosterState,
    command: Command,
    requester: &Requester,
    authorizer: &A,
    cause: Cause,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError>
where
    A: Authorizer + ?Sized,
{
    let action_name: &'static str = command.name();
    if !authorizer.allows(state, requester, command.capability()) {
        return Err(CoreError::Unauthorized {
            user_id: requester.user_id,
            action: action_name,
        });
    }

    let joined_at: i64 = unix_millis(now);
    let mut draft: RosterDraft = RosterDraft::new(state);
    let outcome: Outcome = match command {
        Command::Join {
            team,
            squad,
            force_backup,
        } => join(
            &mut draft,
            requester.user_id,
            team,
            squad,
            force_backup,
            joined_at,
        )?,
        Command::Leave => leave(&mut draft, requester.user_id)?,
        Command::RemoveMember { user_id } => leave(&mut draft, user_id)?,
        Command::Promote { team, squad } => {
            draft.event().config.require_team(team)?;
            draft.event().config.require_squad(squad)?;
            let promoted: Option<UserId> = promote_fifo(&mut draft, team, squad);
            Outcome::Promoted {
                team,
                squad,
                promoted,
            }
        }
        Command::AssignCommander {
            team,
            squad,
            user_id,
        } => assign_commander(&mut draft, team, squad, user_id, joined_at)?,
        Command::UnassignCommander {
            team,
            user_id,
            demote_if_needed,
        } => unassign_commander(&mut draft, team, user_id, demote_if_needed, joined_at)?,
        Command::SetStatus { status } => set_status(&mut draft, status),
        Command::Reset { detach_display } => reset(&mut draft, detach_display),
        Command::UpdateCapacity { config } => admin::update_capacity(&mut draft, config)?,
        Command::SetTeamLabels { team_a, team_b } => {
            admin::set_team_labels(&mut draft, team_a.as_deref(), team_b.as_deref())?
        }
        Command::SetStartsAt { starts_at } => {
            admin::set_starts_at(&mut draft, starts_at.as_deref())?
        }
        Command::SetTeamTime { team, time } => admin::set_team_time(&mut draft, team, time)?,
        Command::SetTimeEditorRole { role_id } => admin::set_time_editor_role(&mut draft, role_id),
        Command::SetDisplay { display } => admin::set_display(&mut draft, display),
        Command::AddManager { user_id } => admin::add_manager(&mut draft, user_id)?,
        Command::RemoveManager { user_id } => admin::remove_manager(&mut draft, user_id)?,
    };

    let (new_state, changes): (RosterState, Vec<RosterChange>) = draft.finish();
    let audit_event: Option<AuditEvent> = if changes.is_empty() {
        None
    } else {
        Some(AuditEvent::new(
            Actor::user(requester.user_id),
            cause,
            Action::new(String::from(action_name), Some(describe(&outcome))),
            state.to_snapshot(),
            new_state.to_snapshot(),
            state.event.key.clone(),
        ))
    };

    Ok(TransitionResult {
        new_state,
        changes,
        outcome,
        audit_event,
    })
}

/// Validates a new event and produces its creation audit event.
///
/// Only guild administrators may create events. The creator becomes the
/// event's permanent manager.
///
/// # Arguments
///
/// * `existing` - The event already stored under the same key, if any
/// * `request` - The event to create
/// * `requester` - The user issuing the command
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the requester is not a guild administrator, the key
/// is taken, or the configuration or metadata is invalid.
pub fn apply_create_event(
    existing: Option<&Event>,
    request: NewEvent,
    requester: &Requester,
    cause: Cause,
) -> Result<CreateEventResult, CoreError> {
    if !requester.is_guild_admin {
        return Err(CoreError::Unauthorized {
            user_id: requester.user_id,
            action: "CreateEvent",
        });
    }
    if existing.is_some() {
        return Err(CoreError::DomainViolation(DomainError::DuplicateEvent {
            event: request.key.to_string(),
        }));
    }
    validate_event_config(&request.config)?;

    let mut event: Event = Event::new(request.key, request.config, requester.user_id);
    event.labels = TeamLabels {
        team_a: normalize_label(request.team_a_label.as_deref())?,
        team_b: normalize_label(request.team_b_label.as_deref())?,
    };
    event.starts_at = normalize_starts_at(request.starts_at.as_deref())?;

    let squad_b: String = event.config.squad_b.map_or_else(
        || String::from("none"),
        |limits| format!("{}/{}", limits.size, limits.commander_quota),
    );
    let action: Action = Action::new(
        String::from("CreateEvent"),
        Some(format!(
            "Created event {} (teams: {}, SA: {}/{}, SB: {squad_b}, backups: {})",
            event.key,
            event.config.teams.count(),
            event.config.squad_a.size,
            event.config.squad_a.commander_quota,
            event.config.backup_size
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        Actor::user(requester.user_id),
        cause,
        action,
        StateSnapshot::new(String::from("absent")),
        RosterState::new(event.clone()).to_snapshot(),
        event.key.clone(),
    );

    Ok(CreateEventResult { event, audit_event })
}

fn describe(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Joined { team, placement } => match placement {
            Placement::Main { squad } => format!("joined team {team} as main ({squad})"),
            Placement::Backup => format!("joined team {team} as backup"),
        },
        Outcome::AlreadyEnrolled { team, slot } => {
            format!("already on team {team} as {slot}")
        }
        Outcome::Left {
            user_id,
            team,
            removed,
            promoted,
        } => promoted.map_or_else(
            || format!("user {user_id} left team {team} ({removed})"),
            |promoted| {
                format!("user {user_id} left team {team} ({removed}); promoted user {promoted}")
            },
        ),
        Outcome::Promoted {
            team,
            squad,
            promoted,
        } => promoted.map_or_else(
            || format!("no backup promoted on team {team} squad {squad}"),
            |promoted| format!("promoted user {promoted} to team {team} squad {squad}"),
        ),
        Outcome::CommanderAssigned {
            team,
            squad,
            user_id,
            action,
        } => {
            let how: String = match action {
                AssignAction::Inserted => String::from("new entry"),
                AssignAction::ConvertedFromBackup => String::from("from backup"),
                AssignAction::UpdatedMain {
                    from_squad,
                    promoted: None,
                } => format!("from main ({from_squad})"),
                AssignAction::UpdatedMain {
                    from_squad,
                    promoted: Some(promoted),
                } => format!("from main ({from_squad}); promoted user {promoted}"),
                AssignAction::AlreadyCommander => String::from("unchanged"),
            };
            format!("user {user_id} commands team {team} squad {squad} ({how})")
        }
        Outcome::CommanderUnassigned {
            team,
            squad,
            user_id,
            action,
        } => match action {
            UnassignAction::ClearedFlag => {
                format!("user {user_id} is now a regular main in team {team} squad {squad}")
            }
            UnassignAction::DemotedToBackup { promoted } => promoted.map_or_else(
                || format!("user {user_id} demoted to team {team} backups"),
                |promoted| {
                    format!(
                        "user {user_id} demoted to team {team} backups; promoted user {promoted}"
                    )
                },
            ),
        },
        Outcome::StatusChanged { status } => format!("status set to {status}"),
        Outcome::Reset { cleared } => format!("cleared {cleared} enrollment(s)"),
        Outcome::CapacityUpdated => String::from("capacity updated"),
        Outcome::LabelsUpdated => String::from("team labels updated"),
        Outcome::StartsAtUpdated => String::from("start time updated"),
        Outcome::TeamTimeUpdated { team } => format!("team {team} time updated"),
        Outcome::TimeEditorRoleUpdated { role_id } => role_id.map_or_else(
            || String::from("time editor role cleared"),
            |role_id| format!("time editor role set to {role_id}"),
        ),
        Outcome::DisplayUpdated => String::from("display surface updated"),
        Outcome::ManagerAdded { user_id } => format!("user {user_id} added as manager"),
        Outcome::ManagerRemoved { user_id } => format!("user {user_id} removed as manager"),
    }
}
