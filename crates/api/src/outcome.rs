// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rendering of command outcomes into responses.

use squad_roster::{AssignAction, Outcome, Placement, TransitionResult, UnassignAction};
use squad_roster_domain::{Event, EventStatus, Slot, Team, UserId};

use crate::request_response::CommandResponse;

const fn slot_category(slot: Slot) -> &'static str {
    match slot {
        Slot::Commander { .. } => "commander",
        Slot::Main { .. } => "main",
        Slot::Backup => "backup",
    }
}

fn promoted_suffix(promoted: Option<UserId>) -> String {
    promoted.map_or_else(String::new, |user_id| {
        format!(" Promoted user {user_id} from backup.")
    })
}

/// Builds the response for a committed (or no-op) command.
pub fn command_response(action: &str, result: &TransitionResult) -> CommandResponse {
    let event: &Event = &result.new_state.event;
    let mut response: CommandResponse = CommandResponse {
        action: action.to_string(),
        changed: !result.is_noop(),
        message: String::new(),
        category: None,
        removed_category: None,
        promoted_user_id: None,
        result: None,
        audit_id: result
            .audit_event
            .as_ref()
            .and_then(|audit_event| audit_event.audit_id),
    };

    response.message = match &result.outcome {
        Outcome::Joined { team, placement } => {
            let label: &str = event.team_label(*team);
            match placement {
                Placement::Main { squad } => {
                    response.category = Some(String::from("main"));
                    format!("Joined {label} as main ({squad}).")
                }
                Placement::Backup => {
                    response.category = Some(String::from("backup"));
                    format!("Joined {label} as backup.")
                }
            }
        }
        Outcome::AlreadyEnrolled { team, slot } => {
            response.category = Some(slot_category(*slot).to_string());
            format!(
                "Already registered on {} as {slot}.",
                event.team_label(*team)
            )
        }
        Outcome::Left {
            user_id,
            team,
            removed,
            promoted,
        } => {
            response.removed_category = Some(slot_category(*removed).to_string());
            response.promoted_user_id = promoted.map(|id| id.value());
            let label: &str = event.team_label(*team);
            let head: String = if action == "RemoveMember" {
                format!("Removed user {user_id} from {label}.")
            } else {
                format!("Left {label}.")
            };
            format!("{head}{}", promoted_suffix(*promoted))
        }
        Outcome::Promoted {
            team,
            squad,
            promoted,
        } => {
            response.promoted_user_id = promoted.map(|id| id.value());
            let label: &str = event.team_label(*team);
            match promoted {
                Some(user_id) => {
                    format!("Promoted user {user_id} to main (non-commander) on {label} {squad}.")
                }
                None => format!(
                    "No backups to promote or non-commander mains are at capacity for {label} {squad}."
                ),
            }
        }
        Outcome::CommanderAssigned {
            team,
            squad,
            user_id,
            action: assign,
        } => {
            let label: &str = event.team_label(*team);
            let (code, message): (&str, String) = match assign {
                AssignAction::Inserted => (
                    "inserted",
                    format!("User {user_id} is now commander of {label} {squad}."),
                ),
                AssignAction::ConvertedFromBackup => (
                    "converted_from_backup",
                    format!("Moved user {user_id} from backup to commander of {label} {squad}."),
                ),
                AssignAction::UpdatedMain {
                    from_squad,
                    promoted,
                } => {
                    response.promoted_user_id = promoted.map(|id| id.value());
                    (
                        "updated_main",
                        format!(
                            "User {user_id} is now commander of {label} {squad} (was main in {from_squad}).{}",
                            promoted_suffix(*promoted)
                        ),
                    )
                }
                AssignAction::AlreadyCommander => (
                    "already_commander",
                    format!("User {user_id} already commands {label} {squad}."),
                ),
            };
            response.result = Some(code.to_string());
            message
        }
        Outcome::CommanderUnassigned {
            team,
            squad,
            user_id,
            action: unassign,
        } => {
            let label: &str = event.team_label(*team);
            match unassign {
                UnassignAction::ClearedFlag => {
                    response.result = Some(String::from("cleared_flag"));
                    format!("User {user_id} is no longer a commander and stays main in {label} {squad}.")
                }
                UnassignAction::DemotedToBackup { promoted } => {
                    response.result = Some(String::from("demoted_to_backup"));
                    response.promoted_user_id = promoted.map(|id| id.value());
                    format!(
                        "User {user_id} is no longer a commander and moved to {label} backups.{}",
                        promoted_suffix(*promoted)
                    )
                }
            }
        }
        Outcome::StatusChanged { status } => match status {
            EventStatus::Locked => String::from("Event locked."),
            EventStatus::Open => String::from("Event unlocked."),
        },
        Outcome::Reset { cleared } => {
            format!("Event reset: cleared {cleared} sign-up(s) and re-opened.")
        }
        Outcome::CapacityUpdated => String::from("Capacity updated."),
        Outcome::LabelsUpdated => format!(
            "Team labels are now {} and {}.",
            event.team_label(Team::A),
            event.team_label(Team::B)
        ),
        Outcome::StartsAtUpdated => event.starts_at.as_ref().map_or_else(
            || String::from("Start time cleared."),
            |starts_at| format!("Start time set to {starts_at}."),
        ),
        Outcome::TeamTimeUpdated { team } => {
            let label: &str = event.team_label(*team);
            event.team_times.get(*team).map_or_else(
                || format!("Time for {label} cleared."),
                |time| format!("Time for {label} set to {time}."),
            )
        }
        Outcome::TimeEditorRoleUpdated { role_id } => role_id.map_or_else(
            || String::from("Team times are editable by managers only."),
            |role_id| format!("Role {role_id} may now edit team times."),
        ),
        Outcome::DisplayUpdated => event.display.map_or_else(
            || String::from("Display detached."),
            |display| format!("Display attached to channel {}.", display.channel_id),
        ),
        Outcome::ManagerAdded { user_id } => format!("User {user_id} is now a manager."),
        Outcome::ManagerRemoved { user_id } => format!("User {user_id} is no longer a manager."),
    };

    response
}
