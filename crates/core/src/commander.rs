// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::RosterDraft;
use crate::promotion::promote_fifo;
use crate::state::{AssignAction, Outcome, UnassignAction};
use squad_roster_domain::{
    DomainError, Enrollment, EventConfig, Slot, Squad, SquadLimits, Team, TeamOccupancy, UserId,
    has_backup_room, has_commander_room, has_squad_room,
};

/// Makes `user_id` a commander of `squad` on `team`.
///
/// Capacity is checked first, with the target's own same-team entry left
/// out of the count so that re-assigning an existing commander, or
/// converting a main already in the squad, is judged on the slot it would
/// occupy. A regular main that becomes a commander frees a regular slot
/// in its old squad, which then gets one promotion attempt.
///
/// # Errors
///
/// Returns an error if the team or squad is not configured, the commander
/// quota or squad size is reached, or the user is on the other team.
pub(crate) fn assign_commander(
    draft: &mut RosterDraft,
    team: Team,
    squad: Squad,
    user_id: UserId,
    joined_at: i64,
) -> Result<Outcome, DomainError> {
    let config: EventConfig = draft.event().config;
    config.require_team(team)?;
    let limits: SquadLimits = config.require_squad(squad)?;

    let existing: Option<Enrollment> = draft.state().find(user_id).copied();
    let occupancy: TeamOccupancy = match existing {
        Some(entry) if entry.team == team => {
            TeamOccupancy::tally_excluding(&draft.state().entries, team, user_id)
        }
        _ => draft.state().occupancy(team),
    };
    if !has_commander_room(&config, &occupancy, squad) {
        return Err(DomainError::CommanderQuotaReached {
            team,
            squad,
            quota: limits.commander_quota,
        });
    }
    if !has_squad_room(&config, &occupancy, squad) {
        return Err(DomainError::SquadFull {
            team,
            squad,
            size: limits.size,
        });
    }

    let commander: Slot = Slot::Commander { squad };
    let action: AssignAction = match existing {
        Some(entry) if entry.team != team => {
            return Err(DomainError::EnrolledOnOtherTeam {
                user_id,
                team: entry.team,
            });
        }
        Some(entry) => match entry.slot {
            Slot::Backup => {
                draft.update(Enrollment {
                    slot: commander,
                    ..entry
                });
                AssignAction::ConvertedFromBackup
            }
            slot if slot == commander => AssignAction::AlreadyCommander,
            Slot::Commander { squad: from_squad } => {
                draft.update(Enrollment {
                    slot: commander,
                    ..entry
                });
                AssignAction::UpdatedMain {
                    from_squad,
                    promoted: None,
                }
            }
            Slot::Main { squad: from_squad } => {
                draft.update(Enrollment {
                    slot: commander,
                    ..entry
                });
                let promoted: Option<UserId> = promote_fifo(draft, team, from_squad);
                AssignAction::UpdatedMain {
                    from_squad,
                    promoted,
                }
            }
        },
        None => {
            draft.insert(Enrollment::new(user_id, team, commander, joined_at));
            AssignAction::Inserted
        }
    };

    Ok(Outcome::CommanderAssigned {
        team,
        squad,
        user_id,
        action,
    })
}

/// Clears `user_id`'s commander flag on `team`.
///
/// The user stays a regular main when the squad has a free regular slot.
/// Otherwise, with `demote_if_needed`, the user moves to the back of the
/// backup pool (`joined_at` becomes `now`) and the squad gets one
/// promotion attempt.
///
/// # Errors
///
/// Returns an error if the user has no entry, is not a commander on
/// `team`, or can be neither kept as a main nor demoted.
pub(crate) fn unassign_commander(
    draft: &mut RosterDraft,
    team: Team,
    user_id: UserId,
    demote_if_needed: bool,
    now: i64,
) -> Result<Outcome, DomainError> {
    let entry: Enrollment = *draft
        .state()
        .find(user_id)
        .ok_or(DomainError::EnrollmentNotFound { user_id })?;
    let squad: Squad = match entry.slot {
        Slot::Commander { squad } if entry.team == team => squad,
        _ => return Err(DomainError::NotACommander { user_id, team }),
    };

    let config: EventConfig = draft.event().config;
    let occupancy: TeamOccupancy = draft.state().occupancy(team);
    let cap: u32 = config
        .squad_limits(squad)
        .map_or(0, |limits| limits.non_commander_cap());

    let action: UnassignAction = if occupancy.squad(squad).mains < cap {
        draft.update(Enrollment {
            slot: Slot::Main { squad },
            ..entry
        });
        UnassignAction::ClearedFlag
    } else if demote_if_needed && has_backup_room(&config, &occupancy) {
        draft.update(Enrollment {
            slot: Slot::Backup,
            joined_at: now,
            ..entry
        });
        // The freed slot was a commander slot, so this normally finds no room.
        let promoted: Option<UserId> = promote_fifo(draft, team, squad);
        UnassignAction::DemotedToBackup { promoted }
    } else {
        return Err(DomainError::CommanderDemotionBlocked { team, squad });
    };

    Ok(Outcome::CommanderUnassigned {
        team,
        squad,
        user_id,
        action,
    })
}
