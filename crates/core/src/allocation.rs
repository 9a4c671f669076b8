// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Allocation engine: placing joins and removing enrollments.

use crate::draft::RosterDraft;
use crate::promotion::promote_fifo;
use crate::state::{Outcome, Placement};
use squad_roster_domain::{
    DomainError, Enrollment, EventConfig, Slot, Squad, Team, TeamOccupancy, UserId,
    has_backup_room, has_main_room,
};

/// Places `user_id` on `team`.
///
/// Decision order, first satisfied wins:
/// 1. `force_backup`: backup pool only.
/// 2. The preferred squad, if it has a free regular main slot.
/// 3. Squad A, then squad B.
/// 4. The backup pool.
///
/// # Errors
///
/// Returns an error if the event is locked, the team or preferred squad is
/// not configured, the user is on the other team, or nothing has room.
pub(crate) fn join(
    draft: &mut RosterDraft,
    user_id: UserId,
    team: Team,
    preferred: Option<Squad>,
    force_backup: bool,
    joined_at: i64,
) -> Result<Outcome, DomainError> {
    let config: EventConfig = draft.event().config;
    if !draft.event().status.is_open() {
        return Err(DomainError::EventLocked {
            event: draft.event().key.to_string(),
        });
    }
    config.require_team(team)?;
    if let Some(squad) = preferred {
        config.require_squad(squad)?;
    }

    if let Some(existing) = draft.state().find(user_id) {
        if existing.team == team {
            return Ok(Outcome::AlreadyEnrolled {
                team,
                slot: existing.slot,
            });
        }
        return Err(DomainError::EnrolledOnOtherTeam {
            user_id,
            team: existing.team,
        });
    }

    let occupancy: TeamOccupancy = draft.state().occupancy(team);
    let placement: Placement = if force_backup {
        if !has_backup_room(&config, &occupancy) {
            return Err(DomainError::BackupPoolFull {
                team,
                capacity: config.backup_size,
            });
        }
        Placement::Backup
    } else {
        preferred
            .into_iter()
            .chain(Squad::ALL)
            .find(|squad| has_main_room(&config, &occupancy, *squad))
            .map(|squad| Placement::Main { squad })
            .or_else(|| has_backup_room(&config, &occupancy).then_some(Placement::Backup))
            .ok_or(DomainError::TeamFull { team })?
    };

    let slot: Slot = match placement {
        Placement::Main { squad } => Slot::Main { squad },
        Placement::Backup => Slot::Backup,
    };
    draft.insert(Enrollment::new(user_id, team, slot, joined_at));
    Ok(Outcome::Joined { team, placement })
}

/// Removes `user_id`'s enrollment.
///
/// Removing a regular main triggers one promotion into the vacated squad.
/// Removing a commander or a backup promotes nobody.
///
/// # Errors
///
/// Returns an error if the user has no enrollment.
pub(crate) fn leave(draft: &mut RosterDraft, user_id: UserId) -> Result<Outcome, DomainError> {
    let removed: Enrollment = draft
        .remove(user_id)
        .ok_or(DomainError::EnrollmentNotFound { user_id })?;

    let promoted: Option<UserId> = match removed.slot {
        Slot::Main { squad } => promote_fifo(draft, removed.team, squad),
        Slot::Commander { .. } | Slot::Backup => None,
    };

    Ok(Outcome::Left {
        user_id,
        team: removed.team,
        removed: removed.slot,
        promoted,
    })
}
