// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::RosterDraft;
use squad_roster_domain::{Enrollment, Slot, Squad, Team, UserId, has_main_room};

/// Moves the longest-waiting backup of `team` into `squad`, if it has room.
///
/// At most one backup moves per call. The backup keeps its `joined_at`.
/// Returns the promoted user, or `None` when the squad is full, not
/// configured, or the team has no backups. Never fails.
pub(crate) fn promote_fifo(draft: &mut RosterDraft, team: Team, squad: Squad) -> Option<UserId> {
    if !has_main_room(
        &draft.event().config,
        &draft.state().occupancy(team),
        squad,
    ) {
        return None;
    }

    // min_by_key keeps the first of equal keys, which is the earliest insert.
    let candidate: Enrollment = *draft
        .state()
        .entries
        .iter()
        .filter(|entry| entry.team == team && entry.slot.is_backup())
        .min_by_key(|entry| entry.joined_at)?;

    draft.update(Enrollment {
        slot: Slot::Main { squad },
        ..candidate
    });
    Some(candidate.user_id)
}
