// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{creator, joined, joined_backup, run, scenario_config, state_with};
use crate::{Command, Outcome, RosterChange, RosterState, TransitionResult};
use squad_roster_domain::{DisplaySurface, EventStatus, Team};

#[test]
fn test_lock_then_unlock() {
    let state: RosterState = state_with(scenario_config());

    let locked: TransitionResult = run(
        &state,
        Command::SetStatus {
            status: EventStatus::Locked,
        },
        &creator(),
        100,
    )
    .unwrap();
    assert_eq!(locked.new_state.event.status, EventStatus::Locked);
    assert_eq!(locked.audit_event.unwrap().action.name, "SetStatus");

    let unlocked: TransitionResult = run(
        &locked.new_state,
        Command::SetStatus {
            status: EventStatus::Open,
        },
        &creator(),
        200,
    )
    .unwrap();
    assert_eq!(unlocked.new_state.event.status, EventStatus::Open);
}

#[test]
fn test_setting_current_status_is_noop() {
    let state: RosterState = state_with(scenario_config());

    let result: TransitionResult = run(
        &state,
        Command::SetStatus {
            status: EventStatus::Open,
        },
        &creator(),
        100,
    )
    .unwrap();

    assert!(result.is_noop());
    assert!(result.audit_event.is_none());
}

#[test]
fn test_reset_clears_entries_and_reopens() {
    let mut state: RosterState = state_with(scenario_config());
    state.event.display = Some(DisplaySurface {
        channel_id: 55,
        message_id: Some(66),
    });
    let state: RosterState = joined(&state, 1, Team::A, 100);
    let mut state: RosterState = joined_backup(&state, 2, Team::B, 200);
    state.event.status = EventStatus::Locked;

    let result: TransitionResult = run(
        &state,
        Command::Reset {
            detach_display: false,
        },
        &creator(),
        300,
    )
    .unwrap();

    assert_eq!(result.outcome, Outcome::Reset { cleared: 2 });
    assert!(result.new_state.entries.is_empty());
    assert_eq!(result.new_state.event.status, EventStatus::Open);
    assert!(result.new_state.event.display.is_some());
    assert_eq!(result.changes[0], RosterChange::ClearEnrollments);
}

#[test]
fn test_reset_can_detach_display() {
    let mut state: RosterState = state_with(scenario_config());
    state.event.display = Some(DisplaySurface {
        channel_id: 55,
        message_id: None,
    });

    let result: TransitionResult = run(
        &state,
        Command::Reset {
            detach_display: true,
        },
        &creator(),
        300,
    )
    .unwrap();

    assert_eq!(result.new_state.event.display, None);
}
