// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    admin, at, create_scenario_event, create_test_cause, execute, join, member, scenario_config,
    test_key, user,
};
use crate::Persistence;
use squad_roster::{
    Command, CoreError, EventManagers, NewEvent, Outcome, Placement, RosterState, TransitionResult,
};
use squad_roster_domain::{DomainError, Enrollment, EventStatus, Slot, Squad, Team, UserId};

fn stored(persistence: &mut Persistence) -> RosterState {
    persistence.load_roster(&test_key()).unwrap().unwrap()
}

fn slot_of(state: &RosterState, id: u64) -> Option<Slot> {
    state.find(user(id)).map(|entry: &Enrollment| entry.slot)
}

#[test]
fn test_scenario_leave_promotes_backup_into_vacated_squad() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);

    join(&mut persistence, 1, Team::A, 100);
    join(&mut persistence, 2, Team::A, 200);
    join(&mut persistence, 3, Team::A, 300);

    let before: RosterState = stored(&mut persistence);
    assert_eq!(slot_of(&before, 1), Some(Slot::Main { squad: Squad::A }));
    assert_eq!(slot_of(&before, 2), Some(Slot::Main { squad: Squad::B }));
    assert_eq!(slot_of(&before, 3), Some(Slot::Backup));

    let left: TransitionResult =
        execute(&mut persistence, Command::Leave, &member(1), 400).unwrap();
    assert!(matches!(
        left.outcome,
        Outcome::Left {
            promoted: Some(promoted),
            ..
        } if promoted == user(3)
    ));

    let after: RosterState = stored(&mut persistence);
    assert_eq!(slot_of(&after, 1), None);
    assert_eq!(slot_of(&after, 3), Some(Slot::Main { squad: Squad::A }));
    assert_eq!(
        after.find(user(3)).unwrap().joined_at,
        300,
        "promotion keeps the original join time"
    );
}

#[test]
fn test_command_on_missing_event_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let result: Result<TransitionResult, CoreError> = execute(
        &mut persistence,
        Command::Join {
            team: Team::A,
            squad: None,
            force_backup: false,
        },
        &member(1),
        100,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventNotFound { .. }))
    ));
}

#[test]
fn test_rejected_join_on_locked_event_writes_nothing() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);
    join(&mut persistence, 1, Team::A, 100);
    execute(
        &mut persistence,
        Command::SetStatus {
            status: EventStatus::Locked,
        },
        &admin(),
        150,
    )
    .unwrap();
    let before: RosterState = stored(&mut persistence);

    let result: Result<TransitionResult, CoreError> = execute(
        &mut persistence,
        Command::Join {
            team: Team::A,
            squad: None,
            force_backup: false,
        },
        &member(2),
        200,
    );
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EventLocked { .. }))
    ));
    assert_eq!(stored(&mut persistence), before);

    // Leaving still works while locked.
    let left: Result<TransitionResult, CoreError> =
        execute(&mut persistence, Command::Leave, &member(1), 300);
    assert!(left.is_ok());
    assert!(stored(&mut persistence).entries.is_empty());
}

#[test]
fn test_second_join_keeps_single_entry() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);
    join(&mut persistence, 1, Team::A, 100);

    let again: TransitionResult = join(&mut persistence, 1, Team::A, 200);
    assert!(again.is_noop());
    assert!(matches!(again.outcome, Outcome::AlreadyEnrolled { .. }));

    let other_team: Result<TransitionResult, CoreError> = execute(
        &mut persistence,
        Command::Join {
            team: Team::B,
            squad: None,
            force_backup: false,
        },
        &member(1),
        300,
    );
    assert!(matches!(
        other_team,
        Err(CoreError::DomainViolation(
            DomainError::EnrolledOnOtherTeam { .. }
        ))
    ));
    assert_eq!(stored(&mut persistence).entries.len(), 1);
}

#[test]
fn test_join_outcome_reports_placement() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);

    let result: TransitionResult = join(&mut persistence, 1, Team::B, 100);
    assert_eq!(
        result.outcome,
        Outcome::Joined {
            team: Team::B,
            placement: Placement::Main { squad: Squad::A },
        }
    );
}

#[test]
fn test_commander_assignment_is_persisted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);
    join(&mut persistence, 1, Team::A, 100);

    execute(
        &mut persistence,
        Command::AssignCommander {
            team: Team::A,
            squad: Squad::A,
            user_id: user(1),
        },
        &admin(),
        200,
    )
    .unwrap();
    assert_eq!(
        slot_of(&stored(&mut persistence), 1),
        Some(Slot::Commander { squad: Squad::A })
    );

    // The quota of one is now used.
    let second: Result<TransitionResult, CoreError> = execute(
        &mut persistence,
        Command::AssignCommander {
            team: Team::A,
            squad: Squad::A,
            user_id: user(2),
        },
        &admin(),
        300,
    );
    assert!(matches!(
        second,
        Err(CoreError::DomainViolation(
            DomainError::CommanderQuotaReached { .. }
        ))
    ));
    assert!(stored(&mut persistence).find(user(2)).is_none());

    execute(
        &mut persistence,
        Command::UnassignCommander {
            team: Team::A,
            user_id: user(1),
            demote_if_needed: false,
        },
        &admin(),
        400,
    )
    .unwrap();
    assert_eq!(
        slot_of(&stored(&mut persistence), 1),
        Some(Slot::Main { squad: Squad::A })
    );
}

#[test]
fn test_member_cannot_issue_privileged_command() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);

    let result: Result<TransitionResult, CoreError> =
        execute(&mut persistence, Command::Reset { detach_display: false }, &member(7), 100);
    assert!(matches!(result, Err(CoreError::Unauthorized { .. })));
}

#[test]
fn test_reset_deletes_all_enrollments() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);
    join(&mut persistence, 1, Team::A, 100);
    join(&mut persistence, 2, Team::B, 200);
    execute(
        &mut persistence,
        Command::SetStatus {
            status: EventStatus::Locked,
        },
        &admin(),
        250,
    )
    .unwrap();

    let result: TransitionResult = execute(
        &mut persistence,
        Command::Reset {
            detach_display: false,
        },
        &admin(),
        300,
    )
    .unwrap();
    assert_eq!(result.outcome, Outcome::Reset { cleared: 2 });

    let after: RosterState = stored(&mut persistence);
    assert!(after.entries.is_empty());
    assert_eq!(after.event.status, EventStatus::Open);
}

#[test]
fn test_manager_set_is_persisted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    create_scenario_event(&mut persistence);

    execute(
        &mut persistence,
        Command::AddManager { user_id: user(42) },
        &admin(),
        100,
    )
    .unwrap();
    let managers: Vec<UserId> = stored(&mut persistence).managers;
    assert_eq!(managers, vec![user(42)]);

    // The new manager can now lock the event.
    let locked: Result<TransitionResult, CoreError> = execute(
        &mut persistence,
        Command::SetStatus {
            status: EventStatus::Locked,
        },
        &member(42),
        200,
    );
    assert!(locked.is_ok());

    execute(
        &mut persistence,
        Command::RemoveManager { user_id: user(42) },
        &admin(),
        300,
    )
    .unwrap();
    assert!(stored(&mut persistence).managers.is_empty());
}

#[test]
fn test_promotion_tie_breaks_by_insertion_order_after_reload() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request: NewEvent = NewEvent::new(test_key());
    request.config = scenario_config();
    request.config.backup_size = 2;
    persistence
        .create_event(request, &admin(), create_test_cause(), at(1))
        .unwrap()
        .unwrap();

    join(&mut persistence, 1, Team::A, 100);
    join(&mut persistence, 2, Team::A, 100);
    // Same millisecond: 3 was inserted before 4.
    join(&mut persistence, 3, Team::A, 500);
    join(&mut persistence, 4, Team::A, 500);

    persistence
        .execute_command(
            &test_key(),
            Command::Leave,
            &member(1),
            &EventManagers,
            create_test_cause(),
            at(600),
        )
        .unwrap()
        .unwrap();

    let after: RosterState = stored(&mut persistence);
    assert_eq!(slot_of(&after, 3), Some(Slot::Main { squad: Squad::A }));
    assert_eq!(slot_of(&after, 4), Some(Slot::Backup));
}
