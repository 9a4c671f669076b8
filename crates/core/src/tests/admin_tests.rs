// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    CREATOR, creator, joined, joined_backup, member, run, scenario_config, state_with, user,
};
use crate::{Command, CoreError, Outcome, Requester, RosterState, TransitionResult};
use squad_roster_domain::{
    DisplaySurface, DomainError, Event, EventConfig, SquadLimits, Team, TeamCount, TeamTime,
};

fn update_capacity(state: &RosterState, config: EventConfig) -> Result<TransitionResult, CoreError> {
    run(state, Command::UpdateCapacity { config }, &creator(), 100)
}

#[test]
fn test_capacity_can_grow() {
    let state: RosterState = joined(&state_with(scenario_config()), 1, Team::A, 100);
    let config: EventConfig = EventConfig {
        backup_size: 10,
        ..scenario_config()
    };

    let result: TransitionResult = update_capacity(&state, config).unwrap();

    assert_eq!(result.outcome, Outcome::CapacityUpdated);
    assert_eq!(result.new_state.event.config, config);
}

#[test]
fn test_capacity_below_occupancy_is_rejected() {
    let state: RosterState = joined_backup(&state_with(scenario_config()), 1, Team::A, 100);
    let config: EventConfig = EventConfig {
        backup_size: 0,
        ..scenario_config()
    };

    assert!(matches!(
        update_capacity(&state, config),
        Err(CoreError::DomainViolation(
            DomainError::CapacityBelowOccupancy { team: Team::A, .. }
        ))
    ));
}

#[test]
fn test_dropping_team_in_use_is_conflict() {
    let state: RosterState = joined(&state_with(scenario_config()), 1, Team::B, 100);
    let config: EventConfig = EventConfig {
        teams: TeamCount::One,
        ..scenario_config()
    };

    assert!(matches!(
        update_capacity(&state, config),
        Err(CoreError::DomainViolation(
            DomainError::ConfigurationInUse { .. }
        ))
    ));
}

#[test]
fn test_dropping_unused_squad_is_allowed() {
    let state: RosterState = joined(&state_with(scenario_config()), 1, Team::A, 100);
    let config: EventConfig = EventConfig {
        squad_b: None,
        ..scenario_config()
    };

    assert!(update_capacity(&state, config).is_ok());
}

#[test]
fn test_oversized_capacity_is_validation() {
    let state: RosterState = state_with(scenario_config());
    let config: EventConfig = EventConfig {
        squad_a: SquadLimits::new(10_000, 0),
        ..scenario_config()
    };

    assert!(matches!(
        update_capacity(&state, config),
        Err(CoreError::DomainViolation(
            DomainError::InvalidCapacity { .. }
        ))
    ));
}

#[test]
fn test_labels_are_normalized() {
    let state: RosterState = state_with(scenario_config());

    let result: TransitionResult = run(
        &state,
        Command::SetTeamLabels {
            team_a: Some(String::from("  Shadowfront ")),
            team_b: Some(String::from("  ")),
        },
        &creator(),
        100,
    )
    .unwrap();

    assert_eq!(result.new_state.event.team_label(Team::A), "Shadowfront");
    assert_eq!(result.new_state.event.team_label(Team::B), "Team 2");
}

#[test]
fn test_starts_at_and_display_are_stored() {
    let state: RosterState = state_with(scenario_config());
    let state: RosterState = run(
        &state,
        Command::SetStartsAt {
            starts_at: Some(String::from("Saturday 20:00 UTC")),
        },
        &creator(),
        100,
    )
    .unwrap()
    .new_state;

    let surface: DisplaySurface = DisplaySurface {
        channel_id: 77,
        message_id: Some(88),
    };
    let state: RosterState = run(
        &state,
        Command::SetDisplay {
            display: Some(surface),
        },
        &creator(),
        200,
    )
    .unwrap()
    .new_state;

    assert_eq!(state.event.starts_at.as_deref(), Some("Saturday 20:00 UTC"));
    assert_eq!(state.event.display, Some(surface));
}

const TIME_EDITORS: u64 = 4242;

fn set_team_time(team: Team, time: Option<TeamTime>) -> Command {
    Command::SetTeamTime { team, time }
}

#[test]
fn test_team_times_are_stored_per_team() {
    let state: RosterState = state_with(scenario_config());
    let state: RosterState = run(
        &state,
        set_team_time(Team::A, Some(TeamTime::Text(String::from(" 19:00 UTC ")))),
        &creator(),
        100,
    )
    .unwrap()
    .new_state;

    let result: TransitionResult = run(
        &state,
        set_team_time(Team::B, Some(TeamTime::Unix(1_767_225_600))),
        &creator(),
        200,
    )
    .unwrap();

    assert_eq!(result.outcome, Outcome::TeamTimeUpdated { team: Team::B });
    let event: &Event = &result.new_state.event;
    assert_eq!(
        event.team_times.get(Team::A),
        Some(&TeamTime::Text(String::from("19:00 UTC")))
    );
    assert_eq!(
        event.team_times.get(Team::B),
        Some(&TeamTime::Unix(1_767_225_600))
    );

    let cleared: RosterState = run(
        &result.new_state,
        set_team_time(Team::A, Some(TeamTime::Text(String::from("  ")))),
        &creator(),
        300,
    )
    .unwrap()
    .new_state;
    assert_eq!(cleared.event.team_times.get(Team::A), None);
}

#[test]
fn test_team_time_for_unconfigured_team_is_validation() {
    let config: EventConfig = EventConfig {
        teams: TeamCount::One,
        ..scenario_config()
    };

    assert_eq!(
        run(
            &state_with(config),
            set_team_time(Team::B, Some(TeamTime::Unix(1_767_225_600))),
            &creator(),
            100,
        ),
        Err(CoreError::DomainViolation(DomainError::TeamNotConfigured {
            team: Team::B
        }))
    );
}

#[test]
fn test_time_editor_role_may_edit_team_times_only() {
    let state: RosterState = run(
        &state_with(scenario_config()),
        Command::SetTimeEditorRole {
            role_id: Some(TIME_EDITORS),
        },
        &creator(),
        100,
    )
    .unwrap()
    .new_state;
    assert_eq!(state.event.time_editor_role, Some(TIME_EDITORS));
    let editor: Requester = member(8).with_roles(vec![TIME_EDITORS]);

    let result: TransitionResult = run(
        &state,
        set_team_time(Team::A, Some(TeamTime::Text(String::from("20:00")))),
        &editor,
        200,
    )
    .unwrap();
    assert_eq!(
        result.new_state.event.team_times.get(Team::A),
        Some(&TeamTime::Text(String::from("20:00")))
    );

    assert_eq!(
        run(
            &state,
            Command::SetStartsAt {
                starts_at: Some(String::from("Saturday")),
            },
            &editor,
            200,
        ),
        Err(CoreError::Unauthorized {
            user_id: user(8),
            action: "SetStartsAt"
        })
    );
    assert_eq!(
        run(
            &state,
            set_team_time(Team::A, None),
            &member(9).with_roles(vec![1]),
            200,
        ),
        Err(CoreError::Unauthorized {
            user_id: user(9),
            action: "SetTeamTime"
        })
    );
}

#[test]
fn test_clearing_time_editor_role_revokes_delegation() {
    let mut delegated: RosterState = state_with(scenario_config());
    delegated.event.time_editor_role = Some(TIME_EDITORS);

    let state: RosterState = run(
        &delegated,
        Command::SetTimeEditorRole { role_id: None },
        &creator(),
        100,
    )
    .unwrap()
    .new_state;

    assert_eq!(state.event.time_editor_role, None);
    assert!(matches!(
        run(
            &state,
            set_team_time(Team::A, None),
            &member(8).with_roles(vec![TIME_EDITORS]),
            200,
        ),
        Err(CoreError::Unauthorized { .. })
    ));
}

#[test]
fn test_added_manager_gains_capability() {
    let state: RosterState = state_with(scenario_config());
    let state: RosterState = run(&state, Command::AddManager { user_id: user(5) }, &creator(), 100)
        .unwrap()
        .new_state;

    let result: Result<TransitionResult, CoreError> = run(
        &state,
        Command::RemoveMember { user_id: user(9) },
        &member(5),
        200,
    );

    assert!(state.is_manager(user(5)));
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::EnrollmentNotFound { user_id: user(9) }
        ))
    );
}

#[test]
fn test_duplicate_manager_is_conflict() {
    let state: RosterState = state_with(scenario_config());

    assert_eq!(
        run(
            &state,
            Command::AddManager {
                user_id: user(CREATOR)
            },
            &creator(),
            100
        ),
        Err(CoreError::DomainViolation(DomainError::DuplicateManager {
            user_id: user(CREATOR)
        }))
    );
}

#[test]
fn test_creator_cannot_be_removed() {
    let state: RosterState = state_with(scenario_config());

    assert_eq!(
        run(
            &state,
            Command::RemoveManager {
                user_id: user(CREATOR)
            },
            &creator(),
            100
        ),
        Err(CoreError::DomainViolation(
            DomainError::CreatorIsPermanentManager {
                user_id: user(CREATOR)
            }
        ))
    );
}

#[test]
fn test_remove_unknown_manager_is_not_found() {
    let mut state: RosterState = state_with(scenario_config());
    state.managers.push(user(5));

    let result: TransitionResult =
        run(&state, Command::RemoveManager { user_id: user(5) }, &creator(), 100).unwrap();
    assert!(!result.new_state.is_manager(user(5)));

    assert_eq!(
        run(
            &result.new_state,
            Command::RemoveManager { user_id: user(5) },
            &creator(),
            200
        ),
        Err(CoreError::DomainViolation(DomainError::ManagerNotFound {
            user_id: user(5)
        }))
    );
}

#[test]
fn test_remove_member_promotes_like_leave() {
    let state: RosterState = state_with(scenario_config());
    let state: RosterState = joined(&state, 1, Team::A, 100);
    let state: RosterState = joined(&state, 2, Team::A, 200);
    let state: RosterState = joined(&state, 3, Team::A, 300);

    let result: TransitionResult =
        run(&state, Command::RemoveMember { user_id: user(1) }, &creator(), 400).unwrap();

    assert!(matches!(
        result.outcome,
        Outcome::Left {
            promoted: Some(promoted),
            ..
        } if promoted == user(3)
    ));
}
