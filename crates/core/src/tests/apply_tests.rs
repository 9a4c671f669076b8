// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    CREATOR, at, create_test_cause, creator, joined, member, run, scenario_config, state_with,
    test_key, user,
};
use crate::{
    Authorizer, Command, CoreError, CreateEventResult, NewEvent, Requester, RosterState,
    TransitionResult, apply, apply_create_event,
};
use squad_roster_audit::AuditEvent;
use squad_roster_domain::{
    DomainError, Event, EventConfig, EventStatus, Squad, SquadLimits, Team,
};

struct DenyAll;

impl Authorizer for DenyAll {
    fn can_manage(&self, _state: &RosterState, _requester: &Requester) -> bool {
        false
    }
}

#[test]
fn test_privileged_command_rejected_for_plain_member() {
    let state: RosterState = state_with(scenario_config());

    let result: Result<TransitionResult, CoreError> = run(
        &state,
        Command::SetStatus {
            status: EventStatus::Locked,
        },
        &member(5),
        100,
    );

    assert_eq!(
        result,
        Err(CoreError::Unauthorized {
            user_id: user(5),
            action: "SetStatus"
        })
    );
}

#[test]
fn test_guild_admin_may_manage_any_event() {
    let state: RosterState = state_with(scenario_config());

    let result: Result<TransitionResult, CoreError> = run(
        &state,
        Command::Promote {
            team: Team::A,
            squad: Squad::A,
        },
        &Requester::new(user(5), true),
        100,
    );

    assert!(result.is_ok());
}

#[test]
fn test_authorizer_runs_before_engines() {
    let state: RosterState = state_with(scenario_config());

    // The engine would reject this with EnrollmentNotFound.
    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::RemoveMember { user_id: user(9) },
        &creator(),
        &DenyAll,
        create_test_cause(),
        at(100),
    );

    assert!(matches!(result, Err(CoreError::Unauthorized { .. })));
}

#[test]
fn test_join_and_leave_need_no_capability() {
    let state: RosterState = state_with(scenario_config());

    let result: Result<TransitionResult, CoreError> = apply(
        &state,
        Command::Join {
            team: Team::A,
            squad: None,
            force_backup: false,
        },
        &member(1),
        &DenyAll,
        create_test_cause(),
        at(100),
    );

    assert!(result.is_ok());
}

#[test]
fn test_audit_event_records_actor_action_and_counts() {
    let state: RosterState = state_with(scenario_config());

    let result: TransitionResult = run(
        &state,
        Command::Join {
            team: Team::A,
            squad: None,
            force_backup: false,
        },
        &member(1),
        100,
    )
    .unwrap();

    let audit: AuditEvent = result.audit_event.unwrap();
    assert_eq!(audit.actor.id, "1");
    assert_eq!(audit.cause.id, "int-456");
    assert_eq!(audit.action.name, "Join");
    assert_eq!(
        audit.action.details.as_deref(),
        Some("joined team A as main (SA)")
    );
    assert_eq!(audit.scope, test_key());
    assert!(audit.before.data.contains("entries=0"));
    assert!(audit.after.data.contains("entries=1"));
    assert!(audit.after.data.contains("A:SA=0+1"));
}

#[test]
fn test_rejection_leaves_input_state_untouched() {
    let state: RosterState = joined(&state_with(scenario_config()), 1, Team::A, 100);
    let before: RosterState = state.clone();

    let _ = run(
        &state,
        Command::Join {
            team: Team::B,
            squad: None,
            force_backup: false,
        },
        &member(1),
        200,
    );

    assert_eq!(state, before);
}

#[test]
fn test_create_event_defaults() {
    let result: CreateEventResult = apply_create_event(
        None,
        NewEvent::new(test_key()),
        &Requester::new(user(CREATOR), true),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(result.event.config, EventConfig::default());
    assert_eq!(result.event.created_by, user(CREATOR));
    assert_eq!(result.event.status, EventStatus::Open);
    assert_eq!(result.audit_event.action.name, "CreateEvent");
    assert_eq!(result.audit_event.scope, test_key());
}

#[test]
fn test_create_event_requires_guild_admin() {
    let result: Result<CreateEventResult, CoreError> = apply_create_event(
        None,
        NewEvent::new(test_key()),
        &creator(),
        create_test_cause(),
    );

    assert!(matches!(result, Err(CoreError::Unauthorized { .. })));
}

#[test]
fn test_create_duplicate_event_is_conflict() {
    let existing: Event = state_with(scenario_config()).event;

    let result: Result<CreateEventResult, CoreError> = apply_create_event(
        Some(&existing),
        NewEvent::new(test_key()),
        &Requester::new(user(CREATOR), true),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DuplicateEvent { .. }))
    ));
}

#[test]
fn test_create_event_validates_config_and_labels() {
    let mut request: NewEvent = NewEvent::new(test_key());
    request.config.squad_b = Some(SquadLimits::new(501, 0));

    assert!(matches!(
        apply_create_event(
            None,
            request,
            &Requester::new(user(CREATOR), true),
            create_test_cause()
        ),
        Err(CoreError::DomainViolation(
            DomainError::InvalidCapacity { .. }
        ))
    ));

    let mut request: NewEvent = NewEvent::new(test_key());
    request.team_a_label = Some("x".repeat(65));

    assert!(matches!(
        apply_create_event(
            None,
            request,
            &Requester::new(user(CREATOR), true),
            create_test_cause()
        ),
        Err(CoreError::DomainViolation(DomainError::InvalidLabel(_)))
    ));
}
