// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, CoreError, EventManagers, Requester, RosterState, TransitionResult, apply};
use squad_roster_audit::Cause;
use squad_roster_domain::{
    Event, EventConfig, EventKey, EventName, GuildId, SquadLimits, Team, TeamCount, UserId,
};
use time::OffsetDateTime;

pub const CREATOR: u64 = 1000;

pub fn user(id: u64) -> UserId {
    UserId::new(id).unwrap()
}

pub fn member(id: u64) -> Requester {
    Requester::new(user(id), false)
}

pub fn creator() -> Requester {
    member(CREATOR)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("int-456"), String::from("Roster button"))
}

pub fn at(millis: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).unwrap()
}

pub fn test_key() -> EventKey {
    EventKey::new(
        GuildId::new(900).unwrap(),
        EventName::new("Siege Night").unwrap(),
    )
}

/// Squad A 2/1, squad B 1/0, one backup per team, two teams.
pub fn scenario_config() -> EventConfig {
    EventConfig {
        teams: TeamCount::Two,
        squad_a: SquadLimits::new(2, 1),
        squad_b: Some(SquadLimits::new(1, 0)),
        backup_size: 1,
    }
}

pub fn state_with(config: EventConfig) -> RosterState {
    RosterState::new(Event::new(test_key(), config, user(CREATOR)))
}

pub fn run(
    state: &RosterState,
    command: Command,
    requester: &Requester,
    millis: i64,
) -> Result<TransitionResult, CoreError> {
    apply(
        state,
        command,
        requester,
        &EventManagers,
        create_test_cause(),
        at(millis),
    )
}

/// Joins `id` to `team` with no preference and returns the new state.
pub fn joined(state: &RosterState, id: u64, team: Team, millis: i64) -> RosterState {
    run(
        state,
        Command::Join {
            team,
            squad: None,
            force_backup: false,
        },
        &member(id),
        millis,
    )
    .unwrap()
    .new_state
}

/// Joins `id` to `team`'s backup pool and returns the new state.
pub fn joined_backup(state: &RosterState, id: u64, team: Team, millis: i64) -> RosterState {
    run(
        state,
        Command::Join {
            team,
            squad: None,
            force_backup: true,
        },
        &member(id),
        millis,
    )
    .unwrap()
    .new_state
}
