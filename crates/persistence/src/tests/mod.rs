// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod command_tests;

use crate::Persistence;
use squad_roster::{
    Command, CoreError, CreateEventResult, EventManagers, NewEvent, Requester, TransitionResult,
};
use squad_roster_audit::Cause;
use squad_roster_domain::{
    Event, EventConfig, EventKey, EventName, GuildId, SquadLimits, Team, TeamCount, UserId,
};
use time::OffsetDateTime;

pub const ADMIN: u64 = 1000;

pub fn user(id: u64) -> UserId {
    UserId::new(id).unwrap()
}

pub fn admin() -> Requester {
    Requester::new(user(ADMIN), true)
}

pub fn member(id: u64) -> Requester {
    Requester::new(user(id), false)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("int-789"), String::from("Slash command"))
}

pub fn at(millis: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).unwrap()
}

pub fn key(guild: u64, name: &str) -> EventKey {
    EventKey::new(GuildId::new(guild).unwrap(), EventName::new(name).unwrap())
}

pub fn test_key() -> EventKey {
    key(900, "Siege Night")
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

/// Creates the scenario event under [`test_key`] and returns it.
pub fn create_scenario_event(persistence: &mut Persistence) -> Event {
    let mut request: NewEvent = NewEvent::new(test_key());
    request.config = scenario_config();
    let result: CreateEventResult = persistence
        .create_event(request, &admin(), create_test_cause(), at(1_000))
        .unwrap()
        .unwrap();
    result.event
}

pub fn execute(
    persistence: &mut Persistence,
    command: Command,
    requester: &Requester,
    millis: i64,
) -> Result<TransitionResult, CoreError> {
    persistence
        .execute_command(
            &test_key(),
            command,
            requester,
            &EventManagers,
            create_test_cause(),
            at(millis),
        )
        .unwrap()
}

pub fn join(persistence: &mut Persistence, id: u64, team: Team, millis: i64) -> TransitionResult {
    execute(
        persistence,
        Command::Join {
            team,
            squad: None,
            force_backup: false,
        },
        &member(id),
        millis,
    )
    .unwrap()
}
