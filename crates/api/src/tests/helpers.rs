// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared fixtures for API tests.

use squad_roster_persistence::Persistence;
use time::OffsetDateTime;

use crate::{
    CapacityFields, CommandResponse, CreateEventRequest, CreateEventResponse, JoinRequest,
    RequestContext, create_event, join,
};

pub const GUILD: u64 = 900;
pub const EVENT: &str = "Siege Night";
pub const ADMIN: u64 = 1000;

pub fn at(millis: i64) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).unwrap()
}

pub fn context_for(requester_id: u64) -> RequestContext {
    RequestContext {
        requester_id,
        is_guild_admin: false,
        role_ids: Vec::new(),
        cause_id: String::from("int-789"),
        cause_description: String::from("Slash command"),
    }
}

pub fn admin_context() -> RequestContext {
    RequestContext {
        is_guild_admin: true,
        ..context_for(ADMIN)
    }
}

/// Squad A 2/1, squad B 1/0, one backup per team, two teams.
pub fn scenario_capacity() -> CapacityFields {
    CapacityFields {
        teams: Some(2),
        squad_a_size: Some(2),
        squad_a_commanders: Some(1),
        squad_b_size: Some(1),
        squad_b_commanders: Some(0),
        backup_size: Some(1),
        remove_squad_b: false,
    }
}

pub fn create_request(capacity: CapacityFields) -> CreateEventRequest {
    CreateEventRequest {
        context: admin_context(),
        guild_id: GUILD,
        name: String::from(EVENT),
        capacity,
        team_a_label: None,
        team_b_label: None,
        starts_at: None,
    }
}

/// Opens an in-memory store holding the scenario event.
pub fn setup_scenario() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let _created: CreateEventResponse =
        create_event(&mut persistence, &create_request(scenario_capacity()), at(1_000)).unwrap();
    persistence
}

pub fn join_request(requester_id: u64, team: &str) -> JoinRequest {
    JoinRequest {
        context: context_for(requester_id),
        team: String::from(team),
        squad: None,
        force_backup: false,
    }
}

pub fn join_team(
    persistence: &mut Persistence,
    requester_id: u64,
    team: &str,
    millis: i64,
) -> CommandResponse {
    join(persistence, GUILD, EVENT, &join_request(requester_id, team), at(millis)).unwrap()
}
