// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the squad roster sign-up system.
//!
//! Handlers translate request DTOs into domain values, run them through the
//! enrollment store and translate the result back. Domain, core and
//! persistence errors never cross this boundary untranslated.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod context;
mod error;
mod handlers;
mod input;
mod outcome;
mod request_response;

#[cfg(test)]
mod tests;

pub use context::RequestContext;
pub use error::{ApiError, translate_core_error, translate_domain_error, translate_persistence_error};
pub use handlers::{
    add_manager, assign_commander, create_event, get_audit_timeline, get_snapshot, join, leave,
    list_events, promote, remove_manager, remove_member, reset, set_display, set_starts_at,
    set_status, set_team_labels, set_team_time, set_time_editor_role, unassign_commander,
    update_capacity,
};
pub use input::{
    InputError, parse_capacity, parse_display, parse_event_key, parse_guild_id,
    parse_optional_squad, parse_role_id, parse_squad, parse_status, parse_team, parse_team_time,
    parse_user_id,
};
pub use request_response::{
    AssignCommanderRequest, AuditEventInfo, AuditTimelineResponse, CapacityFields,
    CommandResponse, CreateEventRequest, CreateEventResponse, EventInfo, JoinRequest,
    ListEventsResponse, ManagerRequest, PromoteRequest, RemoveMemberRequest, ResetRequest,
    SetDisplayRequest, SetStartsAtRequest, SetStatusRequest, SetTeamLabelsRequest,
    SetTeamTimeRequest, SetTimeEditorRoleRequest, SnapshotResponse, SquadSnapshot, TeamSnapshot,
    TeamTimeInfo, UnassignCommanderRequest, UpdateCapacityRequest,
};
