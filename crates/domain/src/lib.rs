// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capacity;
mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use capacity::{
    SquadOccupancy, TeamOccupancy, check_occupancy_fits, has_backup_room, has_commander_room,
    has_main_room, has_squad_room, non_commander_cap,
};
pub use error::{DomainError, ErrorKind};
pub use types::{
    DisplaySurface, Enrollment, Event, EventConfig, EventKey, EventName, EventStatus, GuildId,
    MAX_EVENT_NAME_LEN, MAX_LABEL_LEN, Slot, Squad, SquadLimits, Team, TeamCount, TeamLabels,
    TeamTime, TeamTimes, UserId, unix_millis,
};
pub use validation::{
    MAX_CAPACITY, MAX_STARTS_AT_LEN, normalize_label, normalize_starts_at, normalize_team_time,
    validate_capacity_value, validate_event_config,
};
