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

mod admin;
mod allocation;
mod apply;
mod auth;
mod command;
mod commander;
mod draft;
mod error;
mod lifecycle;
mod promotion;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create_event};
pub use auth::{Authorizer, Capability, EventManagers, Requester};
pub use command::{Command, NewEvent};
pub use error::CoreError;
pub use state::{
    AssignAction, CreateEventResult, Outcome, Placement, RosterChange, RosterSnapshot,
    RosterState, SquadRoster, TeamRoster, TransitionResult, UnassignAction,
};
