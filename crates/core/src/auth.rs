// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Manager capability.
//!
//! The engines never look at who is asking. [`crate::apply`] consults an
//! [`Authorizer`] once, before any engine runs.

use crate::state::RosterState;
use squad_roster_domain::UserId;

/// The user issuing a command, as seen by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    /// The user.
    pub user_id: UserId,
    /// Whether the platform grants the user guild-administration permission.
    pub is_guild_admin: bool,
    /// Chat roles the user holds.
    pub role_ids: Vec<u64>,
}

impl Requester {
    /// Creates a requester holding no roles.
    #[must_use]
    pub const fn new(user_id: UserId, is_guild_admin: bool) -> Self {
        Self {
            user_id,
            is_guild_admin,
            role_ids: Vec::new(),
        }
    }

    /// Sets the chat roles the user holds.
    #[must_use]
    pub fn with_roles(mut self, role_ids: Vec<u64>) -> Self {
        self.role_ids = role_ids;
        self
    }

    /// Returns whether the user holds `role_id`.
    #[must_use]
    pub fn holds_role(&self, role_id: u64) -> bool {
        self.role_ids.contains(&role_id)
    }
}

/// What a command needs from its requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Any user; the command acts on the requester.
    Member,
    /// Manager capability over the event.
    Manage,
    /// Manager capability, or the event's time-editor role.
    EditTeamTimes,
}

/// Decides whether a requester may manage an event.
pub trait Authorizer {
    /// Returns whether `requester` holds manager capability over `state`'s event.
    fn can_manage(&self, state: &RosterState, requester: &Requester) -> bool;

    /// Returns whether `requester` may edit the event's team times.
    ///
    /// Managers always may; so may holders of the event's time-editor role.
    fn can_edit_team_times(&self, state: &RosterState, requester: &Requester) -> bool {
        self.can_manage(state, requester)
            || state
                .event
                .time_editor_role
                .is_some_and(|role_id| requester.holds_role(role_id))
    }

    /// Returns whether `requester` holds `capability` over `state`'s event.
    fn allows(&self, state: &RosterState, requester: &Requester, capability: Capability) -> bool {
        match capability {
            Capability::Member => true,
            Capability::Manage => self.can_manage(state, requester),
            Capability::EditTeamTimes => self.can_edit_team_times(state, requester),
        }
    }
}

/// The default policy: guild administrators, the event creator and the
/// event's manager set.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventManagers;

impl Authorizer for EventManagers {
    fn can_manage(&self, state: &RosterState, requester: &Requester) -> bool {
        requester.is_guild_admin || state.is_manager(requester.user_id)
    }
}
