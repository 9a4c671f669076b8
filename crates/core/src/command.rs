// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::Capability;
use squad_roster_domain::{
    DisplaySurface, EventConfig, EventKey, EventStatus, Squad, Team, TeamTime, UserId,
};

/// A command represents user or manager intent as data only.
///
/// Commands are the only way to request roster changes. `Join` and `Leave`
/// act on the requester; every other command is privileged. `SetTeamTime`
/// is also open to holders of the event's time-editor role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign the requester up for a team.
    Join {
        /// The team to join.
        team: Team,
        /// Preferred squad, tried before the fixed A-then-B order.
        squad: Option<Squad>,
        /// Skip main placement and go straight to the backup pool.
        force_backup: bool,
    },
    /// Remove the requester's own enrollment.
    Leave,
    /// Remove another user's enrollment.
    RemoveMember {
        /// The user to remove.
        user_id: UserId,
    },
    /// Promote the earliest backup into a squad if it has room.
    Promote {
        /// The team whose backups are considered.
        team: Team,
        /// The squad to fill.
        squad: Squad,
    },
    /// Make a user a commander of a squad.
    AssignCommander {
        /// The team.
        team: Team,
        /// The squad to lead.
        squad: Squad,
        /// The user.
        user_id: UserId,
    },
    /// Clear a user's commander flag.
    UnassignCommander {
        /// The team.
        team: Team,
        /// The commander.
        user_id: UserId,
        /// Move the user to the backup pool if the squad has no regular main slot free.
        demote_if_needed: bool,
    },
    /// Open or lock sign-ups.
    SetStatus {
        /// The new status.
        status: EventStatus,
    },
    /// Clear every enrollment and reopen the event.
    Reset {
        /// Also forget the display surface.
        detach_display: bool,
    },
    /// Replace the capacity configuration.
    UpdateCapacity {
        /// The new configuration.
        config: EventConfig,
    },
    /// Replace both team labels. `None` or blank restores the default.
    SetTeamLabels {
        /// Label for team A.
        team_a: Option<String>,
        /// Label for team B.
        team_b: Option<String>,
    },
    /// Replace the free-text start time.
    SetStartsAt {
        /// The new start time, or `None` to clear it.
        starts_at: Option<String>,
    },
    /// Replace one team's display time.
    SetTeamTime {
        /// The team.
        team: Team,
        /// The new time, or `None` to clear it.
        time: Option<TeamTime>,
    },
    /// Delegate team-time editing to a chat role.
    SetTimeEditorRole {
        /// The role, or `None` to revoke the delegation.
        role_id: Option<u64>,
    },
    /// Attach, move or detach the display surface.
    SetDisplay {
        /// The new surface, or `None` to detach.
        display: Option<DisplaySurface>,
    },
    /// Grant a user manager capability.
    AddManager {
        /// The user.
        user_id: UserId,
    },
    /// Revoke a user's manager capability.
    RemoveManager {
        /// The user.
        user_id: UserId,
    },
}

impl Command {
    /// Returns the action name recorded in the audit log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "Join",
            Self::Leave => "Leave",
            Self::RemoveMember { .. } => "RemoveMember",
            Self::Promote { .. } => "Promote",
            Self::AssignCommander { .. } => "AssignCommander",
            Self::UnassignCommander { .. } => "UnassignCommander",
            Self::SetStatus { .. } => "SetStatus",
            Self::Reset { .. } => "Reset",
            Self::UpdateCapacity { .. } => "UpdateCapacity",
            Self::SetTeamLabels { .. } => "SetTeamLabels",
            Self::SetStartsAt { .. } => "SetStartsAt",
            Self::SetTeamTime { .. } => "SetTeamTime",
            Self::SetTimeEditorRole { .. } => "SetTimeEditorRole",
            Self::SetDisplay { .. } => "SetDisplay",
            Self::AddManager { .. } => "AddManager",
            Self::RemoveManager { .. } => "RemoveManager",
        }
    }

    /// Returns what the requester needs to issue the command.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        match self {
            Self::Join { .. } | Self::Leave => Capability::Member,
            Self::SetTeamTime { .. } => Capability::EditTeamTimes,
            _ => Capability::Manage,
        }
    }
}

/// A request to create an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// The `(guild, name)` key.
    pub key: EventKey,
    /// Capacity configuration.
    pub config: EventConfig,
    /// Label for team A.
    pub team_a_label: Option<String>,
    /// Label for team B.
    pub team_b_label: Option<String>,
    /// Free-text start time.
    pub starts_at: Option<String>,
}

impl NewEvent {
    /// Creates a request with the default configuration and no metadata.
    #[must_use]
    pub fn new(key: EventKey) -> Self {
        Self {
            key,
            config: EventConfig::default(),
            team_a_label: None,
            team_b_label: None,
            starts_at: None,
        }
    }
}
