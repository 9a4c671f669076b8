// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{Squad, Team, UserId};

/// Classification of a rejected roster operation.
///
/// Every kind is an expected, user-facing outcome. Callers branch on it
/// rather than treating it as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: bad team or squad code, invalid sizes.
    Validation,
    /// A squad, backup pool or commander quota is full.
    CapacityExceeded,
    /// The request conflicts with current roster or event state.
    StateConflict,
    /// The event or enrollment does not exist.
    NotFound,
}

impl ErrorKind {
    /// Returns a stable machine-readable name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::CapacityExceeded => "capacity_exceeded",
            Self::StateConflict => "state_conflict",
            Self::NotFound => "not_found",
        }
    }
}

/// Errors that can occur during domain validation and roster decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Team code is not `A`/`B`.
    InvalidTeam(String),
    /// Squad code is not `SA`/`SB`.
    InvalidSquad(String),
    /// Event status is not `open`/`locked`.
    InvalidStatus(String),
    /// Stored slot columns describe an impossible slot.
    InvalidSlot(String),
    /// User identifier is out of range.
    InvalidUserId(String),
    /// Guild identifier is out of range.
    InvalidGuildId(String),
    /// Event name is empty or too long.
    InvalidEventName(String),
    /// Team count is not 1 or 2.
    InvalidTeamCount(u8),
    /// A capacity field is invalid.
    InvalidCapacity {
        /// The offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A team label is empty or too long.
    InvalidLabel(String),
    /// A start time text is too long.
    InvalidStartsAt(String),
    /// A team time text is too long or its timestamp is not positive.
    InvalidTeamTime(String),
    /// The event does not run this team.
    TeamNotConfigured {
        /// The requested team.
        team: Team,
    },
    /// The event does not run this squad.
    SquadNotConfigured {
        /// The requested squad.
        squad: Squad,
    },
    /// Both the team's main squads and its backup pool are full.
    TeamFull {
        /// The full team.
        team: Team,
    },
    /// The team's backup pool is full.
    BackupPoolFull {
        /// The team.
        team: Team,
        /// The pool size.
        capacity: u32,
    },
    /// The squad already has its full commander quota.
    CommanderQuotaReached {
        /// The team.
        team: Team,
        /// The squad.
        squad: Squad,
        /// The commander quota.
        quota: u32,
    },
    /// The squad's commanders and mains already fill its size.
    SquadFull {
        /// The team.
        team: Team,
        /// The squad.
        squad: Squad,
        /// The squad size.
        size: u32,
    },
    /// Clearing a commander flag would overfill the squad's regular mains
    /// and no demotion to backup is possible.
    CommanderDemotionBlocked {
        /// The team.
        team: Team,
        /// The squad.
        squad: Squad,
    },
    /// A new capacity configuration is smaller than current occupancy.
    CapacityBelowOccupancy {
        /// The team whose roster does not fit.
        team: Team,
        /// What does not fit.
        reason: String,
    },
    /// The event is locked and refuses joins.
    EventLocked {
        /// The locked event.
        event: String,
    },
    /// The user already holds an entry on another team.
    EnrolledOnOtherTeam {
        /// The user.
        user_id: UserId,
        /// The team the user is on.
        team: Team,
    },
    /// The user is not a commander on the given team.
    NotACommander {
        /// The user.
        user_id: UserId,
        /// The team checked.
        team: Team,
    },
    /// An event with this name already exists in the guild.
    DuplicateEvent {
        /// The duplicate event.
        event: String,
    },
    /// A configuration change would orphan existing enrollments.
    ConfigurationInUse {
        /// What is still in use.
        reason: String,
    },
    /// The event creator's manager capability cannot be revoked.
    CreatorIsPermanentManager {
        /// The creator.
        user_id: UserId,
    },
    /// The user is already a manager of the event.
    DuplicateManager {
        /// The user.
        user_id: UserId,
    },
    /// The event does not exist.
    EventNotFound {
        /// The missing event.
        event: String,
    },
    /// The user has no enrollment in the event.
    EnrollmentNotFound {
        /// The user.
        user_id: UserId,
    },
    /// The user is not a manager of the event.
    ManagerNotFound {
        /// The user.
        user_id: UserId,
    },
}

impl DomainError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTeam(_)
            | Self::InvalidSquad(_)
            | Self::InvalidStatus(_)
            | Self::InvalidSlot(_)
            | Self::InvalidUserId(_)
            | Self::InvalidGuildId(_)
            | Self::InvalidEventName(_)
            | Self::InvalidTeamCount(_)
            | Self::InvalidCapacity { .. }
            | Self::InvalidLabel(_)
            | Self::InvalidStartsAt(_)
            | Self::InvalidTeamTime(_)
            | Self::TeamNotConfigured { .. }
            | Self::SquadNotConfigured { .. } => ErrorKind::Validation,
            Self::TeamFull { .. }
            | Self::BackupPoolFull { .. }
            | Self::CommanderQuotaReached { .. }
            | Self::SquadFull { .. }
            | Self::CommanderDemotionBlocked { .. }
            | Self::CapacityBelowOccupancy { .. } => ErrorKind::CapacityExceeded,
            Self::EventLocked { .. }
            | Self::EnrolledOnOtherTeam { .. }
            | Self::NotACommander { .. }
            | Self::DuplicateEvent { .. }
            | Self::ConfigurationInUse { .. }
            | Self::CreatorIsPermanentManager { .. }
            | Self::DuplicateManager { .. } => ErrorKind::StateConflict,
            Self::EventNotFound { .. }
            | Self::EnrollmentNotFound { .. }
            | Self::ManagerNotFound { .. } => ErrorKind::NotFound,
        }
    }
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTeam(value) => {
                write!(f, "Invalid team '{value}': must be A or B")
            }
            Self::InvalidSquad(value) => {
                write!(f, "Invalid squad '{value}': must be SA or SB")
            }
            Self::InvalidStatus(value) => {
                write!(f, "Invalid status '{value}': must be open or locked")
            }
            Self::InvalidSlot(msg) => write!(f, "Invalid slot: {msg}"),
            Self::InvalidUserId(value) => write!(f, "Invalid user id: {value}"),
            Self::InvalidGuildId(value) => write!(f, "Invalid guild id: {value}"),
            Self::InvalidEventName(msg) => write!(f, "Invalid event name: {msg}"),
            Self::InvalidTeamCount(count) => {
                write!(f, "Invalid team count: {count}. Must be 1 or 2")
            }
            Self::InvalidCapacity { field, reason } => {
                write!(f, "Invalid {field}: {reason}")
            }
            Self::InvalidLabel(msg) => write!(f, "Invalid team label: {msg}"),
            Self::InvalidStartsAt(msg) => write!(f, "Invalid start time: {msg}"),
            Self::InvalidTeamTime(msg) => write!(f, "Invalid team time: {msg}"),
            Self::TeamNotConfigured { team } => {
                write!(f, "Team {team} is not part of this event")
            }
            Self::SquadNotConfigured { squad } => {
                write!(f, "Squad {squad} is not configured for this event")
            }
            Self::TeamFull { team } => {
                write!(f, "Team {team} is full (mains and backups)")
            }
            Self::BackupPoolFull { team, capacity } => {
                write!(f, "Team {team} backups are full ({capacity}/{capacity})")
            }
            Self::CommanderQuotaReached { team, squad, quota } => {
                write!(
                    f,
                    "Team {team} squad {squad} already has its {quota} commander(s)"
                )
            }
            Self::SquadFull { team, squad, size } => {
                write!(f, "Team {team} squad {squad} is full ({size}/{size})")
            }
            Self::CommanderDemotionBlocked { team, squad } => {
                write!(
                    f,
                    "Cannot clear commander in team {team} squad {squad}: regular mains are full \
                     and no backup slot is available; swap slots manually"
                )
            }
            Self::CapacityBelowOccupancy { team, reason } => {
                write!(f, "New capacity does not fit team {team}: {reason}")
            }
            Self::EventLocked { event } => {
                write!(f, "Event {event} is locked")
            }
            Self::EnrolledOnOtherTeam { user_id, team } => {
                write!(
                    f,
                    "User {user_id} is already registered on team {team}; leave first"
                )
            }
            Self::NotACommander { user_id, team } => {
                write!(f, "User {user_id} is not a commander on team {team}")
            }
            Self::DuplicateEvent { event } => {
                write!(f, "Event {event} already exists")
            }
            Self::ConfigurationInUse { reason } => {
                write!(f, "Configuration still in use: {reason}")
            }
            Self::CreatorIsPermanentManager { user_id } => {
                write!(f, "User {user_id} created the event and stays a manager")
            }
            Self::DuplicateManager { user_id } => {
                write!(f, "User {user_id} is already a manager")
            }
            Self::EventNotFound { event } => write!(f, "Event {event} not found"),
            Self::EnrollmentNotFound { user_id } => {
                write!(f, "User {user_id} is not registered for this event")
            }
            Self::ManagerNotFound { user_id } => {
                write!(f, "User {user_id} is not a manager of this event")
            }
        }
    }
}

impl std::error::Error for DomainError {}
