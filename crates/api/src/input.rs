// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parsing of raw request values into domain values.

use squad_roster_domain::{
    DisplaySurface, DomainError, EventConfig, EventKey, EventName, EventStatus, GuildId, Squad,
    SquadLimits, Team, TeamCount, TeamTime, UserId, validate_capacity_value,
};
use thiserror::Error;

use crate::request_response::CapacityFields;

/// A request value that could not be turned into a domain value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// Team code is not `A`, `B`, `1` or `2`.
    #[error("Invalid team '{0}': must be A, B, 1 or 2")]
    Team(String),
    /// Squad code is not `SA` or `SB`.
    #[error("Invalid squad '{0}': must be SA or SB")]
    Squad(String),
    /// Status is not `open` or `locked`.
    #[error("Invalid status '{0}': must be open or locked")]
    Status(String),
    /// A platform identifier is zero or too large.
    #[error("Invalid {field}: {value}")]
    Identifier {
        /// The identifier field.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },
    /// The event name is empty or too long.
    #[error("{0}")]
    EventName(String),
    /// Team count is not 1 or 2.
    #[error("Invalid team count {0}: must be 1 or 2")]
    TeamCount(i64),
    /// A capacity value is out of range.
    #[error("Invalid {field}: {reason}")]
    Capacity {
        /// The capacity field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// Only one of the squad B fields was supplied for an event without squad B.
    #[error("squad_b_size and squad_b_commanders must be given together")]
    IncompleteSquadB,
    /// A display message was given without its channel.
    #[error("message_id requires channel_id")]
    DisplayWithoutChannel,
    /// A team time was given both as text and as a timestamp.
    #[error("time_text and time_unix are mutually exclusive")]
    AmbiguousTeamTime,
}

impl InputError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Team(_) => "team",
            Self::Squad(_) => "squad",
            Self::Status(_) => "status",
            Self::Identifier { field, .. } | Self::Capacity { field, .. } => *field,
            Self::EventName(_) => "name",
            Self::TeamCount(_) => "teams",
            Self::IncompleteSquadB => "squad_b",
            Self::DisplayWithoutChannel => "channel_id",
            Self::AmbiguousTeamTime => "time",
        }
    }
}

/// Parses a team code.
///
/// # Errors
///
/// Returns an error unless the code is `A`, `B`, `1` or `2`.
pub fn parse_team(raw: &str) -> Result<Team, InputError> {
    raw.parse::<Team>()
        .map_err(|_| InputError::Team(raw.to_string()))
}

/// Parses a squad code.
///
/// # Errors
///
/// Returns an error unless the code is `SA` or `SB`.
pub fn parse_squad(raw: &str) -> Result<Squad, InputError> {
    raw.parse::<Squad>()
        .map_err(|_| InputError::Squad(raw.to_string()))
}

/// Parses an optional squad preference. A blank value means no preference.
///
/// # Errors
///
/// Returns an error if a non-blank value is not a squad code.
pub fn parse_optional_squad(raw: Option<&str>) -> Result<Option<Squad>, InputError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(parse_squad)
        .transpose()
}

/// Parses an event status.
///
/// # Errors
///
/// Returns an error unless the status is `open` or `locked`.
pub fn parse_status(raw: &str) -> Result<EventStatus, InputError> {
    raw.parse::<EventStatus>()
        .map_err(|_| InputError::Status(raw.to_string()))
}

/// Parses a user identifier.
///
/// # Errors
///
/// Returns an error if the identifier is zero or does not fit a signed column.
pub fn parse_user_id(field: &'static str, value: u64) -> Result<UserId, InputError> {
    UserId::new(value).map_err(|_| InputError::Identifier { field, value })
}

/// Parses a guild identifier.
///
/// # Errors
///
/// Returns an error if the identifier is zero or does not fit a signed column.
pub fn parse_guild_id(value: u64) -> Result<GuildId, InputError> {
    GuildId::new(value).map_err(|_| InputError::Identifier {
        field: "guild_id",
        value,
    })
}

/// Parses a chat role identifier.
///
/// # Errors
///
/// Returns an error if the identifier is zero or does not fit a signed column.
pub fn parse_role_id(value: u64) -> Result<u64, InputError> {
    if value == 0 || i64::try_from(value).is_err() {
        return Err(InputError::Identifier {
            field: "role_id",
            value,
        });
    }
    Ok(value)
}

/// Parses an event key from its guild and name.
///
/// # Errors
///
/// Returns an error if either part is invalid.
pub fn parse_event_key(guild_id: u64, name: &str) -> Result<EventKey, InputError> {
    let guild_id: GuildId = parse_guild_id(guild_id)?;
    let name: EventName = EventName::new(name).map_err(|e| InputError::EventName(e.to_string()))?;
    Ok(EventKey::new(guild_id, name))
}

fn capacity_value(field: &'static str, value: i64) -> Result<u32, InputError> {
    validate_capacity_value(field, value).map_err(|err| match err {
        DomainError::InvalidCapacity { field, reason } => InputError::Capacity { field, reason },
        other => InputError::Capacity {
            field,
            reason: other.to_string(),
        },
    })
}

/// Builds a capacity configuration from request fields.
///
/// Omitted fields keep their value from `base`. Squad B needs both its
/// fields when `base` has none; `remove_squad_b` drops it.
///
/// # Errors
///
/// Returns an error if a value is out of range or squad B is half-specified.
pub fn parse_capacity(fields: &CapacityFields, base: EventConfig) -> Result<EventConfig, InputError> {
    let teams: TeamCount = match fields.teams {
        Some(1) => TeamCount::One,
        Some(2) => TeamCount::Two,
        Some(other) => return Err(InputError::TeamCount(other)),
        None => base.teams,
    };

    let squad_a: SquadLimits = SquadLimits::new(
        fields
            .squad_a_size
            .map(|value| capacity_value("squad_a_size", value))
            .transpose()?
            .unwrap_or(base.squad_a.size),
        fields
            .squad_a_commanders
            .map(|value| capacity_value("squad_a_commanders", value))
            .transpose()?
            .unwrap_or(base.squad_a.commander_quota),
    );

    let size: Option<u32> = fields
        .squad_b_size
        .map(|value| capacity_value("squad_b_size", value))
        .transpose()?;
    let quota: Option<u32> = fields
        .squad_b_commanders
        .map(|value| capacity_value("squad_b_commanders", value))
        .transpose()?;
    let squad_b: Option<SquadLimits> = if fields.remove_squad_b {
        None
    } else {
        match (size, quota, base.squad_b) {
            (Some(size), Some(quota), _) => Some(SquadLimits::new(size, quota)),
            (None, None, current) => current,
            (Some(size), None, Some(current)) => {
                Some(SquadLimits::new(size, current.commander_quota))
            }
            (None, Some(quota), Some(current)) => Some(SquadLimits::new(current.size, quota)),
            (_, _, None) => return Err(InputError::IncompleteSquadB),
        }
    };

    let backup_size: u32 = fields
        .backup_size
        .map(|value| capacity_value("backup_size", value))
        .transpose()?
        .unwrap_or(base.backup_size);

    Ok(EventConfig {
        teams,
        squad_a,
        squad_b,
        backup_size,
    })
}

/// Builds a display surface. No channel detaches the display.
///
/// # Errors
///
/// Returns an error if a message is given without a channel.
pub fn parse_display(
    channel_id: Option<u64>,
    message_id: Option<u64>,
) -> Result<Option<DisplaySurface>, InputError> {
    match (channel_id, message_id) {
        (Some(channel_id), message_id) => Ok(Some(DisplaySurface {
            channel_id,
            message_id,
        })),
        (None, None) => Ok(None),
        (None, Some(_)) => Err(InputError::DisplayWithoutChannel),
    }
}

/// Builds a team time from its text or timestamp form. Neither clears it.
///
/// # Errors
///
/// Returns an error if both forms are given.
pub fn parse_team_time(
    time_text: Option<&str>,
    time_unix: Option<i64>,
) -> Result<Option<TeamTime>, InputError> {
    match (time_text, time_unix) {
        (Some(_), Some(_)) => Err(InputError::AmbiguousTeamTime),
        (Some(text), None) => Ok(Some(TeamTime::Text(text.to_string()))),
        (None, Some(seconds)) => Ok(Some(TeamTime::Unix(seconds))),
        (None, None) => Ok(None),
    }
}
