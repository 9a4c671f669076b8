// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Maximum length of an event name, in characters.
pub const MAX_EVENT_NAME_LEN: usize = 100;

/// Maximum length of a team label, in characters.
pub const MAX_LABEL_LEN: usize = 64;

/// One side of an event's roster.
///
/// Events run with either one team (`A` only) or two teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    /// The first team.
    A,
    /// The second team. Only valid when the event runs two teams.
    B,
}

impl Team {
    /// Both teams, in canonical order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Returns the storage code for this team.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Returns the label shown when an event has no custom label for this team.
    #[must_use]
    pub const fn default_label(&self) -> &'static str {
        match self {
            Self::A => "Team 1",
            Self::B => "Team 2",
        }
    }
}

impl FromStr for Team {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" | "1" => Ok(Self::A),
            "B" | "2" => Ok(Self::B),
            _ => Err(DomainError::InvalidTeam(s.to_string())),
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named subdivision of a team's main roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Squad {
    /// Squad A (`SA`). Always configured.
    A,
    /// Squad B (`SB`). Optional per event.
    B,
}

impl Squad {
    /// Both squads, in the fixed auto-placement order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// Returns the storage code for this squad.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "SA",
            Self::B => "SB",
        }
    }
}

impl FromStr for Squad {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SA" | "A" => Ok(Self::A),
            "SB" | "B" => Ok(Self::B),
            _ => Err(DomainError::InvalidSquad(s.to_string())),
        }
    }
}

impl std::fmt::Display for Squad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of an event.
///
/// A locked event refuses joins. Everything else (leaving, promotion and
/// manager overrides) keeps working so rosters can still be corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventStatus {
    /// Sign-ups accepted.
    #[default]
    Open,
    /// Sign-ups refused.
    Locked,
}

impl EventStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Locked => "locked",
        }
    }

    /// Returns whether joins are currently accepted.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open)
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "locked" => Ok(Self::Locked),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A chat-platform user identifier.
///
/// Identifiers must fit in a signed 64-bit column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u64);

impl UserId {
    /// Creates a validated user identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero or does not fit in an `i64`.
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 || i64::try_from(value).is_err() {
            return Err(DomainError::InvalidUserId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat-platform guild (server) identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuildId(u64);

impl GuildId {
    /// Creates a validated guild identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero or does not fit in an `i64`.
    pub fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 || i64::try_from(value).is_err() {
            return Err(DomainError::InvalidGuildId(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GuildId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The human-readable name of an event, unique within a guild.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventName {
    value: String,
}

impl EventName {
    /// Creates a validated event name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or longer than
    /// [`MAX_EVENT_NAME_LEN`] characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidEventName(String::from(
                "Event name cannot be empty",
            )));
        }
        if trimmed.chars().count() > MAX_EVENT_NAME_LEN {
            return Err(DomainError::InvalidEventName(format!(
                "Event name must be at most {MAX_EVENT_NAME_LEN} characters"
            )));
        }
        Ok(Self {
            value: trimmed.to_string(),
        })
    }

    /// Returns the name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EventName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The natural key of an event: `(guild, name)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventKey {
    /// The owning guild.
    pub guild_id: GuildId,
    /// The event name.
    pub name: EventName,
}

impl EventKey {
    /// Creates a new event key.
    #[must_use]
    pub const fn new(guild_id: GuildId, name: EventName) -> Self {
        Self { guild_id, name }
    }
}

impl std::fmt::Display for EventKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' in guild {}", self.name, self.guild_id)
    }
}

/// Size and reserved commander quota of one squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadLimits {
    /// Total main slots (commanders included).
    pub size: u32,
    /// Slots reserved for commanders.
    pub commander_quota: u32,
}

impl SquadLimits {
    /// Creates squad limits.
    #[must_use]
    pub const fn new(size: u32, commander_quota: u32) -> Self {
        Self {
            size,
            commander_quota,
        }
    }

    /// Non-commander main capacity: `size - commander_quota`, clamped to zero.
    #[must_use]
    pub const fn non_commander_cap(&self) -> u32 {
        self.size.saturating_sub(self.commander_quota)
    }
}

/// How many teams an event runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamCount {
    /// Team A only.
    One,
    /// Teams A and B.
    Two,
}

impl TeamCount {
    /// Parses a team count.
    ///
    /// # Errors
    ///
    /// Returns an error unless the count is 1 or 2.
    pub fn from_count(count: u8) -> Result<Self, DomainError> {
        match count {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(DomainError::InvalidTeamCount(other)),
        }
    }

    /// Returns the numeric count.
    #[must_use]
    pub const fn count(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Returns the configured teams, in canonical order.
    #[must_use]
    pub const fn teams(&self) -> &'static [Team] {
        match self {
            Self::One => &[Team::A],
            Self::Two => &[Team::A, Team::B],
        }
    }
}

/// Capacity configuration of an event.
///
/// Every team shares the same squad layout and backup pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventConfig {
    /// Number of teams.
    pub teams: TeamCount,
    /// Squad A limits.
    pub squad_a: SquadLimits,
    /// Squad B limits, if the event runs a second squad.
    pub squad_b: Option<SquadLimits>,
    /// Backup pool size per team.
    pub backup_size: u32,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            teams: TeamCount::Two,
            squad_a: SquadLimits::new(20, 3),
            squad_b: None,
            backup_size: 10,
        }
    }
}

impl EventConfig {
    /// Returns whether the team is part of this event.
    #[must_use]
    pub fn has_team(&self, team: Team) -> bool {
        self.teams.teams().contains(&team)
    }

    /// Returns the limits of a squad, or `None` if it is not configured.
    #[must_use]
    pub const fn squad_limits(&self, squad: Squad) -> Option<SquadLimits> {
        match squad {
            Squad::A => Some(self.squad_a),
            Squad::B => self.squad_b,
        }
    }

    /// Returns the configured squads in the fixed auto-placement order.
    #[must_use]
    pub fn squads(&self) -> Vec<Squad> {
        Squad::ALL
            .into_iter()
            .filter(|squad| self.squad_limits(*squad).is_some())
            .collect()
    }

    /// Validates that the team is part of this event.
    ///
    /// # Errors
    ///
    /// Returns an error if the event does not run this team.
    pub fn require_team(&self, team: Team) -> Result<(), DomainError> {
        if self.has_team(team) {
            Ok(())
        } else {
            Err(DomainError::TeamNotConfigured { team })
        }
    }

    /// Returns the limits of a squad that must be configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the squad is not configured.
    pub fn require_squad(&self, squad: Squad) -> Result<SquadLimits, DomainError> {
        self.squad_limits(squad)
            .ok_or(DomainError::SquadNotConfigured { squad })
    }
}

/// Optional per-team display labels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamLabels {
    /// Label for team A.
    pub team_a: Option<String>,
    /// Label for team B.
    pub team_b: Option<String>,
}

impl TeamLabels {
    /// Returns the label for a team, falling back to its default label.
    #[must_use]
    pub fn label(&self, team: Team) -> &str {
        let custom: Option<&String> = match team {
            Team::A => self.team_a.as_ref(),
            Team::B => self.team_b.as_ref(),
        };
        match custom {
            Some(label) => label.as_str(),
            None => team.default_label(),
        }
    }
}

/// A team's displayed start time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamTime {
    /// Unix timestamp in seconds; renderers localize it for each reader.
    Unix(i64),
    /// Free text shown as written.
    Text(String),
}

impl std::fmt::Display for TeamTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unix(seconds) => write!(f, "unix {seconds}"),
            Self::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Optional per-team display times.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamTimes {
    /// Time for team A.
    pub team_a: Option<TeamTime>,
    /// Time for team B.
    pub team_b: Option<TeamTime>,
}

impl TeamTimes {
    /// Returns the time set for a team.
    #[must_use]
    pub const fn get(&self, team: Team) -> Option<&TeamTime> {
        match team {
            Team::A => self.team_a.as_ref(),
            Team::B => self.team_b.as_ref(),
        }
    }

    /// Replaces the time of one team.
    pub fn set(&mut self, team: Team, time: Option<TeamTime>) {
        match team {
            Team::A => self.team_a = time,
            Team::B => self.team_b = time,
        }
    }
}

/// Where an external renderer keeps the live roster message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySurface {
    /// The channel holding the roster message.
    pub channel_id: u64,
    /// The roster message, once the renderer has posted it.
    pub message_id: Option<u64>,
}

/// One activity instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// The database identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The `(guild, name)` key.
    pub key: EventKey,
    /// Capacity configuration.
    pub config: EventConfig,
    /// Lifecycle status.
    pub status: EventStatus,
    /// The user who created the event. Always a manager.
    pub created_by: UserId,
    /// Team display labels.
    pub labels: TeamLabels,
    /// Free-text start time shown by renderers.
    pub starts_at: Option<String>,
    /// Per-team display times.
    pub team_times: TeamTimes,
    /// A chat role whose holders may edit team times without managing the event.
    pub time_editor_role: Option<u64>,
    /// The live display surface, if attached.
    pub display: Option<DisplaySurface>,
    /// Creation timestamp (RFC 3339). `None` until persisted.
    pub created_at: Option<String>,
}

impl Event {
    /// Creates a new, open, unpersisted event.
    #[must_use]
    pub fn new(key: EventKey, config: EventConfig, created_by: UserId) -> Self {
        Self {
            event_id: None,
            key,
            config,
            status: EventStatus::Open,
            created_by,
            labels: TeamLabels::default(),
            starts_at: None,
            team_times: TeamTimes::default(),
            time_editor_role: None,
            display: None,
            created_at: None,
        }
    }

    /// Returns the display label of a team.
    #[must_use]
    pub fn team_label(&self, team: Team) -> &str {
        self.labels.label(team)
    }
}

/// The slot an enrollment occupies.
///
/// Only mains carry a squad, and only mains can be commanders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    /// A main slot counted against the squad's commander quota.
    Commander {
        /// The squad led.
        squad: Squad,
    },
    /// A regular main slot.
    Main {
        /// The squad served in.
        squad: Squad,
    },
    /// A team-wide waiting-list slot.
    Backup,
}

impl Slot {
    /// Storage value of `slot_type` for mains (commanders included).
    pub const MAIN: &'static str = "main";
    /// Storage value of `slot_type` for backups.
    pub const BACKUP: &'static str = "backup";

    /// Returns the squad, if this is a main slot.
    #[must_use]
    pub const fn squad(&self) -> Option<Squad> {
        match self {
            Self::Commander { squad } | Self::Main { squad } => Some(*squad),
            Self::Backup => None,
        }
    }

    /// Returns whether this is a commander slot.
    #[must_use]
    pub const fn is_commander(&self) -> bool {
        matches!(self, Self::Commander { .. })
    }

    /// Returns whether this is a main slot, commander or not.
    #[must_use]
    pub const fn is_main(&self) -> bool {
        !self.is_backup()
    }

    /// Returns whether this is a backup slot.
    #[must_use]
    pub const fn is_backup(&self) -> bool {
        matches!(self, Self::Backup)
    }

    /// Returns the storage value of `slot_type`.
    #[must_use]
    pub const fn slot_type(&self) -> &'static str {
        match self {
            Self::Commander { .. } | Self::Main { .. } => Self::MAIN,
            Self::Backup => Self::BACKUP,
        }
    }

    /// Rebuilds a slot from its storage columns.
    ///
    /// # Errors
    ///
    /// Returns an error for combinations the variant cannot express: a
    /// backup with a squad or commander flag, or a main without a squad.
    pub fn from_parts(
        slot_type: &str,
        squad: Option<Squad>,
        is_commander: bool,
    ) -> Result<Self, DomainError> {
        match (slot_type, squad, is_commander) {
            (Self::MAIN, Some(squad), true) => Ok(Self::Commander { squad }),
            (Self::MAIN, Some(squad), false) => Ok(Self::Main { squad }),
            (Self::BACKUP, None, false) => Ok(Self::Backup),
            _ => Err(DomainError::InvalidSlot(format!(
                "slot_type={slot_type}, squad={}, is_commander={is_commander}",
                squad.map_or("none", |s| s.as_str())
            ))),
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Commander { squad } => write!(f, "commander ({squad})"),
            Self::Main { squad } => write!(f, "main ({squad})"),
            Self::Backup => write!(f, "backup"),
        }
    }
}

/// One user's assignment within one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    /// The enrolled user.
    pub user_id: UserId,
    /// The team joined.
    pub team: Team,
    /// The slot held.
    pub slot: Slot,
    /// Join time in unix milliseconds. FIFO key for promotion.
    pub joined_at: i64,
}

impl Enrollment {
    /// Creates an enrollment.
    #[must_use]
    pub const fn new(user_id: UserId, team: Team, slot: Slot, joined_at: i64) -> Self {
        Self {
            user_id,
            team,
            slot,
            joined_at,
        }
    }
}

/// Converts a timestamp to unix milliseconds, the resolution of `joined_at`.
#[must_use]
pub fn unix_millis(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or(i64::MAX)
}
