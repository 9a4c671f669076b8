// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use squad_roster_audit::{AuditEvent, StateSnapshot};
use squad_roster_domain::{
    Enrollment, Event, EventStatus, Slot, Squad, SquadLimits, Team, TeamOccupancy, UserId,
};

/// The complete roster of a single event.
///
/// `entries` holds enrollments in insertion order. Promotion relies on
/// that order to break `joined_at` ties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterState {
    /// The event.
    pub event: Event,
    /// Every enrollment, in insertion order.
    pub entries: Vec<Enrollment>,
    /// Users granted manager capability besides the creator.
    pub managers: Vec<UserId>,
}

impl RosterState {
    /// Creates an empty roster for an event.
    #[must_use]
    pub const fn new(event: Event) -> Self {
        Self {
            event,
            entries: Vec::new(),
            managers: Vec::new(),
        }
    }

    /// Returns a user's enrollment, if any.
    #[must_use]
    pub fn find(&self, user_id: UserId) -> Option<&Enrollment> {
        self.entries.iter().find(|entry| entry.user_id == user_id)
    }

    /// Tallies one team's occupancy from the current entries.
    #[must_use]
    pub fn occupancy(&self, team: Team) -> TeamOccupancy {
        TeamOccupancy::tally(&self.entries, team)
    }

    /// Returns whether the user created the event or is in its manager set.
    #[must_use]
    pub fn is_manager(&self, user_id: UserId) -> bool {
        self.event.created_by == user_id || self.managers.contains(&user_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        let teams: Vec<String> = self
            .event
            .config
            .teams
            .teams()
            .iter()
            .map(|team| {
                let occupancy: TeamOccupancy = self.occupancy(*team);
                format!(
                    "{team}:SA={}+{},SB={}+{},backups={}",
                    occupancy.squad_a.commanders,
                    occupancy.squad_a.mains,
                    occupancy.squad_b.commanders,
                    occupancy.squad_b.mains,
                    occupancy.backups
                )
            })
            .collect();
        StateSnapshot::new(format!(
            "status={} entries={} {}",
            self.event.status,
            self.entries.len(),
            teams.join(" ")
        ))
    }

    /// Builds the read view renderers use.
    ///
    /// Each list is ordered by `joined_at`, ties kept in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> RosterSnapshot {
        let mut ordered: Vec<&Enrollment> = self.entries.iter().collect();
        ordered.sort_by_key(|entry| entry.joined_at);

        let teams: Vec<TeamRoster> = self
            .event
            .config
            .teams
            .teams()
            .iter()
            .map(|team| {
                let on_team = || ordered.iter().filter(move |entry| entry.team == *team);
                let squads: Vec<SquadRoster> = self
                    .event
                    .config
                    .squads()
                    .into_iter()
                    .filter_map(|squad| {
                        let limits: SquadLimits = self.event.config.squad_limits(squad)?;
                        Some(SquadRoster {
                            squad,
                            size: limits.size,
                            commander_quota: limits.commander_quota,
                            commanders: on_team()
                                .filter(|entry| entry.slot == Slot::Commander { squad })
                                .map(|entry| entry.user_id)
                                .collect(),
                            mains: on_team()
                                .filter(|entry| entry.slot == Slot::Main { squad })
                                .map(|entry| entry.user_id)
                                .collect(),
                        })
                    })
                    .collect();
                TeamRoster {
                    team: *team,
                    label: self.event.team_label(*team).to_string(),
                    squads,
                    backups: on_team()
                        .filter(|entry| entry.slot.is_backup())
                        .map(|entry| entry.user_id)
                        .collect(),
                    backup_capacity: self.event.config.backup_size,
                }
            })
            .collect();

        RosterSnapshot {
            event: self.event.clone(),
            teams,
        }
    }
}

/// One squad's roster within a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadRoster {
    /// The squad.
    pub squad: Squad,
    /// Configured squad size.
    pub size: u32,
    /// Configured commander quota.
    pub commander_quota: u32,
    /// Commanders.
    pub commanders: Vec<UserId>,
    /// Regular mains.
    pub mains: Vec<UserId>,
}

/// One team's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRoster {
    /// The team.
    pub team: Team,
    /// Display label.
    pub label: String,
    /// Configured squads in placement order.
    pub squads: Vec<SquadRoster>,
    /// Backups, earliest first.
    pub backups: Vec<UserId>,
    /// Backup pool size.
    pub backup_capacity: u32,
}

/// Read view of an event's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterSnapshot {
    /// The event.
    pub event: Event,
    /// Configured teams in canonical order.
    pub teams: Vec<TeamRoster>,
}

/// A single write the store must perform to commit a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    /// Insert a new enrollment.
    Insert(Enrollment),
    /// Rewrite an existing enrollment in place, keeping its position.
    Update(Enrollment),
    /// Delete a user's enrollment.
    Remove(UserId),
    /// Delete every enrollment of the event.
    ClearEnrollments,
    /// Rewrite the event row.
    UpdateEvent(Event),
    /// Add a manager.
    AddManager(UserId),
    /// Remove a manager.
    RemoveManager(UserId),
}

/// Where a join landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A regular main slot in a squad.
    Main {
        /// The squad.
        squad: Squad,
    },
    /// The team's backup pool.
    Backup,
}

/// What `AssignCommander` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignAction {
    /// A new commander enrollment was inserted.
    Inserted,
    /// A backup was converted in place.
    ConvertedFromBackup,
    /// A main became a commander, possibly moving from another squad.
    UpdatedMain {
        /// The squad the user held before.
        from_squad: Squad,
        /// A backup promoted into the freed regular slot, if any.
        promoted: Option<UserId>,
    },
    /// The user already commanded this squad.
    AlreadyCommander,
}

/// What `UnassignCommander` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnassignAction {
    /// The flag was cleared; the user stays a regular main.
    ClearedFlag,
    /// The user was moved to the backup pool.
    DemotedToBackup {
        /// A backup promoted as a result, if any.
        promoted: Option<UserId>,
    },
}

/// The user-facing result of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The requester was placed.
    Joined {
        /// The team.
        team: Team,
        /// Where they landed.
        placement: Placement,
    },
    /// The requester was already on this team; nothing changed.
    AlreadyEnrolled {
        /// The team.
        team: Team,
        /// The slot they hold.
        slot: Slot,
    },
    /// An enrollment was removed.
    Left {
        /// The removed user.
        user_id: UserId,
        /// Their team.
        team: Team,
        /// The slot they held.
        removed: Slot,
        /// A backup promoted into the vacancy, if any.
        promoted: Option<UserId>,
    },
    /// A promotion was attempted.
    Promoted {
        /// The team.
        team: Team,
        /// The squad.
        squad: Squad,
        /// The promoted backup, or `None` if nothing moved.
        promoted: Option<UserId>,
    },
    /// A commander was assigned.
    CommanderAssigned {
        /// The team.
        team: Team,
        /// The squad.
        squad: Squad,
        /// The commander.
        user_id: UserId,
        /// What happened.
        action: AssignAction,
    },
    /// A commander flag was cleared.
    CommanderUnassigned {
        /// The team.
        team: Team,
        /// The squad the user commanded.
        squad: Squad,
        /// The former commander.
        user_id: UserId,
        /// What happened.
        action: UnassignAction,
    },
    /// Status was set.
    StatusChanged {
        /// The status now in effect.
        status: EventStatus,
    },
    /// All enrollments were cleared.
    Reset {
        /// How many enrollments were removed.
        cleared: usize,
    },
    /// Capacity configuration replaced.
    CapacityUpdated,
    /// Team labels replaced.
    LabelsUpdated,
    /// Start time replaced.
    StartsAtUpdated,
    /// One team's display time replaced.
    TeamTimeUpdated {
        /// The team.
        team: Team,
    },
    /// Team-time editing delegated or revoked.
    TimeEditorRoleUpdated {
        /// The role now allowed, if any.
        role_id: Option<u64>,
    },
    /// Display surface replaced.
    DisplayUpdated,
    /// A manager was added.
    ManagerAdded {
        /// The new manager.
        user_id: UserId,
    },
    /// A manager was removed.
    ManagerRemoved {
        /// The former manager.
        user_id: UserId,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: the caller either writes every change or none.
/// A transition with no changes carries no audit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: RosterState,
    /// The writes needed to reach `new_state`, in order.
    pub changes: Vec<RosterChange>,
    /// What happened, for the caller's reply.
    pub outcome: Outcome,
    /// The audit event recording this transition, if anything changed.
    pub audit_event: Option<AuditEvent>,
}

impl TransitionResult {
    /// Returns whether the transition changed anything.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// The result of creating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventResult {
    /// The validated, unpersisted event.
    pub event: Event,
    /// The audit event recording the creation.
    pub audit_event: AuditEvent,
}
