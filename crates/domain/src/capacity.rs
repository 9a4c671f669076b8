// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capacity model.
//!
//! Pure functions deriving effective limits from an [`EventConfig`] and
//! partitioning a team's enrollments into occupancy buckets. Occupancy is
//! always tallied from the enrollment rows themselves; nothing here caches
//! a count between decisions.

use crate::error::DomainError;
use crate::types::{Enrollment, EventConfig, Slot, Squad, Team, UserId};

/// Occupancy of one squad within one team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SquadOccupancy {
    /// Commanders in the squad.
    pub commanders: u32,
    /// Regular (non-commander) mains in the squad.
    pub mains: u32,
}

impl SquadOccupancy {
    /// Commanders plus regular mains.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.commanders.saturating_add(self.mains)
    }
}

/// Occupancy of one team, partitioned into squad-A commanders, squad-A
/// mains, squad-B commanders, squad-B mains and backups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamOccupancy {
    /// Squad A occupancy.
    pub squad_a: SquadOccupancy,
    /// Squad B occupancy.
    pub squad_b: SquadOccupancy,
    /// Backups waiting on the team.
    pub backups: u32,
}

impl TeamOccupancy {
    /// Tallies the entries belonging to `team`.
    #[must_use]
    pub fn tally<'a, I>(entries: I, team: Team) -> Self
    where
        I: IntoIterator<Item = &'a Enrollment>,
    {
        entries
            .into_iter()
            .filter(|entry| entry.team == team)
            .fold(Self::default(), |mut occupancy, entry| {
                occupancy.add(entry.slot);
                occupancy
            })
    }

    /// Tallies the entries belonging to `team`, ignoring `user_id`'s own entry.
    ///
    /// Used when re-slotting a user so their current slot does not count
    /// against the slot they are moving into.
    #[must_use]
    pub fn tally_excluding<'a, I>(entries: I, team: Team, user_id: UserId) -> Self
    where
        I: IntoIterator<Item = &'a Enrollment>,
    {
        Self::tally(
            entries
                .into_iter()
                .filter(|entry| entry.user_id != user_id),
            team,
        )
    }

    fn add(&mut self, slot: Slot) {
        match slot {
            Slot::Commander { squad } => {
                let bucket: &mut SquadOccupancy = self.squad_mut(squad);
                bucket.commanders = bucket.commanders.saturating_add(1);
            }
            Slot::Main { squad } => {
                let bucket: &mut SquadOccupancy = self.squad_mut(squad);
                bucket.mains = bucket.mains.saturating_add(1);
            }
            Slot::Backup => self.backups = self.backups.saturating_add(1),
        }
    }

    const fn squad_mut(&mut self, squad: Squad) -> &mut SquadOccupancy {
        match squad {
            Squad::A => &mut self.squad_a,
            Squad::B => &mut self.squad_b,
        }
    }

    /// Returns the occupancy of one squad.
    #[must_use]
    pub const fn squad(&self, squad: Squad) -> SquadOccupancy {
        match squad {
            Squad::A => self.squad_a,
            Squad::B => self.squad_b,
        }
    }

    /// Total mains on the team, commanders included.
    #[must_use]
    pub const fn total_mains(&self) -> u32 {
        self.squad_a.total().saturating_add(self.squad_b.total())
    }
}

/// Non-commander main capacity of a squad; zero when the squad is not configured.
#[must_use]
pub fn non_commander_cap(config: &EventConfig, squad: Squad) -> u32 {
    config
        .squad_limits(squad)
        .map_or(0, |limits| limits.non_commander_cap())
}

/// Whether another regular main fits in the squad.
#[must_use]
pub fn has_main_room(config: &EventConfig, occupancy: &TeamOccupancy, squad: Squad) -> bool {
    config.squad_limits(squad).is_some()
        && occupancy.squad(squad).mains < non_commander_cap(config, squad)
}

/// Whether another commander fits within the squad's commander quota.
#[must_use]
pub fn has_commander_room(config: &EventConfig, occupancy: &TeamOccupancy, squad: Squad) -> bool {
    config
        .squad_limits(squad)
        .is_some_and(|limits| occupancy.squad(squad).commanders < limits.commander_quota)
}

/// Whether the squad has any free main slot, commander or regular.
#[must_use]
pub fn has_squad_room(config: &EventConfig, occupancy: &TeamOccupancy, squad: Squad) -> bool {
    config
        .squad_limits(squad)
        .is_some_and(|limits| occupancy.squad(squad).total() < limits.size)
}

/// Whether another backup fits in the team's pool.
#[must_use]
pub const fn has_backup_room(config: &EventConfig, occupancy: &TeamOccupancy) -> bool {
    occupancy.backups < config.backup_size
}

/// Checks that a team's current occupancy fits within `config`.
///
/// # Errors
///
/// Returns an error naming the first bucket that overflows: a squad that is
/// no longer configured but still occupied, commanders above quota, regular
/// mains above the non-commander cap, or backups above the pool size.
pub fn check_occupancy_fits(
    config: &EventConfig,
    occupancy: &TeamOccupancy,
    team: Team,
) -> Result<(), DomainError> {
    for squad in Squad::ALL {
        let current: SquadOccupancy = occupancy.squad(squad);
        let Some(limits) = config.squad_limits(squad) else {
            if current.total() > 0 {
                return Err(DomainError::ConfigurationInUse {
                    reason: format!(
                        "team {team} squad {squad} still has {} main(s)",
                        current.total()
                    ),
                });
            }
            continue;
        };
        if current.commanders > limits.commander_quota {
            return Err(DomainError::CapacityBelowOccupancy {
                team,
                reason: format!(
                    "squad {squad} has {} commander(s) but quota would be {}",
                    current.commanders, limits.commander_quota
                ),
            });
        }
        if current.mains > limits.non_commander_cap() {
            return Err(DomainError::CapacityBelowOccupancy {
                team,
                reason: format!(
                    "squad {squad} has {} regular main(s) but cap would be {}",
                    current.mains,
                    limits.non_commander_cap()
                ),
            });
        }
    }
    if occupancy.backups > config.backup_size {
        return Err(DomainError::CapacityBelowOccupancy {
            team,
            reason: format!(
                "{} backup(s) but pool would be {}",
                occupancy.backups, config.backup_size
            ),
        });
    }
    Ok(())
}
