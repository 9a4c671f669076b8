// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, Enrollment, EventConfig, Slot, Squad, SquadLimits, SquadOccupancy, Team,
    TeamCount, TeamOccupancy, UserId, check_occupancy_fits, has_backup_room, has_commander_room,
    has_main_room, has_squad_room, non_commander_cap,
};

fn user(id: u64) -> UserId {
    UserId::new(id).unwrap()
}

fn two_squad_config() -> EventConfig {
    EventConfig {
        teams: TeamCount::Two,
        squad_a: SquadLimits::new(2, 1),
        squad_b: Some(SquadLimits::new(1, 0)),
        backup_size: 1,
    }
}

fn sample_entries() -> Vec<Enrollment> {
    vec![
        Enrollment::new(user(1), Team::A, Slot::Commander { squad: Squad::A }, 10),
        Enrollment::new(user(2), Team::A, Slot::Main { squad: Squad::A }, 20),
        Enrollment::new(user(3), Team::A, Slot::Main { squad: Squad::B }, 30),
        Enrollment::new(user(4), Team::A, Slot::Backup, 40),
        Enrollment::new(user(5), Team::B, Slot::Main { squad: Squad::A }, 50),
    ]
}

#[test]
fn test_tally_partitions_team_into_buckets() {
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::A);

    assert_eq!(
        occupancy,
        TeamOccupancy {
            squad_a: SquadOccupancy {
                commanders: 1,
                mains: 1
            },
            squad_b: SquadOccupancy {
                commanders: 0,
                mains: 1
            },
            backups: 1,
        }
    );
    assert_eq!(occupancy.total_mains(), 3);
}

#[test]
fn test_tally_ignores_other_team() {
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::B);
    assert_eq!(occupancy.squad_a.mains, 1);
    assert_eq!(occupancy.backups, 0);
}

#[test]
fn test_tally_excluding_skips_user() {
    let occupancy: TeamOccupancy =
        TeamOccupancy::tally_excluding(&sample_entries(), Team::A, user(1));
    assert_eq!(occupancy.squad_a.commanders, 0);
    assert_eq!(occupancy.squad_a.mains, 1);
}

#[test]
fn test_room_checks_against_full_roster() {
    let config: EventConfig = two_squad_config();
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::A);

    assert_eq!(non_commander_cap(&config, Squad::A), 1);
    assert!(!has_main_room(&config, &occupancy, Squad::A));
    assert!(!has_main_room(&config, &occupancy, Squad::B));
    assert!(!has_commander_room(&config, &occupancy, Squad::A));
    assert!(!has_squad_room(&config, &occupancy, Squad::A));
    assert!(!has_backup_room(&config, &occupancy));
}

#[test]
fn test_room_checks_on_empty_team() {
    let config: EventConfig = two_squad_config();
    let occupancy: TeamOccupancy = TeamOccupancy::default();

    assert!(has_main_room(&config, &occupancy, Squad::A));
    assert!(has_main_room(&config, &occupancy, Squad::B));
    assert!(has_commander_room(&config, &occupancy, Squad::A));
    assert!(!has_commander_room(&config, &occupancy, Squad::B));
    assert!(has_backup_room(&config, &occupancy));
}

#[test]
fn test_unconfigured_squad_has_no_room() {
    let config: EventConfig = EventConfig::default();
    let occupancy: TeamOccupancy = TeamOccupancy::default();

    assert_eq!(non_commander_cap(&config, Squad::B), 0);
    assert!(!has_main_room(&config, &occupancy, Squad::B));
    assert!(!has_squad_room(&config, &occupancy, Squad::B));
}

#[test]
fn test_occupancy_fits_current_config() {
    let config: EventConfig = two_squad_config();
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::A);
    assert!(check_occupancy_fits(&config, &occupancy, Team::A).is_ok());
}

#[test]
fn test_occupancy_rejects_shrunk_backup_pool() {
    let config: EventConfig = EventConfig {
        backup_size: 0,
        ..two_squad_config()
    };
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::A);

    let result: Result<(), DomainError> = check_occupancy_fits(&config, &occupancy, Team::A);
    assert!(matches!(
        result,
        Err(DomainError::CapacityBelowOccupancy { team: Team::A, .. })
    ));
}

#[test]
fn test_occupancy_rejects_removed_squad_in_use() {
    let config: EventConfig = EventConfig {
        squad_b: None,
        ..two_squad_config()
    };
    let occupancy: TeamOccupancy = TeamOccupancy::tally(&sample_entries(), Team::A);

    let result: Result<(), DomainError> = check_occupancy_fits(&config, &occupancy, Team::A);
    assert!(matches!(
        result,
        Err(DomainError::ConfigurationInUse { .. })
    ));
}
