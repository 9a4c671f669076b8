// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, EventConfig, EventName, EventStatus, GuildId, Slot, Squad, SquadLimits, Team,
    TeamCount, TeamLabels, UserId, unix_millis,
};
use time::macros::datetime;

#[test]
fn test_team_parses_codes_and_numbers() {
    assert_eq!("A".parse::<Team>().unwrap(), Team::A);
    assert_eq!("b".parse::<Team>().unwrap(), Team::B);
    assert_eq!(" 1 ".parse::<Team>().unwrap(), Team::A);
    assert_eq!("2".parse::<Team>().unwrap(), Team::B);
}

#[test]
fn test_team_rejects_unknown_code() {
    let result: Result<Team, DomainError> = "C".parse();
    assert_eq!(result, Err(DomainError::InvalidTeam(String::from("C"))));
}

#[test]
fn test_squad_parses_codes() {
    assert_eq!("SA".parse::<Squad>().unwrap(), Squad::A);
    assert_eq!("sb".parse::<Squad>().unwrap(), Squad::B);
    assert_eq!("a".parse::<Squad>().unwrap(), Squad::A);
    assert!("SC".parse::<Squad>().is_err());
    assert_eq!(Squad::B.to_string(), "SB");
}

#[test]
fn test_event_status_round_trips_through_storage_form() {
    for status in [EventStatus::Open, EventStatus::Locked] {
        assert_eq!(status.as_str().parse::<EventStatus>().unwrap(), status);
    }
    assert!(EventStatus::Open.is_open());
    assert!(!EventStatus::Locked.is_open());
    assert!("closed".parse::<EventStatus>().is_err());
}

#[test]
fn test_user_id_rejects_zero_and_out_of_range() {
    assert!(UserId::new(0).is_err());
    assert!(UserId::new(u64::MAX).is_err());
    assert_eq!(UserId::new(42).unwrap().value(), 42);
    assert!(GuildId::new(0).is_err());
}

#[test]
fn test_event_name_is_trimmed_and_bounded() {
    assert_eq!(EventName::new("  Raid Night ").unwrap().value(), "Raid Night");
    assert!(EventName::new("   ").is_err());
    assert!(EventName::new(&"x".repeat(101)).is_err());
}

#[test]
fn test_non_commander_cap_is_clamped_to_zero() {
    assert_eq!(SquadLimits::new(20, 3).non_commander_cap(), 17);
    assert_eq!(SquadLimits::new(2, 5).non_commander_cap(), 0);
}

#[test]
fn test_team_count_parsing() {
    assert_eq!(TeamCount::from_count(1).unwrap().teams(), &[Team::A]);
    assert_eq!(TeamCount::from_count(2).unwrap().teams(), &[Team::A, Team::B]);
    assert_eq!(
        TeamCount::from_count(3),
        Err(DomainError::InvalidTeamCount(3))
    );
}

#[test]
fn test_default_config_matches_original_roster_size() {
    let config: EventConfig = EventConfig::default();
    assert_eq!(config.teams, TeamCount::Two);
    assert_eq!(config.squad_a, SquadLimits::new(20, 3));
    assert_eq!(config.squad_b, None);
    assert_eq!(config.backup_size, 10);
    assert_eq!(config.squads(), vec![Squad::A]);
}

#[test]
fn test_config_requires_configured_team_and_squad() {
    let config: EventConfig = EventConfig {
        teams: TeamCount::One,
        ..EventConfig::default()
    };
    assert!(config.require_team(Team::A).is_ok());
    assert_eq!(
        config.require_team(Team::B),
        Err(DomainError::TeamNotConfigured { team: Team::B })
    );
    assert_eq!(
        config.require_squad(Squad::B),
        Err(DomainError::SquadNotConfigured { squad: Squad::B })
    );
}

#[test]
fn test_labels_fall_back_to_defaults() {
    let labels: TeamLabels = TeamLabels {
        team_a: Some(String::from("Shadowfront")),
        team_b: None,
    };
    assert_eq!(labels.label(Team::A), "Shadowfront");
    assert_eq!(labels.label(Team::B), "Team 2");
}

#[test]
fn test_slot_from_parts_accepts_only_representable_states() {
    assert_eq!(
        Slot::from_parts("main", Some(Squad::A), true).unwrap(),
        Slot::Commander { squad: Squad::A }
    );
    assert_eq!(
        Slot::from_parts("main", Some(Squad::B), false).unwrap(),
        Slot::Main { squad: Squad::B }
    );
    assert_eq!(Slot::from_parts("backup", None, false).unwrap(), Slot::Backup);

    assert!(Slot::from_parts("backup", Some(Squad::A), false).is_err());
    assert!(Slot::from_parts("backup", None, true).is_err());
    assert!(Slot::from_parts("main", None, false).is_err());
    assert!(Slot::from_parts("reserve", None, false).is_err());
}

#[test]
fn test_slot_accessors() {
    let commander: Slot = Slot::Commander { squad: Squad::B };
    assert!(commander.is_main());
    assert!(commander.is_commander());
    assert_eq!(commander.squad(), Some(Squad::B));
    assert_eq!(commander.slot_type(), "main");

    assert!(Slot::Backup.is_backup());
    assert_eq!(Slot::Backup.squad(), None);
    assert_eq!(Slot::Backup.slot_type(), "backup");
    assert_eq!(Slot::Main { squad: Squad::A }.to_string(), "main (SA)");
}

#[test]
fn test_unix_millis() {
    assert_eq!(unix_millis(datetime!(1970-01-01 00:00:01.250 UTC)), 1250);
}
