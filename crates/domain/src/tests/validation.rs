// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, EventConfig, MAX_CAPACITY, SquadLimits, Team, TeamTime, TeamTimes,
    normalize_label, normalize_starts_at, normalize_team_time, validate_capacity_value,
    validate_event_config,
};

#[test]
fn test_capacity_value_rejects_negative() {
    let result: Result<u32, DomainError> = validate_capacity_value("backup_size", -1);
    assert!(matches!(
        result,
        Err(DomainError::InvalidCapacity {
            field: "backup_size",
            ..
        })
    ));
}

#[test]
fn test_capacity_value_rejects_oversized() {
    assert!(validate_capacity_value("squad_a_size", i64::from(MAX_CAPACITY) + 1).is_err());
    assert!(validate_capacity_value("squad_a_size", i64::MAX).is_err());
}

#[test]
fn test_capacity_value_accepts_zero_and_max() {
    assert_eq!(validate_capacity_value("backup_size", 0).unwrap(), 0);
    assert_eq!(
        validate_capacity_value("backup_size", i64::from(MAX_CAPACITY)).unwrap(),
        MAX_CAPACITY
    );
}

#[test]
fn test_default_config_is_valid() {
    assert!(validate_event_config(&EventConfig::default()).is_ok());
}

#[test]
fn test_quota_above_size_is_accepted() {
    let config: EventConfig = EventConfig {
        squad_a: SquadLimits::new(2, 4),
        ..EventConfig::default()
    };
    assert!(validate_event_config(&config).is_ok());
}

#[test]
fn test_oversized_squad_b_is_rejected() {
    let config: EventConfig = EventConfig {
        squad_b: Some(SquadLimits::new(MAX_CAPACITY + 1, 0)),
        ..EventConfig::default()
    };
    assert!(matches!(
        validate_event_config(&config),
        Err(DomainError::InvalidCapacity {
            field: "squad_b_size",
            ..
        })
    ));
}

#[test]
fn test_normalize_label() {
    assert_eq!(normalize_label(None).unwrap(), None);
    assert_eq!(normalize_label(Some("   ")).unwrap(), None);
    assert_eq!(
        normalize_label(Some(" Shadowfront Team 1 ")).unwrap(),
        Some(String::from("Shadowfront Team 1"))
    );
    assert!(normalize_label(Some(&"x".repeat(65))).is_err());
}

#[test]
fn test_normalize_starts_at() {
    assert_eq!(normalize_starts_at(Some("")).unwrap(), None);
    assert_eq!(
        normalize_starts_at(Some(" 20:00 UTC ")).unwrap(),
        Some(String::from("20:00 UTC"))
    );
    assert!(matches!(
        normalize_starts_at(Some(&"9".repeat(101))),
        Err(DomainError::InvalidStartsAt(_))
    ));
}

#[test]
fn test_normalize_team_time() {
    assert_eq!(
        normalize_team_time(Some(TeamTime::Text(String::from("  20:00 UTC  ")))),
        Ok(Some(TeamTime::Text(String::from("20:00 UTC"))))
    );
    assert_eq!(
        normalize_team_time(Some(TeamTime::Text(String::from("   ")))),
        Ok(None)
    );
    assert_eq!(
        normalize_team_time(Some(TeamTime::Unix(1_767_225_600))),
        Ok(Some(TeamTime::Unix(1_767_225_600)))
    );
    assert!(matches!(
        normalize_team_time(Some(TeamTime::Unix(0))),
        Err(DomainError::InvalidTeamTime(_))
    ));
    assert!(matches!(
        normalize_team_time(Some(TeamTime::Text("x".repeat(101)))),
        Err(DomainError::InvalidTeamTime(_))
    ));
    assert_eq!(normalize_team_time(None), Ok(None));
}

#[test]
fn test_team_times_are_kept_per_team() {
    let mut times: TeamTimes = TeamTimes::default();
    times.set(Team::B, Some(TeamTime::Unix(1_767_225_600)));

    assert_eq!(times.get(Team::A), None);
    assert_eq!(times.get(Team::B), Some(&TeamTime::Unix(1_767_225_600)));

    times.set(Team::B, None);
    assert_eq!(times, TeamTimes::default());
}
