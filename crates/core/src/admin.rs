// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event administration: configuration, metadata and the manager set.

use crate::draft::RosterDraft;
use crate::state::Outcome;
use squad_roster_domain::{
    DisplaySurface, DomainError, EventConfig, Team, TeamLabels, TeamOccupancy, TeamTime, UserId,
    check_occupancy_fits, normalize_label, normalize_starts_at, normalize_team_time,
    validate_event_config,
};

/// Replaces the capacity configuration.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a team or squad being
/// dropped still has entries, or current occupancy exceeds a new limit.
pub(crate) fn update_capacity(
    draft: &mut RosterDraft,
    config: EventConfig,
) -> Result<Outcome, DomainError> {
    validate_event_config(&config)?;
    for team in Team::ALL {
        let occupancy: TeamOccupancy = draft.state().occupancy(team);
        if config.has_team(team) {
            check_occupancy_fits(&config, &occupancy, team)?;
        } else {
            let entries: u32 = occupancy.total_mains().saturating_add(occupancy.backups);
            if entries > 0 {
                return Err(DomainError::ConfigurationInUse {
                    reason: format!("team {team} still has {entries} enrollment(s)"),
                });
            }
        }
    }
    draft.update_event(|event| event.config = config);
    Ok(Outcome::CapacityUpdated)
}

/// Replaces both team labels.
///
/// # Errors
///
/// Returns an error if a label is too long.
pub(crate) fn set_team_labels(
    draft: &mut RosterDraft,
    team_a: Option<&str>,
    team_b: Option<&str>,
) -> Result<Outcome, DomainError> {
    let labels: TeamLabels = TeamLabels {
        team_a: normalize_label(team_a)?,
        team_b: normalize_label(team_b)?,
    };
    draft.update_event(|event| event.labels = labels);
    Ok(Outcome::LabelsUpdated)
}

/// Replaces the free-text start time.
///
/// # Errors
///
/// Returns an error if the text is too long.
pub(crate) fn set_starts_at(
    draft: &mut RosterDraft,
    starts_at: Option<&str>,
) -> Result<Outcome, DomainError> {
    let starts_at: Option<String> = normalize_starts_at(starts_at)?;
    draft.update_event(|event| event.starts_at = starts_at);
    Ok(Outcome::StartsAtUpdated)
}

/// Replaces one team's display time.
///
/// # Errors
///
/// Returns an error if the event does not run the team or the time is invalid.
pub(crate) fn set_team_time(
    draft: &mut RosterDraft,
    team: Team,
    time: Option<TeamTime>,
) -> Result<Outcome, DomainError> {
    draft.event().config.require_team(team)?;
    let time: Option<TeamTime> = normalize_team_time(time)?;
    draft.update_event(|event| event.team_times.set(team, time));
    Ok(Outcome::TeamTimeUpdated { team })
}

pub(crate) fn set_time_editor_role(draft: &mut RosterDraft, role_id: Option<u64>) -> Outcome {
    draft.update_event(|event| event.time_editor_role = role_id);
    Outcome::TimeEditorRoleUpdated { role_id }
}

pub(crate) fn set_display(draft: &mut RosterDraft, display: Option<DisplaySurface>) -> Outcome {
    draft.update_event(|event| event.display = display);
    Outcome::DisplayUpdated
}

/// Grants manager capability.
///
/// # Errors
///
/// Returns an error if the user already manages the event.
pub(crate) fn add_manager(draft: &mut RosterDraft, user_id: UserId) -> Result<Outcome, DomainError> {
    if draft.state().is_manager(user_id) {
        return Err(DomainError::DuplicateManager { user_id });
    }
    draft.add_manager(user_id);
    Ok(Outcome::ManagerAdded { user_id })
}

/// Revokes manager capability.
///
/// # Errors
///
/// Returns an error if the user created the event or is not a manager.
pub(crate) fn remove_manager(
    draft: &mut RosterDraft,
    user_id: UserId,
) -> Result<Outcome, DomainError> {
    if draft.event().created_by == user_id {
        return Err(DomainError::CreatorIsPermanentManager { user_id });
    }
    if !draft.state().managers.contains(&user_id) {
        return Err(DomainError::ManagerNotFound { user_id });
    }
    draft.remove_manager(user_id);
    Ok(Outcome::ManagerRemoved { user_id })
}
