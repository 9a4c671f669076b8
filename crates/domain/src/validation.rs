// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EventConfig, MAX_LABEL_LEN, SquadLimits, TeamTime};

/// Upper bound for any single capacity field.
pub const MAX_CAPACITY: u32 = 500;

/// Maximum length of the free-text start time, in characters.
pub const MAX_STARTS_AT_LEN: usize = 100;

/// Converts a raw capacity value supplied by a caller into a slot count.
///
/// # Arguments
///
/// * `field` - The field name, used in the error
/// * `value` - The raw value
///
/// # Errors
///
/// Returns an error if the value is negative or exceeds [`MAX_CAPACITY`].
pub fn validate_capacity_value(field: &'static str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::InvalidCapacity {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    match u32::try_from(value) {
        Ok(count) if count <= MAX_CAPACITY => Ok(count),
        _ => Err(DomainError::InvalidCapacity {
            field,
            reason: format!("must be at most {MAX_CAPACITY}, got {value}"),
        }),
    }
}

fn validate_squad_limits(
    size_field: &'static str,
    quota_field: &'static str,
    limits: SquadLimits,
) -> Result<(), DomainError> {
    if limits.size > MAX_CAPACITY {
        return Err(DomainError::InvalidCapacity {
            field: size_field,
            reason: format!("must be at most {MAX_CAPACITY}, got {}", limits.size),
        });
    }
    if limits.commander_quota > MAX_CAPACITY {
        return Err(DomainError::InvalidCapacity {
            field: quota_field,
            reason: format!(
                "must be at most {MAX_CAPACITY}, got {}",
                limits.commander_quota
            ),
        });
    }
    Ok(())
}

/// Validates an event capacity configuration.
///
/// A commander quota larger than its squad is accepted; the non-commander
/// cap is clamped to zero in that case.
///
/// # Errors
///
/// Returns an error if any size or quota exceeds [`MAX_CAPACITY`].
pub fn validate_event_config(config: &EventConfig) -> Result<(), DomainError> {
    validate_squad_limits("squad_a_size", "squad_a_commander_quota", config.squad_a)?;
    if let Some(squad_b) = config.squad_b {
        validate_squad_limits("squad_b_size", "squad_b_commander_quota", squad_b)?;
    }
    if config.backup_size > MAX_CAPACITY {
        return Err(DomainError::InvalidCapacity {
            field: "backup_size",
            reason: format!(
                "must be at most {MAX_CAPACITY}, got {}",
                config.backup_size
            ),
        });
    }
    Ok(())
}

/// Normalizes an optional team label.
///
/// Blank labels clear the custom label so the default is shown again.
///
/// # Errors
///
/// Returns an error if the label is longer than [`MAX_LABEL_LEN`] characters.
pub fn normalize_label(label: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(raw) = label else {
        return Ok(None);
    };
    let trimmed: &str = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > MAX_LABEL_LEN {
        return Err(DomainError::InvalidLabel(format!(
            "Label must be at most {MAX_LABEL_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Normalizes the free-text start time. Blank text clears it.
///
/// # Errors
///
/// Returns an error if the text is longer than [`MAX_STARTS_AT_LEN`] characters.
pub fn normalize_starts_at(text: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(trimmed) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(None);
    };
    if trimmed.chars().count() > MAX_STARTS_AT_LEN {
        return Err(DomainError::InvalidStartsAt(format!(
            "Start time must be at most {MAX_STARTS_AT_LEN} characters"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Normalizes a team time. Blank text clears it.
///
/// # Errors
///
/// Returns an error if the text is longer than [`MAX_STARTS_AT_LEN`]
/// characters or the timestamp is not positive.
pub fn normalize_team_time(time: Option<TeamTime>) -> Result<Option<TeamTime>, DomainError> {
    match time {
        None => Ok(None),
        Some(TeamTime::Unix(seconds)) if seconds <= 0 => Err(DomainError::InvalidTeamTime(
            format!("Timestamp must be positive, got {seconds}"),
        )),
        Some(TeamTime::Unix(seconds)) => Ok(Some(TeamTime::Unix(seconds))),
        Some(TeamTime::Text(text)) => {
            let trimmed: &str = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if trimmed.chars().count() > MAX_STARTS_AT_LEN {
                return Err(DomainError::InvalidTeamTime(format!(
                    "Time text must be at most {MAX_STARTS_AT_LEN} characters"
                )));
            }
            Ok(Some(TeamTime::Text(trimmed.to_string())))
        }
    }
}
