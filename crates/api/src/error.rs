// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use squad_roster::CoreError;
use squad_roster_domain::{DomainError, ErrorKind};
use squad_roster_persistence::PersistenceError;
use tracing::error;

use crate::input::InputError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Each variant corresponds to one class of HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The requester lacks manager capability over the event.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current roster or event state.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A squad, backup pool or commander quota has no room.
    CapacityExceeded {
        /// The limit that was hit.
        rule: String,
        /// A human-readable description of the limit.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::Unauthorized { action, message } => {
                write!(f, "Unauthorized '{action}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::CapacityExceeded { rule, message } => {
                write!(f, "Capacity exceeded ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput {
            field: String::from(err.field()),
            message: err.to_string(),
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message: err.to_string(),
    }
}

fn conflict(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn capacity(rule: &str, err: &DomainError) -> ApiError {
    ApiError::CapacityExceeded {
        rule: String::from(rule),
        message: err.to_string(),
    }
}

fn not_found(resource_type: &str, err: &DomainError) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from(resource_type),
        message: err.to_string(),
    }
}

/// Names the field, rule or resource a domain error is about.
const fn error_subject(err: &DomainError) -> &'static str {
    match err {
        DomainError::InvalidTeam(_) | DomainError::TeamNotConfigured { .. } => "team",
        DomainError::InvalidSquad(_) | DomainError::SquadNotConfigured { .. } => "squad",
        DomainError::InvalidStatus(_) => "status",
        DomainError::InvalidSlot(_) => "slot",
        DomainError::InvalidUserId(_) => "user_id",
        DomainError::InvalidGuildId(_) => "guild_id",
        DomainError::InvalidEventName(_) => "name",
        DomainError::InvalidTeamCount(_) => "teams",
        DomainError::InvalidCapacity { field, .. } => *field,
        DomainError::InvalidLabel(_) => "label",
        DomainError::InvalidStartsAt(_) => "starts_at",
        DomainError::InvalidTeamTime(_) => "time",
        DomainError::TeamFull { .. } => "team_full",
        DomainError::BackupPoolFull { .. } => "backup_pool_full",
        DomainError::CommanderQuotaReached { .. } => "commander_quota",
        DomainError::SquadFull { .. } => "squad_full",
        DomainError::CommanderDemotionBlocked { .. } => "commander_demotion",
        DomainError::CapacityBelowOccupancy { .. } => "capacity_below_occupancy",
        DomainError::EventLocked { .. } => "event_locked",
        DomainError::EnrolledOnOtherTeam { .. } => "single_enrollment",
        DomainError::NotACommander { .. } => "not_a_commander",
        DomainError::DuplicateEvent { .. } => "unique_event_name",
        DomainError::ConfigurationInUse { .. } => "configuration_in_use",
        DomainError::CreatorIsPermanentManager { .. } => "creator_is_manager",
        DomainError::DuplicateManager { .. } => "unique_manager",
        DomainError::EventNotFound { .. } => "Event",
        DomainError::EnrollmentNotFound { .. } => "Enrollment",
        DomainError::ManagerNotFound { .. } => "Manager",
    }
}

/// Translates a domain error into an API error.
///
/// The API error class follows [`DomainError::kind`]. This translation is
/// explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let subject: &str = error_subject(&err);
    match err.kind() {
        ErrorKind::Validation => invalid(subject, &err),
        ErrorKind::CapacityExceeded => capacity(subject, &err),
        ErrorKind::StateConflict => conflict(subject, &err),
        ErrorKind::NotFound => not_found(subject, &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Unauthorized { user_id, action } => ApiError::Unauthorized {
            action: String::from(action),
            message: format!(
                "User {user_id} must be an event manager or hold guild administration permission"
            ),
        },
    }
}

/// Translates a store failure into an internal API error.
///
/// Store failures are logged here; the caller only sees a generic message.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    error!(error = %err, "Enrollment store failure");
    ApiError::Internal {
        message: format!("Store failure: {err}"),
    }
}
