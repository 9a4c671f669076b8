// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use squad_roster_domain::{DomainError, UserId};

/// Errors that can occur during state transitions.
///
/// Both variants are user-facing rejections; neither leaves any trace in
/// the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The requester lacks manager capability for the event.
    Unauthorized {
        /// The requester.
        user_id: UserId,
        /// The attempted action.
        action: &'static str,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Unauthorized { user_id, action } => {
                write!(f, "User {user_id} is not allowed to {action} on this event")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
