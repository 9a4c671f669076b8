// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use squad_roster_domain::{EventKey, UserId};

#[cfg(test)]
mod tests;

/// Represents the entity performing an action.
///
/// Roster changes are initiated either by a chat user or by the system
/// itself (for example, a promotion triggered by someone else leaving).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Actor type recorded for chat users.
    pub const USER: &'static str = "user";
    /// Actor type recorded for system-initiated changes.
    pub const SYSTEM: &'static str = "system";

    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an actor for a chat user.
    #[must_use]
    pub fn user(user_id: UserId) -> Self {
        Self::new(user_id.to_string(), String::from(Self::USER))
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated, typically the
/// interaction or request that carried the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., interaction or request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`Join`", "`AssignCommander`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A textual summary of roster state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// The summary, e.g. `status=open entries=12`.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable audit event representing one committed roster transition.
///
/// Every successful state change produces exactly one audit event, scoped
/// to the event whose roster changed. Rejected commands and no-op
/// promotions produce none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The database identifier. `None` until persisted.
    pub audit_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
    /// The event this transition belongs to.
    pub scope: EventKey,
    /// When the event was recorded (RFC 3339). `None` until persisted.
    pub recorded_at: Option<String>,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    /// * `scope` - The event whose roster changed
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        scope: EventKey,
    ) -> Self {
        Self {
            audit_id: None,
            actor,
            cause,
            action,
            before,
            after,
            scope,
            recorded_at: None,
        }
    }

    /// Attaches the identifier and timestamp assigned by the store.
    #[must_use]
    pub fn persisted(mut self, audit_id: i64, recorded_at: String) -> Self {
        self.audit_id = Some(audit_id);
        self.recorded_at = Some(recorded_at);
        self
    }
}
