// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Enrollment store for the squad roster sign-up system.
//!
//! Built on Diesel and `SQLite`. Every write operation is one
//! `BEGIN IMMEDIATE` transaction: load the event, its enrollments and its
//! manager set; evaluate the command in the pure core; write the resulting
//! changes and the audit record; commit. Immediate transactions take the
//! write lock up front, so concurrent writers (in this process or another)
//! are serialized and never decide against a stale roster.
//!
//! Rejections are not store failures. Write operations return
//! `Result<Result<T, CoreError>, PersistenceError>`: the outer error means
//! the store failed, the inner one that the roster rules refused the
//! command. A rejected command writes nothing.
//!
//! ## Testing
//!
//! Tests run against isolated shared-cache in-memory databases created by
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use squad_roster::{
    Authorizer, Command, CoreError, CreateEventResult, NewEvent, Requester, RosterState,
    TransitionResult, apply, apply_create_event,
};
use squad_roster_audit::{AuditEvent, Cause};
use squad_roster_domain::{DomainError, Event, EventKey, GuildId};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// The enrollment store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory `SQLite` database.
    ///
    /// Each call receives its own database, so tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a `SQLite` database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the database file; created if missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// Creates an event and records its creation.
    ///
    /// # Arguments
    ///
    /// * `request` - The event to create
    /// * `requester` - The user issuing the command
    /// * `cause` - The cause or reason for this action
    /// * `now` - The creation time
    ///
    /// # Returns
    ///
    /// The persisted event (with its row id and creation time) and audit
    /// event, or the rejection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn create_event(
        &mut self,
        request: NewEvent,
        requester: &Requester,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<Result<CreateEventResult, CoreError>, PersistenceError> {
        let created_at: String = now.format(&Rfc3339)?;
        self.conn.immediate_transaction(|conn| {
            let existing: Option<Event> = queries::events::find_event(conn, &request.key)?;
            let result: CreateEventResult =
                match apply_create_event(existing.as_ref(), request, requester, cause) {
                    Ok(result) => result,
                    Err(rejection) => return Ok(Err(rejection)),
                };

            let event_id: i64 = mutations::insert_event(conn, &result.event, &created_at)?;
            let audit_event: AuditEvent =
                mutations::persist_audit_event(conn, event_id, result.audit_event, &created_at)?;

            let mut event: Event = result.event;
            event.event_id = Some(event_id);
            event.created_at = Some(created_at.clone());
            info!(event_id, event = %event.key, created_by = %event.created_by, "Created event");

            Ok(Ok(CreateEventResult { event, audit_event }))
        })
    }

    /// Executes a command against an event atomically.
    ///
    /// # Arguments
    ///
    /// * `key` - The event the command targets
    /// * `command` - The command
    /// * `requester` - The user issuing the command
    /// * `authorizer` - The manager capability policy
    /// * `cause` - The cause or reason for this action
    /// * `now` - The current time
    ///
    /// # Returns
    ///
    /// The committed transition, with its audit event carrying the assigned
    /// id, or the rejection. A missing event is rejected as not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails; nothing is committed in that case.
    pub fn execute_command<A>(
        &mut self,
        key: &EventKey,
        command: Command,
        requester: &Requester,
        authorizer: &A,
        cause: Cause,
        now: OffsetDateTime,
    ) -> Result<Result<TransitionResult, CoreError>, PersistenceError>
    where
        A: Authorizer + ?Sized,
    {
        let recorded_at: String = now.format(&Rfc3339)?;
        self.conn.immediate_transaction(|conn| {
            let Some((event_id, state)) = queries::load_roster(conn, key)? else {
                return Ok(Err(CoreError::DomainViolation(
                    DomainError::EventNotFound {
                        event: key.to_string(),
                    },
                )));
            };

            let mut result: TransitionResult =
                match apply(&state, command, requester, authorizer, cause, now) {
                    Ok(result) => result,
                    Err(rejection) => return Ok(Err(rejection)),
                };

            mutations::apply_changes(conn, event_id, &result.changes)?;
            if let Some(audit_event) = result.audit_event.take() {
                let persisted: AuditEvent =
                    mutations::persist_audit_event(conn, event_id, audit_event, &recorded_at)?;
                info!(
                    event_id,
                    audit_id = persisted.audit_id,
                    action = %persisted.action.name,
                    changes = result.changes.len(),
                    "Committed roster transition"
                );
                result.audit_event = Some(persisted);
            } else {
                debug!(event_id, "Command changed nothing");
            }

            Ok(Ok(result))
        })
    }

    // ========================================================================
    // Reads
    // ========================================================================

    /// Loads an event's roster.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be reconstructed.
    pub fn load_roster(&mut self, key: &EventKey) -> Result<Option<RosterState>, PersistenceError> {
        Ok(queries::load_roster(&mut self.conn, key)?.map(|(_, state)| state))
    }

    /// Lists a guild's events, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a row cannot be reconstructed.
    pub fn list_events(&mut self, guild_id: GuildId) -> Result<Vec<Event>, PersistenceError> {
        queries::events::list_events(&mut self.conn, guild_id)
    }

    /// Retrieves an event's audit timeline, oldest first.
    ///
    /// Returns `None` if no event has this key.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a record cannot be deserialized.
    pub fn get_audit_timeline(
        &mut self,
        key: &EventKey,
    ) -> Result<Option<Vec<AuditEvent>>, PersistenceError> {
        let Some(event) = queries::events::find_event(&mut self.conn, key)? else {
            return Ok(None);
        };
        let event_id: i64 = queries::event_row_id(&event)?;
        queries::audit::get_audit_timeline(&mut self.conn, event_id).map(Some)
    }
}
