// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `events`: event lookup by key and listing by guild
//! - `enrollments`: enrollment and manager rows of one event
//! - `audit`: the audit timeline of one event
//!
//! Nothing here caches; every roster load reads the rows afresh.

pub mod audit;
pub mod enrollments;
pub mod events;

use diesel::SqliteConnection;
use squad_roster::RosterState;
use squad_roster_domain::{Event, EventKey};

use crate::error::PersistenceError;

/// Loads an event with its enrollments and manager set.
///
/// Returns the event's row id alongside the state, or `None` if no event
/// has this key.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be reconstructed.
pub fn load_roster(
    conn: &mut SqliteConnection,
    key: &EventKey,
) -> Result<Option<(i64, RosterState)>, PersistenceError> {
    let Some(event) = events::find_event(conn, key)? else {
        return Ok(None);
    };
    let event_id: i64 = event_row_id(&event)?;
    let mut state: RosterState = RosterState::new(event);
    state.entries = enrollments::load_enrollments(conn, event_id)?;
    state.managers = enrollments::load_managers(conn, event_id)?;
    Ok(Some((event_id, state)))
}

/// Returns the row id of a loaded event.
///
/// # Errors
///
/// Returns an error if the event was never persisted.
pub fn event_row_id(event: &Event) -> Result<i64, PersistenceError> {
    event.event_id.ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("event {} has no row id", event.key))
    })
}
