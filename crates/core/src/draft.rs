// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::{RosterChange, RosterState};
use squad_roster_domain::{Enrollment, Event, UserId};

/// A working copy of a roster that records every write made to it.
///
/// Engines mutate the draft so that later steps of a command (such as the
/// promotion after a leave) observe earlier ones. Dropping the draft
/// discards everything.
#[derive(Debug)]
pub(crate) struct RosterDraft {
    state: RosterState,
    changes: Vec<RosterChange>,
}

impl RosterDraft {
    pub(crate) fn new(state: &RosterState) -> Self {
        Self {
            state: state.clone(),
            changes: Vec::new(),
        }
    }

    pub(crate) const fn state(&self) -> &RosterState {
        &self.state
    }

    pub(crate) const fn event(&self) -> &Event {
        &self.state.event
    }

    pub(crate) fn insert(&mut self, entry: Enrollment) {
        self.state.entries.push(entry);
        self.changes.push(RosterChange::Insert(entry));
    }

    /// Rewrites an existing entry in place. Unknown users are ignored.
    pub(crate) fn update(&mut self, entry: Enrollment) {
        if let Some(existing) = self
            .state
            .entries
            .iter_mut()
            .find(|existing| existing.user_id == entry.user_id)
        {
            *existing = entry;
            self.changes.push(RosterChange::Update(entry));
        }
    }

    pub(crate) fn remove(&mut self, user_id: UserId) -> Option<Enrollment> {
        let index: usize = self
            .state
            .entries
            .iter()
            .position(|entry| entry.user_id == user_id)?;
        let removed: Enrollment = self.state.entries.remove(index);
        self.changes.push(RosterChange::Remove(user_id));
        Some(removed)
    }

    pub(crate) fn clear_enrollments(&mut self) -> usize {
        let cleared: usize = self.state.entries.len();
        self.state.entries.clear();
        self.changes.push(RosterChange::ClearEnrollments);
        cleared
    }

    pub(crate) fn update_event<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Event),
    {
        edit(&mut self.state.event);
        self.changes
            .push(RosterChange::UpdateEvent(self.state.event.clone()));
    }

    pub(crate) fn add_manager(&mut self, user_id: UserId) {
        self.state.managers.push(user_id);
        self.changes.push(RosterChange::AddManager(user_id));
    }

    pub(crate) fn remove_manager(&mut self, user_id: UserId) {
        self.state.managers.retain(|manager| *manager != user_id);
        self.changes.push(RosterChange::RemoveManager(user_id));
    }

    pub(crate) fn finish(self) -> (RosterState, Vec<RosterChange>) {
        (self.state, self.changes)
    }
}
