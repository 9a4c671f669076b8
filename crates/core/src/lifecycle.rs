// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::draft::RosterDraft;
use crate::state::Outcome;
use squad_roster_domain::EventStatus;

/// Sets the event status. Setting the current status changes nothing.
pub(crate) fn set_status(draft: &mut RosterDraft, status: EventStatus) -> Outcome {
    if draft.event().status != status {
        draft.update_event(|event| event.status = status);
    }
    Outcome::StatusChanged { status }
}

/// Clears every enrollment and reopens the event.
pub(crate) fn reset(draft: &mut RosterDraft, detach_display: bool) -> Outcome {
    let cleared: usize = draft.clear_enrollments();
    draft.update_event(|event| {
        event.status = EventStatus::Open;
        if detach_display {
            event.display = None;
        }
    });
    Outcome::Reset { cleared }
}
