// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `events`: event row insert and update
//! - `enrollments`: enrollment and manager rows
//! - `audit`: audit log records
//! - `transition`: writes a `RosterChange` list produced by the core
//!
//! None of these open a transaction; the caller in `lib.rs` owns it.

pub mod audit;
pub mod enrollments;
pub mod events;
pub mod transition;

pub use audit::persist_audit_event;
pub use events::insert_event;
pub use transition::apply_changes;
