// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Deserialize;
use squad_roster::Requester;
use squad_roster_audit::Cause;

use crate::input::{InputError, parse_user_id};

/// Who is asking, and why.
///
/// Carried by every write request. The chat front end vouches for
/// `is_guild_admin` and `role_ids`; this layer does not verify them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RequestContext {
    /// The requesting user.
    pub requester_id: u64,
    /// Whether the platform grants the requester guild administration.
    #[serde(default)]
    pub is_guild_admin: bool,
    /// Chat roles the requester holds.
    #[serde(default)]
    pub role_ids: Vec<u64>,
    /// Identifier of the triggering interaction.
    pub cause_id: String,
    /// Description of the triggering interaction.
    pub cause_description: String,
}

impl RequestContext {
    /// Converts the requester fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the requester id is invalid.
    pub fn requester(&self) -> Result<Requester, InputError> {
        Ok(Requester::new(
            parse_user_id("requester_id", self.requester_id)?,
            self.is_guild_admin,
        )
        .with_roles(self.role_ids.clone()))
    }

    /// Converts the cause fields into an audit cause.
    #[must_use]
    pub fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}
