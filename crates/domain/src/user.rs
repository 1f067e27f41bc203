//! User projection needed for permission resolution.

use serde::{Deserialize, Serialize};
use tasklane_core::{AppResult, NonEmptyString};

use crate::{RoleId, UserId};

/// User account reduced to the single role it is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    display_name: NonEmptyString,
    role_id: RoleId,
}

impl User {
    /// Creates a validated user record.
    pub fn new(id: UserId, display_name: impl Into<String>, role_id: RoleId) -> AppResult<Self> {
        Ok(Self {
            id,
            display_name: NonEmptyString::new(display_name)?,
            role_id,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &NonEmptyString {
        &self.display_name
    }

    /// Returns the assigned role.
    #[must_use]
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }
}
