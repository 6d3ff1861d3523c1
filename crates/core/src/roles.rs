//! Staff roles and the permission check used by every gated operation.
//!
//! Role names are persisted as text in `users.role` and must match the
//! `ck_users_role` check constraint.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_MEDECIN: &str = "medecin";

/// Coarse permission tag carried by every user and every issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages staff accounts; satisfies every role requirement.
    Admin,
    /// Clinician. Default for self-registered accounts.
    #[default]
    Medecin,
}

impl Role {
    /// Whether a holder of `self` may perform an operation gated on `required`.
    pub fn satisfies(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Medecin, Role::Medecin) => true,
            (Role::Medecin, Role::Admin) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Medecin => ROLE_MEDECIN,
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_ADMIN => Ok(Role::Admin),
            ROLE_MEDECIN => Ok(Role::Medecin),
            other => Err(CoreError::Validation(format!("unknown role '{other}'"))),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
