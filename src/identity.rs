//! Identity and role types shared by the session, authorization and page layers.
//!
//! The serialized field names match the record the dashboard has always kept
//! under the `radicalLivres_user` storage key, so sessions written by earlier
//! clients restore cleanly.

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Ministry role of an authenticated user. Closed set; every gate matches on it
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Supervising pastor / administrator.
    #[serde(rename = "pastor")]
    SupervisingPastor,
    /// Supervises one or more discipleship networks.
    #[serde(rename = "discipulador")]
    Discipler,
    /// Leads a single cell.
    #[serde(rename = "lider")]
    CellLeader,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SupervisingPastor, Role::Discipler, Role::CellLeader];

    /// Wire string used in storage and API payloads.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SupervisingPastor => "pastor",
            Self::Discipler => "discipulador",
            Self::CellLeader => "lider",
        }
    }

    /// Human-readable description shown next to the user's name.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::SupervisingPastor => "Pastor/Administrador",
            Self::Discipler => "Discipulador",
            Self::CellLeader => "Líder de Célula",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pastor" => Ok(Self::SupervisingPastor),
            "discipulador" => Ok(Self::Discipler),
            "lider" => Ok(Self::CellLeader),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Profile of an authenticated user, persisted verbatim on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: u32,
    /// Unique within the credential store.
    pub username: String,
    /// Display name.
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl Identity {
    /// Serialize to the JSON snapshot kept in durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_snapshot(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored snapshot. Unknown roles and missing fields are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not a valid identity record.
    pub fn from_snapshot(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
