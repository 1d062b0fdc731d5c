//! Authorization view: role flags and UI capabilities derived from the
//! current identity.
//!
//! These gates decide which affordances a page shows. They are not enforced
//! anywhere else: the dashboard API performs no matching server-side check.

#[cfg(test)]
#[path = "authz_test.rs"]
mod tests;

use serde::Serialize;

use crate::identity::{Identity, Role};

/// Coarse per-role flags. All false when nobody is signed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoleFlags {
    pub is_supervising_pastor: bool,
    pub is_discipler: bool,
    pub is_cell_leader: bool,
}

impl RoleFlags {
    #[must_use]
    pub fn for_identity(identity: Option<&Identity>) -> Self {
        match identity.map(|i| i.role) {
            None => Self::default(),
            Some(Role::SupervisingPastor) => Self { is_supervising_pastor: true, ..Self::default() },
            Some(Role::Discipler) => Self { is_discipler: true, ..Self::default() },
            Some(Role::CellLeader) => Self { is_cell_leader: true, ..Self::default() },
        }
    }
}

/// Role-gated page affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    CreateNetwork,
    ViewNetwork,
    EditNetwork,
    DeleteNetwork,
    CreateReport,
    ViewReport,
    EditReport,
    DeleteReport,
    UploadPhoto,
}

impl Capability {
    pub const ALL: [Capability; 9] = [
        Capability::CreateNetwork,
        Capability::ViewNetwork,
        Capability::EditNetwork,
        Capability::DeleteNetwork,
        Capability::CreateReport,
        Capability::ViewReport,
        Capability::EditReport,
        Capability::DeleteReport,
        Capability::UploadPhoto,
    ];
}

impl Role {
    /// Whether this role is shown the given affordance.
    #[must_use]
    pub fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::CreateNetwork | Capability::DeleteNetwork | Capability::DeleteReport => match self {
                Role::SupervisingPastor => true,
                Role::Discipler | Role::CellLeader => false,
            },
            Capability::ViewNetwork | Capability::EditNetwork | Capability::EditReport => match self {
                Role::SupervisingPastor | Role::Discipler => true,
                Role::CellLeader => false,
            },
            Capability::CreateReport | Capability::ViewReport | Capability::UploadPhoto => true,
        }
    }
}

/// Capability check for an optional identity; signed-out users get nothing.
#[must_use]
pub fn can(identity: Option<&Identity>, capability: Capability) -> bool {
    identity.is_some_and(|i| i.role.allows(capability))
}
