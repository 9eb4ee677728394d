use std::collections::HashMap;
use std::slice;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::role::Role;


pub const MAX_PREFERRED_ROLES: usize = 3;

#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RolePreference {
    // No preference: eligibility and the flat rating decide.
    #[default]
    Any,
    // Hard pin: the player must get exactly this role if at all possible.
    Pinned(Role),
    // Soft preference over 2 or 3 distinct roles.
    Preferred(Vec<Role>),
}

impl RolePreference {
    // Returns `None` if more than `MAX_PREFERRED_ROLES` distinct roles are given.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Option<Self> {
        let roles = roles.into_iter().unique().collect_vec();
        match roles.len() {
            0 => Some(RolePreference::Any),
            1 => Some(RolePreference::Pinned(roles[0])),
            n if n <= MAX_PREFERRED_ROLES => Some(RolePreference::Preferred(roles)),
            _ => None,
        }
    }

    pub fn roles(&self) -> &[Role] {
        match self {
            RolePreference::Any => &[],
            RolePreference::Pinned(role) => slice::from_ref(role),
            RolePreference::Preferred(roles) => roles,
        }
    }

    pub fn pinned(&self) -> Option<Role> {
        match self {
            RolePreference::Pinned(role) => Some(*role),
            _ => None,
        }
    }

    pub fn includes(&self, role: Role) -> bool { self.roles().contains(&role) }
}

// Keyed by username. A player without an entry has no preference.
pub type Preferences = HashMap<String, RolePreference>;

static NO_PREFERENCE: RolePreference = RolePreference::Any;

pub fn preference_of<'a>(preferences: &'a Preferences, username: &str) -> &'a RolePreference {
    preferences.get(username).unwrap_or(&NO_PREFERENCE)
}
