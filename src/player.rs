use std::collections::HashMap;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::role::{Role, RoleSet};


// Community convention: team A plays from the bottom side ("아래"), team B from the top ("위").
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opponent(self) -> Self {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Team::A => "아래",
            Team::B => "위",
        }
    }
}

// Team membership from an earlier split, keyed by username.
pub type PreviousTeams = HashMap<String, Team>;


// A snapshot of one player's ratings. Constructed fresh for every generation request.
#[derive(Clone, PartialEq, Debug)]
pub struct Player {
    pub username: String,
    pub mmr: f64,
    // `None` when upstream has no rating for the role yet.
    pub mmr_by_role: EnumMap<Role, Option<f64>>,
    pub eligible_roles: RoleSet,
}

impl Player {
    pub fn new(username: impl Into<String>, mmr: f64, eligible_roles: RoleSet) -> Self {
        Player {
            username: username.into(),
            mmr,
            mmr_by_role: EnumMap::default(),
            eligible_roles,
        }
    }

    pub fn with_role_mmr(mut self, role: Role, mmr: f64) -> Self {
        self.mmr_by_role[role] = Some(mmr);
        self
    }

    pub fn can_play(&self, role: Role) -> bool { self.eligible_roles.contains(role) }
}
