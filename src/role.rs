use std::fmt;
use std::str::FromStr;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};


// Upstream data identifies classes by a single Korean syllable. The enum order is the canonical
// lineup order: Druid, Oracle, Necro, Summoner.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Enum, EnumIter, Serialize, Deserialize,
)]
pub enum Role {
    Druid,
    Oracle,
    Necro,
    Summoner,
}

impl Role {
    pub fn token(self) -> &'static str {
        match self {
            Role::Druid => "드",
            Role::Oracle => "어",
            Role::Necro => "넥",
            Role::Summoner => "슴",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            Role::Druid => "druid",
            Role::Oracle => "oracle",
            Role::Necro => "necro",
            Role::Summoner => "summoner",
        }
    }

    // Accepts either the upstream token or the English name.
    pub fn from_token(s: &str) -> Option<Role> {
        let s = s.trim();
        Role::iter().find(|role| role.token() == s || role.english_name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::from_token(s).ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

// Parses a comma-joined role list such as "드, 넥". Empty items are skipped.
pub fn parse_role_list(s: &str) -> Result<Vec<Role>, UnknownRole> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty()).map(Role::from_str).collect()
}


#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleSet {
    members: EnumMap<Role, bool>,
}

impl RoleSet {
    pub fn new() -> Self { RoleSet::default() }
    pub fn all() -> Self { Role::iter().collect() }

    pub fn insert(&mut self, role: Role) { self.members[role] = true; }
    pub fn contains(&self, role: Role) -> bool { self.members[role] }
    pub fn len(&self) -> usize { self.iter().count() }
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.members.iter().filter_map(|(role, &member)| member.then_some(role))
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut set = RoleSet::new();
        for role in iter {
            set.insert(role);
        }
        set
    }
}

impl fmt::Debug for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
