// Adapters between upstream roster data and the team generator, plus the precondition checks
// the generator relies on.

use std::collections::HashSet;
use std::fmt;

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::partition::ROSTER_SIZE;
use crate::player::{Player, PreviousTeams};
use crate::preference::{MAX_PREFERRED_ROLES, Preferences, RolePreference};
use crate::role::{Role, UnknownRole, parse_role_list};


// Every role must be playable by this many players: one per team.
const MIN_PLAYERS_PER_ROLE: usize = 2;
const MAX_PINS_PER_ROLE: usize = 2;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum RosterError {
    UnknownRole { username: String, role: String },
    TooManyPreferredRoles { username: String, count: usize },
    WrongPlayerCount(usize),
    DuplicatePlayer(String),
    MissingRoleCoverage(Vec<Role>),
    OverPinnedRole { role: Role, usernames: Vec<String> },
    // The previous split was made for a different set of players.
    PreviousTeamsMismatch { missing: Vec<String>, unknown: Vec<String> },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::UnknownRole { username, role } => {
                write!(f, "{username}: unknown role \"{role}\"")
            }
            RosterError::TooManyPreferredRoles { username, count } => write!(
                f,
                "{username}: at most {MAX_PREFERRED_ROLES} roles can be preferred, got {count}"
            ),
            RosterError::WrongPlayerCount(n) => {
                write!(f, "Expected {ROSTER_SIZE} players, got {n}")
            }
            RosterError::DuplicatePlayer(username) => write!(f, "{username} is listed twice"),
            RosterError::MissingRoleCoverage(roles) => {
                write!(f, "Not enough players for roles: {}", roles.iter().join(", "))
            }
            RosterError::OverPinnedRole { role, usernames } => write!(
                f,
                "{role} is pinned by {} players, at most {MAX_PINS_PER_ROLE} allowed",
                usernames.join(", ")
            ),
            RosterError::PreviousTeamsMismatch { missing, unknown } => {
                write!(f, "Previous teams do not match the roster")?;
                if !missing.is_empty() {
                    write!(f, "; not in previous teams: {}", missing.join(", "))?;
                }
                if !unknown.is_empty() {
                    write!(f, "; not in roster: {}", unknown.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RosterError {}


// Player record as served by the stats backend.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub username: String,
    pub mmr: f64,
    #[serde(default)]
    pub mmr_d: Option<f64>,
    #[serde(default)]
    pub mmr_a: Option<f64>,
    #[serde(default)]
    pub mmr_n: Option<f64>,
    #[serde(default)]
    pub mmr_s: Option<f64>,
    // Comma-joined eligible roles, e.g. "드, 넥".
    #[serde(default)]
    pub class: String,
}

impl PlayerRecord {
    pub fn into_player(self) -> Result<Player, RosterError> {
        let eligible_roles = parse_role_list(&self.class).map_err(|UnknownRole(role)| {
            RosterError::UnknownRole { username: self.username.clone(), role }
        })?;
        let mmr_by_role: EnumMap<Role, Option<f64>> = enum_map! {
            Role::Druid => self.mmr_d,
            Role::Oracle => self.mmr_a,
            Role::Necro => self.mmr_n,
            Role::Summoner => self.mmr_s,
        };
        Ok(Player {
            username: self.username,
            mmr: self.mmr,
            mmr_by_role,
            eligible_roles: eligible_roles.into_iter().collect(),
        })
    }
}


#[derive(Clone, PartialEq, Eq, Debug)]
pub struct RosterEntry {
    pub username: String,
    pub preference: RolePreference,
}

lazy_static! {
    static ref ROSTER_ENTRY_RE: Regex = Regex::new(r"([^\s,/()]+)(?:\(([^)]+)\))?").unwrap();
    static ref PARENTHESIZED_RE: Regex = Regex::new(r"\([^)]*\)").unwrap();
}

// Parses a roster line such as "참치(어,드), 김치, 라면(슴)".
pub fn parse_roster_input(input: &str) -> Result<Vec<RosterEntry>, RosterError> {
    ROSTER_ENTRY_RE
        .captures_iter(input)
        .map(|caps| -> Result<RosterEntry, RosterError> {
            let username = caps[1].trim().to_owned();
            let roles = match caps.get(2) {
                Some(roles) => parse_role_list(roles.as_str()).map_err(|UnknownRole(role)| {
                    RosterError::UnknownRole { username: username.clone(), role }
                })?,
                None => Vec::new(),
            };
            let count = roles.len();
            let preference = RolePreference::from_roles(roles).ok_or_else(|| {
                RosterError::TooManyPreferredRoles { username: username.clone(), count }
            })?;
            Ok(RosterEntry { username, preference })
        })
        .collect()
}

pub fn entries_to_preferences(entries: &[RosterEntry]) -> Preferences {
    entries
        .iter()
        .filter(|entry| entry.preference != RolePreference::Any)
        .map(|entry| (entry.username.clone(), entry.preference.clone()))
        .collect()
}

// Number of usernames in a roster line. Role lists in parentheses are ignored.
pub fn count_players(input: &str) -> usize {
    PARENTHESIZED_RE
        .replace_all(input, "")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .count()
}

// Checks everything `generate_teams` takes for granted, plus conditions under which every split
// would fail anyway.
pub fn validate_roster(players: &[Player], preferences: &Preferences) -> Result<(), RosterError> {
    if players.len() != ROSTER_SIZE {
        return Err(RosterError::WrongPlayerCount(players.len()));
    }

    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player.username.as_str()) {
            return Err(RosterError::DuplicatePlayer(player.username.clone()));
        }
    }

    let thin_roles = Role::iter()
        .filter(|&role| players.iter().filter(|p| p.can_play(role)).count() < MIN_PLAYERS_PER_ROLE)
        .collect_vec();
    if !thin_roles.is_empty() {
        return Err(RosterError::MissingRoleCoverage(thin_roles));
    }

    for role in Role::iter() {
        let usernames = players
            .iter()
            .filter(|p| preferences.get(&p.username).and_then(RolePreference::pinned) == Some(role))
            .map(|p| p.username.clone())
            .collect_vec();
        if usernames.len() > MAX_PINS_PER_ROLE {
            return Err(RosterError::OverPinnedRole { role, usernames });
        }
    }
    Ok(())
}

// A rematch is only meaningful when the previous split covers exactly the current players.
pub fn validate_previous_teams(
    players: &[Player], previous: &PreviousTeams,
) -> Result<(), RosterError> {
    let missing = players
        .iter()
        .filter(|p| !previous.contains_key(&p.username))
        .map(|p| p.username.clone())
        .collect_vec();
    let unknown = previous
        .keys()
        .filter(|name| !players.iter().any(|p| &p.username == *name))
        .cloned()
        .sorted()
        .collect_vec();
    if missing.is_empty() && unknown.is_empty() {
        Ok(())
    } else {
        Err(RosterError::PreviousTeamsMismatch { missing, unknown })
    }
}
