use std::fmt;

use enum_map::EnumMap;
use itertools::Itertools;
use log::{debug, info, warn};
use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use crate::assign::{Lineup, RoleOrder, TEAM_SIZE, assign_roles};
use crate::player::{Player, PreviousTeams, Team};
use crate::preference::Preferences;
use crate::rating::rank_players;


pub const ROSTER_SIZE: usize = TEAM_SIZE * 2;

// Each team takes this many players from the upper half of the ranking and the same number
// from the lower half.
const PICKS_PER_HALF: usize = TEAM_SIZE / 2;

// In a rematch each new team keeps exactly this many players from its predecessor.
pub const REMATCH_OVERLAP: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct MixOptions {
    pub max_attempts: usize,
    pub rematch_max_attempts: usize,
    pub role_order: RoleOrder,
}

impl Default for MixOptions {
    fn default() -> Self {
        MixOptions {
            max_attempts: 10,
            rematch_max_attempts: 20,
            role_order: RoleOrder::Shuffled,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum MixMode<'a> {
    Fresh,
    // Reshuffle after an earlier split, keeping half of every team.
    Rematch(&'a PreviousTeams),
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct TeamSplit {
    pub lineups: EnumMap<Team, Lineup>,
}

impl TeamSplit {
    pub fn lineup(&self, team: Team) -> &Lineup { &self.lineups[team] }

    pub fn team_of(&self, username: &str) -> Option<Team> {
        self.lineups.iter().find(|(_, lineup)| lineup.contains(username)).map(|(team, _)| team)
    }

    // Input for a later `MixMode::Rematch`.
    pub fn membership(&self) -> PreviousTeams {
        self.lineups
            .iter()
            .flat_map(|(team, lineup)| lineup.usernames().map(move |name| (name.to_owned(), team)))
            .collect()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MixError {
    NoValidAssignment { attempts: usize },
    RematchExhausted { attempts: usize },
}

impl fmt::Display for MixError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixError::NoValidAssignment { attempts } => write!(
                f,
                "No valid role assignment found after {attempts} attempts. \
                Please check the players' roles."
            ),
            MixError::RematchExhausted { attempts } => write!(
                f,
                "Could not reshuffle the previous teams after {attempts} attempts. \
                Please try the rematch again."
            ),
        }
    }
}

impl std::error::Error for MixError {}

// Splits eight players into two role-complete teams.
//
// Players are ranked by effective rating and cut into an upper and a lower half. Every attempt
// draws two players from each half for team A; the other four form team B. The first attempt
// where both teams get a full role assignment is returned. Rematch mode additionally discards
// splits where either team does not keep exactly `REMATCH_OVERLAP` players of its predecessor.
//
// Team A is handed to role assignment in draw order, so rating does not decide who wins a
// contested preferred role. Team B keeps ranking order.
pub fn generate_teams<R: Rng + ?Sized>(
    players: &[Player], preferences: &Preferences, mode: MixMode, options: &MixOptions,
    rng: &mut R,
) -> Result<TeamSplit, MixError> {
    assert_eq!(players.len(), ROSTER_SIZE);
    let ranked = rank_players(players, preferences);
    debug!(
        "Ranking: {}",
        ranked.iter().map(|r| format!("{}={:.1}", r.player.username, r.effective_rating)).join(", ")
    );
    let half = ranked.len() / 2;

    let max_attempts = match mode {
        MixMode::Fresh => options.max_attempts,
        MixMode::Rematch(_) => options.rematch_max_attempts,
    };
    for attempt in 1..=max_attempts {
        let upper = index::sample(rng, half, PICKS_PER_HALF);
        let lower = index::sample(rng, ranked.len() - half, PICKS_PER_HALF);
        let picks = upper.into_iter().chain(lower.into_iter().map(|i| half + i)).collect_vec();
        let team_a = picks.iter().map(|&i| ranked[i].player).collect_vec();
        let team_b = (0..ranked.len())
            .filter(|i| !picks.contains(i))
            .map(|i| ranked[i].player)
            .collect_vec();

        if let MixMode::Rematch(previous) = mode {
            let kept: EnumMap<Team, usize> = EnumMap::from_array([
                kept_players(&team_a, previous, Team::A),
                kept_players(&team_b, previous, Team::B),
            ]);
            if kept.values().any(|&n| n != REMATCH_OVERLAP) {
                debug!(
                    "Attempt {attempt}: teams keep {} and {} players, retrying",
                    kept[Team::A],
                    kept[Team::B]
                );
                continue;
            }
        }

        let lineup_a = assign_roles(&team_a, preferences, options.role_order, rng);
        let lineup_b = assign_roles(&team_b, preferences, options.role_order, rng);
        let (Some(lineup_a), Some(lineup_b)) = (lineup_a, lineup_b) else {
            debug!("Attempt {attempt}: role assignment failed, retrying");
            continue;
        };
        info!(
            "Teams found on attempt {attempt}: {} vs {}",
            lineup_a.usernames().join("/"),
            lineup_b.usernames().join("/")
        );
        return Ok(TeamSplit { lineups: EnumMap::from_array([lineup_a, lineup_b]) });
    }

    warn!("Gave up after {max_attempts} attempts");
    Err(match mode {
        MixMode::Fresh => MixError::NoValidAssignment { attempts: max_attempts },
        MixMode::Rematch(_) => MixError::RematchExhausted { attempts: max_attempts },
    })
}

fn kept_players(group: &[&Player], previous: &PreviousTeams, team: Team) -> usize {
    group.iter().filter(|p| previous.get(&p.username) == Some(&team)).count()
}

pub fn partition_and_assign<R: Rng + ?Sized>(
    players: &[Player], preferences: &Preferences, options: &MixOptions, rng: &mut R,
) -> Result<TeamSplit, MixError> {
    generate_teams(players, preferences, MixMode::Fresh, options, rng)
}

pub fn rematch<R: Rng + ?Sized>(
    players: &[Player], preferences: &Preferences, previous: &PreviousTeams,
    options: &MixOptions, rng: &mut R,
) -> Result<TeamSplit, MixError> {
    generate_teams(players, preferences, MixMode::Rematch(previous), options, rng)
}
