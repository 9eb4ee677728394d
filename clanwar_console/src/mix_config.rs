use std::collections::HashMap;

use anyhow::{Context, anyhow, bail};
use clanwar::role::parse_role_list;
use clanwar::roster::{count_players, entries_to_preferences, parse_roster_input};
use clanwar::{MixOptions, Player, PlayerRecord, Preferences, RolePreference};
use serde::{Deserialize, Serialize};


// Input of `mix` and `check-roster`, yaml-serialized.
//
// `players` is the pool of known players, e.g. the leaderboard. When `roster` is given, it
// selects the participants from the pool and carries their role preferences
// ("참치(어,드), 김치, ..."). Otherwise the whole pool plays and `preferences` applies.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct MixConfig {
    pub players: Vec<PlayerRecord>,
    #[serde(default)]
    pub roster: Option<String>,
    // Username -> comma-joined roles.
    #[serde(default)]
    pub preferences: HashMap<String, String>,
    #[serde(default)]
    pub options: MixOptions,
}

impl MixConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'."))?;
        serde_yaml::from_str(&content).with_context(|| format!("Failed to parse '{path}'."))
    }

    pub fn resolve(&self) -> anyhow::Result<(Vec<Player>, Preferences)> {
        let mut preferences = Preferences::new();
        for (username, roles) in &self.preferences {
            let roles =
                parse_role_list(roles).with_context(|| format!("Preferences of {username}"))?;
            let preference = RolePreference::from_roles(roles)
                .ok_or_else(|| anyhow!("{username}: too many preferred roles"))?;
            preferences.insert(username.clone(), preference);
        }

        let records = match &self.roster {
            None => self.players.clone(),
            Some(roster) => {
                let entries = parse_roster_input(roster)?;
                // Names must be comma-separated; "a b, c" would otherwise count as two players
                // and play as three.
                let count = count_players(roster);
                if count != entries.len() {
                    bail!(
                        "Roster lists {count} comma-separated players but {} names: \"{roster}\"",
                        entries.len()
                    );
                }
                preferences.extend(entries_to_preferences(&entries));
                entries
                    .iter()
                    .map(|entry| {
                        self.players
                            .iter()
                            .find(|record| record.username == entry.username)
                            .cloned()
                            .ok_or_else(|| anyhow!("Unknown player: {}", entry.username))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?
            }
        };
        let players = records
            .into_iter()
            .map(PlayerRecord::into_player)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((players, preferences))
    }
}
