// Rust-upgrade (https://github.com/rust-lang/rust/issues/46379):
//   remove `#[allow(dead_code)]` before public functions.

use std::collections::HashSet;

use clanwar::partition::ROSTER_SIZE;
use clanwar::{Player, Role, Team, TeamSplit};
use itertools::Itertools;
use strum::IntoEnumIterator;


// Checks the invariants every successful split must satisfy: each team has every role exactly
// once, nobody plays twice, and the two teams together are exactly the input roster.
#[allow(dead_code)]
pub fn assert_valid_split(split: &TeamSplit, players: &[Player]) {
    let mut seen = HashSet::new();
    for team in Team::iter() {
        let lineup = split.lineup(team);
        assert_eq!(
            lineup.assignments().map(|(role, _)| role).collect_vec(),
            Role::iter().collect_vec()
        );
        for (role, username) in lineup.assignments() {
            assert!(seen.insert(username.to_owned()), "{username} plays twice: {split:?}");
            let player = players.iter().find(|p| p.username == username).unwrap();
            assert!(player.can_play(role), "{username} cannot play {role}: {split:?}");
        }
    }
    assert_eq!(seen.len(), ROSTER_SIZE);
    let expected: HashSet<String> = players.iter().map(|p| p.username.clone()).collect();
    assert_eq!(seen, expected);
}

#[allow(dead_code)]
pub fn usernames(split: &TeamSplit, team: Team) -> HashSet<String> {
    split.lineup(team).usernames().map(str::to_owned).collect()
}

#[allow(dead_code)]
pub fn names(names: &[&str]) -> HashSet<String> {
    names.iter().map(|&name| name.to_owned()).collect()
}
