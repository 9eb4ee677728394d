use enum_map::EnumMap;
use itertools::Itertools;
use log::{debug, warn};
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::player::Player;
use crate::preference::{Preferences, preference_of};
use crate::role::Role;


pub const TEAM_SIZE: usize = 4;

// Order in which roles are visited within each assignment pass. Does not affect whether an
// assignment is found, only which one is chosen when several are valid.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub enum RoleOrder {
    #[default]
    Shuffled,
    Canonical,
}

impl RoleOrder {
    fn roles<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Role> {
        let mut roles = Role::iter().collect_vec();
        match self {
            RoleOrder::Shuffled => roles.shuffle(rng),
            RoleOrder::Canonical => {}
        }
        roles
    }
}

// Exactly one player per role. Iteration follows the canonical role order.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Lineup {
    players: EnumMap<Role, String>,
}

impl Lineup {
    pub fn player(&self, role: Role) -> &str { &self.players[role] }

    pub fn assignments(&self) -> impl Iterator<Item = (Role, &str)> + '_ {
        self.players.iter().map(|(role, username)| (role, username.as_str()))
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> + '_ {
        self.players.values().map(String::as_str)
    }

    pub fn role_of(&self, username: &str) -> Option<Role> {
        self.assignments().find(|(_, name)| *name == username).map(|(role, _)| role)
    }

    pub fn contains(&self, username: &str) -> bool { self.role_of(username).is_some() }
}

// Assigns the four roles to a group of four players. Returns `None` when some role cannot be
// filled; this is an expected outcome and callers should retry with a different group.
//
// Passes, each visiting roles in `role_order`:
//   1. Hard pins. The first unassigned player pinned to the role gets it.
//   2. Soft preferences. The first unassigned player listing the role gets it.
//   3. Fallback. A random unassigned player eligible for the role gets it.
// Preferences are trusted to imply eligibility; only the fallback pass checks `eligible_roles`.
pub fn assign_roles<R: Rng + ?Sized>(
    group: &[&Player], preferences: &Preferences, role_order: RoleOrder, rng: &mut R,
) -> Option<Lineup> {
    assert_eq!(group.len(), TEAM_SIZE, "{:?}", group.iter().map(|p| &p.username).collect_vec());
    let order = role_order.roles(rng);
    let mut slots: EnumMap<Role, Option<usize>> = EnumMap::default();
    let mut used = [false; TEAM_SIZE];

    for &role in &order {
        let pinned = (0..TEAM_SIZE).find(|&i| {
            !used[i] && preference_of(preferences, &group[i].username).pinned() == Some(role)
        });
        if let Some(i) = pinned {
            debug!("Pinned {} -> {}", group[i].username, role);
            slots[role] = Some(i);
            used[i] = true;
        }
    }

    for &role in &order {
        if slots[role].is_some() {
            continue;
        }
        let preferred = (0..TEAM_SIZE)
            .find(|&i| !used[i] && preference_of(preferences, &group[i].username).includes(role));
        if let Some(i) = preferred {
            debug!("Preferred {} -> {}", group[i].username, role);
            slots[role] = Some(i);
            used[i] = true;
        }
    }

    for &role in &order {
        if slots[role].is_some() {
            continue;
        }
        let candidates =
            (0..TEAM_SIZE).filter(|&i| !used[i] && group[i].can_play(role)).collect_vec();
        let Some(&i) = candidates.choose(rng) else {
            warn!(
                "Nobody left to play {} in {:?}",
                role,
                group.iter().map(|p| &p.username).collect_vec()
            );
            return None;
        };
        debug!("Picked {} -> {} out of {} candidates", group[i].username, role, candidates.len());
        slots[role] = Some(i);
        used[i] = true;
    }

    let mut players: EnumMap<Role, String> = EnumMap::default();
    for (role, slot) in slots {
        players[role] = group[slot?].username.clone();
    }
    Some(Lineup { players })
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::preference::RolePreference;
    use crate::role::RoleSet;
    use crate::test_util::deterministic_rng;

    fn player(name: &str, roles: &[Role]) -> Player {
        Player::new(name, 1000.0, roles.iter().copied().collect())
    }

    fn lineup_roles(lineup: &Lineup) -> Vec<(Role, String)> {
        lineup.assignments().map(|(role, name)| (role, name.to_owned())).collect()
    }

    #[test]
    fn single_candidate_per_role() {
        use Role::*;
        let group = [
            player("a", &[Summoner]),
            player("b", &[Oracle]),
            player("c", &[Druid]),
            player("d", &[Necro]),
        ];
        let group = group.iter().collect_vec();
        let mut rng = deterministic_rng();
        for order in [RoleOrder::Canonical, RoleOrder::Shuffled] {
            let lineup = assign_roles(&group, &Preferences::new(), order, &mut rng).unwrap();
            assert_eq!(lineup_roles(&lineup), vec![
                (Druid, "c".to_owned()),
                (Oracle, "b".to_owned()),
                (Necro, "d".to_owned()),
                (Summoner, "a".to_owned()),
            ]);
        }
    }

    #[test]
    fn unfillable_role_fails() {
        use Role::*;
        let group = [
            player("a", &[Druid, Oracle, Necro]),
            player("b", &[Druid, Oracle, Necro]),
            player("c", &[Druid, Oracle, Necro]),
            player("d", &[Druid, Oracle, Necro]),
        ];
        let group = group.iter().collect_vec();
        let mut rng = deterministic_rng();
        for _ in 0..20 {
            let lineup = assign_roles(&group, &Preferences::new(), RoleOrder::Shuffled, &mut rng);
            assert!(lineup.is_none());
        }
    }

    #[test]
    fn pin_beats_fallback() {
        let group = [
            player("a", &[Role::Druid]),
            player("b", &Role::iter().collect_vec()),
            player("c", &Role::iter().collect_vec()),
            player("d", &Role::iter().collect_vec()),
        ];
        let group = group.iter().collect_vec();
        let mut preferences = Preferences::new();
        preferences.insert("a".to_owned(), RolePreference::Pinned(Role::Druid));
        let mut rng = deterministic_rng();
        for _ in 0..50 {
            let lineup =
                assign_roles(&group, &preferences, RoleOrder::Shuffled, &mut rng).unwrap();
            assert_eq!(lineup.player(Role::Druid), "a");
        }
    }

    #[test]
    fn duplicate_pin_first_in_group_wins() {
        let everything = Role::iter().collect_vec();
        let group = [
            player("a", &everything),
            player("b", &everything),
            player("c", &everything),
            player("d", &everything),
        ];
        let group = group.iter().collect_vec();
        let mut preferences = Preferences::new();
        preferences.insert("b".to_owned(), RolePreference::Pinned(Role::Necro));
        preferences.insert("c".to_owned(), RolePreference::Pinned(Role::Necro));
        let mut rng = deterministic_rng();
        let lineup = assign_roles(&group, &preferences, RoleOrder::Canonical, &mut rng).unwrap();
        assert_eq!(lineup.player(Role::Necro), "b");
        assert_ne!(lineup.role_of("c"), Some(Role::Necro));
    }

    #[test]
    fn soft_preferences_in_canonical_order() {
        use Role::*;
        let everything = Role::iter().collect_vec();
        let group = [
            player("a", &everything),
            player("b", &everything),
            player("c", &everything),
            player("d", &everything),
        ];
        let group = group.iter().collect_vec();
        let mut preferences = Preferences::new();
        preferences.insert("a".to_owned(), RolePreference::Preferred(vec![Oracle, Necro]));
        preferences.insert("b".to_owned(), RolePreference::Preferred(vec![Druid, Oracle]));
        preferences.insert("c".to_owned(), RolePreference::Pinned(Oracle));
        let mut rng = deterministic_rng();
        let lineup = assign_roles(&group, &preferences, RoleOrder::Canonical, &mut rng).unwrap();
        // Pin first, then Druid -> "b" (first listing it), Necro -> "a", leftover Summoner -> "d".
        assert_eq!(lineup_roles(&lineup), vec![
            (Druid, "b".to_owned()),
            (Oracle, "c".to_owned()),
            (Necro, "a".to_owned()),
            (Summoner, "d".to_owned()),
        ]);
    }

    #[test]
    fn preferred_role_is_not_reassigned_after_pin() {
        use Role::*;
        let group = [
            player("a", &[Druid]),
            player("b", &[Druid, Oracle]),
            player("c", &[Necro]),
            player("d", &[Summoner]),
        ];
        let group = group.iter().collect_vec();
        let mut preferences = Preferences::new();
        preferences.insert("a".to_owned(), RolePreference::Pinned(Druid));
        preferences.insert("b".to_owned(), RolePreference::Preferred(vec![Druid, Oracle]));
        let mut rng = deterministic_rng();
        for _ in 0..20 {
            let lineup =
                assign_roles(&group, &preferences, RoleOrder::Shuffled, &mut rng).unwrap();
            assert_eq!(lineup.player(Druid), "a");
            assert_eq!(lineup.player(Oracle), "b");
        }
    }

    #[test]
    fn every_role_filled_once() {
        let everything: RoleSet = RoleSet::all();
        let group = ["a", "b", "c", "d"].map(|name| Player::new(name, 0.0, everything));
        let group = group.iter().collect_vec();
        let mut rng = deterministic_rng();
        for _ in 0..50 {
            let lineup =
                assign_roles(&group, &Preferences::new(), RoleOrder::Shuffled, &mut rng).unwrap();
            assert_eq!(lineup.usernames().sorted().collect_vec(), vec!["a", "b", "c", "d"]);
        }
    }
}
