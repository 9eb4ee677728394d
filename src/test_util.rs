// Test utilities shared by unit tests and integration tests. Public so that `tests/` can use them.

use itertools::Itertools;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::player::Player;
use crate::role::{Role, RoleSet};


// Team generation is random by nature. Tests that check properties over many runs sweep seeds
// instead of relying on the thread RNG, so that failures are reproducible.
pub fn deterministic_rng() -> StdRng { StdRng::from_seed([0; 32]) }

pub fn seeded_rng(seed: u64) -> StdRng { StdRng::seed_from_u64(seed) }

// Eight players "p1".."p8" rated 100, 95, .., 65, everybody eligible for every role.
pub fn sample_players() -> Vec<Player> {
    (0..8)
        .map(|i| Player::new(format!("p{}", i + 1), 100.0 - 5.0 * i as f64, RoleSet::all()))
        .collect_vec()
}

pub fn sample_player(username: &str, mmr: f64, roles: &[Role]) -> Player {
    Player::new(username, mmr, roles.iter().copied().collect())
}
