use itertools::Itertools;

use crate::player::Player;
use crate::preference::{Preferences, RolePreference, preference_of};


// The rating used for splitting the roster into upper and lower halves. Role assignment itself
// never looks at it.
//
// With a non-empty preference this is the mean of the player's ratings over the preferred roles,
// ignoring roles the player has no rating for. Falls back to the flat rating otherwise.
pub fn effective_rating(player: &Player, preference: &RolePreference) -> f64 {
    let ratings =
        preference.roles().iter().filter_map(|&role| player.mmr_by_role[role]).collect_vec();
    if ratings.is_empty() {
        player.mmr
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RatedPlayer<'a> {
    pub player: &'a Player,
    pub effective_rating: f64,
}

// Sorted by effective rating, highest first. Ties keep input order.
pub fn rank_players<'a>(players: &'a [Player], preferences: &Preferences) -> Vec<RatedPlayer<'a>> {
    players
        .iter()
        .map(|player| {
            let preference = preference_of(preferences, &player.username);
            RatedPlayer { player, effective_rating: effective_rating(player, preference) }
        })
        .sorted_by(|a, b| b.effective_rating.total_cmp(&a.effective_rating))
        .collect()
}
