#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

pub mod assign;
pub mod partition;
pub mod player;
pub mod preference;
pub mod rating;
pub mod report;
pub mod role;
pub mod roster;
pub mod test_util;

pub use assign::{Lineup, RoleOrder, TEAM_SIZE, assign_roles};
pub use partition::{
    MixError, MixMode, MixOptions, ROSTER_SIZE, TeamSplit, generate_teams, partition_and_assign,
    rematch,
};
pub use player::{Player, PreviousTeams, Team};
pub use preference::{Preferences, RolePreference};
pub use rating::effective_rating;
pub use report::{MatchReport, format_mix_result};
pub use role::{Role, RoleSet};
pub use roster::{PlayerRecord, RosterError, validate_previous_teams, validate_roster};
