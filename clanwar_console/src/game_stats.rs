// Improvement potential: process stats incrementally instead of replaying the whole history.

use std::collections::{HashMap, HashSet};

use clanwar::{MatchReport, Team};
use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use log::error;
use skillratings::Outcomes;
use skillratings::weng_lin::{WengLinConfig, WengLinRating, weng_lin_two_teams};
use strum::IntoEnumIterator;


#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawStats {
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl RawStats {
    pub fn record(&mut self, outcome: Outcomes) {
        match outcome {
            Outcomes::WIN => self.wins += 1,
            Outcomes::LOSS => self.losses += 1,
            Outcomes::DRAW => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize { self.wins + self.losses + self.draws }

    // Share of games won. Draws count as games played. 0 if no games were played.
    pub fn win_rate(&self) -> f64 {
        let games = self.games();
        if games == 0 { 0.0 } else { self.wins as f64 / games as f64 }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PlayerStats {
    pub record: RawStats,
    // Positive: wins in a row, negative: losses in a row. A draw resets it.
    pub current_streak: i32,
    pub best_win_streak: u32,
    pub rating: WengLinRating,
}

impl Default for PlayerStats {
    fn default() -> Self {
        PlayerStats {
            record: RawStats::default(),
            current_streak: 0,
            best_win_streak: 0,
            rating: WengLinRating::new(),
        }
    }
}

impl PlayerStats {
    fn update(&mut self, outcome: Outcomes, new_rating: WengLinRating) {
        self.record.record(outcome);
        self.current_streak = match outcome {
            Outcomes::WIN => self.current_streak.max(0) + 1,
            Outcomes::LOSS => self.current_streak.min(0) - 1,
            Outcomes::DRAW => 0,
        };
        if self.current_streak > 0 {
            self.best_win_streak = self.best_win_streak.max(self.current_streak as u32);
        }
        self.rating = new_rating;
    }
}

#[derive(Default)]
pub struct GroupStats {
    pub per_player: HashMap<String, PlayerStats>,
    // Teammates, sorted by name.
    pub per_duo: HashMap<[String; 2], RawStats>,
    // Opponents. Stats are from the point of view of the first player.
    pub head_to_head: HashMap<(String, String), RawStats>,
    pub game_count: usize,
}

fn team_outcome(report: &MatchReport, team: Team) -> Outcomes {
    match report.winner() {
        None => Outcomes::DRAW,
        Some(winner) if winner == team => Outcomes::WIN,
        Some(_) => Outcomes::LOSS,
    }
}

fn duo_key(a: &str, b: &str) -> [String; 2] {
    if a < b { [a.to_owned(), b.to_owned()] } else { [b.to_owned(), a.to_owned()] }
}

impl GroupStats {
    pub fn process_report(&mut self, report: &MatchReport) {
        let all_players = report.players.values().flatten().collect_vec();
        if all_players.iter().collect::<HashSet<_>>().len() != all_players.len() {
            error!("Ignoring report with a repeated player: {report}");
            return;
        }
        self.game_count += 1;

        let prior_ratings: EnumMap<Team, Vec<WengLinRating>> = enum_map! {
            team => report.players[team].iter().map(|p| self.player(p).rating).collect(),
        };
        let outcome_a = team_outcome(report, Team::A);
        let (ratings_a, ratings_b) = weng_lin_two_teams(
            &prior_ratings[Team::A],
            &prior_ratings[Team::B],
            &outcome_a,
            &WengLinConfig::default(),
        );
        let new_ratings = EnumMap::from_array([ratings_a, ratings_b]);

        for team in Team::iter() {
            let outcome = team_outcome(report, team);
            let players = &report.players[team];
            for (player, &rating) in players.iter().zip(&new_ratings[team]) {
                self.per_player.entry(player.clone()).or_default().update(outcome, rating);
            }
            for (a, b) in players.iter().tuple_combinations() {
                self.per_duo.entry(duo_key(a, b)).or_default().record(outcome);
            }
            for a in players {
                for b in &report.players[team.opponent()] {
                    self.head_to_head.entry((a.clone(), b.clone())).or_default().record(outcome);
                }
            }
        }
    }

    fn player(&self, username: &str) -> PlayerStats {
        self.per_player.get(username).copied().unwrap_or_default()
    }
}

pub fn process_reports<'a>(reports: impl IntoIterator<Item = &'a MatchReport>) -> GroupStats {
    let mut stats = GroupStats::default();
    for report in reports {
        stats.process_report(report);
    }
    stats
}

// A report together with the season it was played in. Games before the first season marker
// have no season.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub season: Option<String>,
    pub report: MatchReport,
}

// Seasons in order of first appearance.
pub fn seasons(history: &[HistoryEntry]) -> Vec<&str> {
    history.iter().filter_map(|entry| entry.season.as_deref()).unique().collect()
}

// Stats over one season, or over the whole history if `season` is `None`. Ratings are replayed
// from scratch for a single season.
pub fn process_history(history: &[HistoryEntry], season: Option<&str>) -> GroupStats {
    process_reports(
        history
            .iter()
            .filter(|entry| season.is_none() || entry.season.as_deref() == season)
            .map(|entry| &entry.report),
    )
}
