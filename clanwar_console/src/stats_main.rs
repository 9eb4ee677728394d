use std::fs;

use anyhow::Context;
use clanwar::MatchReport;
use itertools::Itertools;
use log::warn;

use crate::game_stats::{HistoryEntry, process_history, seasons};


pub struct StatsConfig {
    pub history_file: String,
    // Limits duo and head-to-head tables to pairs involving this player.
    pub player: Option<String>,
    // Only count games of this season. All games otherwise.
    pub season: Option<String>,
}

// "# season 3" starts season "3". Other comments are ignored.
fn season_marker(comment: &str) -> Option<&str> {
    let rest = comment.strip_prefix('#')?.trim_start();
    let season = rest.strip_prefix("season")?.trim();
    (!season.is_empty() && !season.contains(char::is_whitespace)).then_some(season)
}

// One "!결과등록 ..." line per match. Blank lines and lines starting with '#' are skipped, except
// season markers, which apply to all games below them.
pub fn read_history(content: &str) -> Vec<HistoryEntry> {
    let mut season = None;
    let mut history = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            if let Some(marker) = season_marker(line) {
                season = Some(marker.to_owned());
            }
            continue;
        }
        match MatchReport::parse(line) {
            Ok(report) => history.push(HistoryEntry { season: season.clone(), report }),
            Err(err) => warn!("Skipping line {}: {err}", index + 1),
        }
    }
    history
}

pub fn run(config: StatsConfig) -> anyhow::Result<()> {
    let content = fs::read_to_string(&config.history_file)
        .with_context(|| format!("Failed to read '{}'.", config.history_file))?;
    let history = read_history(&content);
    let known_seasons = seasons(&history);
    if let Some(season) = &config.season {
        if !known_seasons.contains(&season.as_str()) {
            warn!("No games in season {season}");
        }
    }
    let stats = process_history(&history, config.season.as_deref());
    let involves = |names: &[&String]| match &config.player {
        None => true,
        Some(player) => names.iter().any(|name| *name == player),
    };

    if !known_seasons.is_empty() {
        println!("Seasons: {}", known_seasons.join(", "));
    }
    println!("Season: {}", config.season.as_deref().unwrap_or("all"));
    println!("Games: {}", stats.game_count);
    println!();
    println!(
        "{:<16} {:>4} {:>4} {:>4} {:>6} {:>7} {:>5} {:>7}",
        "player", "W", "L", "D", "win%", "streak", "best", "rating"
    );
    let players = stats
        .per_player
        .iter()
        .sorted_by(|(_, a), (_, b)| b.rating.rating.total_cmp(&a.rating.rating));
    for (name, player) in players {
        let r = player.record;
        println!(
            "{:<16} {:>4} {:>4} {:>4} {:>6.1} {:>7} {:>5} {:>7.2}",
            name,
            r.wins,
            r.losses,
            r.draws,
            r.win_rate() * 100.0,
            player.current_streak,
            player.best_win_streak,
            player.rating.rating
        );
    }

    println!();
    println!("{:<33} {:>4} {:>4} {:>4} {:>6}", "duo", "W", "L", "D", "win%");
    let duos = stats
        .per_duo
        .iter()
        .filter(|([a, b], _)| involves(&[a, b]))
        .sorted_by(|(_, x), (_, y)| {
            y.win_rate().total_cmp(&x.win_rate()).then(y.games().cmp(&x.games()))
        });
    for ([a, b], r) in duos {
        let duo = format!("{a} + {b}");
        println!(
            "{:<33} {:>4} {:>4} {:>4} {:>6.1}",
            duo,
            r.wins,
            r.losses,
            r.draws,
            r.win_rate() * 100.0
        );
    }

    println!();
    println!("{:<33} {:>4} {:>4} {:>4}", "head-to-head", "W", "L", "D");
    let matchups = stats
        .head_to_head
        .iter()
        .filter(|((a, _), _)| involves(&[a]))
        .sorted_by(|(x, _), (y, _)| x.cmp(y));
    for ((a, b), r) in matchups {
        let matchup = format!("{a} vs {b}");
        println!("{:<33} {:>4} {:>4} {:>4}", matchup, r.wins, r.losses, r.draws);
    }
    Ok(())
}
