use std::fs;

use anyhow::Context;
use clanwar::{
    MixMode, PreviousTeams, Team, TeamSplit, format_mix_result, generate_teams,
    validate_previous_teams, validate_roster,
};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;

use crate::mix_config::MixConfig;


pub struct MixRunConfig {
    pub config_file: String,
    // Saved split of the previous game. Turns the run into a rematch.
    pub previous_file: Option<String>,
    pub save_file: Option<String>,
    pub seed: Option<u64>,
}

pub fn run(config: MixRunConfig) -> anyhow::Result<()> {
    let mix_config = MixConfig::from_file(&config.config_file)?;
    let (players, preferences) = mix_config.resolve()?;
    validate_roster(&players, &preferences)?;

    let previous: Option<PreviousTeams> = match &config.previous_file {
        None => None,
        Some(path) => {
            let previous = read_split(path)?.membership();
            validate_previous_teams(&players, &previous)
                .with_context(|| format!("Cannot rematch using '{path}'."))?;
            Some(previous)
        }
    };
    let mode = match &previous {
        None => MixMode::Fresh,
        Some(previous) => MixMode::Rematch(previous),
    };

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let split = generate_teams(&players, &preferences, mode, &mix_config.options, &mut rng)?;

    for team in Team::iter() {
        println!("[{}]", team.label());
        for (role, username) in split.lineup(team).assignments() {
            println!("  {role} {username}");
        }
    }
    println!();
    println!("{}", format_mix_result(&split));

    if let Some(path) = &config.save_file {
        let json = serde_json::to_string_pretty(&split)?;
        fs::write(path, json).with_context(|| format!("Failed to write '{path}'."))?;
        info!("Saved the split to {path}");
    }
    Ok(())
}

fn read_split(path: &str) -> anyhow::Result<TeamSplit> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'."))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse '{path}'."))
}
