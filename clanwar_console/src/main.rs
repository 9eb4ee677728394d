// Legend for various fix-this comments:
//   * "TODO" - bug or missing crucial feature.
//   * "Improvement potential" - missing nice-to-have feature or an opportunity
//       to make code better or faster.

#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod check_roster;
mod game_stats;
mod mix_config;
mod mix_main;
mod stats_main;

use clap::{Command, arg};


fn main() -> anyhow::Result<()> {
    env_logger::Builder::new()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config_arg = arg!(<config_file> "Configuration file: yaml-serialized MixConfig.");
    let matches = Command::new("Clanwar")
        .version(clap::crate_version!())
        .about("Team generator and match statistics for clan wars")
        .subcommand_required(true)
        .subcommand(
            Command::new("mix")
                .about("Split eight players into two teams and assign roles")
                .arg(config_arg.clone())
                .arg(arg!(
                    --"previous" <split_file> "Split of the previous game (json). Runs a rematch."
                ))
                .arg(arg!(--"save" <split_file> "Write the resulting split to this file (json)."))
                .arg(
                    arg!(--"seed" <seed> "Seed for the random generator")
                        .value_parser(clap::value_parser!(u64)),
                ),
        )
        .subcommand(
            Command::new("check-roster")
                .about("Verifies that a roster can be mixed.")
                .arg(config_arg),
        )
        .subcommand(
            Command::new("stats")
                .about("Player, duo and head-to-head statistics from registered results.")
                .arg(arg!(<history_file> "File with one \"!결과등록\" line per game"))
                .arg(arg!(--"player" <player> "Only show duos and match-ups of this player"))
                .arg(arg!(
                    --"season" <season> "Only count games below the \"# season <season>\" marker"
                )),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("mix", sub_matches)) => mix_main::run(mix_main::MixRunConfig {
            config_file: required_string(sub_matches, "config_file"),
            previous_file: sub_matches.get_one::<String>("previous").cloned(),
            save_file: sub_matches.get_one::<String>("save").cloned(),
            seed: sub_matches.get_one::<u64>("seed").copied(),
        }),
        Some(("check-roster", sub_matches)) => {
            check_roster::run(&required_string(sub_matches, "config_file"))
        }
        Some(("stats", sub_matches)) => stats_main::run(stats_main::StatsConfig {
            history_file: required_string(sub_matches, "history_file"),
            player: sub_matches.get_one::<String>("player").cloned(),
            season: sub_matches.get_one::<String>("season").cloned(),
        }),
        _ => unreachable!(),
    }
}

// Clap enforces presence of positional arguments.
fn required_string(matches: &clap::ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}
