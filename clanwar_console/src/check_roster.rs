use clanwar::validate_roster;

use crate::mix_config::MixConfig;


pub fn run(config_file: &str) -> anyhow::Result<()> {
    let config = MixConfig::from_file(config_file)?;
    let (players, preferences) = config.resolve()?;
    match validate_roster(&players, &preferences) {
        Ok(()) => {
            println!("OK");
            Ok(())
        }
        Err(err) => {
            eprintln!("Invalid roster: {err}");
            Err(err.into())
        }
    }
}
