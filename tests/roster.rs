use clanwar::roster::{count_players, entries_to_preferences, parse_roster_input};
use clanwar::test_util::{deterministic_rng, sample_player, sample_players};
use clanwar::{
    MixOptions, Preferences, Role, RolePreference, RosterError, Team, partition_and_assign,
    validate_previous_teams, validate_roster,
};


#[test]
fn sample_roster_is_valid() {
    assert_eq!(validate_roster(&sample_players(), &Preferences::new()), Ok(()));
}

#[test]
fn wrong_player_count() {
    let mut players = sample_players();
    players.pop();
    assert_eq!(
        validate_roster(&players, &Preferences::new()),
        Err(RosterError::WrongPlayerCount(7))
    );
}

#[test]
fn duplicate_player() {
    let mut players = sample_players();
    players[5].username = "p2".to_owned();
    assert_eq!(
        validate_roster(&players, &Preferences::new()),
        Err(RosterError::DuplicatePlayer("p2".to_owned()))
    );
}

#[test]
fn every_role_needs_two_players() {
    use Role::*;
    let mut players = sample_players();
    for player in &mut players[1..] {
        player.eligible_roles = [Druid, Oracle].into_iter().collect();
    }
    assert_eq!(
        validate_roster(&players, &Preferences::new()),
        Err(RosterError::MissingRoleCoverage(vec![Necro, Summoner]))
    );
    players[1] = sample_player("p2", 95.0, &[Necro, Summoner]);
    assert_eq!(validate_roster(&players, &Preferences::new()), Ok(()));
}

#[test]
fn at_most_two_pins_per_role() {
    let entries = parse_roster_input("p1(슴), p2, p3(슴), p4, p5(슴), p6, p7, p8").unwrap();
    assert_eq!(count_players("p1(슴), p2, p3(슴), p4, p5(슴), p6, p7, p8"), 8);
    let preferences = entries_to_preferences(&entries);
    assert_eq!(
        validate_roster(&sample_players(), &preferences),
        Err(RosterError::OverPinnedRole {
            role: Role::Summoner,
            usernames: vec!["p1".to_owned(), "p3".to_owned(), "p5".to_owned()],
        })
    );

    let mut preferences = preferences;
    preferences.insert("p5".to_owned(), RolePreference::Preferred(vec![Role::Summoner, Role::Druid]));
    assert_eq!(validate_roster(&sample_players(), &preferences), Ok(()));
}

#[test]
fn error_messages() {
    assert_eq!(RosterError::WrongPlayerCount(7).to_string(), "Expected 8 players, got 7");
    assert_eq!(
        RosterError::MissingRoleCoverage(vec![Role::Necro, Role::Summoner]).to_string(),
        "Not enough players for roles: 넥, 슴"
    );
}

#[test]
fn previous_teams_must_cover_the_roster() {
    let players = sample_players();
    let split = partition_and_assign(
        &players,
        &Preferences::new(),
        &MixOptions::default(),
        &mut deterministic_rng(),
    )
    .unwrap();
    let mut previous = split.membership();
    assert_eq!(validate_previous_teams(&players, &previous), Ok(()));

    // One player of the earlier game was replaced by "p9" since.
    let team = previous.remove("p3").unwrap();
    previous.insert("p9".to_owned(), team);
    assert_eq!(
        validate_previous_teams(&players, &previous),
        Err(RosterError::PreviousTeamsMismatch {
            missing: vec!["p3".to_owned()],
            unknown: vec!["p9".to_owned()],
        })
    );
    assert_eq!(
        validate_previous_teams(&players, &previous).unwrap_err().to_string(),
        "Previous teams do not match the roster; not in previous teams: p3; not in roster: p9"
    );

    previous.remove("p9");
    previous.insert("p3".to_owned(), Team::A);
    previous.insert("p9".to_owned(), Team::B);
    assert_eq!(
        validate_previous_teams(&players, &previous),
        Err(RosterError::PreviousTeamsMismatch { missing: vec![], unknown: vec!["p9".to_owned()] })
    );
}
