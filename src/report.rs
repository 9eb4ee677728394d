// Text forms used to share a split and to register a finished match in the community chat:
//
//   [아래]a/b/c/d vs [위]e/f/g/h
//   !결과등록 [아래3]a/b/c/d vs [위1]e/f/g/h
//
// Team A ("아래") is always written first.

use std::fmt;

use enum_map::{EnumMap, enum_map};
use itertools::Itertools;
use lazy_static::lazy_static;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::partition::TeamSplit;
use crate::player::Team;


pub const REGISTER_COMMAND: &str = "!결과등록";

pub fn format_mix_result(split: &TeamSplit) -> String {
    Team::iter()
        .map(|team| format!("[{}]{}", team.label(), split.lineup(team).usernames().join("/")))
        .join(" vs ")
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MatchReport {
    pub players: EnumMap<Team, Vec<String>>,
    pub scores: EnumMap<Team, u32>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ReportError {
    MissingCommand,
    InvalidFormat,
    UnexpectedTeam(String),
    EmptyTeam(Team),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::MissingCommand => write!(f, "report must start with {REGISTER_COMMAND}"),
            ReportError::InvalidFormat => write!(f, "expected \"[아래N]a/b/.. vs [위N]c/d/..\""),
            ReportError::UnexpectedTeam(label) => write!(f, "unexpected team label \"{label}\""),
            ReportError::EmptyTeam(team) => write!(f, "team {} has no players", team.label()),
        }
    }
}

impl std::error::Error for ReportError {}

lazy_static! {
    static ref SIDE_RE: Regex = Regex::new(r"^\[(\S+?)(\d+)\](\S*)$").unwrap();
}

impl MatchReport {
    pub fn from_split(split: &TeamSplit, scores: EnumMap<Team, u32>) -> Self {
        MatchReport {
            players: enum_map! {
                team => split.lineup(team).usernames().map(str::to_owned).collect(),
            },
            scores,
        }
    }

    // `None` is a draw.
    pub fn winner(&self) -> Option<Team> {
        let (a, b) = (self.scores[Team::A], self.scores[Team::B]);
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => Some(Team::A),
            std::cmp::Ordering::Less => Some(Team::B),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn parse(s: &str) -> Result<Self, ReportError> {
        let body = s.trim().strip_prefix(REGISTER_COMMAND).ok_or(ReportError::MissingCommand)?;
        let (first, second) = body
            .split(" vs ")
            .map(str::trim)
            .collect_tuple()
            .ok_or(ReportError::InvalidFormat)?;
        let mut players: EnumMap<Team, Vec<String>> = EnumMap::default();
        let mut scores: EnumMap<Team, u32> = EnumMap::default();
        for (expected_team, side) in [(Team::A, first), (Team::B, second)] {
            let caps = SIDE_RE.captures(side).ok_or(ReportError::InvalidFormat)?;
            let label = &caps[1];
            if label != expected_team.label() {
                return Err(ReportError::UnexpectedTeam(label.to_owned()));
            }
            scores[expected_team] = caps[2].parse().map_err(|_| ReportError::InvalidFormat)?;
            players[expected_team] = caps[3]
                .split('/')
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
            if players[expected_team].is_empty() {
                return Err(ReportError::EmptyTeam(expected_team));
            }
        }
        Ok(MatchReport { players, scores })
    }
}

impl fmt::Display for MatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides = Team::iter()
            .map(|team| {
                format!("[{}{}]{}", team.label(), self.scores[team], self.players[team].join("/"))
            })
            .join(" vs ");
        write!(f, "{REGISTER_COMMAND} {sides}")
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(s: &str) -> Vec<String> { s.split('/').map(str::to_owned).collect() }

    #[test]
    fn parse_register_line() {
        let report = MatchReport::parse("!결과등록 [아래3]참치/김치/라면/우동 vs [위1]a/b/c/d").unwrap();
        assert_eq!(report, MatchReport {
            players: enum_map! {
                Team::A => names("참치/김치/라면/우동"),
                Team::B => names("a/b/c/d"),
            },
            scores: enum_map! { Team::A => 3, Team::B => 1 },
        });
        assert_eq!(report.winner(), Some(Team::A));
        assert_eq!(report.to_string(), "!결과등록 [아래3]참치/김치/라면/우동 vs [위1]a/b/c/d");
    }

    #[test]
    fn split_to_text() {
        use crate::partition::{MixOptions, partition_and_assign};
        use crate::preference::Preferences;
        use crate::test_util::{deterministic_rng, sample_players};

        let split = partition_and_assign(
            &sample_players(),
            &Preferences::new(),
            &MixOptions::default(),
            &mut deterministic_rng(),
        )
        .unwrap();
        let a = split.lineup(Team::A).usernames().join("/");
        let b = split.lineup(Team::B).usernames().join("/");
        assert_eq!(format_mix_result(&split), format!("[아래]{a} vs [위]{b}"));

        let report = MatchReport::from_split(&split, enum_map! { Team::A => 1, Team::B => 3 });
        assert_eq!(report.to_string(), format!("!결과등록 [아래1]{a} vs [위3]{b}"));
        assert_eq!(MatchReport::parse(&report.to_string()), Ok(report.clone()));
        assert_eq!(report.winner(), Some(Team::B));
    }

    #[test]
    fn draw() {
        let report = MatchReport::parse("!결과등록 [아래2]a/b vs [위2]c/d").unwrap();
        assert_eq!(report.winner(), None);
    }

    #[test]
    fn malformed_reports() {
        assert_eq!(MatchReport::parse("[아래3]a vs [위1]b"), Err(ReportError::MissingCommand));
        assert_eq!(MatchReport::parse("!결과등록 [아래3]a"), Err(ReportError::InvalidFormat));
        assert_eq!(
            MatchReport::parse("!결과등록 [위3]a vs [아래1]b"),
            Err(ReportError::UnexpectedTeam("위".to_owned()))
        );
        assert_eq!(
            MatchReport::parse("!결과등록 [아래3]a vs [위1]"),
            Err(ReportError::EmptyTeam(Team::B))
        );
        assert_eq!(MatchReport::parse("!결과등록 [아래x]a vs [위1]b"), Err(ReportError::InvalidFormat));
    }
}
