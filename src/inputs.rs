use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TeamInput {
    Averages {
        goals_for_avg: f64,
        goals_against_avg: f64,
    },
    Totals {
        games_played: u32,
        total_goals_for: u32,
        total_goals_against: u32,
    },
}

impl TeamInput {
    pub fn averages(goals_for_avg: f64, goals_against_avg: f64) -> Self {
        Self::Averages {
            goals_for_avg,
            goals_against_avg,
        }
    }

    pub fn totals(games_played: u32, total_goals_for: u32, total_goals_against: u32) -> Self {
        Self::Totals {
            games_played,
            total_goals_for,
            total_goals_against,
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            Self::Averages { .. } => InputKind::Averages,
            Self::Totals { .. } => InputKind::Totals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    Averages,
    Totals,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LeagueBaseline {
    Simple {
        avg_goals_per_game: f64,
    },
    /// Separate home/away scoring rates; what home sides concede is what away sides score.
    Detailed {
        home_avg_goals_for: f64,
        away_avg_goals_for: f64,
    },
}

impl LeagueBaseline {
    pub fn simple(avg_goals_per_game: f64) -> Self {
        Self::Simple { avg_goals_per_game }
    }

    pub fn detailed(home_avg_goals_for: f64, away_avg_goals_for: f64) -> Self {
        Self::Detailed {
            home_avg_goals_for,
            away_avg_goals_for,
        }
    }

    pub fn mode(&self) -> BaselineMode {
        match self {
            Self::Simple { .. } => BaselineMode::Simple,
            Self::Detailed { .. } => BaselineMode::Detailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineMode {
    Simple,
    Detailed,
}

/// Which league rate a team's goals-against average is divided by in detailed mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensePairing {
    #[default]
    OpponentScoring,
    OwnScoring,
}

impl DefensePairing {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "opponent" | "opponent_scoring" => Some(Self::OpponentScoring),
            "own" | "own_scoring" => Some(Self::OwnScoring),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamRate {
    pub goals_for_avg: f64,
    pub goals_against_avg: f64,
}

/// Ratios against the league baseline; 1.0 is league average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeamStrength {
    pub attack: f64,
    pub defense: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_input_json_is_tagged_by_kind() {
        let raw = r#"{"kind":"totals","games_played":19,"total_goals_for":36,"total_goals_against":11}"#;
        let input: TeamInput = serde_json::from_str(raw).unwrap();
        assert_eq!(input, TeamInput::totals(19, 36, 11));
        assert_eq!(input.kind(), InputKind::Totals);
    }

    #[test]
    fn league_json_is_tagged_by_mode() {
        let raw = r#"{"mode":"detailed","home_avg_goals_for":1.65,"away_avg_goals_for":1.1}"#;
        let league: LeagueBaseline = serde_json::from_str(raw).unwrap();
        assert_eq!(league.mode(), BaselineMode::Detailed);
    }

    #[test]
    fn pairing_parse_accepts_short_names() {
        assert_eq!(DefensePairing::parse(" Own "), Some(DefensePairing::OwnScoring));
        assert_eq!(
            DefensePairing::parse("opponent"),
            Some(DefensePairing::OpponentScoring)
        );
        assert_eq!(DefensePairing::parse("both"), None);
    }
}
