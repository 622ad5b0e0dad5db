use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::error::{Result, invalid};
use crate::inputs::{LeagueBaseline, TeamInput, TeamRate, TeamStrength};
use crate::markets::{
    self, MarketResult, MatchOutcome, ScorelineProbability, normalize_thresholds, validate_margin,
};
use crate::poisson::{self, ExpectedGoals, MAX_GOALS_CAP, ScorelineMatrix};
use crate::strength;

const TOP_SCORELINES: usize = 5;

/// One fixture as the presentation layer hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub home: TeamInput,
    pub away: TeamInput,
    pub league: LeagueBaseline,
}

impl MatchRequest {
    pub fn calculate(&self, cfg: &CalcConfig) -> Result<Calculation> {
        calculate(&self.home, &self.away, &self.league, cfg)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Calculation {
    pub home_rate: TeamRate,
    pub away_rate: TeamRate,
    pub home_strength: TeamStrength,
    pub away_strength: TeamStrength,
    pub expected: ExpectedGoals,
    pub matrix: ScorelineMatrix,
    pub markets: Vec<MarketResult>,
    pub outcome: MatchOutcome,
    pub top_scorelines: Vec<ScorelineProbability>,
}

/// Headline numbers, as shown above the market table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub home_expected_goals: f64,
    pub away_expected_goals: f64,
    pub total_expected_goals: f64,
    pub home_attack: f64,
    pub home_defense: f64,
    pub away_attack: f64,
    pub away_defense: f64,
}

impl Calculation {
    pub fn summary(&self) -> Summary {
        Summary {
            home_expected_goals: self.expected.home,
            away_expected_goals: self.expected.away,
            total_expected_goals: self.expected.total(),
            home_attack: self.home_strength.attack,
            home_defense: self.home_strength.defense,
            away_attack: self.away_strength.attack,
            away_defense: self.away_strength.defense,
        }
    }

    pub fn market(&self, threshold: f64) -> Option<&MarketResult> {
        self.markets.iter().find(|m| m.threshold == threshold)
    }
}

fn validate_config(cfg: &CalcConfig) -> Result<()> {
    validate_margin(cfg.margin)?;
    normalize_thresholds(&cfg.thresholds)?;
    if cfg.max_goals > MAX_GOALS_CAP {
        return Err(invalid(format!(
            "max goals must be at most {MAX_GOALS_CAP}, got {}",
            cfg.max_goals
        )));
    }
    Ok(())
}

/// Inputs -> strengths -> expected goals -> scoreline matrix -> markets.
/// Every check runs before the matrix is built; failures return no partial result.
pub fn calculate(
    home: &TeamInput,
    away: &TeamInput,
    league: &LeagueBaseline,
    cfg: &CalcConfig,
) -> Result<Calculation> {
    validate_config(cfg)?;

    let resolved = strength::resolve(home, away, league, cfg.defense_pairing)?;
    let expected = poisson::compute_expected_goals(
        &resolved.home_strength,
        &resolved.away_strength,
        league,
        cfg.defense_pairing,
    )?;

    let matrix = poisson::build_scoreline_matrix(expected.home, expected.away, cfg.max_goals)?;
    let markets = markets::compute_markets(&matrix, &cfg.thresholds, cfg.margin)?;
    let outcome = markets::outcome_probabilities(&matrix);
    let top_scorelines = markets::most_likely_scorelines(&matrix, TOP_SCORELINES);

    Ok(Calculation {
        home_rate: resolved.home_rate,
        away_rate: resolved.away_rate,
        home_strength: resolved.home_strength,
        away_strength: resolved.away_strength,
        expected,
        matrix,
        markets,
        outcome,
        top_scorelines,
    })
}
