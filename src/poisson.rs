use serde::Serialize;
use tracing::debug;

use crate::error::{Result, ensure_non_negative, ensure_positive, invalid};
use crate::inputs::{DefensePairing, LeagueBaseline, TeamStrength};
use crate::strength::baselines_for;

pub const DEFAULT_MAX_GOALS: u32 = 10;
pub const MAX_GOALS_CAP: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

impl ExpectedGoals {
    pub fn total(&self) -> f64 {
        self.home + self.away
    }
}

/// Joint probabilities for `0..=max_goals` home x away goals, row-major by home goals.
/// Mass beyond the window is dropped, never renormalised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorelineMatrix {
    max_goals: u32,
    cells: Vec<f64>,
}

impl ScorelineMatrix {
    pub fn max_goals(&self) -> u32 {
        self.max_goals
    }

    fn side(&self) -> usize {
        self.max_goals as usize + 1
    }

    pub fn get(&self, home_goals: u32, away_goals: u32) -> Option<f64> {
        if home_goals > self.max_goals || away_goals > self.max_goals {
            return None;
        }
        let n = self.side();
        self.cells
            .get(home_goals as usize * n + away_goals as usize)
            .copied()
    }

    pub fn row(&self, home_goals: u32) -> Option<&[f64]> {
        if home_goals > self.max_goals {
            return None;
        }
        let n = self.side();
        let start = home_goals as usize * n;
        self.cells.get(start..start + n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        let n = self.side();
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, p)| ((idx / n) as u32, (idx % n) as u32, *p))
    }

    pub fn total_mass(&self) -> f64 {
        self.cells.iter().sum()
    }
}

pub(crate) fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let mut out = vec![0.0; max_k + 1];
    let lambda = lambda.max(0.0);
    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}

pub fn compute_expected_goals(
    home: &TeamStrength,
    away: &TeamStrength,
    league: &LeagueBaseline,
    pairing: DefensePairing,
) -> Result<ExpectedGoals> {
    let baselines = baselines_for(league, pairing)?;
    let home_xg = baselines.home.attack * home.attack * away.defense;
    let away_xg = baselines.away.attack * away.attack * home.defense;

    let expected = ExpectedGoals {
        home: ensure_positive(home_xg, "home expected goals")?,
        away: ensure_positive(away_xg, "away expected goals")?,
    };
    debug!(
        home = expected.home,
        away = expected.away,
        "computed expected goals"
    );
    Ok(expected)
}

// A zero rate is allowed here: that side scores nothing with certainty.
pub fn build_scoreline_matrix(
    home_expected: f64,
    away_expected: f64,
    max_goals: u32,
) -> Result<ScorelineMatrix> {
    let home_expected = ensure_non_negative(home_expected, "home expected goals")?;
    let away_expected = ensure_non_negative(away_expected, "away expected goals")?;
    if max_goals > MAX_GOALS_CAP {
        return Err(invalid(format!(
            "max goals must be at most {MAX_GOALS_CAP}, got {max_goals}"
        )));
    }

    let pmf_h = poisson_pmf(home_expected, max_goals);
    let pmf_a = poisson_pmf(away_expected, max_goals);

    let mut cells = Vec::with_capacity(pmf_h.len() * pmf_a.len());
    for p_i in &pmf_h {
        for p_j in &pmf_a {
            cells.push(p_i * p_j);
        }
    }

    Ok(ScorelineMatrix { max_goals, cells })
}
