use serde::Serialize;
use tracing::debug;

use crate::error::{Result, invalid};
use crate::poisson::ScorelineMatrix;

pub const DEFAULT_THRESHOLDS: [f64; 4] = [0.5, 1.5, 2.5, 3.5];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarketResult {
    pub threshold: f64,
    pub probability_over: f64,
    pub probability_under: f64,
    /// `None` when the side has zero probability and so no finite price.
    pub odds_over: Option<f64>,
    pub odds_under: Option<f64>,
    pub fair_odds_over: Option<f64>,
    pub fair_odds_under: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScorelineProbability {
    pub home_goals: u32,
    pub away_goals: u32,
    pub probability: f64,
}

pub fn validate_margin(margin: f64) -> Result<f64> {
    if !margin.is_finite() || !(0.0..1.0).contains(&margin) {
        return Err(invalid(format!("margin must be in [0, 1), got {margin}")));
    }
    Ok(margin)
}

pub fn normalize_thresholds(thresholds: &[f64]) -> Result<Vec<f64>> {
    if thresholds.is_empty() {
        return Err(invalid("at least one market threshold is required"));
    }
    let mut out = Vec::with_capacity(thresholds.len());
    for &t in thresholds {
        if !t.is_finite() || t < 0.0 {
            return Err(invalid(format!(
                "market threshold must be a finite non-negative number, got {t}"
            )));
        }
        out.push(t);
    }
    out.sort_by(f64::total_cmp);
    out.dedup();
    Ok(out)
}

pub fn decimal_odds(probability: f64, margin: f64) -> Result<f64> {
    let margin = validate_margin(margin)?;
    if !probability.is_finite() || probability <= 0.0 {
        return Err(invalid(format!(
            "odds are undefined for probability {probability}"
        )));
    }
    if probability > 1.0 {
        return Err(invalid(format!(
            "probability must not exceed 1, got {probability}"
        )));
    }
    Ok((1.0 / probability) * (1.0 - margin))
}

fn side_odds(probability: f64, margin: f64, label: &str, threshold: f64) -> Option<f64> {
    match decimal_odds(probability, margin) {
        Ok(odds) => Some(odds),
        Err(err) => {
            debug!(threshold, side = label, %err, "no finite odds");
            None
        }
    }
}

fn under_mass(matrix: &ScorelineMatrix, threshold: f64) -> f64 {
    matrix
        .iter()
        .filter(|(h, a, _)| f64::from(h + a) <= threshold)
        .map(|(_, _, p)| p)
        .sum::<f64>()
        .min(1.0)
}

pub fn compute_markets(
    matrix: &ScorelineMatrix,
    thresholds: &[f64],
    margin: f64,
) -> Result<Vec<MarketResult>> {
    let margin = validate_margin(margin)?;
    let thresholds = normalize_thresholds(thresholds)?;

    let markets = thresholds
        .into_iter()
        .map(|threshold| {
            let probability_under = under_mass(matrix, threshold);
            let probability_over = (1.0 - probability_under).max(0.0);
            MarketResult {
                threshold,
                probability_over,
                probability_under,
                odds_over: side_odds(probability_over, margin, "over", threshold),
                odds_under: side_odds(probability_under, margin, "under", threshold),
                fair_odds_over: side_odds(probability_over, 0.0, "over", threshold),
                fair_odds_under: side_odds(probability_under, 0.0, "under", threshold),
            }
        })
        .collect();
    Ok(markets)
}

pub fn outcome_probabilities(matrix: &ScorelineMatrix) -> MatchOutcome {
    let mut home_win = 0.0;
    let mut draw = 0.0;
    let mut away_win = 0.0;
    for (h, a, p) in matrix.iter() {
        if h > a {
            home_win += p;
        } else if h < a {
            away_win += p;
        } else {
            draw += p;
        }
    }
    MatchOutcome {
        home_win,
        draw,
        away_win,
    }
}

/// Top `n` cells by probability; ties go to the lower scoreline.
pub fn most_likely_scorelines(matrix: &ScorelineMatrix, n: usize) -> Vec<ScorelineProbability> {
    let mut cells: Vec<ScorelineProbability> = matrix
        .iter()
        .map(|(home_goals, away_goals, probability)| ScorelineProbability {
            home_goals,
            away_goals,
            probability,
        })
        .collect();
    cells.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then(a.home_goals.cmp(&b.home_goals))
            .then(a.away_goals.cmp(&b.away_goals))
    });
    cells.truncate(n);
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poisson::build_scoreline_matrix;

    #[test]
    fn zero_margin_odds_are_reciprocal() {
        let p = 0.37;
        assert_eq!(decimal_odds(p, 0.0).unwrap(), 1.0 / p);
    }

    #[test]
    fn margin_shortens_odds() {
        let fair = decimal_odds(0.5, 0.0).unwrap();
        let with_margin = decimal_odds(0.5, 0.05).unwrap();
        assert!((fair - 2.0).abs() < 1e-12);
        assert!((with_margin - 1.9).abs() < 1e-12);
    }

    #[test]
    fn odds_reject_zero_probability_and_bad_margin() {
        assert!(decimal_odds(0.0, 0.0).is_err());
        assert!(decimal_odds(-0.2, 0.0).is_err());
        assert!(decimal_odds(0.5, 1.0).is_err());
        assert!(decimal_odds(0.5, -0.01).is_err());
    }

    #[test]
    fn thresholds_are_sorted_and_deduped() {
        let t = normalize_thresholds(&[2.5, 0.5, 2.5, 1.5]).unwrap();
        assert_eq!(t, vec![0.5, 1.5, 2.5]);
        assert!(normalize_thresholds(&[]).is_err());
        assert!(normalize_thresholds(&[-0.5]).is_err());
        assert!(normalize_thresholds(&[f64::NAN]).is_err());
    }

    #[test]
    fn under_half_goal_is_nil_nil() {
        let m = build_scoreline_matrix(1.3, 0.9, 10).unwrap();
        let markets = compute_markets(&m, &[0.5], 0.0).unwrap();
        let nil_nil = m.get(0, 0).unwrap();
        assert_eq!(markets[0].probability_under, nil_nil);
        assert!((markets[0].probability_over - (1.0 - nil_nil)).abs() < 1e-15);
    }

    #[test]
    fn certain_nil_nil_has_no_finite_over_price() {
        let m = build_scoreline_matrix(0.0, 0.0, 6).unwrap();
        let markets = compute_markets(&m, &[0.5], 0.05).unwrap();
        assert_eq!(markets[0].probability_over, 0.0);
        assert!(markets[0].odds_over.is_none());
        assert!(markets[0].fair_odds_over.is_none());
        assert!((markets[0].odds_under.unwrap() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn outcome_mass_matches_matrix_total() {
        let m = build_scoreline_matrix(1.8, 1.1, 10).unwrap();
        let o = outcome_probabilities(&m);
        assert!((o.home_win + o.draw + o.away_win - m.total_mass()).abs() < 1e-12);
        assert!(o.home_win > o.away_win);
    }

    #[test]
    fn top_scorelines_are_ordered() {
        let m = build_scoreline_matrix(1.4, 1.4, 10).unwrap();
        let top = most_likely_scorelines(&m, 3);
        assert_eq!(top.len(), 3);
        assert_eq!((top[0].home_goals, top[0].away_goals), (1, 1));
        // 1-0 and 0-1 tie under equal rates; lower home score first.
        assert_eq!((top[1].home_goals, top[1].away_goals), (0, 1));
        assert_eq!((top[2].home_goals, top[2].away_goals), (1, 0));
        assert!(top[0].probability >= top[1].probability);
    }
}
