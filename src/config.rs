use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::inputs::DefensePairing;
use crate::markets::DEFAULT_THRESHOLDS;
use crate::poisson::DEFAULT_MAX_GOALS;

pub const ENV_MARGIN: &str = "MARKET_MARGIN";
pub const ENV_MAX_GOALS: &str = "MAX_GOALS";
pub const ENV_THRESHOLDS: &str = "OU_THRESHOLDS";
pub const ENV_PAIRING: &str = "DEFENSE_PAIRING";
pub const ENV_BATCH_PARALLELISM: &str = "BATCH_PARALLELISM";

/// Knobs shared by every calculation. Values are validated when a calculation runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub thresholds: Vec<f64>,
    pub margin: f64,
    pub max_goals: u32,
    pub defense_pairing: DefensePairing,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            thresholds: DEFAULT_THRESHOLDS.to_vec(),
            margin: 0.0,
            max_goals: DEFAULT_MAX_GOALS,
            defense_pairing: DefensePairing::default(),
        }
    }
}

impl CalcConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Unparseable values keep the default and are logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(margin) = env_value(&lookup, ENV_MARGIN, |v| v.parse::<f64>().ok()) {
            cfg.margin = margin;
        }
        if let Some(max_goals) = env_value(&lookup, ENV_MAX_GOALS, |v| v.parse::<u32>().ok()) {
            cfg.max_goals = max_goals;
        }
        if let Some(thresholds) = env_value(&lookup, ENV_THRESHOLDS, parse_thresholds) {
            cfg.thresholds = thresholds;
        }
        if let Some(pairing) = env_value(&lookup, ENV_PAIRING, DefensePairing::parse) {
            cfg.defense_pairing = pairing;
        }
        cfg
    }
}

fn env_value<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = parse(raw.trim());
    if parsed.is_none() {
        warn!(key, raw = %raw, "ignoring unparseable config value, using default");
    }
    parsed
}

/// `"0.5, 1.5,2.5"` -> `[0.5, 1.5, 2.5]`; any bad entry rejects the whole list.
pub fn parse_thresholds(raw: &str) -> Option<Vec<f64>> {
    let out = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    if out.is_empty() { None } else { Some(out) }
}

pub fn batch_parallelism() -> usize {
    parallelism_from(env::var(ENV_BATCH_PARALLELISM).ok().as_deref())
}

fn parallelism_from(raw: Option<&str>) -> usize {
    raw.and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(4)
        .clamp(1, 32)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_market_conventions() {
        let cfg = CalcConfig::default();
        assert_eq!(cfg.thresholds, vec![0.5, 1.5, 2.5, 3.5]);
        assert_eq!(cfg.margin, 0.0);
        assert_eq!(cfg.max_goals, 10);
        assert_eq!(cfg.defense_pairing, DefensePairing::OpponentScoring);
    }

    #[test]
    fn lookup_overrides_defaults() {
        let cfg = CalcConfig::from_lookup(lookup_from(&[
            (ENV_MARGIN, "0.05"),
            (ENV_MAX_GOALS, "12"),
            (ENV_THRESHOLDS, "1.5, 2.5"),
            (ENV_PAIRING, "own"),
        ]));
        assert_eq!(cfg.margin, 0.05);
        assert_eq!(cfg.max_goals, 12);
        assert_eq!(cfg.thresholds, vec![1.5, 2.5]);
        assert_eq!(cfg.defense_pairing, DefensePairing::OwnScoring);
    }

    #[test]
    fn garbage_values_keep_defaults() {
        let cfg = CalcConfig::from_lookup(lookup_from(&[
            (ENV_MARGIN, "five percent"),
            (ENV_MAX_GOALS, "-3"),
            (ENV_THRESHOLDS, "2.5,x"),
        ]));
        assert_eq!(cfg, CalcConfig::default());
    }

    #[test]
    fn parallelism_is_clamped() {
        assert_eq!(parallelism_from(None), 4);
        assert_eq!(parallelism_from(Some("0")), 1);
        assert_eq!(parallelism_from(Some("8")), 8);
        assert_eq!(parallelism_from(Some("500")), 32);
        assert_eq!(parallelism_from(Some("many")), 4);
    }

    #[test]
    fn config_json_fills_missing_fields() {
        let cfg: CalcConfig = serde_json::from_str(r#"{"margin":0.03}"#).unwrap();
        assert_eq!(cfg.margin, 0.03);
        assert_eq!(cfg.max_goals, 10);
    }
}
