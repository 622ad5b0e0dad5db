//! Flag parsing and process setup shared by the binaries.

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::{CalcConfig, parse_thresholds};
use crate::inputs::DefensePairing;

pub fn args() -> Vec<String> {
    std::env::args().skip(1).collect()
}

/// Loads `.env.local` then `.env`, and installs a stderr logger filtered by `RUST_LOG`.
pub fn init() {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Value of `--name=value` or `--name value`.
pub fn string_arg(args: &[String], name: &str) -> Option<String> {
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&format!("{name}="))
            && !raw.trim().is_empty()
        {
            return Some(raw.trim().to_string());
        }
        if arg == name
            && let Some(next) = args.get(idx + 1)
            && !next.trim().is_empty()
        {
            return Some(next.trim().to_string());
        }
    }
    None
}

pub fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|arg| arg == name)
}

/// `Ok(None)` when the flag is absent; a present but malformed value is an error.
fn flag_value<T>(
    args: &[String],
    name: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>> {
    let Some(raw) = string_arg(args, name) else {
        return Ok(None);
    };
    parse(&raw)
        .map(Some)
        .ok_or_else(|| anyhow!("invalid {name} value {raw:?}"))
}

/// Env config with `--margin`, `--max-goals`, `--thresholds` and `--pairing` on top.
pub fn config_from_args(args: &[String]) -> Result<CalcConfig> {
    let mut cfg = CalcConfig::from_env();
    if let Some(margin) = flag_value(args, "--margin", |v| v.parse::<f64>().ok())? {
        cfg.margin = margin;
    }
    if let Some(max_goals) = flag_value(args, "--max-goals", |v| v.parse::<u32>().ok())? {
        cfg.max_goals = max_goals;
    }
    if let Some(thresholds) = flag_value(args, "--thresholds", parse_thresholds)? {
        cfg.thresholds = thresholds;
    }
    if let Some(pairing) = flag_value(args, "--pairing", DefensePairing::parse)? {
        cfg.defense_pairing = pairing;
    }
    Ok(cfg)
}
