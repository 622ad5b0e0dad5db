use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use goal_markets::MatchRequest;
use goal_markets::batch::{self, BatchEntry};
use goal_markets::calculator::Summary;
use goal_markets::cli;
use goal_markets::markets::{MarketResult, MatchOutcome};

#[derive(Serialize)]
struct BatchLine<'a> {
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outcome: Option<MatchOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markets: Option<&'a [MarketResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for BatchLine<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        match &entry.result {
            Ok(calc) => Self {
                id: entry.id.as_deref(),
                summary: Some(calc.summary()),
                outcome: Some(calc.outcome),
                markets: Some(calc.markets.as_slice()),
                error: None,
            },
            Err(err) => Self {
                id: entry.id.as_deref(),
                summary: None,
                outcome: None,
                markets: None,
                error: Some(err.reason.clone()),
            },
        }
    }
}

fn main() -> Result<()> {
    cli::init();
    let args = cli::args();
    let cfg = cli::config_from_args(&args)?;

    let path = cli::string_arg(&args, "--input")
        .or_else(|| args.first().filter(|a| !a.starts_with("--")).cloned())
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("usage: batch_markets <requests.json> [--margin 0.05]"))?;

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("read requests {}", path.display()))?;
    let requests: Vec<MatchRequest> = serde_json::from_str(&raw)
        .with_context(|| format!("parse requests {}", path.display()))?;

    let entries = batch::calculate_batch(&requests, &cfg);
    let failed = entries.iter().filter(|e| e.result.is_err()).count();
    for entry in &entries {
        println!("{}", serde_json::to_string(&BatchLine::from(entry))?);
    }
    eprintln!("{} fixtures, {} rejected", entries.len(), failed);
    Ok(())
}
