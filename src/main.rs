use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;

use goal_markets::calculator::{Calculation, MatchRequest, Summary};
use goal_markets::cli;
use goal_markets::strength::normalize_team_input;
use goal_markets::{CalcConfig, LeagueBaseline, TeamInput};

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: Summary,
    config: &'a CalcConfig,
    calculation: &'a Calculation,
}

fn main() -> Result<()> {
    cli::init();
    let args = cli::args();
    let cfg = cli::config_from_args(&args)?;

    let request = match cli::string_arg(&args, "--case") {
        Some(path) => load_case(&PathBuf::from(path))?,
        None => prompt_request(&mut io::stdin().lock())?,
    };

    let calc = request
        .calculate(&cfg)
        .context("calculation rejected the inputs")?;

    if cli::has_flag(&args, "--json") {
        let report = JsonReport {
            summary: calc.summary(),
            config: &cfg,
            calculation: &calc,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&calc, &cfg);
    }
    Ok(())
}

fn load_case(path: &Path) -> Result<MatchRequest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read case file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse case file {}", path.display()))
}

fn prompt_request(input: &mut impl BufRead) -> Result<MatchRequest> {
    println!("Football match probability calculator (Poisson, Over/Under markets)");
    println!();
    println!("HOME TEAM");
    let home = prompt_team(input, "home")?;
    println!();
    println!("AWAY TEAM");
    let away = prompt_team(input, "away")?;
    println!();
    println!("LEAGUE");
    let league = prompt_league(input)?;
    Ok(MatchRequest {
        id: None,
        home,
        away,
        league,
    })
}

fn prompt_team(input: &mut impl BufRead, location: &str) -> Result<TeamInput> {
    let goals_for = prompt_f64(
        input,
        &format!("Average goals scored {location} per game (Enter to type totals instead): "),
        true,
    )?;
    if let Some(goals_for_avg) = goals_for {
        let goals_against_avg = prompt_required_f64(
            input,
            &format!("Average goals conceded {location} per game: "),
        )?;
        return Ok(TeamInput::averages(goals_for_avg, goals_against_avg));
    }

    let games = prompt_u32(input, &format!("Number of {location} games played: "))?;
    let scored = prompt_u32(input, &format!("Total goals scored in {location} games: "))?;
    let conceded = prompt_u32(input, &format!("Total goals conceded in {location} games: "))?;
    let team = TeamInput::totals(games, scored, conceded);
    // Zero games is reported by the calculation itself.
    if let Ok(rate) = normalize_team_input(&team, location) {
        println!(
            "Calculated averages: {:.2} scored, {:.2} conceded per game",
            rate.goals_for_avg, rate.goals_against_avg
        );
    }
    Ok(team)
}

fn prompt_league(input: &mut impl BufRead) -> Result<LeagueBaseline> {
    let avg = prompt_f64(
        input,
        "League average goals per game (Enter to use separate home/away averages): ",
        true,
    )?;
    if let Some(avg) = avg {
        return Ok(LeagueBaseline::simple(avg));
    }
    let home = prompt_required_f64(input, "League average goals scored by home teams: ")?;
    let away = prompt_required_f64(input, "League average goals scored by away teams: ")?;
    Ok(LeagueBaseline::detailed(home, away))
}

fn read_answer(input: &mut impl BufRead, prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(anyhow!("input closed before all values were entered"));
    }
    Ok(line.trim().to_string())
}

fn prompt_f64(input: &mut impl BufRead, prompt: &str, allow_empty: bool) -> Result<Option<f64>> {
    loop {
        let answer = read_answer(input, prompt)?;
        if answer.is_empty() {
            if allow_empty {
                return Ok(None);
            }
            println!("Input cannot be empty. Please enter a number.");
            continue;
        }
        match answer.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => return Ok(Some(v)),
            Ok(_) => println!("Please enter a non-negative number."),
            Err(_) => println!("Invalid number, try again."),
        }
    }
}

fn prompt_required_f64(input: &mut impl BufRead, prompt: &str) -> Result<f64> {
    prompt_f64(input, prompt, false)?.ok_or_else(|| anyhow!("missing value for {prompt}"))
}

fn prompt_u32(input: &mut impl BufRead, prompt: &str) -> Result<u32> {
    loop {
        let answer = read_answer(input, prompt)?;
        match answer.parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("Please enter a whole number of zero or more."),
        }
    }
}

fn print_report(calc: &Calculation, cfg: &CalcConfig) {
    let s = calc.summary();
    println!();
    println!("Match summary");
    println!("  Home expected goals   {:>6.2}", s.home_expected_goals);
    println!("  Away expected goals   {:>6.2}", s.away_expected_goals);
    println!("  Total expected goals  {:>6.2}", s.total_expected_goals);
    println!("  Home attack strength  {:>6.2}", s.home_attack);
    println!("  Home defense strength {:>6.2}", s.home_defense);
    println!("  Away attack strength  {:>6.2}", s.away_attack);
    println!("  Away defense strength {:>6.2}", s.away_defense);

    println!();
    println!(
        "Over/Under markets (margin {:.1}%)",
        cfg.margin * 100.0
    );
    println!(
        "  {:<10} {:>8} {:>9} {:>9} {:>8} {:>9} {:>9}",
        "Line", "Under", "Fair", "Priced", "Over", "Fair", "Priced"
    );
    for m in &calc.markets {
        println!(
            "  {:<10} {:>7.2}% {:>9} {:>9} {:>7.2}% {:>9} {:>9}",
            format!("{:.1}", m.threshold),
            m.probability_under * 100.0,
            fmt_odds(m.fair_odds_under),
            fmt_odds(m.odds_under),
            m.probability_over * 100.0,
            fmt_odds(m.fair_odds_over),
            fmt_odds(m.odds_over),
        );
    }

    println!();
    println!(
        "Result: home {:.1}%  draw {:.1}%  away {:.1}%",
        calc.outcome.home_win * 100.0,
        calc.outcome.draw * 100.0,
        calc.outcome.away_win * 100.0
    );
    println!("Most likely scores:");
    for cell in &calc.top_scorelines {
        println!(
            "  {}-{}  {:>5.2}%",
            cell.home_goals,
            cell.away_goals,
            cell.probability * 100.0
        );
    }
}

fn fmt_odds(odds: Option<f64>) -> String {
    match odds {
        Some(v) => format!("{v:.2}"),
        None => "-".to_string(),
    }
}
