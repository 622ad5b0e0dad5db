use tracing::debug;

use crate::error::{Result, ensure_non_negative, ensure_positive, invalid};
use crate::inputs::{DefensePairing, LeagueBaseline, TeamInput, TeamRate, TeamStrength};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideBaselines {
    pub attack: f64,
    pub defense: f64,
}

/// Home and away rows of the baseline table for a league/pairing combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchBaselines {
    pub home: SideBaselines,
    pub away: SideBaselines,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTeams {
    pub home_rate: TeamRate,
    pub away_rate: TeamRate,
    pub home_strength: TeamStrength,
    pub away_strength: TeamStrength,
}

pub fn normalize_team_input(input: &TeamInput, side: &str) -> Result<TeamRate> {
    match *input {
        TeamInput::Averages {
            goals_for_avg,
            goals_against_avg,
        } => Ok(TeamRate {
            goals_for_avg: ensure_non_negative(goals_for_avg, &format!("{side} goals for average"))?,
            goals_against_avg: ensure_non_negative(
                goals_against_avg,
                &format!("{side} goals against average"),
            )?,
        }),
        TeamInput::Totals {
            games_played,
            total_goals_for,
            total_goals_against,
        } => {
            if games_played == 0 {
                return Err(invalid(format!(
                    "{side} games played must be greater than zero"
                )));
            }
            let games = games_played as f64;
            Ok(TeamRate {
                goals_for_avg: total_goals_for as f64 / games,
                goals_against_avg: total_goals_against as f64 / games,
            })
        }
    }
}

pub fn baselines_for(league: &LeagueBaseline, pairing: DefensePairing) -> Result<MatchBaselines> {
    match *league {
        LeagueBaseline::Simple { avg_goals_per_game } => {
            let avg = ensure_positive(avg_goals_per_game, "league average goals per game")?;
            let side = SideBaselines {
                attack: avg,
                defense: avg,
            };
            Ok(MatchBaselines {
                home: side,
                away: side,
            })
        }
        LeagueBaseline::Detailed {
            home_avg_goals_for,
            away_avg_goals_for,
        } => {
            let home = ensure_positive(home_avg_goals_for, "league home goals for average")?;
            let away = ensure_positive(away_avg_goals_for, "league away goals for average")?;
            let (home_defense, away_defense) = match pairing {
                DefensePairing::OpponentScoring => (away, home),
                DefensePairing::OwnScoring => (home, away),
            };
            Ok(MatchBaselines {
                home: SideBaselines {
                    attack: home,
                    defense: home_defense,
                },
                away: SideBaselines {
                    attack: away,
                    defense: away_defense,
                },
            })
        }
    }
}

pub fn team_strength(rate: &TeamRate, baselines: &SideBaselines) -> TeamStrength {
    TeamStrength {
        attack: rate.goals_for_avg / baselines.attack,
        defense: rate.goals_against_avg / baselines.defense,
    }
}

pub fn resolve(
    home: &TeamInput,
    away: &TeamInput,
    league: &LeagueBaseline,
    pairing: DefensePairing,
) -> Result<ResolvedTeams> {
    let home_rate = normalize_team_input(home, "home")?;
    let away_rate = normalize_team_input(away, "away")?;
    let baselines = baselines_for(league, pairing)?;

    let home_strength = team_strength(&home_rate, &baselines.home);
    let away_strength = team_strength(&away_rate, &baselines.away);
    debug!(
        mode = ?league.mode(),
        home_input = ?home.kind(),
        away_input = ?away.kind(),
        home_attack = home_strength.attack,
        home_defense = home_strength.defense,
        away_attack = away_strength.attack,
        away_defense = away_strength.defense,
        "resolved team strengths"
    );

    Ok(ResolvedTeams {
        home_rate,
        away_rate,
        home_strength,
        away_strength,
    })
}
