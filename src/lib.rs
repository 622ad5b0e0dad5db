pub mod batch;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod error;
pub mod inputs;
pub mod markets;
pub mod poisson;
pub mod strength;

pub use calculator::{Calculation, MatchRequest, Summary, calculate};
pub use config::CalcConfig;
pub use error::{InvalidInputError, Result};
pub use inputs::{
    BaselineMode, DefensePairing, InputKind, LeagueBaseline, TeamInput, TeamRate, TeamStrength,
};
