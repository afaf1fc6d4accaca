//! Tournament, TournamentState, and the error type.

use crate::models::config::TournamentConfig;
use crate::models::round::Round;
use crate::models::team::Team;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Supplied bracket code cannot be decoded (wrong length or bad symbol).
    InvalidCode(String),
    /// Import payload is missing or has invalid team records.
    MalformedImport(String),
    /// Field size is not a supported power of two of at least 2.
    InvalidFieldSize(usize),
    /// Bracket needs more rounds than the configured tables provide.
    ConfigMismatch { needed: usize, configured: usize },
    /// Configured code length cannot hold one bit per game.
    CodeLengthTooShort { needed: usize, configured: usize },
    /// Operation requires a completed bracket.
    NotPlayed,
}

impl fmt::Display for TournamentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentError::InvalidCode(reason) => write!(f, "invalid bracket code: {}", reason),
            TournamentError::MalformedImport(reason) => {
                write!(f, "malformed import payload: {}", reason)
            }
            TournamentError::InvalidFieldSize(size) => {
                write!(f, "unsupported field size: {} teams", size)
            }
            TournamentError::ConfigMismatch { needed, configured } => {
                write!(
                    f,
                    "bracket needs {} rounds but the tables configure {}",
                    needed, configured
                )
            }
            TournamentError::CodeLengthTooShort { needed, configured } => {
                write!(
                    f,
                    "code length {} cannot hold the bracket's {} symbols",
                    configured, needed
                )
            }
            TournamentError::NotPlayed => write!(f, "bracket has not been played to completion"),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of one simulation run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Constructed or reset; no rounds played.
    #[default]
    Empty,
    /// Play-in or elimination rounds underway.
    InProgress,
    /// Winner set and code recorded.
    Complete,
}

/// Full bracket state: field, play-in, rounds, and run results.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub year: i32,
    /// Main field in bracket slot order (power of two). Play-in winners are
    /// substituted in here during a run; `reset` restores the imported list.
    pub teams: Vec<Team>,
    /// Play-in teams in game order; empty when the field has no play-in.
    pub first_four: Vec<Team>,
    pub config: TournamentConfig,
    /// Play-in round, once played (feeds the codec and export).
    pub first_four_round: Option<Round>,
    /// Elimination rounds in play order.
    pub rounds: Vec<Round>,
    pub winner: Option<Team>,
    /// Canonical bracket code, once complete.
    pub code: Option<String>,
    /// Sum of every game's points: what a perfect predictor would score.
    pub max_total_points: u32,
    /// Mean probability across all games, flat (not round-weighted).
    pub probability: f64,
    /// floor(probability * max_total_points): a coarse expected-value
    /// heuristic kept for compatibility with existing codes and exports.
    pub projected_points: u32,
    pub state: TournamentState,
    /// Imported main field, kept pristine so `reset` can undo play-in
    /// substitution between independent runs.
    base_teams: Vec<Team>,
}

impl Tournament {
    /// Build a tournament, failing fast on bad input: empty or odd team lists,
    /// a field that is not a power of two, rank-zero teams, or round/code
    /// tables too small for the field.
    pub fn new(
        teams: Vec<Team>,
        first_four: Vec<Team>,
        year: i32,
        config: TournamentConfig,
    ) -> Result<Self, TournamentError> {
        if teams.is_empty() {
            return Err(TournamentError::MalformedImport("no teams".to_string()));
        }
        if teams.len() < 2 || !teams.len().is_power_of_two() {
            return Err(TournamentError::InvalidFieldSize(teams.len()));
        }
        if first_four.len() % 2 != 0 {
            return Err(TournamentError::MalformedImport(format!(
                "play-in list has an odd number of teams ({})",
                first_four.len()
            )));
        }
        for team in teams.iter().chain(first_four.iter()) {
            if team.name.trim().is_empty() {
                return Err(TournamentError::MalformedImport(
                    "team with an empty name".to_string(),
                ));
            }
            if team.rank == 0 {
                return Err(TournamentError::MalformedImport(format!(
                    "team '{}' has rank 0",
                    team.name
                )));
            }
        }
        config.validate_for(teams.len())?;

        // One bit per game must fit the u128 the codec packs into.
        let game_count = first_four.len() / 2 + (teams.len() - 1);
        if game_count > 128 {
            return Err(TournamentError::InvalidFieldSize(teams.len()));
        }
        let needed = config.scheme.natural_length(game_count);
        if config.code_length < needed {
            return Err(TournamentError::CodeLengthTooShort {
                needed,
                configured: config.code_length,
            });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            year,
            base_teams: teams.clone(),
            teams,
            first_four,
            config,
            first_four_round: None,
            rounds: Vec::new(),
            winner: None,
            code: None,
            max_total_points: 0,
            probability: 0.0,
            projected_points: 0,
            state: TournamentState::Empty,
        })
    }

    /// Current-year tournament with the default configuration.
    pub fn with_defaults(teams: Vec<Team>, first_four: Vec<Team>) -> Result<Self, TournamentError> {
        let year = chrono::Utc::now().year();
        Self::new(teams, first_four, year, TournamentConfig::default())
    }

    /// Discard any prior run so another independent simulation can start.
    /// Restores the imported field (undoing play-in substitution).
    pub fn reset(&mut self) {
        self.teams = self.base_teams.clone();
        self.first_four_round = None;
        self.rounds.clear();
        self.winner = None;
        self.code = None;
        self.max_total_points = 0;
        self.probability = 0.0;
        self.projected_points = 0;
        self.state = TournamentState::Empty;
    }

    /// Total games in a full bracket: play-in games plus field size minus one.
    /// Also the bit length of the bracket code.
    pub fn game_count(&self) -> usize {
        self.first_four.len() / 2 + (self.teams.len() - 1)
    }

    /// All rounds in play order, play-in first when present.
    pub fn all_rounds(&self) -> impl Iterator<Item = &Round> {
        self.first_four_round.iter().chain(self.rounds.iter())
    }

    pub fn is_complete(&self) -> bool {
        self.state == TournamentState::Complete
    }
}
