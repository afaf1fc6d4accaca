//! Round: one elimination level and its aggregate score.

use crate::models::game::{Game, ScoreRule};
use crate::models::team::Team;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered set of games at one elimination level. Game order is significant:
/// it fixes each game's bit position in the bracket code.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub games: Vec<Game>,
    /// Zero-based elimination level.
    pub index: usize,
    pub name: String,
    pub round_points: u32,
    pub score_rule: ScoreRule,
    /// Parallel to `games` once the round is decided.
    pub winners: Vec<Team>,
    /// Sum of per-game points.
    pub points: u32,
    /// Mean of per-game probabilities; 0.0 for an empty round.
    pub probability: f64,
}

impl Round {
    pub fn new(
        games: Vec<Game>,
        index: usize,
        name: impl Into<String>,
        round_points: u32,
        score_rule: ScoreRule,
    ) -> Self {
        Self {
            games,
            index,
            name: name.into(),
            round_points,
            score_rule,
            winners: Vec::new(),
            points: 0,
            probability: 0.0,
        }
    }

    /// Play every game in order and return the winners in game order.
    pub fn play<R: Rng>(&mut self, rng: &mut R) -> Vec<Team> {
        log::info!("simulating {}", self.name);
        self.winners = Vec::with_capacity(self.games.len());
        for game in &mut self.games {
            let winner = game.play(rng);
            if let Some(loser) = game.loser() {
                log::debug!("{} beats {}", winner, loser);
            }
            self.winners.push(winner);
        }
        self.finish();
        self.winners.clone()
    }

    /// Recompute aggregate points and probability from recorded game outcomes.
    /// Runs after both simulated play and code-driven reconstruction.
    pub(crate) fn finish(&mut self) {
        self.points = self.games.iter().map(|g| g.points).sum();
        self.probability = if self.games.is_empty() {
            0.0
        } else {
            self.games.iter().map(|g| g.probability).sum::<f64>() / self.games.len() as f64
        };
    }
}
