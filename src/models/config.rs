//! Tournament configuration: round tables, play-in, and code constants.

use crate::models::game::ScoreRule;
use crate::models::tournament::TournamentError;
use serde::{Deserialize, Serialize};

/// Rendering scheme for bracket codes (see `logic::codec`).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeScheme {
    /// Lower-case base 36 digits (0-9, a-z); 13 characters for a 64-team field.
    #[default]
    Base36,
    /// Fixed 64-symbol alphabet, 6 bits per symbol.
    Alphabet64,
}

/// Immutable per-tournament configuration, passed into the constructor.
/// There is no ambient global state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Display names per elimination level, in play order.
    pub round_names: Vec<String>,
    /// Point value per elimination level, parallel to `round_names`.
    pub round_points: Vec<u32>,
    pub first_four_name: String,
    pub first_four_points: u32,
    /// Rank marking the main-field slots a play-in winner fills.
    pub play_in_rank: u32,
    pub score_rule: ScoreRule,
    pub scheme: CodeScheme,
    /// Canonical code length in symbols.
    pub code_length: usize,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            round_names: [
                "First Round",
                "Second Round",
                "Sweet Sixteen",
                "Elite Eight",
                "Final Four",
                "Championship",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            round_points: vec![1, 2, 4, 8, 16, 32],
            first_four_name: "First Four".to_string(),
            first_four_points: 1,
            play_in_rank: 16,
            score_rule: ScoreRule::Additive,
            scheme: CodeScheme::Base36,
            code_length: 13,
        }
    }
}

impl TournamentConfig {
    /// Number of elimination rounds for a field of `field_size` teams.
    /// `field_size` must be a power of two.
    pub fn rounds_needed(field_size: usize) -> usize {
        field_size.trailing_zeros() as usize
    }

    /// Elimination levels the round tables can cover.
    pub fn rounds_configured(&self) -> usize {
        self.round_names.len().min(self.round_points.len())
    }

    /// Check the round tables cover a field of the given size.
    pub fn validate_for(&self, field_size: usize) -> Result<(), TournamentError> {
        let needed = Self::rounds_needed(field_size);
        let configured = self.rounds_configured();
        if configured < needed {
            return Err(TournamentError::ConfigMismatch { needed, configured });
        }
        Ok(())
    }

    /// Name and point value for elimination level `index`.
    pub fn level(&self, index: usize) -> Option<(&str, u32)> {
        let name = self.round_names.get(index)?;
        let points = self.round_points.get(index)?;
        Some((name.as_str(), *points))
    }
}
