//! Boundary payloads: team imports, per-run exports, and consensus results.
//!
//! Everything here is plain serde data. Rounds are carried as ordered vectors
//! (play order, play-in first) so serialization is byte-stable.

use serde::{Deserialize, Serialize};

/// One imported team record.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub name: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Import payload: main field plus optional play-in list.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentImport {
    pub teams: Vec<TeamRecord>,
    #[serde(default)]
    pub first_four: Vec<TeamRecord>,
}

/// One winning slot in an exported round. Probability and points are present
/// when the artifact comes from a scored run; aggregation only needs name and
/// rank.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WinnerRecord {
    pub name: String,
    pub rank: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

/// Winners of one round, in game order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundWinners {
    pub round: String,
    pub winners: Vec<WinnerRecord>,
}

/// Winners-per-round artifact for one completed run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BracketExport {
    pub year: i32,
    pub rounds: Vec<RoundWinners>,
}

/// Consensus pick for one slot, with its vote count.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConsensusSlot {
    pub name: String,
    pub rank: u32,
    pub count: u32,
}

/// Consensus winners of one round, in slot order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConsensusRound {
    pub round: String,
    pub winners: Vec<ConsensusSlot>,
}

/// Majority-vote bracket across many exported runs.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConsensusBracket {
    /// Number of artifacts that contributed votes.
    pub sample_size: usize,
    pub rounds: Vec<ConsensusRound>,
}
