//! Data structures for the bracket simulator: teams, games, rounds, tournament.

mod config;
mod export;
mod game;
mod round;
mod team;
mod tournament;

pub use config::{CodeScheme, TournamentConfig};
pub use export::{
    BracketExport, ConsensusBracket, ConsensusRound, ConsensusSlot, RoundWinners, TeamRecord,
    TournamentImport, WinnerRecord,
};
pub use game::{Game, ScoreRule};
pub use round::Round;
pub use team::Team;
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
