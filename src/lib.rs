//! Bracket tournament simulator: probabilistic single-elimination runs, a
//! reversible bracket code, and Monte-Carlo consensus across many runs.

pub mod logic;
pub mod models;

pub use logic::{
    aggregate, aggregate_values, build_round, code_from_phrase, export_winners, import_from_json,
    import_teams_csv, load_from_tourney_code, play, run_simulations, simulate_first_four,
    to_tourney_code, tournament_from_import, tournament_from_import_for_year, SimulationOptions,
    SimulationRun,
};
pub use models::{
    BracketExport, CodeScheme, ConsensusBracket, ConsensusRound, ConsensusSlot, Game, Round,
    RoundWinners, ScoreRule, Team, TeamRecord, Tournament, TournamentConfig, TournamentError,
    TournamentId, TournamentImport, TournamentState, WinnerRecord,
};
