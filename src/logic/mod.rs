//! Tournament business logic: import, simulation, codec, aggregation.

mod aggregate;
mod codec;
mod import;
mod simulation;

pub use aggregate::{aggregate, aggregate_values};
pub use codec::{code_from_phrase, load_from_tourney_code, to_tourney_code};
pub use import::{
    import_from_json, import_teams_csv, tournament_from_import, tournament_from_import_for_year,
};
pub use simulation::{
    build_round, export_winners, play, run_simulations, simulate_first_four, SimulationOptions,
    SimulationRun,
};
