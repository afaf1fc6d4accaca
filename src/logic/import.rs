//! Import: build a Tournament from JSON or CSV team payloads.
//!
//! The boundary collaborator owns files and transport; these functions only
//! see strings. Record validation (empty names, rank zero, field size) happens
//! in `Tournament::new`, the smallest scope that can detect it.

use crate::models::{
    Team, TeamRecord, Tournament, TournamentConfig, TournamentError, TournamentImport,
};
use chrono::Datelike;

/// Parse the JSON import payload: the round-of-N field plus an optional
/// play-in list.
pub fn import_from_json(payload: &str) -> Result<TournamentImport, TournamentError> {
    serde_json::from_str(payload).map_err(|err| TournamentError::MalformedImport(err.to_string()))
}

/// Parse a headered CSV team list: `name,rank[,color]`.
pub fn import_teams_csv(payload: &str) -> Result<Vec<TeamRecord>, TournamentError> {
    let mut reader = csv::Reader::from_reader(payload.as_bytes());
    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: TeamRecord =
            row.map_err(|err| TournamentError::MalformedImport(err.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

/// Build a current-year tournament from an import payload.
pub fn tournament_from_import(
    import: TournamentImport,
    config: TournamentConfig,
) -> Result<Tournament, TournamentError> {
    tournament_from_import_for_year(import, chrono::Utc::now().year(), config)
}

/// Build a tournament from an import payload for an explicit year.
pub fn tournament_from_import_for_year(
    import: TournamentImport,
    year: i32,
    config: TournamentConfig,
) -> Result<Tournament, TournamentError> {
    let teams = build_teams(import.teams);
    let first_four = build_teams(import.first_four);
    Tournament::new(teams, first_four, year, config)
}

fn build_teams(records: Vec<TeamRecord>) -> Vec<Team> {
    records
        .into_iter()
        .map(|record| Team {
            name: record.name,
            rank: record.rank,
            color: record.color,
        })
        .collect()
}
