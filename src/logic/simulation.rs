//! Bracket simulation: round construction, play-in resolution, and single- or
//! multi-run play.

use crate::logic::codec;
use crate::models::{
    BracketExport, Game, Round, RoundWinners, ScoreRule, Team, Tournament, TournamentConfig,
    TournamentError, TournamentId, TournamentState, WinnerRecord,
};
use rand::Rng;
use serde::Serialize;

/// Pair adjacent teams (slots 0v1, 2v3, ...) into games for elimination level
/// `index`, taking the round's name and point value from the config tables.
pub fn build_round(
    teams: &[Team],
    index: usize,
    config: &TournamentConfig,
) -> Result<Round, TournamentError> {
    let (name, points) = config
        .level(index)
        .ok_or(TournamentError::ConfigMismatch {
            needed: index + 1,
            configured: config.rounds_configured(),
        })?;
    Ok(build_named_round(
        teams,
        index,
        name.to_string(),
        points,
        config.score_rule,
    ))
}

/// Pair adjacent teams into a round with an explicit name and point value
/// (used for the play-in round, which sits outside the level tables).
pub(crate) fn build_named_round(
    teams: &[Team],
    index: usize,
    name: String,
    round_points: u32,
    score_rule: ScoreRule,
) -> Round {
    let games = teams
        .chunks_exact(2)
        .map(|pair| Game::new(pair[0].clone(), pair[1].clone(), round_points, score_rule))
        .collect();
    Round::new(games, index, name, round_points, score_rule)
}

/// Play the play-in round and substitute its winners into the main field.
///
/// Placeholder slots are the field entries whose rank equals
/// `config.play_in_rank`; winners fill them in slot order and the field keeps
/// its length. Returns the winners, empty when there is no play-in.
pub fn simulate_first_four<R: Rng>(tournament: &mut Tournament, rng: &mut R) -> Vec<Team> {
    if tournament.first_four.is_empty() {
        return Vec::new();
    }
    let mut round = build_named_round(
        &tournament.first_four,
        0,
        tournament.config.first_four_name.clone(),
        tournament.config.first_four_points,
        tournament.config.score_rule,
    );
    let winners = round.play(rng);
    substitute_play_in_winners(tournament, &winners);
    tournament.first_four_round = Some(round);
    winners
}

/// Replace placeholder slots (rank == play_in_rank) with winners, slot order.
pub(crate) fn substitute_play_in_winners(tournament: &mut Tournament, winners: &[Team]) {
    let play_in_rank = tournament.config.play_in_rank;
    let mut next = winners.iter();
    for slot in tournament.teams.iter_mut() {
        if slot.rank == play_in_rank {
            match next.next() {
                Some(winner) => *slot = winner.clone(),
                None => break,
            }
        }
    }
}

/// Run one full simulation: reset, play the play-in, then elimination rounds
/// until a single winner remains. Scores the bracket and records its code.
pub fn play<R: Rng>(tournament: &mut Tournament, rng: &mut R) -> Result<Team, TournamentError> {
    tournament.reset();
    tournament.state = TournamentState::InProgress;

    simulate_first_four(tournament, rng);

    let mut contenders = tournament.teams.clone();
    let mut level = 0;
    while contenders.len() > 1 {
        let mut round = build_round(&contenders, level, &tournament.config)?;
        contenders = round.play(rng);
        tournament.rounds.push(round);
        level += 1;
    }
    let winner = contenders
        .into_iter()
        .next()
        .ok_or(TournamentError::InvalidFieldSize(0))?;

    score(tournament);
    tournament.winner = Some(winner.clone());
    tournament.state = TournamentState::Complete;
    tournament.code = Some(codec::to_tourney_code(tournament)?);
    log::info!("{} tournament winner: {}", tournament.year, winner);
    Ok(winner)
}

/// Recompute bracket-wide totals from recorded game outcomes.
///
/// `probability` is the flat mean across every game (play-in included), and
/// `projected_points` multiplies that single mean by the whole bracket's
/// maximum score rather than summing per-round expectations. Kept as-is for
/// compatibility with existing codes and exports.
pub(crate) fn score(tournament: &mut Tournament) {
    let max_total_points: u32 = tournament.all_rounds().map(|round| round.points).sum();
    let game_count: usize = tournament.all_rounds().map(|round| round.games.len()).sum();
    let probability_sum: f64 = tournament
        .all_rounds()
        .flat_map(|round| round.games.iter())
        .map(|game| game.probability)
        .sum();

    tournament.max_total_points = max_total_points;
    tournament.probability = if game_count == 0 {
        0.0
    } else {
        probability_sum / game_count as f64
    };
    tournament.projected_points =
        (tournament.probability * f64::from(max_total_points)).floor() as u32;
}

/// Winners-per-round artifact for a completed bracket, play-in round first.
pub fn export_winners(tournament: &Tournament) -> Option<BracketExport> {
    if !tournament.is_complete() {
        return None;
    }
    let rounds = tournament
        .all_rounds()
        .map(|round| RoundWinners {
            round: round.name.clone(),
            winners: round
                .games
                .iter()
                .filter_map(|game| {
                    game.winner.as_ref().map(|winner| WinnerRecord {
                        name: winner.name.clone(),
                        rank: winner.rank,
                        probability: Some(game.probability),
                        points: Some(game.points),
                    })
                })
                .collect(),
        })
        .collect();
    Some(BracketExport {
        year: tournament.year,
        rounds,
    })
}

/// Options for a batch of independent simulation runs.
#[derive(Clone, Debug)]
pub struct SimulationOptions {
    /// Number of independent runs (at least 1).
    pub sims: u32,
    /// Disqualifying rank: a run whose round winners include this rank is
    /// never an export candidate.
    pub min_rank: Option<u32>,
    /// Attach the winners-per-round artifact to qualifying runs.
    pub export: bool,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            sims: 1,
            min_rank: None,
            export: false,
        }
    }
}

/// Summary of one simulation run.
#[derive(Clone, Debug, Serialize)]
pub struct SimulationRun {
    /// Zero-based run number within the batch.
    pub simulation: u32,
    pub id: TournamentId,
    pub winner: Team,
    pub max_total_points: u32,
    pub probability: f64,
    pub projected_points: u32,
    pub code: String,
    /// Present when this run qualified as a new best and export was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<BracketExport>,
}

/// Run `sims` independent simulations sequentially, tracking a running best.
///
/// A run qualifies when none of its round winners carries the disqualifying
/// rank and its projected points reach the best seen so far; a qualifying run
/// raises the bar for later ones. One summary per run, in play order.
pub fn run_simulations<R: Rng>(
    tournament: &mut Tournament,
    options: &SimulationOptions,
    rng: &mut R,
) -> Result<Vec<SimulationRun>, TournamentError> {
    let sims = options.sims.max(1);
    let mut best_projected: Option<u32> = None;
    let mut runs = Vec::with_capacity(sims as usize);

    for simulation in 0..sims {
        let winner = play(tournament, rng)?;

        let disqualified = options.min_rank.is_some_and(|rank| {
            tournament
                .all_rounds()
                .flat_map(|round| round.winners.iter())
                .any(|team| team.rank == rank)
        });
        let qualifies = !disqualified
            && best_projected.map_or(true, |best| tournament.projected_points >= best);
        if qualifies {
            best_projected = Some(tournament.projected_points);
        }

        let export = if qualifies && options.export {
            export_winners(tournament)
        } else {
            None
        };

        runs.push(SimulationRun {
            simulation,
            id: tournament.id,
            winner,
            max_total_points: tournament.max_total_points,
            probability: tournament.probability,
            projected_points: tournament.projected_points,
            code: tournament.code.clone().unwrap_or_default(),
            export,
        });
    }

    Ok(runs)
}
