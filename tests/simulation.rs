//! Integration tests for bracket simulation: field validation, round
//! reduction, scoring, play-in substitution, and multi-run batches.

use bracket_sim::{
    export_winners, play, run_simulations, simulate_first_four, Game, Round, ScoreRule,
    SimulationOptions, Team, Tournament, TournamentConfig, TournamentError, TournamentState,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(n: usize) -> Vec<Team> {
    (1..=n)
        .map(|i| Team::new(format!("Team {i}"), i as u32))
        .collect()
}

fn tournament(n: usize) -> Tournament {
    Tournament::new(field(n), Vec::new(), 2026, TournamentConfig::default()).unwrap()
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// 64-team field whose only rank-16 entries are four placeholder slots, plus
/// an 8-team play-in list.
fn play_in_field() -> (Vec<Team>, Vec<Team>) {
    let mut teams = field(64);
    for (slot, idx) in [15usize, 31, 47, 63].into_iter().enumerate() {
        teams[idx] = Team::new(format!("Placeholder {slot}"), 16);
    }
    let first_four = (0..8)
        .map(|i| Team::new(format!("Play-In {i}"), 16))
        .collect();
    (teams, first_four)
}

#[test]
fn rejects_non_power_of_two_field() {
    let err = Tournament::new(field(6), Vec::new(), 2026, TournamentConfig::default()).unwrap_err();
    assert_eq!(err, TournamentError::InvalidFieldSize(6));
}

#[test]
fn rejects_rank_zero_team() {
    let mut teams = field(4);
    teams[2].rank = 0;
    assert!(matches!(
        Tournament::new(teams, Vec::new(), 2026, TournamentConfig::default()),
        Err(TournamentError::MalformedImport(_))
    ));
}

#[test]
fn rejects_empty_team_name() {
    let mut teams = field(4);
    teams[1].name = "  ".to_string();
    assert!(matches!(
        Tournament::new(teams, Vec::new(), 2026, TournamentConfig::default()),
        Err(TournamentError::MalformedImport(_))
    ));
}

#[test]
fn round_tables_must_cover_the_field() {
    let mut config = TournamentConfig::default();
    config.round_names.truncate(2);
    let err = Tournament::new(field(16), Vec::new(), 2026, config).unwrap_err();
    assert_eq!(
        err,
        TournamentError::ConfigMismatch {
            needed: 4,
            configured: 2
        }
    );
}

#[test]
fn code_length_must_cover_the_bracket() {
    let mut config = TournamentConfig::default();
    config.code_length = 5;
    assert!(matches!(
        Tournament::new(field(64), Vec::new(), 2026, config),
        Err(TournamentError::CodeLengthTooShort { .. })
    ));
}

#[test]
fn home_odds_follow_the_inverse_rank_formula() {
    let game = Game::new(
        Team::new("One", 1),
        Team::new("Seven", 7),
        1,
        ScoreRule::Additive,
    );
    assert_eq!(game.home_team_odds(), 0.875);
}

#[test]
fn set_winner_records_the_winner_side_probability() {
    let home = Team::new("One", 1);
    let away = Team::new("Seven", 7);
    let mut game = Game::new(home.clone(), away.clone(), 4, ScoreRule::Additive);

    game.set_winner(home.clone());
    assert_eq!(game.winner.as_ref(), Some(&home));
    assert_eq!(game.probability, 0.875);
    assert_eq!(game.points, 1 + 4);

    game.set_winner(away.clone());
    assert_eq!(game.winner.as_ref(), Some(&away));
    assert_eq!(game.probability, 0.125);
    assert_eq!(game.points, 7 + 4);
}

#[test]
fn score_rules_stay_pluggable() {
    assert_eq!(ScoreRule::Additive.apply(7, 4), 11);
    assert_eq!(ScoreRule::Multiplicative.apply(7, 4), 28);
    assert_eq!(ScoreRule::Subtractive.apply(3, 5), 0);
}

#[test]
fn empty_round_yields_zero_probability() {
    let mut round = Round::new(Vec::new(), 0, "Empty", 1, ScoreRule::Additive);
    let winners = round.play(&mut rng(3));
    assert!(winners.is_empty());
    assert_eq!(round.probability, 0.0);
    assert_eq!(round.points, 0);
}

#[test]
fn bracket_reduces_to_a_single_winner() {
    let mut t = tournament(64);
    let winner = play(&mut t, &mut rng(1)).unwrap();

    assert_eq!(t.state, TournamentState::Complete);
    assert_eq!(t.rounds.len(), 6);
    for (k, round) in t.rounds.iter().enumerate() {
        assert_eq!(round.games.len(), 64 >> (k + 1));
        assert_eq!(round.winners.len(), round.games.len());
    }
    assert_eq!(t.winner.as_ref(), Some(&winner));
    assert_eq!(t.code.as_ref().map(|c| c.len()), Some(13));
}

#[test]
fn probabilities_stay_in_bounds() {
    let mut t = tournament(32);
    play(&mut t, &mut rng(13)).unwrap();
    for game in t.rounds.iter().flat_map(|round| round.games.iter()) {
        assert!(game.probability >= 0.0 && game.probability <= 1.0);
    }
    assert!(t.probability >= 0.0 && t.probability <= 1.0);
}

#[test]
fn scores_add_up_across_the_bracket() {
    let mut t = tournament(16);
    play(&mut t, &mut rng(8)).unwrap();

    let games: Vec<&Game> = t.rounds.iter().flat_map(|r| r.games.iter()).collect();
    let total: u32 = games.iter().map(|g| g.points).sum();
    let round_total: u32 = t.rounds.iter().map(|r| r.points).sum();
    assert_eq!(t.max_total_points, total);
    assert_eq!(t.max_total_points, round_total);

    let mean: f64 = games.iter().map(|g| g.probability).sum::<f64>() / games.len() as f64;
    assert!((t.probability - mean).abs() < 1e-12);
    assert_eq!(
        t.projected_points,
        (t.probability * f64::from(t.max_total_points)).floor() as u32
    );
}

#[test]
fn play_in_winners_fill_placeholder_slots_in_order() {
    let (teams, first_four) = play_in_field();
    let mut t = Tournament::new(teams, first_four, 2026, TournamentConfig::default()).unwrap();
    assert_eq!(t.game_count(), 67);

    let winners = simulate_first_four(&mut t, &mut rng(5));
    assert_eq!(winners.len(), 4);
    assert_eq!(t.teams.len(), 64);
    for (slot, idx) in [15usize, 31, 47, 63].into_iter().enumerate() {
        assert_eq!(t.teams[idx], winners[slot]);
    }
    assert!(t
        .teams
        .iter()
        .all(|team| !team.name.starts_with("Placeholder")));
}

#[test]
fn reset_restores_the_imported_field() {
    let (teams, first_four) = play_in_field();
    let mut t = Tournament::new(teams, first_four, 2026, TournamentConfig::default()).unwrap();
    play(&mut t, &mut rng(5)).unwrap();
    assert!(t.first_four_round.is_some());

    t.reset();
    assert_eq!(t.state, TournamentState::Empty);
    assert!(t.rounds.is_empty());
    assert!(t.first_four_round.is_none());
    assert!(t.winner.is_none());
    assert!(t.code.is_none());
    assert_eq!(t.max_total_points, 0);
    let placeholders = t
        .teams
        .iter()
        .filter(|team| team.name.starts_with("Placeholder"))
        .count();
    assert_eq!(placeholders, 4);
}

#[test]
fn batches_are_reproducible_under_a_fixed_seed() {
    let options = SimulationOptions {
        sims: 5,
        min_rank: None,
        export: false,
    };

    let mut a = tournament(8);
    let runs_a = run_simulations(&mut a, &options, &mut rng(11)).unwrap();
    assert_eq!(runs_a.len(), 5);
    for (i, run) in runs_a.iter().enumerate() {
        assert_eq!(run.simulation, i as u32);
        assert_eq!(run.code.len(), 13);
    }

    let mut b = tournament(8);
    let runs_b = run_simulations(&mut b, &options, &mut rng(11)).unwrap();
    let codes_a: Vec<&str> = runs_a.iter().map(|r| r.code.as_str()).collect();
    let codes_b: Vec<&str> = runs_b.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes_a, codes_b);
}

#[test]
fn exports_attach_only_to_new_best_runs() {
    let mut t = tournament(8);
    let options = SimulationOptions {
        sims: 12,
        min_rank: None,
        export: true,
    };
    let runs = run_simulations(&mut t, &options, &mut rng(21)).unwrap();

    let mut best: Option<u32> = None;
    for run in &runs {
        let qualifies = best.map_or(true, |b| run.projected_points >= b);
        assert_eq!(run.export.is_some(), qualifies);
        if qualifies {
            best = Some(run.projected_points);
        }
    }
    assert!(runs[0].export.is_some());
}

#[test]
fn min_rank_disqualifies_runs_from_export() {
    let teams = vec![Team::new("Alpha", 5), Team::new("Beta", 5)];
    let mut t = Tournament::new(teams, Vec::new(), 2026, TournamentConfig::default()).unwrap();
    let options = SimulationOptions {
        sims: 4,
        min_rank: Some(5),
        export: true,
    };
    let runs = run_simulations(&mut t, &options, &mut rng(9)).unwrap();
    assert_eq!(runs.len(), 4);
    assert!(runs.iter().all(|run| run.export.is_none()));
}

#[test]
fn export_lists_rounds_in_play_order() {
    let mut t = tournament(8);
    play(&mut t, &mut rng(2)).unwrap();
    let export = export_winners(&t).unwrap();

    let names: Vec<&str> = export.rounds.iter().map(|r| r.round.as_str()).collect();
    assert_eq!(names, ["First Round", "Second Round", "Sweet Sixteen"]);
    assert_eq!(export.rounds[0].winners.len(), 4);
    for record in export.rounds.iter().flat_map(|r| r.winners.iter()) {
        assert!(record.probability.is_some());
        assert!(record.points.is_some());
    }
}

#[test]
fn export_includes_the_play_in_round_first() {
    let (teams, first_four) = play_in_field();
    let mut t = Tournament::new(teams, first_four, 2026, TournamentConfig::default()).unwrap();
    play(&mut t, &mut rng(4)).unwrap();
    let export = export_winners(&t).unwrap();
    assert_eq!(export.rounds[0].round, "First Four");
    assert_eq!(export.rounds[0].winners.len(), 4);
    assert_eq!(export.rounds.len(), 7);
}
