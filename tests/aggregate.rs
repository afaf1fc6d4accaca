//! Integration tests for consensus aggregation across exported brackets.

use bracket_sim::{
    aggregate, aggregate_values, export_winners, play, BracketExport, RoundWinners, Team,
    Tournament, TournamentConfig, WinnerRecord,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn artifact(rounds: &[(&str, &[(&str, u32)])]) -> BracketExport {
    BracketExport {
        year: 2026,
        rounds: rounds
            .iter()
            .map(|(name, winners)| RoundWinners {
                round: name.to_string(),
                winners: winners
                    .iter()
                    .map(|(team, rank)| WinnerRecord {
                        name: team.to_string(),
                        rank: *rank,
                        probability: None,
                        points: None,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[test]
fn majority_wins_each_slot() {
    let exports = [
        artifact(&[("Championship", &[("Team A", 1)])]),
        artifact(&[("Championship", &[("Team A", 1)])]),
        artifact(&[("Championship", &[("Team B", 2)])]),
    ];
    let consensus = aggregate(&exports);

    assert_eq!(consensus.sample_size, 3);
    assert_eq!(consensus.rounds.len(), 1);
    let slot = &consensus.rounds[0].winners[0];
    assert_eq!(slot.name, "Team A");
    assert_eq!(slot.rank, 1);
    assert_eq!(slot.count, 2);
}

#[test]
fn tie_goes_to_the_lower_rank() {
    let exports = [
        artifact(&[("Championship", &[("Team A", 3)])]),
        artifact(&[("Championship", &[("Team B", 1)])]),
    ];
    let consensus = aggregate(&exports);
    let slot = &consensus.rounds[0].winners[0];
    assert_eq!(slot.name, "Team B");
    assert_eq!(slot.count, 1);
}

#[test]
fn equal_rank_tie_uses_name_order() {
    let exports = [
        artifact(&[("Championship", &[("Bravo", 2)])]),
        artifact(&[("Championship", &[("Alpha", 2)])]),
    ];
    let consensus = aggregate(&exports);
    assert_eq!(consensus.rounds[0].winners[0].name, "Alpha");
}

#[test]
fn rounds_keep_first_seen_play_order() {
    let exports = [
        artifact(&[
            ("First Round", &[("Team A", 1), ("Team B", 2)][..]),
            ("Championship", &[("Team A", 1)][..]),
        ]),
        artifact(&[
            ("First Round", &[("Team A", 1), ("Team C", 3)][..]),
            ("Championship", &[("Team C", 3)][..]),
        ]),
    ];
    let consensus = aggregate(&exports);
    let names: Vec<&str> = consensus.rounds.iter().map(|r| r.round.as_str()).collect();
    assert_eq!(names, ["First Round", "Championship"]);
    assert_eq!(consensus.rounds[0].winners.len(), 2);
    assert_eq!(consensus.rounds[0].winners[0].name, "Team A");
    assert_eq!(consensus.rounds[0].winners[0].count, 2);
}

#[test]
fn slots_follow_the_widest_artifact() {
    let exports = [
        artifact(&[("First Round", &[("Team A", 1), ("Team B", 2)][..])]),
        artifact(&[("First Round", &[("Team A", 1)][..])]),
    ];
    let consensus = aggregate(&exports);
    let winners = &consensus.rounds[0].winners;
    assert_eq!(winners.len(), 2);
    assert_eq!(winners[0].count, 2);
    assert_eq!(winners[1].count, 1);
}

#[test]
fn malformed_artifacts_are_skipped() {
    let good = serde_json::to_value(artifact(&[("Championship", &[("Team A", 1)])])).unwrap();
    let bad = json!({ "rounds": "not a list" });
    let consensus = aggregate_values(&[good.clone(), bad, good]);

    assert_eq!(consensus.sample_size, 2);
    assert_eq!(consensus.rounds[0].winners[0].count, 2);
}

#[test]
fn consensus_builds_from_simulated_runs() {
    let teams: Vec<Team> = (1..=8)
        .map(|i| Team::new(format!("Team {i}"), i as u32))
        .collect();
    let mut t = Tournament::new(teams, Vec::new(), 2026, TournamentConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    let mut artifacts = Vec::new();
    for _ in 0..25 {
        play(&mut t, &mut rng).unwrap();
        artifacts.push(export_winners(&t).unwrap());
    }

    let consensus = aggregate(&artifacts);
    assert_eq!(consensus.sample_size, 25);
    assert_eq!(consensus.rounds.len(), 3);
    assert_eq!(consensus.rounds[0].winners.len(), 4);
    for slot in consensus.rounds.iter().flat_map(|r| r.winners.iter()) {
        assert!(slot.count >= 1 && slot.count <= 25);
    }
}
