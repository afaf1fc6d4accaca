//! Monte-Carlo consensus: per-slot majority vote across exported brackets.

use crate::models::{BracketExport, ConsensusBracket, ConsensusRound, ConsensusSlot};
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Merge many winners-per-round artifacts into one consensus bracket.
///
/// Rounds keep their first-seen play order. Each slot takes the team picked
/// most often across the artifacts; ties go to the lower rank, then to the
/// lexicographically earlier name.
pub fn aggregate(exports: &[BracketExport]) -> ConsensusBracket {
    let mut order: Vec<String> = Vec::new();
    // round name -> per-slot tally keyed by (name, rank)
    let mut tallies: HashMap<String, Vec<HashMap<(String, u32), u32>>> = HashMap::new();

    for export in exports {
        for round in &export.rounds {
            let slots = match tallies.entry(round.round.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    order.push(round.round.clone());
                    entry.insert(Vec::new())
                }
            };
            if slots.len() < round.winners.len() {
                slots.resize_with(round.winners.len(), HashMap::new);
            }
            for (slot, record) in round.winners.iter().enumerate() {
                *slots[slot]
                    .entry((record.name.clone(), record.rank))
                    .or_insert(0) += 1;
            }
        }
    }

    let rounds = order
        .into_iter()
        .map(|name| {
            let slots = tallies.remove(&name).unwrap_or_default();
            ConsensusRound {
                round: name,
                winners: slots.into_iter().filter_map(pick_slot_winner).collect(),
            }
        })
        .collect();

    ConsensusBracket {
        sample_size: exports.len(),
        rounds,
    }
}

/// Best-effort variant over raw JSON values: artifacts that fail to parse are
/// skipped with a warning instead of failing the whole batch. The sample size
/// counts only the artifacts that parsed.
pub fn aggregate_values(values: &[serde_json::Value]) -> ConsensusBracket {
    let parsed: Vec<BracketExport> = values
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value.clone()) {
            Ok(export) => Some(export),
            Err(err) => {
                log::warn!("skipping malformed bracket artifact {}: {}", index, err);
                None
            }
        })
        .collect();
    aggregate(&parsed)
}

/// Majority pick for one slot: highest count, then lower rank, then earlier name.
fn pick_slot_winner(tally: HashMap<(String, u32), u32>) -> Option<ConsensusSlot> {
    tally
        .into_iter()
        .map(|((name, rank), count)| ConsensusSlot { name, rank, count })
        .max_by(|a, b| {
            a.count
                .cmp(&b.count)
                .then(b.rank.cmp(&a.rank))
                .then(b.name.cmp(&a.name))
        })
}
