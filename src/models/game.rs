//! Game: a single matchup and its probabilistic outcome.

use crate::models::team::Team;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// How a game's points combine the winner's rank with the round's point value.
///
/// Addition is the live rule; the other variants exist so the combination can
/// change without touching `Game`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    #[default]
    Additive,
    Multiplicative,
    Subtractive,
}

impl ScoreRule {
    /// Combine the winner's rank with the round's point value.
    pub fn apply(self, rank: u32, round_points: u32) -> u32 {
        match self {
            ScoreRule::Additive => rank + round_points,
            ScoreRule::Multiplicative => rank * round_points,
            ScoreRule::Subtractive => rank.saturating_sub(round_points),
        }
    }
}

/// A single matchup between two teams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub home_team: Team,
    pub away_team: Team,
    /// Reward for correctly picking this round's winner.
    pub round_points: u32,
    pub score_rule: ScoreRule,
    /// None until played or assigned during decode.
    pub winner: Option<Team>,
    /// Probability of the recorded winner (not of the home team).
    pub probability: f64,
    /// Points awarded for this outcome.
    pub points: u32,
}

impl Game {
    pub fn new(home_team: Team, away_team: Team, round_points: u32, score_rule: ScoreRule) -> Self {
        Self {
            home_team,
            away_team,
            round_points,
            score_rule,
            winner: None,
            probability: 0.0,
            points: 0,
        }
    }

    /// Odds of the home team winning: the away team's share of the combined rank.
    ///
    /// A #1 seed against a #7 seed wins with odds 7.0 / 8.0 = 0.875. A weighted
    /// coin flip, not a statistical model; stored codes depend on this formula.
    pub fn home_team_odds(&self) -> f64 {
        f64::from(self.away_team.rank) / f64::from(self.home_team.rank + self.away_team.rank)
    }

    /// Draw a uniform value in [0, 1) and pick a winner, without recording it.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> &Team {
        if rng.gen::<f64>() <= self.home_team_odds() {
            &self.home_team
        } else {
            &self.away_team
        }
    }

    /// Simulate and record the winner.
    pub fn play<R: Rng>(&mut self, rng: &mut R) -> Team {
        let winner = self.simulate(rng).clone();
        self.set_winner(winner)
    }

    /// Record a winner (simulated or decoded) and derive probability and points.
    /// Calling again overwrites the previous outcome.
    pub fn set_winner(&mut self, team: Team) -> Team {
        let home_odds = self.home_team_odds();
        self.probability = if team == self.home_team {
            home_odds
        } else {
            1.0 - home_odds
        };
        self.points = self.score_rule.apply(team.rank, self.round_points);
        self.winner = Some(team.clone());
        team
    }

    /// The team that lost, once a winner is recorded.
    pub fn loser(&self) -> Option<&Team> {
        self.winner.as_ref().map(|winner| {
            if *winner == self.home_team {
                &self.away_team
            } else {
                &self.home_team
            }
        })
    }

    /// Code bit for this game: false = home won, true = away won.
    pub fn outcome_bit(&self) -> Option<bool> {
        self.winner.as_ref().map(|winner| *winner == self.away_team)
    }
}
