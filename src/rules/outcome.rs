//! Final scores and winners.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, PlayerMap};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(PlayerId),
    /// Every player tied at the top score.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Decide the result from final scores. All players at the maximum win.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<i32>) -> Self {
        let best = scores.iter().map(|(_, score)| *score).max().unwrap_or(0);
        let mut top: Vec<PlayerId> = scores
            .iter()
            .filter(|(_, score)| **score == best)
            .map(|(id, _)| id)
            .collect();
        if top.len() == 1 {
            Self::Winner(top.remove(0))
        } else {
            Self::Winners(top)
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            Self::Winner(winner) => *winner == player,
            Self::Winners(winners) => winners.contains(&player),
        }
    }

    #[must_use]
    pub fn winners(&self) -> Vec<PlayerId> {
        match self {
            Self::Winner(winner) => vec![*winner],
            Self::Winners(winners) => winners.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// The end condition that fired.
    pub reason: String,
    pub scores: PlayerMap<i32>,
    pub result: GameResult,
}

impl GameOutcome {
    #[must_use]
    pub fn new(reason: impl Into<String>, scores: PlayerMap<i32>) -> Self {
        let result = GameResult::from_scores(&scores);
        Self {
            reason: reason.into(),
            scores,
            result,
        }
    }
}
