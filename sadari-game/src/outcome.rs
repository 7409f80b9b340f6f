//! Reward assembly and per-player result records.
use serde::{Deserialize, Serialize};

use crate::constants::NO_REWARD_LABEL;
use crate::ladder::Ladder;

/// Final standing of one player after the draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub start_column: usize,
    pub end_column: usize,
    /// `None` when the player landed on a slot without a reward.
    pub reward: Option<String>,
}

impl PlayerRecord {
    /// Reward label for display, or [`NO_REWARD_LABEL`].
    #[must_use]
    pub fn reward_label(&self) -> &str {
        self.reward.as_deref().unwrap_or(NO_REWARD_LABEL)
    }

    #[must_use]
    pub const fn is_winner(&self) -> bool {
        self.reward.is_some()
    }
}

/// Everything a front end needs to render a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub seed: Option<u64>,
    pub ladder: Ladder,
    pub players: Vec<PlayerRecord>,
    /// Reward bound to each bottom slot, indexed by end column.
    pub bottom_rewards: Vec<Option<String>>,
}

impl GameResult {
    #[must_use]
    pub fn winners(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter().filter(|record| record.is_winner())
    }

    /// Display labels for the bottom slots.
    #[must_use]
    pub fn bottom_labels(&self) -> Vec<&str> {
        self.bottom_rewards
            .iter()
            .map(|slot| slot.as_deref().unwrap_or(NO_REWARD_LABEL))
            .collect()
    }
}

/// Players ordered by the column they landed on.
fn arrivals(end_columns: &[usize]) -> Vec<(usize, usize)> {
    let mut indexed: Vec<(usize, usize)> = end_columns.iter().copied().enumerate().collect();
    indexed.sort_by_key(|&(_, end_column)| end_column);
    indexed
}

/// Reward for each player, indexed by player.
///
/// Rewards are handed out in input order to the players that landed on the
/// lowest end columns; everyone else gets `None`. Rewards beyond the number
/// of players are ignored.
#[must_use]
pub fn assign_rewards(end_columns: &[usize], rewards: &[String]) -> Vec<Option<String>> {
    let mut assigned = vec![None; end_columns.len()];
    for ((player, _), reward) in arrivals(end_columns).into_iter().zip(rewards) {
        assigned[player] = Some(reward.clone());
    }
    assigned
}

/// Reward bound to each bottom slot, indexed by end column.
#[must_use]
pub fn bottom_rewards(end_columns: &[usize], rewards: &[String]) -> Vec<Option<String>> {
    let mut slots = vec![None; end_columns.len()];
    for ((_, end_column), reward) in arrivals(end_columns).into_iter().zip(rewards) {
        if let Some(slot) = slots.get_mut(end_column) {
            *slot = Some(reward.clone());
        }
    }
    slots
}
