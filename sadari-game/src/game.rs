//! Input validation and the single-draw orchestration.
use rand::Rng;
use thiserror::Error;

use crate::config::{LadderConfig, LadderConfigError};
use crate::constants::{DEFAULT_NAME_PREFIX, MAX_PLAYERS, MIN_PLAYERS};
use crate::ladder::{LadderError, generate};
use crate::outcome::{GameResult, PlayerRecord, assign_rewards, bottom_rewards};
use crate::resolver::resolve_all;

/// Input-shape problems reported back to whoever collected the input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("player count must be between {min} and {max} (got {players})")]
    PlayerCount {
        min: usize,
        max: usize,
        players: usize,
    },
    #[error("at least one reward is required")]
    NoRewards,
    #[error("reward count ({rewards}) exceeds player count ({players})")]
    TooManyRewards { rewards: usize, players: usize },
}

#[derive(Debug, Error, PartialEq)]
pub enum GameError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid ladder configuration: {0}")]
    Config(#[from] LadderConfigError),
    #[error(transparent)]
    Ladder(#[from] LadderError),
}

/// Validated input for one draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRequest {
    names: Vec<String>,
    rewards: Vec<String>,
}

impl GameRequest {
    /// Validate and normalize raw input.
    ///
    /// Names are trimmed; missing or blank names become `Player{n}`. Rewards
    /// are trimmed and blank entries dropped before counting.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when the player count is outside
    /// `2..=10`, no reward survives trimming, or rewards outnumber players.
    pub fn new<N, R>(num_players: usize, names: N, rewards: R) -> Result<Self, ValidationError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&num_players) {
            return Err(ValidationError::PlayerCount {
                min: MIN_PLAYERS,
                max: MAX_PLAYERS,
                players: num_players,
            });
        }

        let mut supplied = names.into_iter();
        let names: Vec<String> = (0..num_players)
            .map(|index| {
                supplied
                    .next()
                    .map(|name| name.as_ref().trim().to_string())
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| default_name(index))
            })
            .collect();

        let rewards: Vec<String> = rewards
            .into_iter()
            .map(|reward| reward.as_ref().trim().to_string())
            .filter(|reward| !reward.is_empty())
            .collect();
        if rewards.is_empty() {
            return Err(ValidationError::NoRewards);
        }
        if rewards.len() > num_players {
            return Err(ValidationError::TooManyRewards {
                rewards: rewards.len(),
                players: num_players,
            });
        }

        Ok(Self { names, rewards })
    }

    #[must_use]
    pub fn num_players(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn rewards(&self) -> &[String] {
        &self.rewards
    }
}

/// Positional fallback name for player `index` (zero-based).
#[must_use]
pub fn default_name(index: usize) -> String {
    format!("{DEFAULT_NAME_PREFIX}{}", index + 1)
}

/// Run one draw: build a fresh ladder, resolve every column and hand out
/// rewards.
///
/// # Errors
///
/// Returns [`GameError::Config`] when `cfg` fails validation. Ladder errors
/// cannot occur for a validated request.
pub fn play<R: Rng + ?Sized>(
    request: &GameRequest,
    cfg: &LadderConfig,
    rng: &mut R,
) -> Result<GameResult, GameError> {
    cfg.validate()?;
    let ladder = generate(request.num_players(), cfg, rng)?;
    let end_columns = resolve_all(&ladder);
    let rewards = assign_rewards(&end_columns, request.rewards());
    let bottom = bottom_rewards(&end_columns, request.rewards());

    log::debug!(
        "ladder {}x{} with {} rungs, end columns {:?}",
        ladder.num_rows(),
        ladder.num_players(),
        ladder.rung_count(),
        end_columns
    );

    let players = request
        .names()
        .iter()
        .zip(end_columns)
        .zip(rewards)
        .enumerate()
        .map(|(start_column, ((name, end_column), reward))| PlayerRecord {
            name: name.clone(),
            start_column,
            end_column,
            reward,
        })
        .collect();

    Ok(GameResult {
        seed: None,
        ladder,
        players,
        bottom_rewards: bottom,
    })
}

/// [`play`] driven by a user-visible seed, recorded on the result so the
/// draw can be replayed.
///
/// # Errors
///
/// Same as [`play`].
pub fn play_seeded(
    request: &GameRequest,
    cfg: &LadderConfig,
    seed: u64,
) -> Result<GameResult, GameError> {
    let mut rng = crate::rng::ladder_rng(seed);
    let mut result = play(request, cfg, &mut rng)?;
    log::debug!("seed {seed} consumed {} draws", rng.draws());
    result.seed = Some(seed);
    Ok(result)
}
