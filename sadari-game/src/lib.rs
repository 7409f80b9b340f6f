//! Sadari Game Engine
//!
//! Platform-agnostic core of the ladder game (Amidakuji): random rung
//! generation, path resolution and reward assignment. This crate has no UI or
//! I/O; front ends supply validated input and render the [`GameResult`].

pub mod config;
pub mod constants;
pub mod game;
pub mod ladder;
pub mod outcome;
pub mod resolver;
pub mod rng;

// Re-export commonly used types
pub use config::{LadderConfig, LadderConfigError};
pub use constants::{MAX_PLAYERS, MIN_PLAYERS, NO_REWARD_LABEL};
pub use game::{GameError, GameRequest, ValidationError, default_name, play, play_seeded};
pub use ladder::{Ladder, LadderError, generate};
pub use outcome::{GameResult, PlayerRecord, assign_rewards, bottom_rewards};
pub use resolver::{ResolveError, is_permutation, resolve, resolve_all, trace, try_resolve};
pub use rng::{CountingRng, LadderRng, entropy_seed, ladder_rng};
