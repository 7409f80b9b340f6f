//! Centralized limits and tuning constants for the ladder game.
//!
//! Player limits and labels are fixed here. Row count and rung probability
//! only provide the defaults for [`crate::LadderConfig`], which callers may
//! override.

// Player limits ------------------------------------------------------------
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;

// Generation defaults ------------------------------------------------------
pub const DEFAULT_ROWS: usize = 18;
pub const DEFAULT_RUNG_PROBABILITY: f64 = 0.3;
pub const MAX_ROWS: usize = 200;

// Labels -------------------------------------------------------------------
/// Label shown on bottom slots and player records that carry no reward.
pub const NO_REWARD_LABEL: &str = "꽝";
pub const DEFAULT_NAME_PREFIX: &str = "Player";

// RNG stream tags ----------------------------------------------------------
pub(crate) const LADDER_STREAM_TAG: &[u8] = b"ladder";
