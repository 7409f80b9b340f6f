//! Ladder grid and the randomized rung generator.
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::LadderConfig;
use crate::constants::MIN_PLAYERS;

/// Errors raised while building or checking a ladder.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LadderError {
    #[error("a ladder needs at least {min} players (got {players})")]
    TooFewPlayers { min: usize, players: usize },
    #[error("row {row} has {found} rung slots, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has touching rungs at columns {column} and {}", .column + 1)]
    AdjacentRungs { row: usize, column: usize },
    /// `row` is the lower of the two rows.
    #[error("column {column} has rungs stacked on rows {} and {row}", .row.saturating_sub(1))]
    StackedRungs { row: usize, column: usize },
}

/// Rung grid of `rows x (num_players - 1)` slots.
///
/// Slot `(r, c)` set means a rung joins vertical lines `c` and `c + 1` at
/// row `r`. Deserialization goes through [`Ladder::from_rows`], so a grid
/// read from JSON is shape-checked like any other external grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LadderShape")]
pub struct Ladder {
    num_players: usize,
    rows: Vec<Vec<bool>>,
}

/// Unchecked wire form of a [`Ladder`].
#[derive(Deserialize)]
struct LadderShape {
    num_players: usize,
    rows: Vec<Vec<bool>>,
}

impl TryFrom<LadderShape> for Ladder {
    type Error = LadderError;

    fn try_from(shape: LadderShape) -> Result<Self, Self::Error> {
        Self::from_rows(shape.num_players, shape.rows)
    }
}

impl Ladder {
    /// Build a ladder from explicit rows, e.g. fixtures or externally
    /// supplied grids.
    ///
    /// Only the shape is checked here. Rung placement is left as given; use
    /// [`Ladder::check_invariants`] to find touching or stacked rungs.
    ///
    /// # Errors
    ///
    /// Returns an error when `num_players < 2` or a row does not have
    /// `num_players - 1` slots.
    pub fn from_rows(num_players: usize, rows: Vec<Vec<bool>>) -> Result<Self, LadderError> {
        ensure_players(num_players)?;
        let expected = num_players - 1;
        if let Some((row, slots)) = rows
            .iter()
            .enumerate()
            .find(|(_, slots)| slots.len() != expected)
        {
            return Err(LadderError::RowWidth {
                row,
                expected,
                found: slots.len(),
            });
        }
        Ok(Self { num_players, rows })
    }

    #[must_use]
    pub const fn num_players(&self) -> usize {
        self.num_players
    }

    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Whether a rung joins lines `column` and `column + 1` at `row`.
    /// Out-of-range coordinates read as empty.
    #[must_use]
    pub fn has_rung(&self, row: usize, column: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|slots| slots.get(column))
            .copied()
            .unwrap_or(false)
    }

    #[must_use]
    pub fn rung_count(&self) -> usize {
        self.rows.iter().flatten().filter(|slot| **slot).count()
    }

    /// Verify the placement rules that make the ladder a permutation.
    ///
    /// # Errors
    ///
    /// Returns the first violation found scanning top to bottom, left to
    /// right.
    pub fn check_invariants(&self) -> Result<(), LadderError> {
        for (row, slots) in self.rows.iter().enumerate() {
            for (column, pair) in slots.windows(2).enumerate() {
                if pair[0] && pair[1] {
                    return Err(LadderError::AdjacentRungs { row, column });
                }
            }
            if row == 0 {
                continue;
            }
            let above = &self.rows[row - 1];
            if let Some(column) = slots
                .iter()
                .zip(above)
                .position(|(&here, &prev)| here && prev)
            {
                return Err(LadderError::StackedRungs { row, column });
            }
        }
        Ok(())
    }
}

/// Generate a random ladder for `num_players`.
///
/// Each row visits its candidate columns in shuffled order. A candidate is
/// skipped when the slot above it holds a rung or when it touches a rung
/// already placed in the same row; otherwise a rung is placed with
/// probability `cfg.rung_probability`. Rows only look at the row directly
/// above, so the result always satisfies [`Ladder::check_invariants`].
///
/// # Errors
///
/// Returns [`LadderError::TooFewPlayers`] when `num_players < 2`.
pub fn generate<R: Rng + ?Sized>(
    num_players: usize,
    cfg: &LadderConfig,
    rng: &mut R,
) -> Result<Ladder, LadderError> {
    ensure_players(num_players)?;
    let columns = num_players - 1;
    let mut rows: Vec<Vec<bool>> = Vec::with_capacity(cfg.rows);
    let mut order: Vec<usize> = (0..columns).collect();

    for row in 0..cfg.rows {
        order.shuffle(rng);
        let mut slots = vec![false; columns];
        let above = row.checked_sub(1).map(|prev| &rows[prev]);

        for &column in &order {
            if above.is_some_and(|prev| prev[column]) {
                continue;
            }
            let touches = slots[column]
                || (column > 0 && slots[column - 1])
                || slots.get(column + 1).copied().unwrap_or(false);
            if touches {
                continue;
            }
            if rng.r#gen::<f64>() < cfg.rung_probability {
                slots[column] = true;
            }
        }
        rows.push(slots);
    }

    Ok(Ladder { num_players, rows })
}

const fn ensure_players(num_players: usize) -> Result<(), LadderError> {
    if num_players < MIN_PLAYERS {
        return Err(LadderError::TooFewPlayers {
            min: MIN_PLAYERS,
            players: num_players,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ladder_rng;

    fn cfg(rows: usize, rung_probability: f64) -> LadderConfig {
        LadderConfig {
            rows,
            rung_probability,
        }
    }

    #[test]
    fn rejects_single_player() {
        let mut rng = ladder_rng(1);
        assert_eq!(
            generate(1, &LadderConfig::default(), &mut rng),
            Err(LadderError::TooFewPlayers {
                min: 2,
                players: 1
            })
        );
        assert!(generate(0, &LadderConfig::default(), &mut rng).is_err());
    }

    #[test]
    fn generated_shape_matches_request() {
        let mut rng = ladder_rng(42);
        let ladder = generate(5, &cfg(18, 0.3), &mut rng).unwrap();
        assert_eq!(ladder.num_players(), 5);
        assert_eq!(ladder.num_rows(), 18);
        assert!(ladder.rows().iter().all(|row| row.len() == 4));
    }

    #[test]
    fn generated_ladders_respect_placement_rules() {
        for seed in 0..200_u64 {
            let mut rng = ladder_rng(seed);
            let players = 2 + usize::try_from(seed % 9).unwrap();
            let ladder = generate(players, &cfg(24, 0.6), &mut rng).unwrap();
            assert_eq!(ladder.check_invariants(), Ok(()), "seed {seed}");
        }
    }

    #[test]
    fn zero_probability_yields_empty_ladder() {
        let mut rng = ladder_rng(3);
        let ladder = generate(6, &cfg(10, 0.0), &mut rng).unwrap();
        assert_eq!(ladder.rung_count(), 0);
    }

    #[test]
    fn certain_probability_never_stacks_rungs() {
        let mut rng = ladder_rng(4);
        let ladder = generate(2, &cfg(8, 1.0), &mut rng).unwrap();
        let pattern: Vec<bool> = ladder.rows().iter().map(|row| row[0]).collect();
        assert_eq!(
            pattern,
            vec![true, false, true, false, true, false, true, false]
        );
    }

    #[test]
    fn same_seed_same_ladder() {
        let a = generate(7, &LadderConfig::default(), &mut ladder_rng(77)).unwrap();
        let b = generate(7, &LadderConfig::default(), &mut ladder_rng(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn from_rows_checks_width() {
        let err = Ladder::from_rows(3, vec![vec![true, false], vec![false]]).unwrap_err();
        assert_eq!(
            err,
            LadderError::RowWidth {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn check_invariants_reports_violations() {
        let touching = Ladder::from_rows(4, vec![vec![false, true, true]]).unwrap();
        assert_eq!(
            touching.check_invariants(),
            Err(LadderError::AdjacentRungs { row: 0, column: 1 })
        );

        let stacked = Ladder::from_rows(3, vec![vec![true, false], vec![true, false]]).unwrap();
        assert_eq!(
            stacked.check_invariants(),
            Err(LadderError::StackedRungs { row: 1, column: 0 })
        );
        assert_eq!(
            stacked.check_invariants().unwrap_err().to_string(),
            "column 0 has rungs stacked on rows 0 and 1"
        );
    }

    #[test]
    fn has_rung_treats_out_of_range_as_empty() {
        let ladder = Ladder::from_rows(2, vec![vec![true]]).unwrap();
        assert!(ladder.has_rung(0, 0));
        assert!(!ladder.has_rung(0, 1));
        assert!(!ladder.has_rung(5, 0));
    }

    #[test]
    fn serializes_rows_as_boolean_grid() {
        let ladder = Ladder::from_rows(3, vec![vec![false, true]]).unwrap();
        let json = serde_json::to_value(&ladder).unwrap();
        assert_eq!(json["num_players"], 3);
        assert_eq!(json["rows"], serde_json::json!([[false, true]]));
    }

    #[test]
    fn deserializing_checks_shape() {
        let ragged = r#"{"num_players":4,"rows":[[false],[false,true,false]]}"#;
        let err = serde_json::from_str::<Ladder>(ragged).unwrap_err();
        assert!(err.to_string().contains("row 0 has 1 rung slots, expected 3"));

        let lonely = r#"{"num_players":1,"rows":[]}"#;
        assert!(serde_json::from_str::<Ladder>(lonely).is_err());

        let valid = r#"{"num_players":3,"rows":[[true,false],[false,true]]}"#;
        let ladder: Ladder = serde_json::from_str(valid).unwrap();
        assert_eq!(ladder.rung_count(), 2);
        assert_eq!(ladder.check_invariants(), Ok(()));
    }

    #[test]
    fn stacked_rungs_message_saturates_at_top_row() {
        let err = LadderError::StackedRungs { row: 0, column: 2 };
        assert_eq!(err.to_string(), "column 2 has rungs stacked on rows 0 and 0");
    }
}
