//! Path resolution: where a token entering at the top of a column ends up.
use thiserror::Error;

use crate::ladder::Ladder;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("start column {start} is outside 0..{players}")]
    StartOutOfRange { start: usize, players: usize },
}

/// Column reached after applying one row to a token standing at `column`.
///
/// A rung on the left is taken before a rung on the right. Generated ladders
/// never offer both, but externally built grids may.
#[inline]
fn step(ladder: &Ladder, row: usize, column: usize) -> usize {
    if column > 0 && ladder.has_rung(row, column - 1) {
        column - 1
    } else if column + 1 < ladder.num_players() && ladder.has_rung(row, column) {
        column + 1
    } else {
        column
    }
}

/// Ending column for a token entering at `start_column`.
///
/// # Panics
///
/// Panics if `start_column >= ladder.num_players()`; callers holding
/// untrusted indices should use [`try_resolve`].
#[must_use]
pub fn resolve(ladder: &Ladder, start_column: usize) -> usize {
    assert!(
        start_column < ladder.num_players(),
        "start column {start_column} outside ladder of {} players",
        ladder.num_players()
    );
    (0..ladder.num_rows()).fold(start_column, |column, row| step(ladder, row, column))
}

/// Checked variant of [`resolve`].
///
/// # Errors
///
/// Returns [`ResolveError::StartOutOfRange`] for a start column past the
/// last vertical line.
pub fn try_resolve(ladder: &Ladder, start_column: usize) -> Result<usize, ResolveError> {
    if start_column >= ladder.num_players() {
        return Err(ResolveError::StartOutOfRange {
            start: start_column,
            players: ladder.num_players(),
        });
    }
    Ok(resolve(ladder, start_column))
}

/// Ending column for every start column, indexed by start column.
#[must_use]
pub fn resolve_all(ladder: &Ladder) -> Vec<usize> {
    (0..ladder.num_players())
        .map(|start| resolve(ladder, start))
        .collect()
}

/// Column occupied before the first row and after each row, so the result
/// holds `num_rows + 1` entries ending at the resolved column.
///
/// # Panics
///
/// Panics under the same contract as [`resolve`].
#[must_use]
pub fn trace(ladder: &Ladder, start_column: usize) -> Vec<usize> {
    assert!(
        start_column < ladder.num_players(),
        "start column {start_column} outside ladder of {} players",
        ladder.num_players()
    );
    let mut path = Vec::with_capacity(ladder.num_rows() + 1);
    path.push(start_column);
    let mut column = start_column;
    for row in 0..ladder.num_rows() {
        column = step(ladder, row, column);
        path.push(column);
    }
    path
}

/// Whether `end_columns` hits every column `0..len` exactly once.
#[must_use]
pub fn is_permutation(end_columns: &[usize]) -> bool {
    let mut seen = vec![false; end_columns.len()];
    for &column in end_columns {
        match seen.get_mut(column) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_rung() -> Ladder {
        Ladder::from_rows(4, vec![vec![false, true, false]]).unwrap()
    }

    #[test]
    fn single_rung_swaps_its_neighbours() {
        let ladder = single_rung();
        assert_eq!(resolve(&ladder, 0), 0);
        assert_eq!(resolve(&ladder, 1), 2);
        assert_eq!(resolve(&ladder, 2), 1);
        assert_eq!(resolve(&ladder, 3), 3);
        assert_eq!(resolve_all(&ladder), vec![0, 2, 1, 3]);
    }

    #[test]
    fn empty_ladder_is_identity() {
        let ladder = Ladder::from_rows(3, Vec::new()).unwrap();
        assert_eq!(resolve_all(&ladder), vec![0, 1, 2]);
    }

    #[test]
    fn left_rung_wins_on_touching_rungs() {
        // Invalid grid: line 1 touches rungs on both sides.
        let ladder = Ladder::from_rows(3, vec![vec![true, true]]).unwrap();
        assert_eq!(resolve(&ladder, 1), 0);
        assert_eq!(resolve(&ladder, 0), 1);
        assert_eq!(resolve(&ladder, 2), 1);
        assert!(!is_permutation(&resolve_all(&ladder)));
    }

    #[test]
    fn stacked_rungs_cancel_out() {
        let ladder = Ladder::from_rows(2, vec![vec![true], vec![true]]).unwrap();
        assert_eq!(resolve_all(&ladder), vec![0, 1]);
    }

    #[test]
    fn resolve_is_repeatable() {
        let ladder = Ladder::from_rows(
            5,
            vec![
                vec![true, false, true, false],
                vec![false, true, false, true],
                vec![true, false, false, false],
            ],
        )
        .unwrap();
        let first = resolve_all(&ladder);
        for _ in 0..10 {
            assert_eq!(resolve_all(&ladder), first);
        }
        assert!(is_permutation(&first));
    }

    #[test]
    fn trace_records_every_row() {
        let ladder = Ladder::from_rows(3, vec![vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(trace(&ladder, 0), vec![0, 1, 2]);
        assert_eq!(trace(&ladder, 2), vec![2, 2, 1]);
        assert_eq!(*trace(&ladder, 1).last().unwrap(), resolve(&ladder, 1));
    }

    #[test]
    fn try_resolve_rejects_out_of_range() {
        let ladder = single_rung();
        assert_eq!(try_resolve(&ladder, 1), Ok(2));
        assert_eq!(
            try_resolve(&ladder, 4),
            Err(ResolveError::StartOutOfRange {
                start: 4,
                players: 4
            })
        );
    }

    #[test]
    #[should_panic(expected = "outside ladder")]
    fn resolve_panics_past_last_line() {
        let _ = resolve(&single_rung(), 9);
    }

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[2, 0, 1]));
        assert!(is_permutation(&[]));
        assert!(!is_permutation(&[0, 0, 1]));
        assert!(!is_permutation(&[0, 3, 1]));
    }
}
