use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// One generated puzzle: turn `initial_board` into `target_board` with exactly
/// `required_taps` taps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    level: Level,
    size: Size,
    initial_board: Board,
    target_board: Board,
    required_taps: TapCount,
    solution: Vec<Coord2>,
}

impl Problem {
    pub(crate) fn new(
        level: Level,
        size: Size,
        initial_board: Board,
        target_board: Board,
        solution: Vec<Coord2>,
    ) -> Self {
        Self {
            level,
            size,
            initial_board,
            target_board,
            // the generator draws at most `TapCount::MAX` taps
            required_taps: solution.len() as TapCount,
            solution,
        }
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    pub fn target_board(&self) -> &Board {
        &self.target_board
    }

    pub fn required_taps(&self) -> TapCount {
        self.required_taps
    }

    /// Distinct taps that were used to scramble the initial board. Applying
    /// them in any order to the initial board yields the target.
    ///
    /// Not necessarily the shortest solution.
    pub fn solution(&self) -> &[Coord2] {
        &self.solution
    }

    pub fn is_solved_by(&self, board: &Board) -> bool {
        boards_equal(board, &self.target_board)
    }
}
