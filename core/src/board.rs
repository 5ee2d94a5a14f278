use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of panels, indexed `[row, col]`.
///
/// Serialized as a list of rows so that a board reads the same in JSON as it
/// does on screen, e.g. `[["O","X"],["X","X"]]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Panel>>", into = "Vec<Vec<Panel>>")]
pub struct Board {
    panels: Array2<Panel>,
}

impl Board {
    /// All-`O` board.
    pub fn new(size: Size) -> Self {
        Self::filled(size, Panel::O)
    }

    pub fn filled(size: Size, panel: Panel) -> Self {
        let size = usize::from(size);
        Self {
            panels: Array2::from_elem((size, size), panel),
        }
    }

    /// Builds a board from its rows, rejecting jagged or non-square input.
    pub fn from_rows(rows: Vec<Vec<Panel>>) -> Result<Self> {
        let size = rows.len();
        if rows.iter().any(|row| row.len() != size) {
            return Err(GameError::InvalidBoardShape);
        }

        let flat: Vec<Panel> = rows.into_iter().flatten().collect();
        let panels = Array2::from_shape_vec((size, size), flat)
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self { panels })
    }

    pub fn rows(&self) -> Vec<Vec<Panel>> {
        self.panels.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn size(&self) -> usize {
        self.panels.nrows()
    }

    pub fn total_cells(&self) -> usize {
        self.panels.len()
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Index2> {
        checked_index(coords, self.panels.dim()).ok_or(GameError::InvalidCoords)
    }

    pub fn panel_at(&self, coords: Coord2) -> Option<Panel> {
        checked_index(coords, self.panels.dim()).map(|index| self.panels[index])
    }

    pub fn count(&self, panel: Panel) -> usize {
        self.panels.iter().filter(|&&p| p == panel).count()
    }

    /// Number of cells that differ, or `None` when the boards differ in size.
    pub fn count_differences(&self, other: &Board) -> Option<usize> {
        if self.panels.dim() != other.panels.dim() {
            return None;
        }
        Some(
            self.panels
                .iter()
                .zip(other.panels.iter())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }

    /// Inverts every in-bounds panel of the 3×3 window centred on `center`.
    ///
    /// The centre itself may lie off the board, in which case only the part of
    /// the window overlapping the board is flipped.
    pub fn flip(&mut self, center: Coord2) {
        for index in self.panels.iter_window(center) {
            self.panels[index] = self.panels[index].flipped();
        }
    }

    /// Copy of this board with the window at `center` flipped.
    pub fn flipped(&self, center: Coord2) -> Self {
        let mut board = self.clone();
        board.flip(center);
        board
    }

    pub(crate) fn indexed_cells(&self) -> impl Iterator<Item = Index2> + use<> {
        let (rows, cols) = self.panels.dim();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| [row, col]))
    }
}

/// Returns a new board with the panel at `(row, col)` and its up to eight
/// neighbours inverted. The input board is left untouched.
pub fn flip_panels(board: &Board, row: Coord, col: Coord) -> Board {
    board.flipped((row, col))
}

/// True when both boards have the same size and identical panels.
pub fn boards_equal(a: &Board, b: &Board) -> bool {
    a == b
}

impl Index<Index2> for Board {
    type Output = Panel;

    fn index(&self, index: Index2) -> &Self::Output {
        &self.panels[index]
    }
}

impl TryFrom<Vec<Vec<Panel>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Panel>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Panel>> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.panels.rows().into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for panel in row {
                write!(f, "{panel}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GameError;

    /// Parses one row per line, ignoring blank lines and surrounding spaces.
    fn from_str(s: &str) -> Result<Self> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(Panel::try_from).collect::<Result<Vec<_>>>())
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(rows)
    }
}
