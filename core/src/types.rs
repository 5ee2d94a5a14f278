use ndarray::Array2;

/// Signed coordinate axis. Taps may land off the board, so positions are not
/// restricted to the grid.
pub type Coord = i32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Index into an `Array2`, always in bounds.
pub type Index2 = [usize; 2];

/// Level number, the first level is 1.
pub type Level = u32;

/// Stage number, 0 means "no stage".
pub type StageNumber = u32;

/// Side length of a square board.
pub type Size = u8;

/// Count type used for required taps and taps left.
pub type TapCount = u8;

pub trait ToCoord2 {
    fn to_coord2(self) -> Coord2;
}

impl ToCoord2 for Index2 {
    fn to_coord2(self) -> Coord2 {
        // boards never get anywhere near `Coord::MAX` cells per side
        (self[0] as Coord, self[1] as Coord)
    }
}

/// Converts `coords` into an array index when it lies inside `bounds`.
pub fn checked_index(coords: Coord2, bounds: (usize, usize)) -> Option<Index2> {
    apply_delta(coords, (0, 0), bounds)
}

pub trait WindowIterExt {
    /// Iterates the in-bounds cells of the 3×3 window centred on `center`,
    /// including the centre itself.
    fn iter_window(&self, center: Coord2) -> WindowIter;
}

impl<T> WindowIterExt for Array2<T> {
    fn iter_window(&self, center: Coord2) -> WindowIter {
        WindowIter::new(center, self.dim())
    }
}

const DISPLACEMENTS: [Coord2; 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning an index only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: Coord2, bounds: (usize, usize)) -> Option<Index2> {
    let (row, col) = coords;
    let (dr, dc) = delta;
    let (max_row, max_col) = bounds;

    let next_row = usize::try_from(row.checked_add(dr)?).ok()?;
    if next_row >= max_row {
        return None;
    }

    let next_col = usize::try_from(col.checked_add(dc)?).ok()?;
    if next_col >= max_col {
        return None;
    }

    Some([next_row, next_col])
}

#[derive(Debug)]
pub struct WindowIter {
    center: Coord2,
    bounds: (usize, usize),
    index: u8,
}

impl WindowIter {
    fn new(center: Coord2, bounds: (usize, usize)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for WindowIter {
    type Item = Index2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}
