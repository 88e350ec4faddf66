//! Bresenham walk between two grid cells.

use crate::Pos;

/// Iterator over the cells of a straight line from `start` to `end`,
/// both included.
pub struct GridLine {
    row: isize,
    col: isize,
    d_row: isize,
    d_col: isize,
    step_row: isize,
    step_col: isize,
    err: isize,
    remaining: usize,
}

impl GridLine {
    #[allow(clippy::cast_possible_wrap)]
    pub fn new(start: Pos, end: Pos) -> Self {
        let (row, col) = (start.row as isize, start.col as isize);
        let (end_row, end_col) = (end.row as isize, end.col as isize);
        let d_row = (end_row - row).abs();
        let d_col = (end_col - col).abs();
        #[allow(clippy::cast_sign_loss)]
        let remaining = d_row.max(d_col) as usize + 1;
        Self {
            row,
            col,
            d_row,
            d_col,
            step_row: if row < end_row { 1 } else { -1 },
            step_col: if col < end_col { 1 } else { -1 },
            err: d_col - d_row,
            remaining,
        }
    }
}

impl Iterator for GridLine {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        #[allow(clippy::cast_sign_loss)]
        let current = Pos::new(self.row as usize, self.col as usize);

        // Advance along the major axis every time, and along the minor
        // axis whenever the accumulated error crosses half a cell.
        let e2 = 2 * self.err;
        if e2 > -self.d_row {
            self.err -= self.d_row;
            self.col += self.step_col;
        }
        if e2 < self.d_col {
            self.err += self.d_col;
            self.row += self.step_row;
        }

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for GridLine {}
