use crate::C;
use geo::geometry::Coord;
use std::fmt;

/// Grid geometry shared by every `.asc` file.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Number of columns.
    pub ncols: usize,

    /// Number of rows.
    pub nrows: usize,

    /// Lower-left corner of the grid (`xllcorner`, `yllcorner`).
    pub ll_corner: Coord<C>,

    /// Edge length of one cell, in the same unit as the corner.
    pub cellsize: C,

    /// Sample value meaning "no data", if the file declares one.
    pub nodata: Option<C>,
}

impl Header {
    /// Returns the `(row, col)` containing `coord`.
    ///
    /// Rows are counted from the top (north) edge and columns from the
    /// left (west) edge.
    pub fn coord_to_rc(&self, coord: Coord<C>) -> Option<(usize, usize)> {
        let col = ((coord.x - self.ll_corner.x) / self.cellsize).floor();
        let row_from_bottom = ((coord.y - self.ll_corner.y) / self.cellsize).floor();
        #[allow(clippy::cast_precision_loss)]
        let (ncols, nrows) = (self.ncols as C, self.nrows as C);
        if (0.0..ncols).contains(&col) && (0.0..nrows).contains(&row_from_bottom) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let (row_from_bottom, col) = (row_from_bottom as usize, col as usize);
            Some((self.nrows - 1 - row_from_bottom, col))
        } else {
            None
        }
    }

    /// Returns the number of samples described by this header.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Returns the header of the sub-grid covered by `bounds`.
    pub fn window(&self, bounds: Bounds) -> Header {
        #[allow(clippy::cast_precision_loss)]
        let ll_corner = Coord {
            x: self.ll_corner.x + bounds.start_col as C * self.cellsize,
            y: self.ll_corner.y + (self.nrows - 1 - bounds.end_row) as C * self.cellsize,
        };
        Header {
            ncols: bounds.ncols(),
            nrows: bounds.nrows(),
            ll_corner,
            cellsize: self.cellsize,
            nodata: self.nodata,
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ncols {}", self.ncols)?;
        writeln!(f, "nrows {}", self.nrows)?;
        writeln!(f, "xllcorner {}", self.ll_corner.x)?;
        writeln!(f, "yllcorner {}", self.ll_corner.y)?;
        write!(f, "cellsize {}", self.cellsize)?;
        if let Some(nodata) = self.nodata {
            write!(f, "\nNODATA_value {nodata}")?;
        }
        Ok(())
    }
}

/// Inclusive row/column range of a window inside a larger grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start_row: usize,
    pub end_row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

impl Bounds {
    /// Returns the bounds covering the whole grid.
    pub fn full(header: &Header) -> Self {
        Self {
            start_row: 0,
            end_row: header.nrows.saturating_sub(1),
            start_col: 0,
            end_col: header.ncols.saturating_sub(1),
        }
    }

    /// Returns the square of `radius` cells around `(row, col)`,
    /// clamped to the grid described by `header`.
    pub fn around((row, col): (usize, usize), radius: usize, header: &Header) -> Self {
        Self {
            start_row: row.saturating_sub(radius),
            end_row: row.saturating_add(radius).min(header.nrows - 1),
            start_col: col.saturating_sub(radius),
            end_col: col.saturating_add(radius).min(header.ncols - 1),
        }
    }

    pub fn nrows(&self) -> usize {
        self.end_row - self.start_row + 1
    }

    pub fn ncols(&self) -> usize {
        self.end_col - self.start_col + 1
    }

    /// Returns true if these bounds lie inside the grid.
    pub fn fits(&self, header: &Header) -> bool {
        self.start_row <= self.end_row
            && self.start_col <= self.end_col
            && self.end_row < header.nrows
            && self.end_col < header.ncols
    }
}
