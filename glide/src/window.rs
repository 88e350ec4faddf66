//! Working subset of a DEM around home.

use crate::{Cell, GlideError, Params, Pos, C};
use ascgrid::{AscReader, Bounds, Header, Raster};
use log::debug;
use std::{fs::File, io::BufRead, io::BufReader, path::Path};

/// How to render cells in terrain contact when exporting a raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundStyle {
    /// Settled cells are written as `0`.
    ///
    /// Suits recombining several homes with a per-cell minimum.
    Zero,

    /// Cells in terrain contact are written as the no-data value so the
    /// ground shows through.
    NoData,
}

/// Cell counts of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Cells with an altitude below the ceiling, settled ones included.
    pub resolved: usize,

    /// Cells pinned to the terrain.
    pub ground: usize,

    /// Cells still at the ceiling.
    pub unresolved: usize,
}

pub struct Window {
    /// Header of the full DEM this window was cut from.
    dem: Header,

    /// Position of this window inside the full DEM.
    bounds: Bounds,

    nrows: usize,
    ncols: usize,
    home: Pos,
    ceiling: C,

    /// Row-major cells.
    cells: Vec<Cell>,
}

impl Window {
    /// Returns the window around `params.home` loaded from the `.asc`
    /// file at `path`.
    pub fn load<P: AsRef<Path>>(path: P, params: &Params) -> Result<Self, GlideError> {
        let file = File::open(path.as_ref()).map_err(|source| GlideError::Open {
            path: path.as_ref().to_owned(),
            source,
        })?;
        debug!("loading {:?}", path.as_ref());
        Self::from_reader(BufReader::new(file), params)
    }

    /// Returns the window around `params.home` read from `.asc` data.
    ///
    /// Only rows and columns within reach of home at the ceiling
    /// altitude are parsed.
    pub fn from_reader<R: BufRead>(reader: R, params: &Params) -> Result<Self, GlideError> {
        let reader = AscReader::new(reader)?;
        let dem = reader.header().clone();

        let (home_row, home_col) = dem
            .coord_to_rc(params.home)
            .ok_or(GlideError::HomeOutside(params.home))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let radius = (params.ceiling * params.glide_ratio / dem.cellsize) as usize;
        let bounds = Bounds::around((home_row, home_col), radius, &dem);
        debug!("window; radius: {radius}, bounds: {bounds:?}");

        let elevations = reader.read_window(bounds)?;
        let home = Pos::new(home_row - bounds.start_row, home_col - bounds.start_col);
        Ok(Self::new(dem, bounds, home, &elevations, params))
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    pub fn home(&self) -> Pos {
        self.home
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn ceiling(&self) -> C {
        self.ceiling
    }

    pub fn cellsize(&self) -> C {
        self.dem.cellsize
    }

    /// Returns the ground distance between the centers of `a` and `b`.
    #[allow(clippy::cast_precision_loss)]
    pub fn distance(&self, a: Pos, b: Pos) -> C {
        let d_row = a.row.abs_diff(b.row) as C;
        let d_col = a.col.abs_diff(b.col) as C;
        d_row.hypot(d_col) * self.dem.cellsize
    }

    /// Returns the orthogonal neighbours of `pos`.
    pub fn neighbours(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        let Pos { row, col } = pos;
        let (nrows, ncols) = (self.nrows, self.ncols);
        [
            row.checked_sub(1).map(|row| Pos::new(row, col)),
            (row + 1 < nrows).then(|| Pos::new(row + 1, col)),
            col.checked_sub(1).map(|col| Pos::new(row, col)),
            (col + 1 < ncols).then(|| Pos::new(row, col + 1)),
        ]
        .into_iter()
        .flatten()
    }

    /// Returns an iterator over every cell and its position.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        let ncols = self.ncols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Pos::new(idx / ncols, idx % ncols), cell))
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for cell in &self.cells {
            if cell.is_unresolved(self.ceiling) {
                summary.unresolved += 1;
            } else {
                summary.resolved += 1;
            }
            if cell.ground {
                summary.ground += 1;
            }
        }
        summary
    }

    /// Renders required altitudes as a raster positioned inside the
    /// full DEM, with the ceiling as no-data value.
    pub fn raster(&self, style: GroundStyle) -> Raster {
        let mut header = self.dem.window(self.bounds);
        header.nodata = Some(self.ceiling);

        let samples = self
            .cells
            .iter()
            .map(|cell| match style {
                GroundStyle::Zero if cell.ground => 0.0,
                GroundStyle::NoData if cell.ground || cell.altitude <= cell.elevation => {
                    self.ceiling
                }
                _ => cell.altitude,
            })
            .collect();

        Raster { header, samples }
    }
}

/// Private API
impl Window {
    fn new(dem: Header, bounds: Bounds, home: Pos, elevations: &[C], params: &Params) -> Self {
        let (nrows, ncols) = (bounds.nrows(), bounds.ncols());
        debug_assert_eq!(elevations.len(), nrows * ncols);

        let mut cells: Vec<Cell> = elevations
            .iter()
            .enumerate()
            .map(|(idx, elevation)| {
                let pos = Pos::new(idx / ncols, idx % ncols);
                Cell::unresolved(pos, elevation + params.ground_clearance, params.ceiling)
            })
            .collect();

        let home_cell = &mut cells[home.row * ncols + home.col];
        home_cell.altitude = home_cell.elevation + params.safety_margin;
        home_cell.origin = home;

        Self {
            dem,
            bounds,
            nrows,
            ncols,
            home,
            ceiling: params.ceiling,
            cells,
        }
    }
}

impl std::ops::Index<Pos> for Window {
    type Output = Cell;

    fn index(&self, Pos { row, col }: Pos) -> &Self::Output {
        &self.cells[row * self.ncols + col]
    }
}

impl std::ops::IndexMut<Pos> for Window {
    fn index_mut(&mut self, Pos { row, col }: Pos) -> &mut Self::Output {
        &mut self.cells[row * self.ncols + col]
    }
}
