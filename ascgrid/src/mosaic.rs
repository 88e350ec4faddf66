//! Recombination of windowed rasters into one.

use crate::{AscError, Header, Raster, C};
use geo::geometry::Coord;
use log::debug;

/// Result of [`mosaic`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mosaic {
    /// Lowest altitude per cell; ground and uncovered cells hold
    /// no-data.
    pub altitude: Raster,

    /// Index of the input that supplied each `altitude` cell; no-data
    /// where an input reported ground or no input won.
    pub sectors: Raster,
}

/// Merges `rasters` into a single raster covering their union extent.
///
/// Every output cell holds the minimum of the overlapping input
/// samples. Input no-data samples and samples equal to `nodata` are
/// ignored, cells no input covers are set to `nodata`, and ground
/// (`0`) cells become `nodata` once all inputs are merged. All inputs
/// must share one cell size.
#[allow(clippy::cast_precision_loss)]
pub fn mosaic(rasters: &[Raster], nodata: C) -> Result<Mosaic, AscError> {
    let first = rasters.first().ok_or(AscError::EmptyMosaic)?;
    let cellsize = first.header.cellsize;

    if let Some(other) = rasters.iter().find(|r| r.header.cellsize != cellsize) {
        return Err(AscError::CellSize {
            expected: cellsize,
            found: other.header.cellsize,
        });
    }

    let extent = |h: &Header| {
        let w = h.ll_corner.x;
        let s = h.ll_corner.y;
        (w, s, w + h.ncols as C * cellsize, s + h.nrows as C * cellsize)
    };

    let (mut min_x, mut min_y, mut max_x, mut max_y) = extent(&first.header);
    for raster in &rasters[1..] {
        let (w, s, e, n) = extent(&raster.header);
        min_x = min_x.min(w);
        min_y = min_y.min(s);
        max_x = max_x.max(e);
        max_y = max_y.max(n);
    }

    let header = Header {
        ncols: cells_between(min_x, max_x, cellsize),
        nrows: cells_between(min_y, max_y, cellsize),
        ll_corner: Coord { x: min_x, y: min_y },
        cellsize,
        nodata: Some(nodata),
    };
    debug!("mosaic; inputs: {}, header: {header:?}", rasters.len());

    let mut samples = vec![nodata; header.len()];
    let mut sectors = vec![nodata; header.len()];

    for (sector, raster) in rasters.iter().enumerate() {
        let h = &raster.header;
        let row_offset = cells_between(h.ll_corner.y + h.nrows as C * cellsize, max_y, cellsize);
        let col_offset = cells_between(min_x, h.ll_corner.x, cellsize);
        for (row, line) in raster.samples.chunks_exact(h.ncols).enumerate() {
            let start = (row_offset + row) * header.ncols + col_offset;
            let out = samples[start..start + h.ncols].iter_mut();
            let won = sectors[start..start + h.ncols].iter_mut();
            for ((dst, owner), &src) in out.zip(won).zip(line) {
                if Some(src) == h.nodata || src == nodata {
                    continue;
                }
                if src < *dst {
                    *dst = src;
                    *owner = sector as C;
                }
                if src == 0.0 {
                    *owner = nodata;
                }
            }
        }
    }

    for sample in samples.iter_mut().filter(|sample| **sample == 0.0) {
        *sample = nodata;
    }

    Ok(Mosaic {
        altitude: Raster::new(header.clone(), samples)?,
        sectors: Raster::new(header, sectors)?,
    })
}

/// Whole number of cells spanning `from..to`.
///
/// Rounded rather than truncated so that corners which are exact
/// multiples of the cell size survive float error.
fn cells_between(from: C, to: C, cellsize: C) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cells = ((to - from) / cellsize).round().max(0.0) as usize;
    cells
}
