//! ESRI ASCII grid (`.asc`) elevation rasters.
//!
//! The format is a short `<key> <value>` header followed by `nrows`
//! lines of `ncols` whitespace separated samples, north to south:
//!
//! ```text
//! ncols 4
//! nrows 2
//! xllcorner 500000
//! yllcorner 4800000
//! cellsize 25
//! NODATA_value -9999
//! 101 102 103 104
//! 100 101 102 103
//! ```
//!
//! # References
//!
//! 1. [Esri ASCII raster format](https://desktop.arcgis.com/en/arcmap/latest/manage-data/raster-and-images/esri-ascii-raster-format.htm)

mod error;
mod header;
mod mosaic;
mod raster;
mod reader;

pub use crate::{
    error::AscError,
    header::{Bounds, Header},
    mosaic::{mosaic, Mosaic},
    raster::Raster,
    reader::AscReader,
};

/// Base floating point type used for coordinates and samples.
pub type C = f64;
