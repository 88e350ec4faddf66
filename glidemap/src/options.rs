use anyhow::{anyhow, Error as AnyError};
use clap::{Args, Parser};
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Generate safe glide altitude maps from ASCII grid elevation data.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub enum Cli {
    /// Compute the altitude map around one landing point.
    Compute(Compute),

    /// Combine previously computed maps into a single raster, keeping
    /// the lowest altitude per cell.
    Merge(Merge),
}

#[derive(Debug, Clone, Args)]
pub struct Compute {
    /// Landing point "x,y", in the DEM's coordinate system.
    #[arg(long, allow_hyphen_values = true)]
    pub home: XY,

    /// Distance covered per unit of altitude lost.
    #[arg(short, long)]
    pub glide_ratio: f64,

    /// Height added to the terrain everywhere.
    #[arg(short = 'c', long, default_value_t = 0.0)]
    pub ground_clearance: f64,

    /// Extra height owed above the glide line.
    #[arg(short = 'm', long, default_value_t = 0.0)]
    pub safety_margin: f64,

    /// Highest altitude of interest, also written as the no-data value.
    #[arg(long)]
    pub ceiling: f64,

    /// Output directory.
    #[arg(short, long)]
    pub out_dir: PathBuf,

    /// Print a JSON run summary to stdout.
    #[arg(long, default_value_t = false)]
    pub summary: bool,

    /// Input elevation grid (.asc).
    pub dem: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct Merge {
    /// Value for cells no input covers.
    #[arg(long)]
    pub nodata: f64,

    /// Output file.
    #[arg(short, long)]
    pub out: PathBuf,

    /// Also write which input supplied each merged cell, by position
    /// on the command line.
    #[arg(short, long)]
    pub sectors: Option<PathBuf>,

    /// Input altitude maps (.asc).
    #[arg(required = true)]
    pub input: Vec<PathBuf>,
}

#[derive(Clone, Debug, Copy)]
pub struct XY(pub Coord<f64>);

impl FromStr for XY {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (x_str, y_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let x = f64::from_str(x_str.trim())?;
        let y = f64::from_str(y_str.trim())?;
        Ok(Self(Coord { x, y }))
    }
}
