use ascgrid::AscError;
use geo::geometry::Coord;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlideError {
    #[error("missing required parameter {0}")]
    Builder(&'static str),

    #[error("invalid {name} {value}")]
    Param { name: &'static str, value: f64 },

    #[error("unable to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{0}")]
    Asc(#[from] AscError),

    #[error("home {0:?} is outside the elevation grid")]
    HomeOutside(Coord<f64>),
}
