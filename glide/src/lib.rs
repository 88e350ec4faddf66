//! Safe glide altitude maps.
//!
//! For every cell of an elevation window around a landing point
//! ("home"), compute the lowest altitude from which a glider can reach
//! home at a fixed glide ratio without hitting terrain. Where a ridge
//! blocks the straight glide home, the ridge itself becomes the
//! reference point for the cells behind it.

mod cell;
mod error;
mod math;
mod params;
mod propagate;
mod visibility;
mod window;

pub use crate::{
    cell::{Cell, Pos},
    error::GlideError,
    params::{Params, ParamsBuilder},
    propagate::{propagate, Relaxation},
    visibility::is_in_view,
    window::{GroundStyle, Summary, Window},
};

/// Floating point type used for altitudes, elevations and distances.
pub type C = ascgrid::C;
