use crate::{Params, C};

/// Position of a cell inside a [`Window`](crate::Window).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Per-cell propagation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Terrain height plus ground clearance.
    pub elevation: C,

    /// Lowest altitude found so far from which home is reachable.
    pub altitude: C,

    /// Cell whose position and altitude justify `altitude`.
    pub origin: Pos,

    /// Set when the glide from `origin` would meet the terrain here;
    /// `altitude` is then pinned to `elevation`.
    pub ground: bool,
}

impl Cell {
    /// Returns an unresolved cell standing at `elevation`.
    pub fn unresolved(pos: Pos, elevation: C, ceiling: C) -> Self {
        Self {
            elevation,
            altitude: ceiling,
            origin: pos,
            ground: false,
        }
    }

    /// Returns the altitude required to glide `distance` to a point at
    /// `origin_altitude`, never less than this cell's elevation.
    ///
    /// The second value is true when the terrain floor won.
    pub fn candidate(&self, origin_altitude: C, distance: C, params: &Params) -> (C, bool) {
        let glide = origin_altitude + distance / params.glide_ratio + params.safety_margin;
        if glide <= self.elevation {
            (self.elevation, true)
        } else {
            (glide, false)
        }
    }

    /// Adopts `origin` if it yields a strictly lower altitude.
    ///
    /// Returns true if this cell changed.
    pub fn calculate(
        &mut self,
        origin: Pos,
        origin_altitude: C,
        distance: C,
        params: &Params,
    ) -> bool {
        let (altitude, ground) = self.candidate(origin_altitude, distance, params);
        if altitude < self.altitude {
            self.altitude = altitude;
            self.origin = origin;
            self.ground = ground;
            true
        } else {
            false
        }
    }

    /// Returns true if no usable altitude has been found for this cell.
    pub fn is_unresolved(&self, ceiling: C) -> bool {
        self.altitude >= ceiling
    }
}
