use crate::{GlideError, C};
use geo::geometry::Coord;

/// Run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    /// Landing point, in the DEM's coordinate reference system.
    pub home: Coord<C>,

    /// Horizontal distance covered per unit of altitude lost.
    pub glide_ratio: C,

    /// Height added to every terrain sample before propagation.
    pub ground_clearance: C,

    /// Extra height owed above the glide line.
    pub safety_margin: C,

    /// Highest altitude of interest. Also the "unresolved" and no-data
    /// value, and what bounds the working window.
    pub ceiling: C,
}

impl Params {
    pub fn builder() -> ParamsBuilder {
        ParamsBuilder {
            home: None,
            glide_ratio: None,
            ground_clearance: 0.0,
            safety_margin: 0.0,
            ceiling: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParamsBuilder {
    home: Option<Coord<C>>,
    glide_ratio: Option<C>,
    ground_clearance: C,
    safety_margin: C,
    ceiling: Option<C>,
}

impl ParamsBuilder {
    pub fn home(mut self, coord: Coord<C>) -> Self {
        self.home = Some(coord);
        self
    }

    pub fn glide_ratio(mut self, ratio: C) -> Self {
        self.glide_ratio = Some(ratio);
        self
    }

    pub fn ground_clearance(mut self, height: C) -> Self {
        self.ground_clearance = height;
        self
    }

    pub fn safety_margin(mut self, height: C) -> Self {
        self.safety_margin = height;
        self
    }

    pub fn ceiling(mut self, altitude: C) -> Self {
        self.ceiling = Some(altitude);
        self
    }

    pub fn build(&self) -> Result<Params, GlideError> {
        let home = self.home.ok_or(GlideError::Builder("home"))?;
        let glide_ratio = self.glide_ratio.ok_or(GlideError::Builder("glide_ratio"))?;
        let ceiling = self.ceiling.ok_or(GlideError::Builder("ceiling"))?;

        if !(home.x.is_finite() && home.y.is_finite()) {
            return Err(GlideError::HomeOutside(home));
        }
        positive("glide_ratio", glide_ratio)?;
        positive("ceiling", ceiling)?;
        non_negative("ground_clearance", self.ground_clearance)?;
        non_negative("safety_margin", self.safety_margin)?;

        Ok(Params {
            home,
            glide_ratio,
            ground_clearance: self.ground_clearance,
            safety_margin: self.safety_margin,
            ceiling,
        })
    }
}

fn positive(name: &'static str, value: C) -> Result<(), GlideError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GlideError::Param { name, value })
    }
}

fn non_negative(name: &'static str, value: C) -> Result<(), GlideError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GlideError::Param { name, value })
    }
}
