use crate::{options::Merge, progress};
use anyhow::{Context, Result};
use ascgrid::{mosaic, Raster};
use log::info;
use rayon::prelude::*;

impl Merge {
    pub fn run(&self) -> Result<()> {
        let pb = progress::bar("Loading altitude maps".to_string(), self.input.len() as u64)?;

        let rasters = self
            .input
            .par_iter()
            .map(|path| {
                let raster = Raster::load(path).with_context(|| format!("loading {path:?}"));
                pb.inc(1);
                raster
            })
            .collect::<Result<Vec<Raster>>>()?;
        pb.finish_and_clear();

        let merged = mosaic(&rasters, self.nodata)?;
        info!(
            "merged {} maps into {}x{}",
            rasters.len(),
            merged.altitude.header.nrows,
            merged.altitude.header.ncols
        );
        merged
            .altitude
            .save(&self.out)
            .with_context(|| format!("writing {:?}", self.out))?;

        if let Some(sectors) = &self.sectors {
            merged
                .sectors
                .save(sectors)
                .with_context(|| format!("writing {sectors:?}"))?;
            info!("wrote sectors to {sectors:?}");
        }
        Ok(())
    }
}
