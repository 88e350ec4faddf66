use crate::options::Compute;
use anyhow::Result;
use glide::{propagate, GroundStyle, Params, Relaxation, Window};
use log::{error, info};
use serde::Serialize;
use std::path::Path;

/// Ground cells written as `0`, for recombining several homes.
const MERGEABLE_NAME: &str = "output_sub.asc";

/// Ground cells written as no-data.
const LOCAL_NAME: &str = "local.asc";

impl Compute {
    pub fn run(&self) -> Result<()> {
        let params = Params::builder()
            .home(self.home.0)
            .glide_ratio(self.glide_ratio)
            .ground_clearance(self.ground_clearance)
            .safety_margin(self.safety_margin)
            .ceiling(self.ceiling)
            .build()?;

        let mut window = Window::load(&self.dem, &params)?;
        info!(
            "computing {}x{} window around {:?}",
            window.nrows(),
            window.ncols(),
            params.home
        );

        let relaxation = propagate(&mut window, &params);
        let summary = RunSummary::new(&window, relaxation);
        info!(
            "done; resolved: {}, ground: {}, unresolved: {}",
            summary.resolved, summary.ground, summary.unresolved
        );

        if let Err(e) = std::fs::create_dir_all(&self.out_dir) {
            error!("unable to create {:?}: {e}", self.out_dir);
        }
        write(&window, GroundStyle::Zero, &self.out_dir.join(MERGEABLE_NAME));
        write(&window, GroundStyle::NoData, &self.out_dir.join(LOCAL_NAME));

        if self.summary {
            let json = serde_json::to_string(&summary)?;
            println!("{json}");
        }

        Ok(())
    }
}

/// Failing to write one output does not abort the other.
fn write(window: &Window, style: GroundStyle, path: &Path) {
    match window.raster(style).save(path) {
        Ok(()) => info!("wrote {path:?}"),
        Err(e) => error!("unable to write {path:?}: {e}"),
    }
}

#[derive(Debug, Serialize)]
struct RunSummary {
    /// Window rows in the source DEM, inclusive.
    rows: [usize; 2],

    /// Window columns in the source DEM, inclusive.
    cols: [usize; 2],

    /// Home position inside the window, as (row, col).
    home: [usize; 2],

    home_altitude: f64,
    resolved: usize,
    ground: usize,
    unresolved: usize,
    edges: usize,
    updates: usize,
}

impl RunSummary {
    fn new(window: &Window, relaxation: Relaxation) -> Self {
        let bounds = window.bounds();
        let home = window.home();
        let cells = window.summary();
        Self {
            rows: [bounds.start_row, bounds.end_row],
            cols: [bounds.start_col, bounds.end_col],
            home: [home.row, home.col],
            home_altitude: window[home].altitude,
            resolved: cells.resolved,
            ground: cells.ground,
            unresolved: cells.unresolved,
            edges: relaxation.edges,
            updates: relaxation.updates,
        }
    }
}
