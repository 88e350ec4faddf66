use ascgrid::Raster;
use geo::geometry::Coord;
use glide::{propagate, GroundStyle, Params, Pos, Window};
use std::{fs, path::Path};

/// 9 x 9 DEM of 50 m cells sloping gently up to the north east, with a
/// 900 m ridge across the whole of row 2.
fn write_dem(path: &Path) {
    let mut asc = String::from(
        "ncols 9\nnrows 9\nxllcorner 600000\nyllcorner 5100000\ncellsize 50\nNODATA_value -9999\n",
    );
    for row in 0..9 {
        let samples: Vec<String> = (0..9)
            .map(|col| {
                if row == 2 {
                    "900".to_owned()
                } else {
                    (400 + 5 * col + 5 * (8 - row)).to_string()
                }
            })
            .collect();
        asc.push_str(&samples.join(" "));
        asc.push('\n');
    }
    fs::write(path, asc).unwrap();
}

fn params() -> Params {
    // Home in the cell at row 6, column 4.
    Params::builder()
        .home(Coord {
            x: 600_225.0,
            y: 5_100_125.0,
        })
        .glide_ratio(25.0)
        .ground_clearance(50.0)
        .safety_margin(100.0)
        .ceiling(1500.0)
        .build()
        .unwrap()
}

#[test]
fn test_compute_and_write_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.asc");
    write_dem(&dem);

    let params = params();
    let mut window = Window::load(&dem, &params).unwrap();
    assert_eq!(window.home(), Pos::new(6, 4));
    let relaxation = propagate(&mut window, &params);
    assert!(relaxation.updates > 0);

    // Home resolves to its clearance-adjusted elevation plus margin.
    let home = window[window.home()];
    assert_eq!(home.altitude, 400.0 + 20.0 + 10.0 + 50.0 + 100.0);

    // The ridge is a relay for everything north of it.
    assert!(window[Pos::new(2, 4)].ground);
    assert_eq!(window[Pos::new(0, 4)].origin, Pos::new(2, 4));

    let zero_path = dir.path().join("output_sub.asc");
    let nodata_path = dir.path().join("local.asc");
    window.raster(GroundStyle::Zero).save(&zero_path).unwrap();
    window.raster(GroundStyle::NoData).save(&nodata_path).unwrap();

    let zero = Raster::load(&zero_path).unwrap();
    let nodata = Raster::load(&nodata_path).unwrap();

    for raster in [&zero, &nodata] {
        assert_eq!(raster.header.ncols, 9);
        assert_eq!(raster.header.nrows, 9);
        assert_eq!(
            raster.header.ll_corner,
            Coord {
                x: 600_000.0,
                y: 5_100_000.0
            }
        );
        assert_eq!(raster.header.nodata, Some(1500.0));
    }

    for (pos, cell) in window.iter() {
        let z = zero.get(pos.row, pos.col).unwrap();
        let n = nodata.get(pos.row, pos.col).unwrap();
        if cell.ground {
            assert_eq!(z, 0.0);
            assert_eq!(n, 1500.0);
        } else {
            assert_eq!(z, cell.altitude);
            assert_eq!(n, cell.altitude);
        }
    }
}

#[test]
fn test_window_corner_is_shifted() {
    let dir = tempfile::tempdir().unwrap();
    let dem = dir.path().join("dem.asc");
    write_dem(&dem);

    // A 4 m ceiling at 25:1 over 50 m cells reaches 2 cells.
    let params = Params::builder()
        .home(Coord {
            x: 600_225.0,
            y: 5_100_125.0,
        })
        .glide_ratio(25.0)
        .ceiling(4.0)
        .build()
        .unwrap();
    let window = Window::load(&dem, &params).unwrap();
    let bounds = window.bounds();
    assert_eq!((bounds.start_row, bounds.end_row), (4, 8));
    assert_eq!((bounds.start_col, bounds.end_col), (2, 6));

    let dir_out = dir.path().join("out.asc");
    window.raster(GroundStyle::Zero).save(&dir_out).unwrap();
    let reloaded = Raster::load(&dir_out).unwrap();
    assert_eq!(
        reloaded.header.ll_corner,
        Coord {
            x: 600_100.0,
            y: 5_100_000.0
        }
    );
    assert_eq!((reloaded.header.ncols, reloaded.header.nrows), (5, 5));
}
