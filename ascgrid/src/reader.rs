use crate::{AscError, Bounds, Header, Raster, C};
use geo::geometry::Coord;
use log::debug;
use std::{
    io::{BufRead, Lines},
    str::FromStr,
};

const NODATA_KEY: &str = "NODATA_value";

/// Streaming `.asc` reader.
///
/// The header is parsed up front; samples are only parsed for the
/// rows and columns actually requested.
pub struct AscReader<R> {
    header: Header,

    lines: Lines<R>,

    /// First data row, when the optional `NODATA_value` line is absent.
    pending: Option<String>,
}

impl<R: BufRead> AscReader<R> {
    /// Parses the header from `reader`.
    pub fn new(reader: R) -> Result<Self, AscError> {
        let mut lines = reader.lines();

        let ncols: usize = header_field(&mut lines, "ncols")?;
        let nrows: usize = header_field(&mut lines, "nrows")?;
        let x: C = header_field(&mut lines, "xllcorner")?;
        let y: C = header_field(&mut lines, "yllcorner")?;
        let cellsize: C = header_field(&mut lines, "cellsize")?;

        if ncols == 0 {
            return Err(AscError::HeaderValue {
                key: "ncols",
                value: ncols.to_string(),
            });
        }
        if nrows == 0 {
            return Err(AscError::HeaderValue {
                key: "nrows",
                value: nrows.to_string(),
            });
        }
        if !(cellsize.is_finite() && cellsize > 0.0) {
            return Err(AscError::HeaderValue {
                key: "cellsize",
                value: cellsize.to_string(),
            });
        }

        let (nodata, pending) = match lines.next().transpose()? {
            Some(line) if is_key(&line, NODATA_KEY) => {
                let value = parse_value(&line, NODATA_KEY)?;
                (Some(value), None)
            }
            other => (None, other),
        };

        let header = Header {
            ncols,
            nrows,
            ll_corner: Coord { x, y },
            cellsize,
            nodata,
        };
        debug!("asc header; {header:?}");

        Ok(Self {
            header,
            lines,
            pending,
        })
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Reads the samples inside `bounds`, in row-major order.
    ///
    /// Rows above the window are skipped without being parsed, as are
    /// the columns left of it. Rows below the window are only counted,
    /// so a file holding fewer rows than its header promises is still
    /// rejected.
    pub fn read_window(mut self, bounds: Bounds) -> Result<Vec<C>, AscError> {
        if !bounds.fits(&self.header) {
            return Err(AscError::Bounds);
        }

        let mut samples = Vec::with_capacity(bounds.nrows() * bounds.ncols());

        for row in 0..=bounds.end_row {
            let line = self.next_row(row)?;
            if row < bounds.start_row {
                continue;
            }

            let mut tokens = line.split_whitespace().skip(bounds.start_col);
            for col in bounds.start_col..=bounds.end_col {
                let token = tokens.next().ok_or(AscError::ShortRow { row, col })?;
                let sample = token
                    .parse::<C>()
                    .ok()
                    .filter(|sample| sample.is_finite())
                    .ok_or_else(|| AscError::Sample {
                        row,
                        col,
                        value: token.to_owned(),
                    })?;
                samples.push(sample);
            }
        }

        for row in bounds.end_row + 1..self.header.nrows {
            self.next_row(row)?;
        }

        Ok(samples)
    }

    /// Reads every sample.
    pub fn read_all(self) -> Result<Raster, AscError> {
        let header = self.header.clone();
        let samples = self.read_window(Bounds::full(&header))?;
        Raster::new(header, samples)
    }
}

/// Private API
impl<R: BufRead> AscReader<R> {
    fn next_row(&mut self, row: usize) -> Result<String, AscError> {
        if let Some(line) = self.pending.take() {
            return Ok(line);
        }
        self.lines.next().transpose()?.ok_or(AscError::MissingRow(row))
    }
}

fn header_field<R, T>(lines: &mut Lines<R>, key: &'static str) -> Result<T, AscError>
where
    R: BufRead,
    T: FromStr,
{
    let line = lines.next().transpose()?.ok_or(AscError::MissingHeader(key))?;
    if !is_key(&line, key) {
        return Err(AscError::HeaderLine { key, line });
    }
    parse_value(&line, key)
}

fn is_key(line: &str, key: &str) -> bool {
    line.split_whitespace()
        .next()
        .map_or(false, |name| name.eq_ignore_ascii_case(key))
}

fn parse_value<T: FromStr>(line: &str, key: &'static str) -> Result<T, AscError> {
    let value = line.split_whitespace().nth(1).unwrap_or_default();
    value.parse().map_err(|_| AscError::HeaderValue {
        key,
        value: value.to_owned(),
    })
}
