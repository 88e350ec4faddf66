use crate::{AscError, AscReader, Header, C};
use log::debug;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// An in-memory `.asc` raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub header: Header,

    /// Row-major samples, north to south.
    pub samples: Vec<C>,
}

impl Raster {
    pub fn new(header: Header, samples: Vec<C>) -> Result<Self, AscError> {
        if samples.len() == header.len() {
            Ok(Self { header, samples })
        } else {
            Err(AscError::SampleCount {
                expected: header.len(),
                found: samples.len(),
            })
        }
    }

    /// Returns a raster read from the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AscError> {
        debug!("loading {:?}", path.as_ref());
        let file = BufReader::new(File::open(path)?);
        AscReader::new(file)?.read_all()
    }

    /// Writes this raster to `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), AscError> {
        debug!("writing {:?}", path.as_ref());
        let mut file = BufWriter::new(File::create(path)?);
        self.write(&mut file)?;
        file.flush()?;
        Ok(())
    }

    /// Writes this raster in `.asc` format.
    ///
    /// Samples are formatted with the shortest representation that
    /// parses back to the identical value.
    pub fn write<W: Write>(&self, mut out: W) -> Result<(), AscError> {
        writeln!(out, "{}", self.header)?;
        for row in self.samples.chunks_exact(self.header.ncols) {
            let mut samples = row.iter();
            if let Some(first) = samples.next() {
                write!(out, "{first}")?;
            }
            for sample in samples {
                write!(out, " {sample}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Returns the sample at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<C> {
        if row < self.header.nrows && col < self.header.ncols {
            Some(self.samples[row * self.header.ncols + col])
        } else {
            None
        }
    }
}
