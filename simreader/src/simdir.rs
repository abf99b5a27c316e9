// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{Result, SimError};
use crate::gridfunctions::GridFunctionsDir;
use crate::horizons::HorizonsDir;
use crate::scalars::ScalarsDir;
use once_cell::unsync::OnceCell;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Default maximum depth of the directory scan.
pub const DEFAULT_MAX_DEPTH: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanOptions {
    pub max_depth: usize,
    pub ignore_symlinks: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_symlinks: false,
        }
    }
}

/// Output of a simulation, possibly spread over several restarts. The
/// tree is scanned once; each kind of data is indexed the first time it
/// is asked for.
#[derive(Debug)]
pub struct SimDir {
    path: PathBuf,
    files: Vec<PathBuf>,
    scalars: OnceCell<ScalarsDir>,
    horizons: OnceCell<HorizonsDir>,
    gridfunctions: OnceCell<GridFunctionsDir>,
}

impl SimDir {
    pub fn new(path: &Path, opts: ScanOptions) -> Result<SimDir> {
        if !path.is_dir() {
            return Err(SimError::io(
                path,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "not a directory",
                ),
            ));
        }
        let mut files = vec![];
        for entry in WalkDir::new(path)
            .max_depth(opts.max_depth)
            .follow_links(!opts.ignore_symlinks)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        debug!("Found {} file(s) under {}", files.len(), path.display());
        Ok(SimDir {
            path: path.to_path_buf(),
            files,
            scalars: OnceCell::new(),
            horizons: OnceCell::new(),
            gridfunctions: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn timeseries(&self) -> Result<&ScalarsDir> {
        self.scalars.get_or_try_init(|| ScalarsDir::new(&self.files))
    }

    pub fn horizons(&self) -> &HorizonsDir {
        self.horizons.get_or_init(|| HorizonsDir::new(&self.files))
    }

    pub fn gridfunctions(&self) -> Result<&GridFunctionsDir> {
        self.gridfunctions
            .get_or_try_init(|| GridFunctionsDir::new(&self.files))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::geometry::Plane;
    use crate::scalars::Reduction;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn restarts_are_scanned_in_order() {
        let dir = tempdir().unwrap();
        for (restart, rows) in
            [("output-0001", "1 1.0 3.0\n"), ("output-0000", "0 0.0 2.0\n1 1.0 9.0\n")]
        {
            let sub = dir.path().join(restart).join("sim");
            fs::create_dir_all(&sub).unwrap();
            fs::write(sub.join("rho.maximum.asc"), rows).unwrap();
            fs::write(sub.join("BH_diagnostics.ah1.gp"), "").unwrap();
        }
        let sim = SimDir::new(dir.path(), ScanOptions::default()).unwrap();
        assert_eq!(sim.files().len(), 4);
        let rho = sim
            .timeseries()
            .unwrap()
            .reduction(Reduction::Maximum)
            .get("rho")
            .unwrap();
        assert_eq!(rho.y(), &[2.0, 3.0]);
        assert_eq!(sim.horizons().available_apparent_horizons(), vec![1]);
        assert!(sim
            .gridfunctions()
            .unwrap()
            .plane(Plane::Xy)
            .available_variables()
            .is_empty());
    }

    #[test]
    fn depth_limit_is_honoured() {
        let dir = tempdir().unwrap();
        let deep = dir.path().join("a").join("b").join("c");
        fs::create_dir_all(&deep).unwrap();
        fs::write(deep.join("mass.asc"), "0 0 1\n").unwrap();
        let opts = ScanOptions {
            max_depth: 2,
            ..ScanOptions::default()
        };
        assert!(SimDir::new(dir.path(), opts).unwrap().files().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        let err = SimDir::new(&dir.path().join("nope"), ScanOptions::default());
        assert!(matches!(err, Err(SimError::Io { .. })));
    }
}
