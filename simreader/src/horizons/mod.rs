// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Apparent horizons found by `AHFinderDirect`.

pub mod shape;

use crate::error::{Result, SimError};
use crate::hardio::visit_rows;
use crate::math::geometry::Plane;
use crate::timeseries::TimeSeries;
use once_cell::sync::Lazy;
use regex::Regex;
use shape::Shape;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Columns of `BH_diagnostics.ah<N>.gp`, in file order.
pub const DIAGNOSTICS_COLUMNS: [&str; 28] = [
    "cctk_iteration",
    "cctk_time",
    "centroid_x",
    "centroid_y",
    "centroid_z",
    "min_radius",
    "max_radius",
    "mean_radius",
    "quadrupole_xx",
    "quadrupole_xy",
    "quadrupole_xz",
    "quadrupole_yy",
    "quadrupole_yz",
    "quadrupole_zz",
    "min_x",
    "max_x",
    "min_y",
    "max_y",
    "min_z",
    "max_z",
    "xy_plane_circumference",
    "xz_plane_circumference",
    "yz_plane_circumference",
    "ratio_of_xz_xy_plane_circumferences",
    "ratio_of_yz_xy_plane_circumferences",
    "area",
    "m_irreducible",
    "areal_radius",
];

/// Iteration, time, centroid and the three radii.
const MIN_DIAGNOSTICS_COLUMNS: usize = 8;

static DIAGNOSTICS_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^BH_diagnostics\.ah(?P<ah>\d+)\.gp$").unwrap()
});
static SHAPE_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^h\.t(?P<it>\d+)\.ah(?P<ah>\d+)\.gp$").unwrap()
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizonFile {
    Diagnostics { ah: u32 },
    Shape { ah: u32, iteration: u64 },
}

pub fn classify(file_name: &str) -> Option<HorizonFile> {
    if let Some(caps) = DIAGNOSTICS_FILE.captures(file_name) {
        let ah = caps.name("ah")?.as_str().parse().ok()?;
        return Some(HorizonFile::Diagnostics { ah });
    }
    let caps = SHAPE_FILE.captures(file_name)?;
    let ah = caps.name("ah")?.as_str().parse().ok()?;
    let iteration = caps.name("it")?.as_str().parse().ok()?;
    Some(HorizonFile::Shape { ah, iteration })
}

/// Index of the horizon files of a simulation.
#[derive(Clone, Debug, Default)]
pub struct HorizonsDir {
    diagnostics: BTreeMap<u32, Vec<PathBuf>>,
    shapes: BTreeMap<u32, BTreeMap<u64, PathBuf>>,
}

impl HorizonsDir {
    pub fn new(files: &[PathBuf]) -> HorizonsDir {
        let mut dir = HorizonsDir::default();
        for path in files {
            let file_name =
                match path.file_name().and_then(|f| f.to_str()) {
                    Some(f) => f,
                    None => continue,
                };
            match classify(file_name) {
                Some(HorizonFile::Diagnostics { ah }) => dir
                    .diagnostics
                    .entry(ah)
                    .or_default()
                    .push(path.clone()),
                Some(HorizonFile::Shape { ah, iteration }) => {
                    dir.shapes
                        .entry(ah)
                        .or_default()
                        .insert(iteration, path.clone());
                }
                None => {}
            }
        }
        dir
    }

    /// Horizons with diagnostics, in increasing order.
    pub fn available_apparent_horizons(&self) -> Vec<u32> {
        self.diagnostics.keys().copied().collect()
    }

    pub fn contains(&self, ah: u32) -> bool {
        self.diagnostics.contains_key(&ah)
    }

    /// Fail on the first index in `ahs` that has no data.
    pub fn require_all(&self, ahs: &[u32]) -> Result<()> {
        match ahs.iter().find(|ah| !self.contains(**ah)) {
            Some(&missing) => Err(SimError::HorizonUnavailable(missing)),
            None => Ok(()),
        }
    }

    pub fn get(&self, ah: u32) -> Result<OneHorizon> {
        let files = self
            .diagnostics
            .get(&ah)
            .ok_or(SimError::HorizonUnavailable(ah))?;
        debug!("Reading horizon {} from {} file(s)", ah, files.len());
        OneHorizon::load(
            ah,
            files,
            self.shapes.get(&ah).cloned().unwrap_or_default(),
        )
    }
}

/// Diagnostics and shapes of one apparent horizon.
#[derive(Clone, Debug)]
pub struct OneHorizon {
    pub index: u32,
    vars: BTreeMap<&'static str, TimeSeries>,
    iteration_times: BTreeMap<u64, f64>,
    shape_files: BTreeMap<u64, PathBuf>,
}

impl OneHorizon {
    fn load(
        index: u32,
        files: &[PathBuf],
        shape_files: BTreeMap<u64, PathBuf>,
    ) -> Result<OneHorizon> {
        let mut samples: Vec<Vec<(f64, f64)>> =
            vec![vec![]; DIAGNOSTICS_COLUMNS.len()];
        let mut iteration_times = BTreeMap::new();
        for path in files {
            // Set by the first row; every row of a file has the same width.
            let mut width: Option<usize> = None;
            visit_rows(path, |line, row| {
                let ncols = row.len().min(DIAGNOSTICS_COLUMNS.len());
                if ncols < MIN_DIAGNOSTICS_COLUMNS {
                    return Err(SimError::parse(
                        path,
                        line,
                        format!(
                            "diagnostics rows need at least {} columns, \
                             found {}",
                            MIN_DIAGNOSTICS_COLUMNS,
                            row.len()
                        ),
                    ));
                }
                match width {
                    None => width = Some(ncols),
                    Some(w) if ncols < w => {
                        return Err(SimError::parse(
                            path,
                            line,
                            format!(
                                "expected {} columns as in the first row, \
                                 found {}",
                                w,
                                row.len()
                            ),
                        ));
                    }
                    Some(_) => {}
                }
                let ncols = width.unwrap_or(ncols);
                let t = row[1];
                iteration_times.insert(row[0] as u64, t);
                for (col, value) in row.iter().take(ncols).enumerate()
                {
                    samples[col].push((t, *value));
                }
                Ok(())
            })?;
        }

        let mut vars = BTreeMap::new();
        for (name, s) in DIAGNOSTICS_COLUMNS.iter().zip(samples) {
            if !s.is_empty() {
                vars.insert(*name, TimeSeries::from_samples(name, s)?);
            }
        }
        if vars.is_empty() {
            return Err(SimError::EmptySeries(format!(
                "apparent horizon {}",
                index
            )));
        }
        Ok(OneHorizon {
            index,
            vars,
            iteration_times,
            shape_files,
        })
    }

    pub fn available_variables(&self) -> Vec<&'static str> {
        self.vars.keys().copied().collect()
    }

    pub fn series(&self, name: &str) -> Result<&TimeSeries> {
        self.vars.get(name).ok_or_else(|| {
            let available = self
                .vars
                .keys()
                .map(|k| k.to_string())
                .collect::<Vec<String>>();
            SimError::unavailable_variable(
                name,
                &format!("apparent horizon {}", self.index),
                available.iter(),
            )
        })
    }

    pub fn centroid_x(&self) -> Result<&TimeSeries> {
        self.series("centroid_x")
    }

    pub fn centroid_y(&self) -> Result<&TimeSeries> {
        self.series("centroid_y")
    }

    pub fn centroid_z(&self) -> Result<&TimeSeries> {
        self.series("centroid_z")
    }

    pub fn min_radius(&self) -> Result<&TimeSeries> {
        self.series("min_radius")
    }

    pub fn max_radius(&self) -> Result<&TimeSeries> {
        self.series("max_radius")
    }

    pub fn mean_radius(&self) -> Result<&TimeSeries> {
        self.series("mean_radius")
    }

    /// Times at which the horizon was found.
    pub fn found_times(&self) -> Result<&[f64]> {
        self.series("cctk_iteration").map(|ts| ts.t())
    }

    /// First time at which the horizon was found.
    pub fn formation_time(&self) -> Result<f64> {
        self.series("cctk_iteration").map(|ts| ts.tmin())
    }

    /// Times with shape output, in increasing order.
    pub fn shape_times(&self) -> Vec<f64> {
        let mut times: Vec<f64> = self
            .shape_files
            .keys()
            .filter_map(|it| self.iteration_times.get(it).copied())
            .collect();
        times.sort_by(|a, b| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        });
        times
    }

    fn shape_iteration(&self, time: f64) -> Option<u64> {
        let tol = 1e-12 * (1.0 + time.abs());
        self.shape_files.keys().copied().find(|it| {
            self.iteration_times
                .get(it)
                .map_or(false, |t| (t - time).abs() <= tol)
        })
    }

    pub fn has_shape_at_time(&self, time: f64) -> bool {
        self.shape_iteration(time).is_some()
    }

    pub fn shape_at_time(&self, time: f64) -> Result<Shape> {
        let it = self.shape_iteration(time).ok_or(
            SimError::ShapeUnavailable {
                ah: self.index,
                time,
            },
        )?;
        match self.shape_files.get(&it) {
            Some(path) => Shape::from_file(path),
            None => Err(SimError::ShapeUnavailable {
                ah: self.index,
                time,
            }),
        }
    }

    /// Outline of the shape at `time` on the plane whose normal
    /// coordinate is `cut`. `Ok(None)` if the plane misses the horizon.
    pub fn shape_outline_at_time(
        &self,
        time: f64,
        plane: Plane,
        cut: f64,
    ) -> Result<Option<Vec<(f64, f64)>>> {
        Ok(self.shape_at_time(time)?.outline(plane, cut))
    }
}
