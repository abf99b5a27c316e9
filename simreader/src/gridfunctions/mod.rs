// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! 2D grid functions written by `CarpetIOASCII`.

pub mod hierarchy;

use crate::error::{Result, SimError};
use crate::hardio::{find_data_columns, read_header, visit_rows};
use crate::math::geometry::Plane;
use hierarchy::{HierarchicalGridData, UniformComponent};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

static GRID_FILE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^.]+)\.(?P<dims>x|y|z|xy|xz|yz|xyz)\.asc$")
        .unwrap()
});

// 0-based columns of the CarpetIOASCII layout.
const COL_IT: usize = 0;
const COL_TL: usize = 1;
const COL_RL: usize = 2;
const COL_C: usize = 3;
const COL_INDEX: usize = 5;
const COL_TIME: usize = 8;
const COL_COORD: usize = 9;
const COL_DATA: usize = 12;

/// Classify a file name as 2D grid output. Returns the file stem and
/// the plane. Output along 1 or 3 dimensions gives `None`.
pub fn classify(file_name: &str) -> Option<(String, Plane)> {
    let caps = GRID_FILE.captures(file_name)?;
    let plane = Plane::from_str(caps.name("dims")?.as_str()).ok()?;
    Some((caps.name("name")?.as_str().to_string(), plane))
}

#[derive(Clone, Debug, PartialEq)]
struct GridSource {
    path: PathBuf,
    data_col: usize,
}

fn variables_in(path: &Path, stem: &str) -> Result<Vec<(String, GridSource)>> {
    let header = read_header(path)?;
    if let Some(columns) = find_data_columns(&header) {
        return Ok(columns
            .into_iter()
            .map(|(col, name)| {
                let var = match name.rsplit_once("::") {
                    Some((_, var)) => var.to_string(),
                    None => name,
                };
                (
                    var,
                    GridSource {
                        path: path.to_path_buf(),
                        data_col: col,
                    },
                )
            })
            .collect());
    }
    let name = match stem.rsplit_once('-') {
        Some((_, var)) => var,
        None => stem,
    };
    Ok(vec![(
        name.to_string(),
        GridSource {
            path: path.to_path_buf(),
            data_col: COL_DATA,
        },
    )])
}

/// All the 2D grid functions of a simulation, by plane and variable.
#[derive(Clone, Debug, Default)]
pub struct GridFunctionsDir {
    sources: BTreeMap<Plane, BTreeMap<String, Vec<GridSource>>>,
}

impl GridFunctionsDir {
    /// Index `files`. The order of `files` is the merge order of
    /// restarts.
    pub fn new(files: &[PathBuf]) -> Result<GridFunctionsDir> {
        let mut dir = GridFunctionsDir::default();
        for path in files {
            let file_name =
                match path.file_name().and_then(|f| f.to_str()) {
                    Some(f) => f,
                    None => continue,
                };
            if let Some((stem, plane)) = classify(file_name) {
                for (var, source) in variables_in(path, &stem)? {
                    debug!(
                        "Found {} on {} in {}",
                        var,
                        plane,
                        path.display()
                    );
                    dir.sources
                        .entry(plane)
                        .or_default()
                        .entry(var)
                        .or_default()
                        .push(source);
                }
            }
        }
        Ok(dir)
    }

    pub fn plane(&self, plane: Plane) -> PlaneReader<'_> {
        PlaneReader {
            plane,
            vars: self.sources.get(&plane),
        }
    }
}

/// Grid functions available on one plane.
pub struct PlaneReader<'a> {
    plane: Plane,
    vars: Option<&'a BTreeMap<String, Vec<GridSource>>>,
}

impl<'a> PlaneReader<'a> {
    pub fn available_variables(&self) -> Vec<String> {
        self.vars
            .map(|v| v.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.map_or(false, |v| v.contains_key(name))
    }

    pub fn get(&self, name: &str) -> Result<GridFunction> {
        let sources =
            self.vars.and_then(|v| v.get(name)).ok_or_else(|| {
                SimError::unavailable_variable(
                    name,
                    self.plane.as_str(),
                    self.available_variables().iter(),
                )
            })?;
        GridFunction::load(name, self.plane, sources)
    }
}

impl<'a> Display for PlaneReader<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Available grid data on {}: [{}]",
            self.plane,
            self.available_variables().join(", ")
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct GridRow {
    ref_level: u32,
    component: u32,
    index: [i64; 2],
    coord: [f64; 2],
    value: f64,
}

#[derive(Clone, Debug, PartialEq)]
struct Snapshot {
    time: f64,
    path: PathBuf,
    rows: Vec<GridRow>,
}

/// One variable on one plane, at every iteration found on disk.
#[derive(Clone, Debug)]
pub struct GridFunction {
    name: String,
    plane: Plane,
    snapshots: BTreeMap<i64, Snapshot>,
}

impl GridFunction {
    fn load(
        name: &str,
        plane: Plane,
        sources: &[GridSource],
    ) -> Result<GridFunction> {
        let (a, b) = plane.axes();
        let mut snapshots: BTreeMap<i64, Snapshot> = BTreeMap::new();
        for source in sources {
            let need = source.data_col.max(COL_COORD + 2);
            let mut found: BTreeMap<i64, Snapshot> = BTreeMap::new();
            visit_rows(&source.path, |line, row| {
                if row.len() <= need {
                    return Err(SimError::parse(
                        &source.path,
                        line,
                        format!(
                            "expected at least {} columns, found {}",
                            need + 1,
                            row.len()
                        ),
                    ));
                }
                if row[COL_TL] != 0.0 {
                    return Ok(());
                }
                found
                    .entry(row[COL_IT] as i64)
                    .or_insert_with(|| Snapshot {
                        time: row[COL_TIME],
                        path: source.path.clone(),
                        rows: vec![],
                    })
                    .rows
                    .push(GridRow {
                        ref_level: row[COL_RL] as u32,
                        component: row[COL_C] as u32,
                        index: [
                            row[COL_INDEX + a] as i64,
                            row[COL_INDEX + b] as i64,
                        ],
                        coord: [row[COL_COORD + a], row[COL_COORD + b]],
                        value: row[source.data_col],
                    });
                Ok(())
            })?;
            // Later restarts replace whole iterations.
            snapshots.extend(found);
        }
        if snapshots.is_empty() {
            return Err(SimError::EmptySeries(name.to_string()));
        }
        debug!(
            "Read {} iteration(s) of {} on {}",
            snapshots.len(),
            name,
            plane
        );
        Ok(GridFunction {
            name: name.to_string(),
            plane,
            snapshots,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn plane(&self) -> Plane {
        self.plane
    }

    pub fn available_iterations(&self) -> Vec<i64> {
        self.snapshots.keys().copied().collect()
    }

    pub fn latest_iteration(&self) -> Option<i64> {
        self.snapshots.keys().next_back().copied()
    }

    pub fn time_at_iteration(&self, iteration: i64) -> Result<f64> {
        self.snapshots
            .get(&iteration)
            .map(|s| s.time)
            .ok_or(SimError::IterationUnavailable(iteration))
    }

    /// Assemble the components of `iteration` into a hierarchy.
    pub fn at_iteration(
        &self,
        iteration: i64,
    ) -> Result<HierarchicalGridData> {
        let snapshot = self
            .snapshots
            .get(&iteration)
            .ok_or(SimError::IterationUnavailable(iteration))?;
        build_hierarchy(snapshot)
    }
}

/// Rows of one component, before its spacing is known.
struct Block {
    ref_level: u32,
    component: u32,
    lo: [i64; 2],
    shape: [usize; 2],
    origin: [f64; 2],
    dx: [Option<f64>; 2],
    data: Vec<f64>,
}

fn malformed(path: &Path, msg: String) -> SimError {
    SimError::MalformedGrid {
        path: path.to_path_buf(),
        msg,
    }
}

fn build_block(
    path: &Path,
    key: (u32, u32),
    rows: &[GridRow],
) -> Result<Block> {
    let mut lo = [i64::MAX; 2];
    let mut hi = [i64::MIN; 2];
    let mut cmin = [f64::INFINITY; 2];
    let mut cmax = [f64::NEG_INFINITY; 2];
    for r in rows {
        for d in 0..2 {
            lo[d] = lo[d].min(r.index[d]);
            hi[d] = hi[d].max(r.index[d]);
            cmin[d] = cmin[d].min(r.coord[d]);
            cmax[d] = cmax[d].max(r.coord[d]);
        }
    }
    let shape = [(hi[0] - lo[0] + 1) as usize, (hi[1] - lo[1] + 1) as usize];
    if shape[0] * shape[1] != rows.len() {
        return Err(malformed(
            path,
            format!(
                "component {} on level {} has {} points, expected {}x{}",
                key.1,
                key.0,
                rows.len(),
                shape[0],
                shape[1]
            ),
        ));
    }
    let mut data = vec![f64::NAN; rows.len()];
    for r in rows {
        let i = (r.index[0] - lo[0]) as usize;
        let j = (r.index[1] - lo[1]) as usize;
        data[j * shape[0] + i] = r.value;
    }
    let mut dx = [None; 2];
    for d in 0..2 {
        if shape[d] > 1 {
            dx[d] = Some((cmax[d] - cmin[d]) / ((shape[d] - 1) as f64));
        }
    }
    Ok(Block {
        ref_level: key.0,
        component: key.1,
        lo,
        shape,
        origin: cmin,
        dx,
        data,
    })
}

fn build_hierarchy(snapshot: &Snapshot) -> Result<HierarchicalGridData> {
    let mut groups: BTreeMap<(u32, u32), Vec<GridRow>> = BTreeMap::new();
    for r in &snapshot.rows {
        groups
            .entry((r.ref_level, r.component))
            .or_default()
            .push(*r);
    }
    let blocks = groups
        .iter()
        .map(|(key, rows)| build_block(&snapshot.path, *key, rows))
        .collect::<Result<Vec<Block>>>()?;

    let mut level_dx: BTreeMap<u32, [Option<f64>; 2]> = BTreeMap::new();
    for b in &blocks {
        let entry = level_dx.entry(b.ref_level).or_insert([None; 2]);
        for d in 0..2 {
            if entry[d].is_none() {
                entry[d] = b.dx[d];
            }
        }
    }

    let mut components = Vec::with_capacity(blocks.len());
    for b in blocks {
        let fallback = level_dx.get(&b.ref_level).copied().unwrap_or([None; 2]);
        let mut dx = [0.0; 2];
        for d in 0..2 {
            dx[d] = b
                .dx[d]
                .or(fallback[d])
                .or(b.dx[1 - d])
                .or(fallback[1 - d])
                .ok_or_else(|| {
                    malformed(
                        &snapshot.path,
                        format!(
                            "cannot infer the spacing of level {}",
                            b.ref_level
                        ),
                    )
                })?;
        }
        let component = UniformComponent::new(
            b.ref_level,
            b.component,
            b.origin,
            dx,
            b.shape,
            b.data,
        )
        .ok_or_else(|| {
            malformed(
                &snapshot.path,
                format!(
                    "component {} starting at index {:?} is empty",
                    b.component, b.lo
                ),
            )
        })?;
        components.push(component);
    }
    Ok(HierarchicalGridData::new(components))
}
