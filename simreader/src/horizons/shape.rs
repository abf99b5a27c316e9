// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{Result, SimError};
use crate::hardio::{get_read_file, parse_row, Line};
use crate::math::geometry::Plane;
use std::cmp::Ordering;
use std::io::BufRead;
use std::path::Path;

/// Relative thickness of the slab used to cut an outline out of a shape.
const OUTLINE_SLAB: f64 = 0.05;

/// One coordinate patch of an AHFinderDirect surface. Each row is a
/// line of constant angular coordinate on the patch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Patch {
    pub name: String,
    pub rows: Vec<Vec<[f64; 3]>>,
}

impl Patch {
    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }
}

/// Horizon surface at one iteration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Shape {
    pub patches: Vec<Patch>,
}

impl Shape {
    /// Read a `h.t<iteration>.ah<N>.gp` file.
    pub fn from_file(path: &Path) -> Result<Shape> {
        let reader = get_read_file(path)?;
        let mut patches: Vec<Patch> = vec![];
        let mut row: Vec<[f64; 3]> = vec![];

        fn flush(patches: &mut Vec<Patch>, row: &mut Vec<[f64; 3]>) {
            if row.is_empty() {
                return;
            }
            if patches.is_empty() {
                patches.push(Patch::default());
            }
            if let Some(p) = patches.last_mut() {
                p.rows.push(std::mem::take(row));
            }
        }

        for (ix, raw) in reader.lines().enumerate() {
            let raw = raw.map_err(|e| SimError::io(path, e))?;
            match Line::classify(&raw) {
                Line::Comment(name) => {
                    if raw.trim_start().starts_with("###") {
                        flush(&mut patches, &mut row);
                        patches.push(Patch {
                            name: name.to_string(),
                            rows: vec![],
                        });
                    }
                }
                Line::Blank => flush(&mut patches, &mut row),
                Line::Data(data) => {
                    let cols = parse_row(data, path, ix + 1)?;
                    if cols.len() < 6 {
                        return Err(SimError::parse(
                            path,
                            ix + 1,
                            "shape rows need at least 6 columns",
                        ));
                    }
                    row.push([cols[3], cols[4], cols[5]]);
                }
            }
        }
        flush(&mut patches, &mut row);
        patches.retain(|p| !p.rows.is_empty());
        Ok(Shape { patches })
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.patches.iter().flat_map(|p| p.points())
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Outline of the intersection of the surface with the plane where
    /// the normal coordinate equals `cut`, as points of `plane` ordered
    /// by angle around their mean. `None` if the plane misses the shape.
    pub fn outline(
        &self,
        plane: Plane,
        cut: f64,
    ) -> Option<Vec<(f64, f64)>> {
        let n = plane.normal_axis();
        let (a, b) = plane.axes();
        let (lo, hi) = self.points().fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(lo, hi), p| (lo.min(p[n]), hi.max(p[n])),
        );
        if !lo.is_finite() || cut < lo || cut > hi {
            return None;
        }
        let tol = OUTLINE_SLAB * (hi - lo);

        let mut pts: Vec<(f64, f64)> = self
            .points()
            .filter(|p| (p[n] - cut).abs() <= tol)
            .map(|p| (p[a], p[b]))
            .collect();
        if pts.is_empty() {
            return None;
        }
        let count = pts.len() as f64;
        let (ca, cb) = pts
            .iter()
            .fold((0.0, 0.0), |(sa, sb), p| (sa + p.0, sb + p.1));
        let (ca, cb) = (ca / count, cb / count);
        pts.sort_by(|p, q| {
            let ap = (p.1 - cb).atan2(p.0 - ca);
            let aq = (q.1 - cb).atan2(q.0 - ca);
            ap.partial_cmp(&aq).unwrap_or(Ordering::Equal)
        });
        Some(pts)
    }
}
