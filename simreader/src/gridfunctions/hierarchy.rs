// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Mesh-refined 2D data: components on refinement levels, and the
//! uniform grids they get resampled onto for plotting.

use crate::math::geometry::BBox;
use crate::math::linspace;

/// Relative tolerance, in units of the spacing, for a point to be
/// inside a component.
const CONTAINS_EPS: f64 = 1e-8;

/// Rectangular block of data on one refinement level. Values are
/// stored row by row: `data[j * nx + i]` sits at
/// `origin + (i * dx[0], j * dx[1])`.
#[derive(Clone, Debug, PartialEq)]
pub struct UniformComponent {
    pub ref_level: u32,
    pub component: u32,
    pub origin: [f64; 2],
    pub dx: [f64; 2],
    pub shape: [usize; 2],
    data: Vec<f64>,
}

impl UniformComponent {
    /// `None` if `data` does not match `shape`.
    pub fn new(
        ref_level: u32,
        component: u32,
        origin: [f64; 2],
        dx: [f64; 2],
        shape: [usize; 2],
        data: Vec<f64>,
    ) -> Option<UniformComponent> {
        if shape[0] * shape[1] != data.len() || data.is_empty() {
            return None;
        }
        Some(UniformComponent {
            ref_level,
            component,
            origin,
            dx,
            shape,
            data,
        })
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Largest of the grid spacings.
    pub fn max_dx(&self) -> f64 {
        self.dx[0].max(self.dx[1])
    }

    /// Divide every value by `divisor` in place.
    pub fn scale(&mut self, divisor: f64) {
        self.data.iter_mut().for_each(|v| *v /= divisor);
    }

    pub fn upper(&self) -> [f64; 2] {
        [
            self.origin[0] + self.dx[0] * ((self.shape[0] - 1) as f64),
            self.origin[1] + self.dx[1] * ((self.shape[1] - 1) as f64),
        ]
    }

    pub fn bbox(&self) -> BBox {
        let upper = self.upper();
        BBox {
            xmin: self.origin[0],
            ymin: self.origin[1],
            xmax: upper[0],
            ymax: upper[1],
        }
    }

    pub fn contains(&self, p: [f64; 2]) -> bool {
        self.bbox().contains((p[0], p[1]), CONTAINS_EPS * self.max_dx())
    }

    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.data[j * self.shape[0] + i]
    }

    /// Fractional index of `x` along `axis`, clamped to the grid.
    fn frac_index(&self, x: f64, axis: usize) -> f64 {
        let n = self.shape[axis];
        if n == 1 || self.dx[axis] == 0.0 {
            return 0.0;
        }
        ((x - self.origin[axis]) / self.dx[axis])
            .max(0.0)
            .min((n - 1) as f64)
    }

    pub fn nearest(&self, p: [f64; 2]) -> f64 {
        let i = self.frac_index(p[0], 0).round() as usize;
        let j = self.frac_index(p[1], 1).round() as usize;
        self.value(i, j)
    }

    pub fn bilinear(&self, p: [f64; 2]) -> f64 {
        let fi = self.frac_index(p[0], 0);
        let fj = self.frac_index(p[1], 1);
        let i0 = (fi.floor() as usize).min(self.shape[0].saturating_sub(2));
        let j0 = (fj.floor() as usize).min(self.shape[1].saturating_sub(2));
        let i1 = (i0 + 1).min(self.shape[0] - 1);
        let j1 = (j0 + 1).min(self.shape[1] - 1);
        let ti = fi - i0 as f64;
        let tj = fj - j0 as f64;
        let bottom =
            self.value(i0, j0) * (1.0 - ti) + self.value(i1, j0) * ti;
        let top = self.value(i0, j1) * (1.0 - ti) + self.value(i1, j1) * ti;
        bottom * (1.0 - tj) + top * tj
    }
}

/// Grid function at one iteration on all its refinement levels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HierarchicalGridData {
    /// Sorted by refinement level, then component.
    components: Vec<UniformComponent>,
}

impl HierarchicalGridData {
    pub fn new(
        mut components: Vec<UniformComponent>,
    ) -> HierarchicalGridData {
        components.sort_by_key(|c| (c.ref_level, c.component));
        HierarchicalGridData { components }
    }

    pub fn iter(&self) -> impl Iterator<Item = &UniformComponent> {
        self.components.iter()
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut UniformComponent> {
        self.components.iter_mut()
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn refinement_levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> =
            self.components.iter().map(|c| c.ref_level).collect();
        levels.dedup();
        levels
    }

    /// Component on the finest level that covers `p`.
    pub fn finest_component_at(
        &self,
        p: [f64; 2],
    ) -> Option<&UniformComponent> {
        self.components.iter().rev().find(|c| c.contains(p))
    }

    /// Value at `p`, NaN when `p` is outside the grid.
    pub fn evaluate(&self, p: [f64; 2], multilinear: bool) -> f64 {
        match self.finest_component_at(p) {
            Some(c) if multilinear => c.bilinear(p),
            Some(c) => c.nearest(p),
            None => f64::NAN,
        }
    }

    /// Sample on `shape` points evenly spaced between the corners `x0`
    /// and `x1`, both included.
    pub fn to_uniform_grid(
        &self,
        x0: [f64; 2],
        x1: [f64; 2],
        shape: [usize; 2],
        multilinear: bool,
    ) -> UniformGrid {
        let x = linspace(x0[0], x1[0], shape[0]);
        let y = linspace(x0[1], x1[1], shape[1]);
        let mut data = Vec::with_capacity(x.len() * y.len());
        for &yj in &y {
            for &xi in &x {
                data.push(self.evaluate([xi, yj], multilinear));
            }
        }
        UniformGrid { x, y, data }
    }
}

/// Data sampled on a regular lattice, `data[j * x.len() + i]` at
/// `(x[i], y[j])`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UniformGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    data: Vec<f64>,
}

impl UniformGrid {
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.data[j * self.x.len() + i]
    }

    /// Extrema of the finite values.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.data.iter().copied().filter(|v| v.is_finite()).fold(
            None,
            |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            },
        )
    }

    /// Spacing between samples along each axis.
    pub fn spacing(&self) -> [f64; 2] {
        let step = |v: &[f64]| {
            if v.len() > 1 {
                (v[v.len() - 1] - v[0]) / ((v.len() - 1) as f64)
            } else {
                0.0
            }
        };
        [step(&self.x), step(&self.y)]
    }

    /// Refine by `factor` along both axes with bilinear interpolation of
    /// the samples.
    pub fn upsample(&self, factor: usize) -> UniformGrid {
        let (nx, ny) = (self.x.len(), self.y.len());
        if factor <= 1 || nx < 2 || ny < 2 {
            return self.clone();
        }
        let x = linspace(self.x[0], self.x[nx - 1], (nx - 1) * factor + 1);
        let y = linspace(self.y[0], self.y[ny - 1], (ny - 1) * factor + 1);
        let mut data = Vec::with_capacity(x.len() * y.len());
        for jj in 0..y.len() {
            let fj = jj as f64 / factor as f64;
            let j0 = (fj.floor() as usize).min(ny - 2);
            let tj = fj - j0 as f64;
            for ii in 0..x.len() {
                let fi = ii as f64 / factor as f64;
                let i0 = (fi.floor() as usize).min(nx - 2);
                let ti = fi - i0 as f64;
                let bottom = self.value(i0, j0) * (1.0 - ti)
                    + self.value(i0 + 1, j0) * ti;
                let top = self.value(i0, j0 + 1) * (1.0 - ti)
                    + self.value(i0 + 1, j0 + 1) * ti;
                data.push(bottom * (1.0 - tj) + top * tj);
            }
        }
        UniformGrid { x, y, data }
    }
}
