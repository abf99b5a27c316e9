// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// Coordinate plane of 2D output, or of a projection.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
pub enum Plane {
    Xy,
    Xz,
    Yz,
}

impl Plane {
    pub const ALL: [Plane; 3] = [Plane::Xy, Plane::Xz, Plane::Yz];

    /// Indices of the two in-plane axes (`x = 0`, `y = 1`, `z = 2`).
    pub fn axes(&self) -> (usize, usize) {
        match self {
            Plane::Xy => (0, 1),
            Plane::Xz => (0, 2),
            Plane::Yz => (1, 2),
        }
    }

    /// Index of the axis normal to the plane.
    pub fn normal_axis(&self) -> usize {
        match self {
            Plane::Xy => 2,
            Plane::Xz => 1,
            Plane::Yz => 0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plane::Xy => "xy",
            Plane::Xz => "xz",
            Plane::Yz => "yz",
        }
    }

    /// Axis names, e.g. `("x", "z")` for `Xz`.
    pub fn axis_names(&self) -> (&'static str, &'static str) {
        let names = ["x", "y", "z"];
        let (a, b) = self.axes();
        (names[a], names[b])
    }
}

impl Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Plane {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xy" => Ok(Plane::Xy),
            "xz" => Ok(Plane::Xz),
            "yz" => Ok(Plane::Yz),
            other => Err(format!("unknown plane: {}", other)),
        }
    }
}

#[derive(
    Copy, Clone, Deserialize, Serialize, PartialEq, Default, Debug,
)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl BBox {
    #[inline]
    pub fn contains(&self, point: (f64, f64), eps: f64) -> bool {
        point.0 >= self.xmin - eps
            && point.0 <= self.xmax + eps
            && point.1 >= self.ymin - eps
            && point.1 <= self.ymax + eps
    }
}

/// Running extrema of 3D points, turned into a cube so that plots keep
/// an equal aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CubeBounds {
    min: [f64; 3],
    max: [f64; 3],
    count: usize,
}

impl Default for CubeBounds {
    fn default() -> Self {
        CubeBounds {
            min: [f64::INFINITY; 3],
            max: [f64::NEG_INFINITY; 3],
            count: 0,
        }
    }
}

impl CubeBounds {
    pub fn new() -> CubeBounds {
        CubeBounds::default()
    }

    /// Points with a non-finite coordinate are skipped.
    pub fn include(&mut self, p: [f64; 3]) {
        if p.iter().any(|x| !x.is_finite()) {
            return;
        }
        for d in 0..3 {
            self.min[d] = self.min[d].min(p[d]);
            self.max[d] = self.max[d].max(p[d]);
        }
        self.count += 1;
    }

    pub fn include_all<I>(&mut self, ps: I)
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        ps.into_iter().for_each(|p| self.include(p));
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Limits `(lo, hi)` per axis of a cube centred on the midpoint of
    /// each axis, with half-width equal to half the largest range. A box
    /// with no extent gets a half-width of 1.
    pub fn cube(&self) -> Option<[(f64, f64); 3]> {
        if self.is_empty() {
            return None;
        }
        let half = (0..3)
            .map(|d| self.max[d] - self.min[d])
            .fold(0.0_f64, f64::max)
            / 2.0;
        let half = if half > 0.0 { half } else { 1.0 };
        let mut limits = [(0.0, 0.0); 3];
        for (d, lim) in limits.iter_mut().enumerate() {
            let mid = (self.max[d] + self.min[d]) * 0.5;
            *lim = (mid - half, mid + half);
        }
        Some(limits)
    }
}
