// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Declarative description of a figure. Programs build a `Figure` from
//! data that is already loaded; `render` turns it into an image.

use crate::args::FigExtension;
use modify_derive::Modify;
use simreader::{TimeSeries, UniformGrid};

/// Fraction of the data range added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

#[derive(Clone, Debug, PartialEq, Modify)]
pub struct FigureConfig {
    pub width: u32,
    pub height: u32,
    pub extension: FigExtension,
    pub as_markup: bool,
}

impl Default for FigureConfig {
    fn default() -> Self {
        FigureConfig {
            width: 800,
            height: 600,
            extension: FigExtension::Png,
            as_markup: false,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Modify)]
pub struct Axis {
    pub label: String,
    pub log: bool,
    /// Limits, computed from the data when `None`.
    pub range: Option<(f64, f64)>,
    /// Only these values are labelled, when given.
    pub ticks: Option<Vec<f64>>,
}

impl Axis {
    pub fn new(label: &str) -> Axis {
        Axis::default().with_label(label.to_string())
    }

    /// Limits of the axis for `values`: the explicit range if any,
    /// otherwise the data range with a margin. Log axes only consider
    /// positive values.
    pub fn limits<I>(&self, values: I) -> Option<(f64, f64)>
    where
        I: IntoIterator<Item = f64>,
    {
        if let Some(range) = self.range {
            return Some(range);
        }
        let log = self.log;
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite() && (!log || *v > 0.0))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return None;
        }
        Some(if log {
            let (llo, lhi) = (lo.log10(), hi.log10());
            let pad = if lhi > llo {
                AXIS_MARGIN * (lhi - llo)
            } else {
                1.0
            };
            (10f64.powf(llo - pad), 10f64.powf(lhi + pad))
        } else if hi > lo {
            let pad = AXIS_MARGIN * (hi - lo);
            (lo - pad, hi + pad)
        } else {
            let pad = if lo == 0.0 { 1.0 } else { 0.1 * lo.abs() };
            (lo - pad, hi + pad)
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    pub fn new(label: Option<&str>, points: Vec<(f64, f64)>) -> Series {
        Series {
            label: label.map(|l| l.to_string()),
            points,
        }
    }

    pub fn from_timeseries(label: Option<&str>, ts: &TimeSeries) -> Series {
        Series::new(label, ts.iter().collect())
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series3D {
    pub label: Option<String>,
    pub points: Vec<[f64; 3]>,
}

/// Lines, markers and filled polygons on 2D cartesian axes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plot2D {
    pub x: Axis,
    pub y: Axis,
    pub lines: Vec<Series>,
    pub markers: Vec<Series>,
    pub marker_size: u32,
    pub fills: Vec<Vec<(f64, f64)>>,
    pub legend: bool,
    pub grid: bool,
    /// Also draw the lines between major ticks. Needs `grid`.
    pub minor_grid: bool,
    /// Draw on a square plotting area.
    pub equal_aspect: bool,
}

impl Plot2D {
    pub fn new(x: Axis, y: Axis) -> Plot2D {
        Plot2D {
            x,
            y,
            marker_size: 2,
            ..Plot2D::default()
        }
    }

    fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lines
            .iter()
            .chain(self.markers.iter())
            .flat_map(|s| s.points.iter().copied())
            .chain(self.fills.iter().flat_map(|f| f.iter().copied()))
    }

    /// Limits of both axes, `None` if there is nothing to draw.
    pub fn limits(&self) -> Option<((f64, f64), (f64, f64))> {
        let x = self.x.limits(self.points().map(|p| p.0))?;
        let y = self.y.limits(self.points().map(|p| p.1))?;
        Some((x, y))
    }
}

/// Curves and wireframes in 3D. Coordinates are `[x, y, z]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Plot3D {
    pub lines: Vec<Series3D>,
    /// Each wireframe is a set of polylines.
    pub wireframes: Vec<Vec<Vec<[f64; 3]>>>,
    pub limits: [(f64, f64); 3],
    pub legend: bool,
}

/// Field sampled on a uniform grid, drawn with a colour bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorPlot {
    pub x: Axis,
    pub y: Axis,
    pub grid: UniformGrid,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
    pub label: String,
    /// Interpolate bilinearly between samples when drawing.
    pub smooth: bool,
}

impl ColorPlot {
    /// Limits of the colour scale.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let data = self.grid.finite_range();
        let lo = self.vmin.or(data.map(|d| d.0))?;
        let hi = self.vmax.or(data.map(|d| d.1))?;
        if hi > lo {
            Some((lo, hi))
        } else {
            Some((lo - 0.5, lo + 0.5))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Plot {
    TwoD(Plot2D),
    ThreeD(Plot3D),
    Color(ColorPlot),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub plot: Plot,
    /// Text in the upper right corner.
    pub corner_text: Option<String>,
}

impl Figure {
    pub fn new(plot: Plot) -> Figure {
        Figure {
            plot,
            corner_text: None,
        }
    }

    pub fn with_corner_text(mut self, text: String) -> Figure {
        self.corner_text = Some(text);
        self
    }
}

/// Corner annotation with the time of the figure.
pub fn time_text(time: f64) -> String {
    format!("t = {:.3}", time)
}
