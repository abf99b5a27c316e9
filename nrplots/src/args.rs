// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Option groups shared by the programs. Each program flattens the
//! groups it needs into its own `Args`.

use clap::{Args, ValueEnum};
use serde::{Deserialize, Serialize};
use simreader::{Plane, Reduction};
use std::fmt;
use std::fmt::Display;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct CommonArgs {
    /// Simulation directory [default: .]
    #[arg(long, value_name = "DIR")]
    pub datadir: Option<PathBuf>,
    /// Where to save the output [default: .]
    #[arg(long, value_name = "DIR")]
    pub outdir: Option<PathBuf>,
    /// JSON file with default values for the options
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Print debug messages on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
    /// Do not follow symbolic links when scanning the simulation
    #[arg(long)]
    pub ignore_symlinks: bool,
}

#[derive(Args, Clone, Debug, Default, PartialEq)]
pub struct FigureArgs {
    /// Name of the output figure, without extension
    #[arg(long)]
    pub figname: Option<String>,
    /// Format of the figure [default: png]
    #[arg(long, value_enum)]
    pub fig_extension: Option<FigExtension>,
    /// Also save the figure as SVG markup
    #[arg(long, overrides_with = "no_as_markup")]
    pub as_markup: bool,
    /// Do not save SVG markup, even if the config file asks for it
    #[arg(long, overrides_with = "as_markup")]
    pub no_as_markup: bool,
}

#[derive(Args, Clone, Debug, PartialEq)]
pub struct GridArgs {
    /// Plane to plot
    #[arg(long, value_enum, default_value_t = PlaneArg::Xy)]
    pub plane: PlaneArg,
    /// Lower left corner of the plotted region
    #[arg(
        long = "origin",
        visible_alias = "x0",
        num_args = 2,
        value_names = ["X", "Y"],
        default_values_t = vec![0.0, 0.0],
        allow_negative_numbers = true
    )]
    pub origin: Vec<f64>,
    /// Upper right corner of the plotted region
    #[arg(
        long = "corner",
        visible_alias = "x1",
        num_args = 2,
        value_names = ["X", "Y"],
        default_values_t = vec![1.0, 1.0],
        allow_negative_numbers = true
    )]
    pub corner: Vec<f64>,
    /// Number of points along each axis
    #[arg(
        long,
        default_value_t = 500,
        value_parser = clap::value_parser!(u32).range(2..)
    )]
    pub resolution: u32,
}

fn pair(v: &[f64]) -> [f64; 2] {
    [
        v.first().copied().unwrap_or(0.0),
        v.get(1).copied().unwrap_or(0.0),
    ]
}

impl GridArgs {
    pub fn x0(&self) -> [f64; 2] {
        pair(&self.origin)
    }

    pub fn x1(&self) -> [f64; 2] {
        pair(&self.corner)
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.resolution as usize; 2]
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Serialize,
    PartialEq,
    Eq,
    ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum FigExtension {
    #[default]
    Png,
    Svg,
}

impl FigExtension {
    pub fn as_str(&self) -> &'static str {
        match self {
            FigExtension::Png => "png",
            FigExtension::Svg => "svg",
        }
    }
}

impl Display for FigExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PlaneArg {
    Xy,
    Xz,
    Yz,
}

impl From<PlaneArg> for Plane {
    fn from(p: PlaneArg) -> Self {
        match p {
            PlaneArg::Xy => Plane::Xy,
            PlaneArg::Xz => Plane::Xz,
            PlaneArg::Yz => Plane::Yz,
        }
    }
}

/// What `plot_ah_trajectories` draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TrajectoryType {
    #[value(name = "3D")]
    ThreeD,
    #[value(name = "xy")]
    Xy,
    #[value(name = "xz")]
    Xz,
    #[value(name = "yz")]
    Yz,
}

impl TrajectoryType {
    /// Projection plane, `None` for the 3D view.
    pub fn plane(&self) -> Option<Plane> {
        match self {
            TrajectoryType::ThreeD => None,
            TrajectoryType::Xy => Some(Plane::Xy),
            TrajectoryType::Xz => Some(Plane::Xz),
            TrajectoryType::Yz => Some(Plane::Yz),
        }
    }
}

impl Display for TrajectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.plane() {
            Some(plane) => write!(f, "{}", plane),
            None => write!(f, "3D"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReductionArg {
    #[value(name = "scalar")]
    Scalar,
    #[value(name = "minimum")]
    Minimum,
    #[value(name = "maximum")]
    Maximum,
    #[value(name = "norm1")]
    Norm1,
    #[value(name = "norm2")]
    Norm2,
    #[value(name = "average")]
    Average,
    #[value(name = "infnorm")]
    Infnorm,
}

impl From<ReductionArg> for Reduction {
    fn from(r: ReductionArg) -> Self {
        match r {
            ReductionArg::Scalar => Reduction::Scalar,
            ReductionArg::Minimum => Reduction::Minimum,
            ReductionArg::Maximum => Reduction::Maximum,
            ReductionArg::Norm1 => Reduction::Norm1,
            ReductionArg::Norm2 => Reduction::Norm2,
            ReductionArg::Average => Reduction::Average,
            ReductionArg::Infnorm => Reduction::Infnorm,
        }
    }
}

/// How the colour map is drawn between resampled points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InterpolationMethod {
    #[default]
    None,
    Nearest,
    Bilinear,
}
