// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::args::{CommonArgs, FigureArgs, GridArgs, InterpolationMethod};
use crate::config::Settings;
use crate::error::{PlotError, Result};
use crate::figure::{time_text, Axis, ColorPlot, Figure, Plot};
use crate::{naming, render};
use clap::Parser;
use simreader::{HierarchicalGridData, Plane, SimDir, SimError};
use std::path::PathBuf;
use tracing::debug;

pub const MRI_LAMBDA: &str = "MRI_lambda";

/// Plot the MRI quality factor: the wavelength of the fastest growing
/// mode over the grid spacing.
#[derive(Parser, Clone, Debug)]
#[command(name = "plot_mri_quality_factor")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
    #[command(flatten)]
    pub grid: GridArgs,
    /// Iteration to plot, -1 for the latest
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub iteration: i64,
    /// Resample with multilinear interpolation
    #[arg(long)]
    pub multilinear_interpolate: bool,
    /// Interpolation used when drawing the samples
    #[arg(long, value_enum, default_value_t = InterpolationMethod::None)]
    pub interpolation_method: InterpolationMethod,
    /// Lower limit of the colour scale
    #[arg(long, allow_negative_numbers = true)]
    pub vmin: Option<f64>,
    /// Upper limit of the colour scale
    #[arg(long, allow_negative_numbers = true)]
    pub vmax: Option<f64>,
}

/// Divide the values of every component by its largest spacing.
pub fn normalise_by_max_spacing(data: &mut HierarchicalGridData) {
    for c in data.iter_mut() {
        let dx = c.max_dx();
        c.scale(dx);
    }
}

/// Options of the colour map, besides the plane.
#[derive(Clone, Debug)]
pub struct MapOptions {
    pub iteration: i64,
    pub x0: [f64; 2],
    pub x1: [f64; 2],
    pub shape: [usize; 2],
    pub multilinear: bool,
    pub smooth: bool,
    pub vmin: Option<f64>,
    pub vmax: Option<f64>,
}

impl MapOptions {
    fn check(&self) -> Result<()> {
        if let (Some(lo), Some(hi)) = (self.vmin, self.vmax) {
            if lo >= hi {
                return Err(PlotError::InvalidArgument(format!(
                    "vmin ({}) must be smaller than vmax ({})",
                    lo, hi
                )));
            }
        }
        Ok(())
    }
}

impl From<&Args> for MapOptions {
    fn from(args: &Args) -> Self {
        MapOptions {
            iteration: args.iteration,
            x0: args.grid.x0(),
            x1: args.grid.x1(),
            shape: args.grid.shape(),
            multilinear: args.multilinear_interpolate,
            smooth: args.interpolation_method == InterpolationMethod::Bilinear,
            vmin: args.vmin,
            vmax: args.vmax,
        }
    }
}

pub fn figure(sim: &SimDir, plane: Plane, opts: &MapOptions) -> Result<Figure> {
    opts.check()?;
    let reader = sim.gridfunctions()?.plane(plane);
    debug!("{}", reader);
    let var = reader.get(MRI_LAMBDA)?;
    debug!("Available iterations: {:?}", var.available_iterations());
    let iteration = if opts.iteration == -1 {
        var.latest_iteration()
            .ok_or(SimError::IterationUnavailable(-1))?
    } else {
        opts.iteration
    };
    debug!("Reading iteration {}", iteration);
    let time = var.time_at_iteration(iteration)?;
    let mut data = var.at_iteration(iteration)?;
    debug!(
        "{} component(s) on refinement levels {:?}",
        data.num_components(),
        data.refinement_levels()
    );
    normalise_by_max_spacing(&mut data);
    debug!(
        "Resampling on {:?} points between {:?} and {:?}",
        opts.shape, opts.x0, opts.x1
    );
    let grid =
        data.to_uniform_grid(opts.x0, opts.x1, opts.shape, opts.multilinear);
    let (xname, yname) = plane.axis_names();
    let plot = ColorPlot {
        x: Axis::new(xname),
        y: Axis::new(yname),
        grid,
        vmin: opts.vmin,
        vmax: opts.vmax,
        label: "λ_MRI / max(Δx, Δy, Δz)".to_string(),
        smooth: opts.smooth,
    };
    Ok(Figure::new(Plot::Color(plot)).with_corner_text(time_text(time)))
}

pub fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    let plane = Plane::from(args.grid.plane);
    let figname = naming::figname(args.figure.figname.as_deref(), || {
        naming::mri_quality(plane)
    });
    debug!("Figname: {}", figname);
    let sim = settings.open_sim()?;
    let fig = figure(&sim, plane, &MapOptions::from(args))?;
    render::save(&fig, &settings.figure, &settings.outdir, &figname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use simreader::UniformComponent;

    fn component(dx: [f64; 2], data: Vec<f64>) -> UniformComponent {
        UniformComponent::new(0, 0, [0.0, 0.0], dx, [2, 2], data).unwrap()
    }

    #[test]
    fn values_are_divided_by_the_largest_spacing() {
        let mut h = HierarchicalGridData::new(vec![component(
            [0.5, 0.25],
            vec![1.0, 2.0, 3.0, 4.0],
        )]);
        normalise_by_max_spacing(&mut h);
        let c = h.iter().next().unwrap();
        assert_eq!(c.data(), &[2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn normalisation_divides_exactly() {
        // 0.3 * (1 / 0.1) and 0.3 / 0.1 differ in the last bit.
        assert_ne!(0.3 * (1.0 / 0.1), 0.3 / 0.1);
        let mut h = HierarchicalGridData::new(vec![component(
            [0.1, 0.05],
            vec![3.0, 3.0, 7.0, 0.3],
        )]);
        normalise_by_max_spacing(&mut h);
        let c = h.iter().next().unwrap();
        assert_eq!(c.data(), &[3.0 / 0.1, 3.0 / 0.1, 7.0 / 0.1, 0.3 / 0.1]);
    }

    #[test]
    fn inverted_colour_limits_are_rejected() {
        let opts = MapOptions {
            iteration: 0,
            x0: [0.0, 0.0],
            x1: [1.0, 1.0],
            shape: [2, 2],
            multilinear: false,
            smooth: false,
            vmin: Some(2.0),
            vmax: Some(1.0),
        };
        assert!(matches!(opts.check(), Err(PlotError::InvalidArgument(_))));
    }
}
