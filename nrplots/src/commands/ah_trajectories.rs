// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::args::{CommonArgs, FigureArgs, TrajectoryType};
use crate::commands::load_horizons;
use crate::config::Settings;
use crate::error::{PlotError, Result};
use crate::figure::{
    time_text, Axis, Figure, Plot, Plot2D, Plot3D, Series, Series3D,
};
use crate::{naming, render};
use clap::Parser;
use simreader::{CubeBounds, OneHorizon, Plane, SimDir};
use std::path::PathBuf;
use tracing::debug;

/// Plot trajectories of given apparent horizons.
#[derive(Parser, Clone, Debug)]
#[command(name = "plot_ah_trajectories")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
    /// Type of plot: 3D, or of a specific plane
    #[arg(
        short = 't',
        long = "type",
        value_enum,
        default_value_t = TrajectoryType::ThreeD
    )]
    pub ty: TrajectoryType,
    /// Apparent horizons to plot
    #[arg(short = 'a', long, value_name = "N", num_args = 1.., required = true)]
    pub horizons: Vec<u32>,
    /// Draw the apparent horizons, if available
    #[arg(long)]
    pub draw_horizons: bool,
}

/// Centroid of one horizon, with the time of its last sample.
struct Trajectory {
    ah: u32,
    points: Vec<[f64; 3]>,
    tmax: f64,
}

fn trajectory(h: &OneHorizon) -> Result<Trajectory> {
    let (x, y, z) = (h.centroid_x()?, h.centroid_y()?, h.centroid_z()?);
    let points = x
        .y()
        .iter()
        .zip(y.y())
        .zip(z.y())
        .map(|((x, y), z)| [*x, *y, *z])
        .collect();
    Ok(Trajectory {
        ah: h.index,
        points,
        tmax: x.tmax(),
    })
}

/// Horizons with a shape at the end of their trajectory.
fn shape_time(h: &OneHorizon, t: &Trajectory, draw: bool) -> Option<f64> {
    if draw && h.has_shape_at_time(t.tmax) {
        debug!("Drawing shape at time {} for ah {}", t.tmax, t.ah);
        Some(t.tmax)
    } else {
        if draw {
            debug!(
                "Shape not available at {} for ah {}, only at {:?}",
                t.tmax,
                t.ah,
                h.shape_times()
            );
        }
        None
    }
}

fn no_data() -> PlotError {
    PlotError::InvalidArgument(
        "the horizons have no finite centroid".to_string(),
    )
}

fn figure_3d(
    horizons: &[OneHorizon],
    trajectories: &[Trajectory],
    draw_horizons: bool,
) -> Result<Plot3D> {
    let mut bounds = CubeBounds::new();
    let mut plot = Plot3D {
        legend: true,
        ..Plot3D::default()
    };
    for (h, t) in horizons.iter().zip(trajectories) {
        bounds.include_all(t.points.iter().copied());
        plot.lines.push(Series3D {
            label: Some(format!("Horizon {}", t.ah)),
            points: t.points.clone(),
        });
        if let Some(time) = shape_time(h, t, draw_horizons) {
            let shape = h.shape_at_time(time)?;
            bounds.include_all(shape.points());
            plot.wireframes.push(
                shape
                    .patches
                    .iter()
                    .flat_map(|p| p.rows.iter().cloned())
                    .collect(),
            );
        }
    }
    plot.limits = bounds.cube().ok_or_else(no_data)?;
    Ok(plot)
}

fn figure_2d(
    horizons: &[OneHorizon],
    trajectories: &[Trajectory],
    plane: Plane,
    draw_horizons: bool,
) -> Result<Plot2D> {
    let (a, b) = plane.axes();
    let (xname, yname) = plane.axis_names();
    debug!("Plotting on the x axis {}", xname);
    debug!("Plotting on the y axis {}", yname);
    let mut plot = Plot2D::new(Axis::new(xname), Axis::new(yname));
    // Square bounds of the projected points.
    let mut bounds = CubeBounds::new();
    for (h, t) in horizons.iter().zip(trajectories) {
        let points: Vec<(f64, f64)> =
            t.points.iter().map(|p| (p[a], p[b])).collect();
        bounds.include_all(points.iter().map(|p| [p.0, p.1, 0.0]));
        plot.lines
            .push(Series::new(Some(&format!("Horizon {}", t.ah)), points));
        if let Some(time) = shape_time(h, t, draw_horizons) {
            if let Some(outline) = h.shape_outline_at_time(time, plane, 0.0)? {
                bounds.include_all(outline.iter().map(|p| [p.0, p.1, 0.0]));
                plot.fills.push(outline);
            }
        }
    }
    let [xr, yr, _] = bounds.cube().ok_or_else(no_data)?;
    plot.x = plot.x.with_range(Some(xr));
    plot.y = plot.y.with_range(Some(yr));
    plot.legend = true;
    plot.equal_aspect = true;
    Ok(plot)
}

pub fn figure(
    sim: &SimDir,
    ahs: &[u32],
    ty: TrajectoryType,
    draw_horizons: bool,
) -> Result<Figure> {
    let horizons = load_horizons(sim, ahs)?;
    let trajectories = horizons
        .iter()
        .map(trajectory)
        .collect::<Result<Vec<Trajectory>>>()?;
    let plot = match ty.plane() {
        None => {
            debug!("Plotting 3D");
            Plot::ThreeD(figure_3d(&horizons, &trajectories, draw_horizons)?)
        }
        Some(plane) => {
            debug!("Plotting 2D");
            Plot::TwoD(figure_2d(
                &horizons,
                &trajectories,
                plane,
                draw_horizons,
            )?)
        }
    };
    let mut fig = Figure::new(plot);
    if let Some(last) = trajectories.last() {
        fig = fig.with_corner_text(time_text(last.tmax));
    }
    Ok(fig)
}

pub fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    let figname = naming::figname(args.figure.figname.as_deref(), || {
        naming::ah_trajectories(&args.horizons, args.ty)
    });
    debug!("Figname: {}", figname);
    let sim = settings.open_sim()?;
    let fig = figure(&sim, &args.horizons, args.ty, args.draw_horizons)?;
    render::save(&fig, &settings.figure, &settings.outdir, &figname)
}
