// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::args::{CommonArgs, FigureArgs};
use crate::commands::load_horizons;
use crate::config::Settings;
use crate::error::Result;
use crate::figure::{Axis, Figure, Plot, Plot2D, Series};
use crate::{naming, render};
use clap::Parser;
use simreader::SimDir;
use std::path::PathBuf;
use tracing::debug;

/// Plot the coordinate radius of an apparent horizon as a function of
/// time.
#[derive(Parser, Clone, Debug)]
#[command(name = "plot_ah_radius")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
    /// Apparent horizon to plot
    #[arg(short = 'a', long, value_name = "N")]
    pub horizon: u32,
}

pub fn figure(sim: &SimDir, ah: u32) -> Result<Figure> {
    let horizon = load_horizons(sim, &[ah])?.remove(0);
    let mut plot = Plot2D::new(
        Axis::new("Time"),
        Axis::new(&format!("Radius of horizon {}", ah)),
    );
    plot.lines = vec![
        Series::from_timeseries(Some("Mean radius"), horizon.mean_radius()?),
        Series::from_timeseries(Some("Min radius"), horizon.min_radius()?),
        Series::from_timeseries(Some("Max radius"), horizon.max_radius()?),
    ];
    plot.legend = true;
    Ok(Figure::new(Plot::TwoD(plot)))
}

pub fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    let figname = naming::figname(args.figure.figname.as_deref(), || {
        naming::ah_radius(args.horizon)
    });
    debug!("Figname: {}", figname);
    let sim = settings.open_sim()?;
    let fig = figure(&sim, args.horizon)?;
    render::save(&fig, &settings.figure, &settings.outdir, &figname)
}
