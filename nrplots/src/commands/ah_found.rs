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

/// Plot the times at which the given apparent horizons were found.
#[derive(Parser, Clone, Debug)]
#[command(name = "plot_ah_found")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
    /// Apparent horizons to plot
    #[arg(short = 'a', long, value_name = "N", num_args = 1.., required = true)]
    pub horizons: Vec<u32>,
}

pub fn figure(sim: &SimDir, ahs: &[u32]) -> Result<Figure> {
    let horizons = load_horizons(sim, ahs)?;
    let lo = ahs.iter().copied().min().unwrap_or(0) as f64;
    let hi = ahs.iter().copied().max().unwrap_or(0) as f64;
    let mut plot = Plot2D::new(
        Axis::new("Time"),
        Axis::new("Apparent horizon")
            .with_range(Some((lo - 1.0, hi + 1.0)))
            .with_ticks(Some(ahs.iter().map(|ah| *ah as f64).collect())),
    );
    for h in &horizons {
        let ah = h.index as f64;
        let points = h.found_times()?.iter().map(|t| (*t, ah)).collect();
        plot.markers.push(Series::new(None, points));
    }
    Ok(Figure::new(Plot::TwoD(plot)))
}

pub fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    let figname = naming::figname(args.figure.figname.as_deref(), || {
        naming::ah_found(&args.horizons)
    });
    debug!("Figname: {}", figname);
    let sim = settings.open_sim()?;
    let fig = figure(&sim, &args.horizons)?;
    render::save(&fig, &settings.figure, &settings.outdir, &figname)
}
