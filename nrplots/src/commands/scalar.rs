// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::args::{CommonArgs, FigureArgs, ReductionArg};
use crate::config::Settings;
use crate::error::Result;
use crate::figure::{Axis, Figure, Plot, Plot2D, Series};
use crate::{naming, render};
use clap::Parser;
use simreader::{Reduction, SimDir};
use std::path::PathBuf;
use tracing::debug;

/// Plot a given timeseries as a function of time.
#[derive(Parser, Clone, Debug)]
#[command(name = "plot_scalar")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    #[command(flatten)]
    pub figure: FigureArgs,
    /// Variable to plot
    #[arg(long, required = true)]
    pub variable: String,
    /// Reduction to plot
    #[arg(long, value_enum, default_value_t = ReductionArg::Scalar)]
    pub reduction: ReductionArg,
    /// Use a logarithmic x axis
    #[arg(long)]
    pub logxaxis: bool,
    /// Use a logarithmic y axis
    #[arg(long)]
    pub logyaxis: bool,
}

pub fn figure(
    sim: &SimDir,
    variable: &str,
    reduction: Reduction,
    logx: bool,
    logy: bool,
) -> Result<Figure> {
    let reader = sim.timeseries()?.reduction(reduction);
    debug!("{}", reader);
    let ts = reader.get(variable)?;
    let mut plot = Plot2D::new(
        Axis::new("t").with_log(logx),
        Axis::new(&naming::scalar_label(variable, reduction))
            .with_log(logy),
    );
    plot.lines.push(Series::from_timeseries(None, &ts));
    plot.grid = true;
    plot.minor_grid = true;
    Ok(Figure::new(Plot::TwoD(plot)))
}

pub fn run(args: &Args) -> Result<Vec<PathBuf>> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    let reduction = Reduction::from(args.reduction);
    let figname = naming::figname(args.figure.figname.as_deref(), || {
        naming::scalar(&args.variable, reduction)
    });
    debug!("Figname: {}", figname);
    let sim = settings.open_sim()?;
    let fig = figure(
        &sim,
        &args.variable,
        reduction,
        args.logxaxis,
        args.logyaxis,
    )?;
    render::save(&fig, &settings.figure, &settings.outdir, &figname)
}
