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
use clap::Parser;
use simreader::SimDir;
use tracing::debug;

/// Print the time at which the given apparent horizon was first found.
#[derive(Parser, Clone, Debug)]
#[command(name = "print_time_formation_ah")]
pub struct Args {
    #[command(flatten)]
    pub common: CommonArgs,
    // Accepted, as by the plotting programs, but unused.
    #[command(flatten)]
    pub figure: FigureArgs,
    /// Apparent horizon number
    #[arg(short = 'a', long, value_name = "N", required = true)]
    pub horizon: u32,
    /// Print only the time
    #[arg(long)]
    pub parsable: bool,
}

/// Shortest digits that read back to `x`, with the exponent written
/// with a sign and at least two digits (`1e-07`, `2.5e+20`).
pub fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    let s = format!("{:?}", x);
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

/// Line reporting the formation time of `ah`.
pub fn report(sim: &SimDir, ah: u32, parsable: bool) -> Result<String> {
    let horizon = load_horizons(sim, &[ah])?.remove(0);
    let time = float_repr(horizon.formation_time()?);
    Ok(if parsable {
        time
    } else {
        format!("Horizon {} was first found at time {}", ah, time)
    })
}

pub fn run(args: &Args) -> Result<String> {
    let settings = Settings::resolve(&args.common, &args.figure)?;
    debug!("Reading horizon {}", args.horizon);
    let sim = settings.open_sim()?;
    report(&sim, args.horizon, args.parsable)
}
