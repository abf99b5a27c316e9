// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! One module per program. Each exposes its `Args`, a function building
//! the figure (or output) from an open simulation, and `run`.

pub mod ah_found;
pub mod ah_radius;
pub mod ah_trajectories;
pub mod formation_time;
pub mod mri_quality;
pub mod scalar;

use crate::error::Result;
use simreader::{OneHorizon, SimDir};
use tracing::debug;

/// Load every horizon in `ahs`. Fails before reading anything if one
/// of them is not in the simulation.
pub fn load_horizons(sim: &SimDir, ahs: &[u32]) -> Result<Vec<OneHorizon>> {
    let horizons = sim.horizons();
    debug!(
        "Apparent horizons available: {:?}",
        horizons.available_apparent_horizons()
    );
    horizons.require_all(ahs)?;
    ahs.iter()
        .map(|ah| {
            debug!("Reading horizon {}", ah);
            Ok(horizons.get(*ah)?)
        })
        .collect()
}
