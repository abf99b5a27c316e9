// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Default figure names, derived from the arguments of each program.

use crate::args::TrajectoryType;
use simreader::{Plane, Reduction};

/// `explicit` if given, otherwise the derived name.
pub fn figname<F>(explicit: Option<&str>, derive: F) -> String
where
    F: FnOnce() -> String,
{
    match explicit {
        Some(name) => name.to_string(),
        None => derive(),
    }
}

pub fn join_indices(ahs: &[u32]) -> String {
    ahs.iter()
        .map(|ah| ah.to_string())
        .collect::<Vec<String>>()
        .join("_")
}

pub fn ah_radius(ah: u32) -> String {
    format!("ah_{}_radius", ah)
}

pub fn ah_found(ahs: &[u32]) -> String {
    format!("ah_{}_found", join_indices(ahs))
}

pub fn ah_trajectories(ahs: &[u32], ty: TrajectoryType) -> String {
    format!("ah_{}_trajectory_{}", join_indices(ahs), ty)
}

/// `rho` for scalars, `rho_maximum` for a reduction.
pub fn scalar(variable: &str, reduction: Reduction) -> String {
    match reduction {
        Reduction::Scalar => variable.to_string(),
        red => format!("{}_{}", variable, red),
    }
}

/// Label of the y axis of a scalar plot.
pub fn scalar_label(variable: &str, reduction: Reduction) -> String {
    match reduction {
        Reduction::Scalar => variable.to_string(),
        red => format!("{} {}", red, variable),
    }
}

pub fn mri_quality(plane: Plane) -> String {
    format!("MRI_quality_{}", plane)
}
