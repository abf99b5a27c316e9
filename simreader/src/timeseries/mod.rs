// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::error::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Samples `(t, y)` ordered by strictly increasing time.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct TimeSeries {
    t: Vec<f64>,
    y: Vec<f64>,
}

impl TimeSeries {
    /// Build a series from unordered samples. Samples are sorted by
    /// time; when a time appears more than once the sample that came
    /// last in `samples` is kept.
    pub fn from_samples(
        name: &str,
        samples: Vec<(f64, f64)>,
    ) -> Result<TimeSeries> {
        let mut samples: Vec<(usize, f64, f64)> = samples
            .into_iter()
            .filter(|(t, _)| t.is_finite())
            .enumerate()
            .map(|(ix, (t, y))| (ix, t, y))
            .collect();
        if samples.is_empty() {
            return Err(SimError::EmptySeries(name.to_string()));
        }
        samples.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        let mut t: Vec<f64> = Vec::with_capacity(samples.len());
        let mut y: Vec<f64> = Vec::with_capacity(samples.len());
        for (_, ti, yi) in samples {
            match t.last() {
                Some(&last) if last == ti => {
                    if let Some(prev) = y.last_mut() {
                        *prev = yi;
                    }
                }
                _ => {
                    t.push(ti);
                    y.push(yi);
                }
            }
        }
        Ok(TimeSeries { t, y })
    }

    pub fn t(&self) -> &[f64] {
        &self.t
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// First time. Series built through `from_samples` are never empty.
    pub fn tmin(&self) -> f64 {
        self.t.first().copied().unwrap_or(f64::NAN)
    }

    pub fn tmax(&self) -> f64 {
        self.t.last().copied().unwrap_or(f64::NAN)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.t.iter().copied().zip(self.y.iter().copied())
    }
}
