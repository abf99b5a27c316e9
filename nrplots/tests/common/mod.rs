// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Small simulation directories written on the fly.

#![allow(dead_code)]

use std::f64::consts::PI;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

/// One `BH_diagnostics` row: iteration, time and centroid.
pub struct Sample {
    pub it: u64,
    pub t: f64,
    pub c: [f64; 3],
}

pub fn sample(it: u64, t: f64, c: [f64; 3]) -> Sample {
    Sample { it, t, c }
}

pub fn write_horizon(dir: &Path, ah: u32, samples: &[Sample]) {
    let mut text = format!("# apparent horizon {}\n", ah);
    for s in samples {
        // min, max and mean radius, then the remaining 20 columns.
        let mut row = format!(
            "{} {} {} {} {} 0.4 0.6 0.5",
            s.it, s.t, s.c[0], s.c[1], s.c[2]
        );
        for _ in 0..20 {
            row.push_str(" 0.0");
        }
        writeln!(text, "{}", row).unwrap();
    }
    fs::write(dir.join(format!("BH_diagnostics.ah{}.gp", ah)), text).unwrap();
}

/// Sphere of radius `r` around `center`, one patch per hemisphere.
pub fn write_shape(dir: &Path, ah: u32, it: u64, center: [f64; 3], r: f64) {
    let mut text = String::new();
    for (name, range) in [("+z", 0..5), ("-z", 4..9)] {
        writeln!(text, "### {} patch", name).unwrap();
        for k in range {
            let theta = k as f64 * PI / 8.0;
            for l in 0..16 {
                let phi = l as f64 * PI / 8.0;
                writeln!(
                    text,
                    "{} {} {} {} {} {}",
                    k,
                    l,
                    r,
                    center[0] + r * theta.sin() * phi.cos(),
                    center[1] + r * theta.sin() * phi.sin(),
                    center[2] + r * theta.cos()
                )
                .unwrap();
            }
            text.push('\n');
        }
    }
    fs::write(dir.join(format!("h.t{}.ah{}.gp", it, ah)), text).unwrap();
}

pub fn write_scalar(dir: &Path, file_name: &str, rows: &[(f64, f64)]) {
    let mut text = String::from("# 1:iteration 2:time 3:data\n");
    for (ix, (t, v)) in rows.iter().enumerate() {
        writeln!(text, "{} {} {}", ix, t, v).unwrap();
    }
    fs::write(dir.join(file_name), text).unwrap();
}

/// `MRI_lambda` on the xy plane: one component per iteration starting
/// at the origin, `values` stored row by row on an `n` by `n` grid.
pub fn write_mri_lambda(
    dir: &Path,
    iterations: &[(i64, f64)],
    dx: f64,
    n: usize,
    values: &[f64],
) -> PathBuf {
    let mut text = String::from(
        "# 1:it 2:tl 3:rl 4:c 5:ml 6:ix 7:iy 8:iz 9:time 10:x 11:y 12:z 13:data\n",
    );
    for (it, time) in iterations {
        for j in 0..n {
            for i in 0..n {
                writeln!(
                    text,
                    "{} 0 0 0 0 {} {} 0 {} {} {} 0 {}",
                    it,
                    i,
                    j,
                    time,
                    dx * i as f64,
                    dx * j as f64,
                    values[j * n + i]
                )
                .unwrap();
            }
            text.push('\n');
        }
    }
    let path = dir.join("MRI_lambda.xy.asc");
    fs::write(&path, text).unwrap();
    path
}

/// Two horizons moving apart along x, with a shape of horizon 2 at its
/// last iteration.
pub fn binary(dir: &Path) {
    write_horizon(
        dir,
        1,
        &[
            sample(0, 0.0, [1.0, 0.0, 0.0]),
            sample(2, 0.5, [1.5, 0.2, 0.0]),
            sample(4, 1.0, [2.0, 0.4, 0.0]),
        ],
    );
    write_horizon(
        dir,
        2,
        &[
            sample(2, 0.5, [-1.0, 0.0, 0.5]),
            sample(4, 1.0, [-3.0, -0.5, 1.0]),
        ],
    );
    write_shape(dir, 2, 4, [-3.0, -0.5, 0.0], 0.5);
}

pub fn path_arg(p: &Path) -> String {
    p.to_string_lossy().into_owned()
}

pub fn is_empty_or_missing(dir: &Path) -> bool {
    match fs::read_dir(dir) {
        Ok(mut entries) => entries.next().is_none(),
        Err(_) => true,
    }
}
