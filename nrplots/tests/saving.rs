// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use clap::Parser;
use common::{binary, path_arg, write_mri_lambda, write_scalar};
use nrplots::commands::{
    ah_found, ah_radius, ah_trajectories, mri_quality, scalar,
};
use nrplots::PlotError;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Program name, directory options, then `extra`.
fn argv(program: &str, data: &Path, out: &Path, extra: &[&str]) -> Vec<String> {
    let mut argv = vec![
        program.to_string(),
        "--datadir".to_string(),
        path_arg(data),
        "--outdir".to_string(),
        path_arg(out),
    ];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv
}

fn assert_written(paths: &[PathBuf], names: &[&str]) {
    let found: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(found, names);
    for p in paths {
        assert!(fs::metadata(p).unwrap().len() > 0, "{} is empty", p.display());
    }
}

#[test]
fn radius_is_saved_with_markup() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let out = dir.path().join("plots");
    let args = ah_radius::Args::try_parse_from(argv(
        "plot_ah_radius",
        dir.path(),
        &out,
        &["-a", "1", "--as-markup"],
    ))
    .unwrap();
    let paths = ah_radius::run(&args).unwrap();
    assert_written(&paths, &["ah_1_radius.png", "ah_1_radius.svg"]);
    let svg = fs::read_to_string(&paths[1]).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn failed_markup_removes_the_image() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let out = dir.path().join("plots");
    // The markup cannot be written over a directory.
    fs::create_dir_all(out.join("ah_1_radius.svg")).unwrap();
    let args = ah_radius::Args::try_parse_from(argv(
        "plot_ah_radius",
        dir.path(),
        &out,
        &["-a", "1", "--as-markup"],
    ))
    .unwrap();
    assert!(matches!(ah_radius::run(&args), Err(PlotError::Render(_))));
    assert!(!out.join("ah_1_radius.png").exists());
    assert!(out.join("ah_1_radius.svg").is_dir());
}

#[test]
fn found_is_saved() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let out = dir.path().join("plots");
    let args = ah_found::Args::try_parse_from(argv(
        "plot_ah_found",
        dir.path(),
        &out,
        &["-a", "1", "2"],
    ))
    .unwrap();
    assert_written(&ah_found::run(&args).unwrap(), &["ah_1_2_found.png"]);
}

#[test]
fn trajectories_are_saved_in_3d_and_projected() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let out = dir.path().join("plots");
    let args = ah_trajectories::Args::try_parse_from(argv(
        "plot_ah_trajectories",
        dir.path(),
        &out,
        &["-a", "1", "2", "--draw-horizons"],
    ))
    .unwrap();
    assert_written(
        &ah_trajectories::run(&args).unwrap(),
        &["ah_1_2_trajectory_3D.png"],
    );

    let args = ah_trajectories::Args::try_parse_from(argv(
        "plot_ah_trajectories",
        dir.path(),
        &out,
        &[
            "-a",
            "1",
            "2",
            "-t",
            "xy",
            "--draw-horizons",
            "--fig-extension",
            "svg",
        ],
    ))
    .unwrap();
    assert_written(
        &ah_trajectories::run(&args).unwrap(),
        &["ah_1_2_trajectory_xy.svg"],
    );
}

#[test]
fn scalar_is_saved_on_a_log_axis() {
    let dir = tempdir().unwrap();
    write_scalar(
        dir.path(),
        "rho.maximum.asc",
        &[(0.0, 1.0), (0.5, 10.0), (1.0, 100.0)],
    );
    let out = dir.path().join("plots");
    let args = scalar::Args::try_parse_from(argv(
        "plot_scalar",
        dir.path(),
        &out,
        &["--variable", "rho", "--reduction", "maximum", "--logyaxis"],
    ))
    .unwrap();
    assert_written(&scalar::run(&args).unwrap(), &["rho_maximum.png"]);
}

#[test]
fn mri_map_is_saved() {
    let dir = tempdir().unwrap();
    let values: Vec<f64> = (1..10).map(|v| v as f64).collect();
    write_mri_lambda(dir.path(), &[(0, 0.0)], 1.0, 3, &values);
    let out = dir.path().join("plots");
    let args = mri_quality::Args::try_parse_from(argv(
        "plot_mri_quality_factor",
        dir.path(),
        &out,
        &[
            "--x1",
            "2",
            "2",
            "--resolution",
            "20",
            "--interpolation-method",
            "bilinear",
        ],
    ))
    .unwrap();
    assert_written(&mri_quality::run(&args).unwrap(), &["MRI_quality_xy.png"]);
}
