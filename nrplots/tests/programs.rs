// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use clap::Parser;
use common::{is_empty_or_missing, path_arg, write_mri_lambda, write_scalar};
use nrplots::args::InterpolationMethod;
use nrplots::commands::mri_quality::{self, MapOptions};
use nrplots::commands::scalar;
use nrplots::figure::{Plot, Series};
use nrplots::PlotError;
use proptest::prelude::*;
use simreader::{Plane, Reduction, ScanOptions, SimDir, SimError};
use std::path::Path;
use tempfile::tempdir;

fn open(dir: &Path) -> SimDir {
    SimDir::new(dir, ScanOptions::default()).unwrap()
}

fn map_options(n: usize, x1: f64) -> MapOptions {
    MapOptions {
        iteration: -1,
        x0: [0.0, 0.0],
        x1: [x1, x1],
        shape: [n, n],
        multilinear: false,
        smooth: false,
        vmin: None,
        vmax: None,
    }
}

#[test]
fn scalar_figure_is_labelled_by_reduction() {
    let dir = tempdir().unwrap();
    write_scalar(dir.path(), "rho.maximum.asc", &[(0.0, 1.0), (1.0, 4.0)]);
    write_scalar(dir.path(), "rho.asc", &[(0.0, 2.0)]);
    let sim = open(dir.path());

    let fig =
        scalar::figure(&sim, "rho", Reduction::Maximum, false, true).unwrap();
    match fig.plot {
        Plot::TwoD(p) => {
            assert_eq!(p.x.label, "t");
            assert_eq!(p.y.label, "maximum rho");
            assert!(p.y.log && !p.x.log);
            assert!(p.grid && p.minor_grid);
            assert_eq!(
                p.lines,
                vec![Series::new(None, vec![(0.0, 1.0), (1.0, 4.0)])]
            );
        }
        other => panic!("unexpected plot {:?}", other),
    }

    let fig =
        scalar::figure(&sim, "rho", Reduction::Scalar, false, false).unwrap();
    match fig.plot {
        Plot::TwoD(p) => assert_eq!(p.y.label, "rho"),
        other => panic!("unexpected plot {:?}", other),
    }
}

#[test]
fn missing_scalar_writes_nothing() {
    let dir = tempdir().unwrap();
    write_scalar(dir.path(), "rho.maximum.asc", &[(0.0, 1.0)]);
    let out = dir.path().join("plots");
    let (datadir, outdir) = (path_arg(dir.path()), path_arg(&out));
    let args = scalar::Args::try_parse_from([
        "plot_scalar",
        "--datadir",
        datadir.as_str(),
        "--outdir",
        outdir.as_str(),
        "--variable",
        "press",
        "--reduction",
        "maximum",
    ])
    .unwrap();
    assert!(matches!(
        scalar::run(&args),
        Err(PlotError::Sim(SimError::VariableUnavailable { .. }))
    ));
    assert!(is_empty_or_missing(&out));
}

#[test]
fn mri_options_are_parsed() {
    let args = mri_quality::Args::try_parse_from([
        "plot_mri_quality_factor",
        "--plane",
        "xz",
        "--origin",
        "-1",
        "-2",
        "--x1",
        "3",
        "4",
        "--resolution",
        "20",
        "--vmin",
        "-0.5",
        "--interpolation-method",
        "bilinear",
    ])
    .unwrap();
    assert_eq!(args.iteration, -1);
    let opts = MapOptions::from(&args);
    assert_eq!(opts.x0, [-1.0, -2.0]);
    assert_eq!(opts.x1, [3.0, 4.0]);
    assert_eq!(opts.shape, [20, 20]);
    assert_eq!(opts.vmin, Some(-0.5));
    assert!(opts.smooth);
    assert_eq!(args.interpolation_method, InterpolationMethod::Bilinear);
}

#[test]
fn mri_map_uses_the_latest_iteration() {
    let dir = tempdir().unwrap();
    let values: Vec<f64> = (0..9).map(|v| v as f64).collect();
    write_mri_lambda(dir.path(), &[(0, 0.0), (4, 1.25)], 0.5, 3, &values);
    let sim = open(dir.path());

    let fig =
        mri_quality::figure(&sim, Plane::Xy, &map_options(3, 1.0)).unwrap();
    assert_eq!(fig.corner_text.as_deref(), Some("t = 1.250"));
    match fig.plot {
        Plot::Color(p) => {
            assert_eq!((p.x.label.as_str(), p.y.label.as_str()), ("x", "y"));
            let expected: Vec<f64> = values.iter().map(|v| v / 0.5).collect();
            assert_eq!(p.grid.data(), expected.as_slice());
            assert_eq!(p.value_range(), Some((0.0, 16.0)));
        }
        other => panic!("unexpected plot {:?}", other),
    }

    let missing = MapOptions {
        iteration: 2,
        ..map_options(3, 1.0)
    };
    assert!(matches!(
        mri_quality::figure(&sim, Plane::Xy, &missing),
        Err(PlotError::Sim(SimError::IterationUnavailable(2)))
    ));
    let clamped = MapOptions {
        vmin: Some(1.0),
        vmax: Some(1.0),
        ..map_options(3, 1.0)
    };
    assert!(matches!(
        mri_quality::figure(&sim, Plane::Xy, &clamped),
        Err(PlotError::InvalidArgument(_))
    ));
}

#[test]
fn mri_map_outside_the_grid_is_nan() {
    let dir = tempdir().unwrap();
    write_mri_lambda(dir.path(), &[(0, 0.0)], 1.0, 2, &[1.0; 4]);
    let fig = mri_quality::figure(
        &open(dir.path()),
        Plane::Xy,
        &map_options(3, 4.0),
    )
    .unwrap();
    match fig.plot {
        Plot::Color(p) => {
            assert_eq!(p.grid.value(0, 0), 1.0);
            assert!(p.grid.value(2, 2).is_nan());
        }
        other => panic!("unexpected plot {:?}", other),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn unit_spacing_keeps_values(
        values in prop::collection::vec(0.01f64..100.0, 9),
    ) {
        let dir = tempdir().unwrap();
        write_mri_lambda(dir.path(), &[(0, 0.0)], 1.0, 3, &values);
        let fig = mri_quality::figure(
            &open(dir.path()),
            Plane::Xy,
            &map_options(3, 2.0),
        )
        .unwrap();
        match fig.plot {
            Plot::Color(p) => {
                prop_assert_eq!(p.grid.data(), values.as_slice());
            }
            other => panic!("unexpected plot {:?}", other),
        }
    }
}
