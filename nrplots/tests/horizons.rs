// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use clap::Parser;
use common::{binary, is_empty_or_missing, path_arg};
use nrplots::args::TrajectoryType;
use nrplots::commands::{ah_found, ah_radius, ah_trajectories, formation_time};
use nrplots::figure::Plot;
use nrplots::PlotError;
use simreader::{ScanOptions, SimDir, SimError};
use tempfile::tempdir;

fn open(dir: &std::path::Path) -> SimDir {
    SimDir::new(dir, ScanOptions::default()).unwrap()
}

fn assert_unavailable(res: Result<impl std::fmt::Debug, PlotError>, ah: u32) {
    match res {
        Err(e @ PlotError::Sim(SimError::HorizonUnavailable(_))) => {
            assert_eq!(
                e.to_string(),
                format!("Apparent horizons {} is not available", ah)
            );
        }
        other => panic!("expected a missing horizon, got {:?}", other),
    }
}

#[test]
fn missing_horizons_fail_without_output() {
    let sim = tempdir().unwrap();
    binary(sim.path());
    let out = sim.path().join("plots");
    let base = vec![
        "--datadir".to_string(),
        path_arg(sim.path()),
        "--outdir".to_string(),
        path_arg(&out),
    ];
    let argv = |prog: &str, rest: &[&str]| {
        let mut v = vec![prog.to_string()];
        v.extend(base.iter().cloned());
        v.extend(rest.iter().map(|s| s.to_string()));
        v
    };

    let args =
        ah_radius::Args::try_parse_from(argv("plot_ah_radius", &["-a", "7"]))
            .unwrap();
    assert_unavailable(ah_radius::run(&args), 7);

    let args = ah_found::Args::try_parse_from(argv(
        "plot_ah_found",
        &["-a", "1", "5", "2"],
    ))
    .unwrap();
    assert_unavailable(ah_found::run(&args), 5);

    let args = ah_trajectories::Args::try_parse_from(argv(
        "plot_ah_trajectories",
        &["-a", "3", "1", "--type", "xy"],
    ))
    .unwrap();
    assert_unavailable(ah_trajectories::run(&args), 3);

    let args = formation_time::Args::try_parse_from(argv(
        "print_time_formation_ah",
        &["-a", "4", "--parsable"],
    ))
    .unwrap();
    assert_unavailable(formation_time::run(&args), 4);

    assert!(is_empty_or_missing(&out));
}

#[test]
fn radius_figure_has_three_labelled_lines() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let fig = ah_radius::figure(&open(dir.path()), 1).unwrap();
    let plot = match fig.plot {
        Plot::TwoD(p) => p,
        other => panic!("unexpected plot {:?}", other),
    };
    assert_eq!(plot.x.label, "Time");
    assert_eq!(plot.y.label, "Radius of horizon 1");
    let labels: Vec<_> =
        plot.lines.iter().map(|s| s.label.clone().unwrap()).collect();
    assert_eq!(labels, vec!["Mean radius", "Min radius", "Max radius"]);
    assert_eq!(plot.lines[0].points, vec![(0.0, 0.5), (0.5, 0.5), (1.0, 0.5)]);
    assert!(plot.legend);
}

#[test]
fn found_times_are_ticked_by_horizon() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let fig = ah_found::figure(&open(dir.path()), &[2, 1]).unwrap();
    let plot = match fig.plot {
        Plot::TwoD(p) => p,
        other => panic!("unexpected plot {:?}", other),
    };
    assert_eq!(plot.y.label, "Apparent horizon");
    assert_eq!(plot.y.range, Some((0.0, 3.0)));
    assert_eq!(plot.y.ticks, Some(vec![2.0, 1.0]));
    assert_eq!(plot.markers.len(), 2);
    assert_eq!(plot.markers[0].points, vec![(0.5, 2.0), (1.0, 2.0)]);
    assert_eq!(plot.markers[1].points.len(), 3);
}

fn limits_3d(fig: nrplots::figure::Figure) -> [(f64, f64); 3] {
    match fig.plot {
        Plot::ThreeD(p) => p.limits,
        other => panic!("unexpected plot {:?}", other),
    }
}

#[test]
fn trajectory_bounds_do_not_depend_on_order() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let sim = open(dir.path());
    for draw in [false, true] {
        let a = ah_trajectories::figure(
            &sim,
            &[1, 2],
            TrajectoryType::ThreeD,
            draw,
        )
        .unwrap();
        let b = ah_trajectories::figure(
            &sim,
            &[2, 1],
            TrajectoryType::ThreeD,
            draw,
        )
        .unwrap();
        let (la, lb) = (limits_3d(a), limits_3d(b));
        assert_eq!(la, lb);
        // Cubic: the same width on every axis.
        let w = la[0].1 - la[0].0;
        for (lo, hi) in la {
            assert!((hi - lo - w).abs() < 1e-12);
        }
    }
}

#[test]
fn trajectory_3d_draws_available_shapes() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let fig = ah_trajectories::figure(
        &open(dir.path()),
        &[1, 2],
        TrajectoryType::ThreeD,
        true,
    )
    .unwrap();
    assert_eq!(fig.corner_text.as_deref(), Some("t = 1.000"));
    match fig.plot {
        Plot::ThreeD(p) => {
            assert_eq!(p.lines.len(), 2);
            assert_eq!(p.lines[1].label.as_deref(), Some("Horizon 2"));
            assert_eq!(p.lines[0].points[2], [2.0, 0.4, 0.0]);
            // Only horizon 2 has a shape.
            assert_eq!(p.wireframes.len(), 1);
            assert_eq!(p.wireframes[0].len(), 10);
        }
        other => panic!("unexpected plot {:?}", other),
    }
}

#[test]
fn trajectory_projection_is_square_with_outline() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let sim = open(dir.path());
    let fig =
        ah_trajectories::figure(&sim, &[1, 2], TrajectoryType::Xy, true)
            .unwrap();
    let plot = match fig.plot {
        Plot::TwoD(p) => p,
        other => panic!("unexpected plot {:?}", other),
    };
    assert_eq!(plot.x.label, "x");
    assert_eq!(plot.y.label, "y");
    assert!(plot.equal_aspect);
    assert_eq!(plot.fills.len(), 1);
    assert!(plot.fills[0].len() >= 3);
    assert_eq!(plot.lines[0].points[0], (1.0, 0.0));
    let (xr, yr) = (plot.x.range.unwrap(), plot.y.range.unwrap());
    assert!(((xr.1 - xr.0) - (yr.1 - yr.0)).abs() < 1e-12);

    let plain =
        ah_trajectories::figure(&sim, &[1, 2], TrajectoryType::Xz, false)
            .unwrap();
    match plain.plot {
        Plot::TwoD(p) => {
            assert!(p.fills.is_empty());
            assert_eq!(p.y.label, "z");
            assert_eq!(p.lines[1].points, vec![(-1.0, 0.5), (-3.0, 1.0)]);
        }
        other => panic!("unexpected plot {:?}", other),
    }
}

#[test]
fn formation_time_reports() {
    let dir = tempdir().unwrap();
    binary(dir.path());
    let sim = open(dir.path());
    assert_eq!(
        formation_time::report(&sim, 2, false).unwrap(),
        "Horizon 2 was first found at time 0.5"
    );
    let line = formation_time::report(&sim, 2, true).unwrap();
    assert_eq!(line.lines().count(), 1);
    assert_eq!(line.trim().parse::<f64>().unwrap(), 0.5);
}
