// Copyright © 2020 Brian Merchant.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drawing of `Figure`s with `plotters`, and saving to disk.

use crate::args::FigExtension;
use crate::error::{PlotError, Result};
use crate::figure::{ColorPlot, Figure, FigureConfig, Plot, Plot2D, Plot3D};
use plotters::coord::ranged1d::{AsRangedCoord, ValueFormatter};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::prelude::IntoLogRange;
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

type DrawResult = std::result::Result<(), Box<dyn Error>>;

const COLORBAR_WIDTH: u32 = 130;
const COLORBAR_STEPS: usize = 256;
const FONT: &str = "sans-serif";

/// Files written for `figname`: the main format, plus SVG markup when
/// requested and not already the main format.
pub fn output_paths(
    outdir: &Path,
    figname: &str,
    config: &FigureConfig,
) -> Vec<(PathBuf, FigExtension)> {
    let mut paths = vec![(
        outdir.join(format!("{}.{}", figname, config.extension)),
        config.extension,
    )];
    if config.as_markup && config.extension != FigExtension::Svg {
        paths.push((
            outdir.join(format!("{}.{}", figname, FigExtension::Svg)),
            FigExtension::Svg,
        ));
    }
    paths
}

/// Refuse figures that cannot be drawn, before any file is created.
pub fn check(figure: &Figure) -> Result<()> {
    let ok = match &figure.plot {
        Plot::TwoD(p) => p.limits().is_some(),
        Plot::ThreeD(p) => {
            p.limits.iter().all(|(lo, hi)| lo.is_finite() && hi > lo)
        }
        Plot::Color(p) => p.value_range().is_some() && p.grid.x.len() > 1,
    };
    if ok {
        Ok(())
    } else {
        Err(PlotError::InvalidArgument(
            "there is no finite data to plot".to_string(),
        ))
    }
}

/// Write `figure` in `outdir`, creating it if necessary. Returns the
/// written files.
pub fn save(
    figure: &Figure,
    config: &FigureConfig,
    outdir: &Path,
    figname: &str,
) -> Result<Vec<PathBuf>> {
    check(figure)?;
    fs::create_dir_all(outdir).map_err(|e| PlotError::io(outdir, e))?;
    let mut written = vec![];
    for (path, ext) in output_paths(outdir, figname, config) {
        debug!("Saving in {}", path.display());
        if let Err(e) = render_to(figure, config, &path, ext) {
            // A failed invocation leaves no output, complete or partial.
            for p in written.iter().chain(std::iter::once(&path)) {
                if p.is_file() {
                    let _ = fs::remove_file(p);
                }
            }
            return Err(PlotError::Render(e.to_string()));
        }
        info!("Saved {}", path.display());
        written.push(path);
    }
    Ok(written)
}

fn render_to(
    figure: &Figure,
    config: &FigureConfig,
    path: &Path,
    ext: FigExtension,
) -> DrawResult {
    let size = (config.width, config.height);
    match ext {
        FigExtension::Png => {
            draw(figure, BitMapBackend::new(path, size).into_drawing_area())
        }
        FigExtension::Svg => {
            draw(figure, SVGBackend::new(path, size).into_drawing_area())
        }
    }
}

fn draw<DB>(figure: &Figure, root: DrawingArea<DB, Shift>) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    match &figure.plot {
        Plot::TwoD(p) => draw_2d(&root, p)?,
        Plot::ThreeD(p) => draw_3d(&root, p)?,
        Plot::Color(p) => draw_color(&root, p)?,
    }
    if let Some(text) = &figure.corner_text {
        let (w, _) = root.dim_in_pixel();
        let style = TextStyle::from((FONT, 18))
            .pos(Pos::new(HPos::Right, VPos::Top));
        root.draw(&Text::new(text.clone(), (w as i32 - 10, 8), style))?;
    }
    root.present()?;
    Ok(())
}

fn square_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
) -> DrawingArea<DB, Shift> {
    let (w, h) = root.dim_in_pixel();
    let side = w.min(h);
    root.clone()
        .shrink(((w - side) / 2, (h - side) / 2), (side, side))
}

fn draw_2d<DB>(root: &DrawingArea<DB, Shift>, plot: &Plot2D) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let ((xlo, xhi), (ylo, yhi)) =
        plot.limits().ok_or("there is no finite data to plot")?;
    let square;
    let area = if plot.equal_aspect {
        square = square_area(root);
        &square
    } else {
        root
    };
    match (plot.x.log, plot.y.log) {
        (false, false) => draw_2d_on(area, plot, xlo..xhi, ylo..yhi),
        (true, false) => {
            draw_2d_on(area, plot, (xlo..xhi).log_scale(), ylo..yhi)
        }
        (false, true) => {
            draw_2d_on(area, plot, xlo..xhi, (ylo..yhi).log_scale())
        }
        (true, true) => draw_2d_on(
            area,
            plot,
            (xlo..xhi).log_scale(),
            (ylo..yhi).log_scale(),
        ),
    }
}

fn draw_2d_on<DB, X, Y>(
    area: &DrawingArea<DB, Shift>,
    plot: &Plot2D,
    x: X,
    y: Y,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
    X: AsRangedCoord<Value = f64>,
    Y: AsRangedCoord<Value = f64>,
    X::CoordDescType: ValueFormatter<f64>,
    Y::CoordDescType: ValueFormatter<f64>,
{
    let y_label_area = if plot.equal_aspect { 50 } else { 60 };
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(y_label_area)
        .build_cartesian_2d(x, y)?;

    let ticks = plot.y.ticks.clone().unwrap_or_default();
    let tick_label = |v: &f64| {
        if ticks.iter().any(|t| (t - v).abs() < 1e-9) {
            format!("{}", v.round())
        } else {
            String::new()
        }
    };
    {
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(plot.x.label.as_str())
            .y_desc(plot.y.label.as_str());
        if !plot.grid {
            mesh.disable_mesh();
        } else if plot.minor_grid {
            mesh.bold_line_style(BLACK.mix(0.3))
                .light_line_style(BLACK.mix(0.08));
        } else {
            mesh.light_line_style(TRANSPARENT);
        }
        if let (false, Some((lo, hi))) = (ticks.is_empty(), plot.y.range) {
            mesh.y_labels(((hi - lo).abs().round() as usize + 1).max(2))
                .y_label_formatter(&tick_label);
        }
        mesh.draw()?;
    }

    let visible = |p: &(f64, f64)| {
        (!plot.x.log || p.0 > 0.0) && (!plot.y.log || p.1 > 0.0)
    };
    let mut color_ix = 0;
    for s in &plot.lines {
        let color = Palette99::pick(color_ix).mix(1.0);
        color_ix += 1;
        let anno = chart.draw_series(LineSeries::new(
            s.points.iter().copied().filter(visible),
            color.stroke_width(2),
        ))?;
        if let Some(label) = &s.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
        }
    }
    for s in &plot.markers {
        let color = Palette99::pick(color_ix).mix(1.0);
        color_ix += 1;
        let size = plot.marker_size;
        let anno = chart.draw_series(
            s.points
                .iter()
                .copied()
                .filter(visible)
                .map(|p| Circle::new(p, size, color.filled())),
        )?;
        if let Some(label) = &s.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 3, color.filled()));
        }
    }
    for fill in &plot.fills {
        let color = Palette99::pick(color_ix).mix(0.7);
        color_ix += 1;
        chart.draw_series(std::iter::once(Polygon::new(
            fill.iter().copied().filter(visible).collect::<Vec<_>>(),
            color.filled(),
        )))?;
    }

    if plot.legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

/// `[x, y, z]` to plotters' 3D coordinates, where the second axis is
/// vertical.
fn to_view(p: &[f64; 3]) -> (f64, f64, f64) {
    (p[0], p[2], p[1])
}

fn draw_3d<DB>(root: &DrawingArea<DB, Shift>, plot: &Plot3D) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let [x, y, z] = plot.limits;
    let mut chart = ChartBuilder::on(root)
        .margin(20)
        .build_cartesian_3d(x.0..x.1, z.0..z.1, y.0..y.1)?;
    chart.with_projection(|mut p| {
        p.yaw = 0.6;
        p.pitch = 0.4;
        p.scale = 0.85;
        p.into_matrix()
    });
    chart
        .configure_axes()
        .light_grid_style(BLACK.mix(0.15))
        .max_light_lines(3)
        .draw()?;

    for (i, s) in plot.lines.iter().enumerate() {
        let color = Palette99::pick(i).mix(1.0);
        let anno = chart.draw_series(LineSeries::new(
            s.points.iter().map(to_view),
            color.stroke_width(2),
        ))?;
        if let Some(label) = &s.label {
            anno.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
        }
    }
    for (i, wireframe) in plot.wireframes.iter().enumerate() {
        let color = Palette99::pick(plot.lines.len() + i).mix(0.6);
        for line in wireframe {
            chart.draw_series(LineSeries::new(
                line.iter().map(to_view),
                color,
            ))?;
        }
    }

    if plot.legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}

fn draw_color<DB>(
    root: &DrawingArea<DB, Shift>,
    plot: &ColorPlot,
) -> DrawResult
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let (vlo, vhi) = plot
        .value_range()
        .ok_or("there are no finite values to plot")?;
    let (w, _) = root.dim_in_pixel();
    let (main, bar) =
        root.split_horizontally(w.saturating_sub(COLORBAR_WIDTH));

    let grid = if plot.smooth {
        // Enough samples to cover every pixel of the plotting area.
        let n = plot.grid.x.len().max(2);
        let factor = (w as usize / (n - 1)).max(1);
        plot.grid.upsample(factor)
    } else {
        plot.grid.clone()
    };
    let (nx, ny) = (grid.x.len(), grid.y.len());
    if nx == 0 || ny == 0 {
        return Err("empty grid".into());
    }
    let [dx, dy] = grid.spacing();
    let (hx, hy) = (dx / 2.0, dy / 2.0);
    let xr = plot
        .x
        .range
        .unwrap_or((grid.x[0] - hx, grid.x[nx - 1] + hx));
    let yr = plot
        .y
        .range
        .unwrap_or((grid.y[0] - hy, grid.y[ny - 1] + hy));

    let mut chart = ChartBuilder::on(&main)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(xr.0..xr.1, yr.0..yr.1)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(plot.x.label.as_str())
        .y_desc(plot.y.label.as_str())
        .draw()?;

    let viridis = ViridisRGB {};
    chart.draw_series(
        (0..ny)
            .flat_map(|j| (0..nx).map(move |i| (i, j)))
            .filter_map(|(i, j)| {
                let v = grid.value(i, j);
                if !v.is_finite() {
                    return None;
                }
                let (x, y) = (grid.x[i], grid.y[j]);
                let color = viridis.get_color_normalized(
                    v.clamp(vlo, vhi),
                    vlo,
                    vhi,
                );
                Some(Rectangle::new(
                    [(x - hx, y - hy), (x + hx, y + hy)],
                    color.filled(),
                ))
            }),
    )?;

    let mut colorbar = ChartBuilder::on(&bar)
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, vlo..vhi)?;
    colorbar
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc(plot.label.as_str())
        .draw()?;
    let step = (vhi - vlo) / COLORBAR_STEPS as f64;
    colorbar.draw_series((0..COLORBAR_STEPS).map(|k| {
        let lo = vlo + step * k as f64;
        let color =
            viridis.get_color_normalized(lo + 0.5 * step, vlo, vhi);
        Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
    }))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::figure::{Axis, Series};
    use tempfile::tempdir;

    #[test]
    fn markup_is_not_duplicated() {
        let out = Path::new("out");
        let png = FigureConfig::default().with_as_markup(true);
        let paths: Vec<PathBuf> = output_paths(out, "fig", &png)
            .into_iter()
            .map(|p| p.0)
            .collect();
        assert_eq!(paths, vec![out.join("fig.png"), out.join("fig.svg")]);

        let svg = png.with_extension(FigExtension::Svg);
        assert_eq!(output_paths(out, "fig", &svg).len(), 1);
        let plain = FigureConfig::default();
        assert_eq!(output_paths(out, "fig", &plain).len(), 1);
    }

    #[test]
    fn empty_figures_write_nothing() {
        let dir = tempdir().unwrap();
        let outdir = dir.path().join("plots");
        let mut plot = Plot2D::new(Axis::new("x"), Axis::new("y"));
        plot.lines.push(Series::new(None, vec![(f64::NAN, 1.0)]));
        let figure = Figure::new(Plot::TwoD(plot));
        let res = save(&figure, &FigureConfig::default(), &outdir, "fig");
        assert!(matches!(res, Err(PlotError::InvalidArgument(_))));
        assert!(!outdir.exists());
    }
}
