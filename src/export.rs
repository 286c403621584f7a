//! Writers handing the reconstruction to downstream tooling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use anyhow::{Context, Result};
use ndarray_npy::write_npy as write_array;
use plotly::common::{ColorScale, ColorScalePalette, Title};
use plotly::{Layout, Plot, Surface};
use crate::model::{FilledHeightGrid, StructuredSurface};
use crate::statistics::ElevationSummary;

/// Filled grid as a `(rows, cols)` `float32` `.npy` file.
pub fn write_npy<P: AsRef<Path>>(path: P, grid: &FilledHeightGrid) -> Result<()> {
    let path = path.as_ref();
    write_array(path, &grid.samples()).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote filled grid to {}", path.display());
    Ok(())
}

pub fn write_surface_json<P: AsRef<Path>>(path: P, surface: &StructuredSurface) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, surface)?;
    writer.flush()?;
    log::info!("Wrote {} surface points to {}", surface.len(), path.display());
    Ok(())
}

/// Colour range and title of the interactive plot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotOptions {
    pub title: Option<String>,
    /// Lower end of the colour range, defaults to the lowest elevation.
    pub cmin: Option<f64>,
    /// Upper end of the colour range, defaults to the highest elevation.
    pub cmax: Option<f64>
}

impl PlotOptions {
    /// Colour range after defaults, ordered low to high.
    pub fn color_range(&self, surface: &StructuredSurface) -> Option<(f64, f64)> {
        let summary = ElevationSummary::of_surface(surface);
        let low = self.cmin.or(summary.map(|s| s.min))?;
        let high = self.cmax.or(summary.map(|s| s.max))?;
        Some(if low <= high { (low, high) } else { (high, low) })
    }
}

pub fn surface_plot(surface: &StructuredSurface, options: &PlotOptions) -> Plot {
    let x: Vec<f64> = surface.points()[..surface.cols()].iter().map(|point| point.x).collect();
    let y: Vec<f64> = surface.points().iter().step_by(surface.cols()).map(|point| point.y).collect();
    let mut trace = Surface::new(surface.z_rows())
        .x(x)
        .y(y)
        .color_scale(ColorScale::Palette(ColorScalePalette::Viridis));
    if let Some(name) = surface.scalars().map(|scalars| scalars.name.as_str()) {
        trace = trace.name(name);
    }
    if let Some((low, high)) = options.color_range(surface) {
        trace = trace.cmin(low).cmax(high);
    }

    let mut plot = Plot::new();
    plot.add_trace(trace);
    if let Some(title) = &options.title {
        plot.set_layout(Layout::new().title(Title::new(title)));
    }
    plot
}

pub fn write_surface_html<P: AsRef<Path>>(path: P, surface: &StructuredSurface, options: &PlotOptions) -> Result<()> {
    let path = path.as_ref();
    let html = surface_plot(surface, options).to_html();
    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote surface plot to {}", path.display());
    Ok(())
}
