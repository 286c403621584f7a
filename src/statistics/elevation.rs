use ndarray::{Array1, ArrayView2};
use ndarray_stats::QuantileExt;
use serde::Serialize;
use crate::model::{FilledHeightGrid, StructuredSurface};

/// Elevation range of a repaired capture, used for colour ranges and reporting.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ElevationSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64
}

impl ElevationSummary {
    pub fn of(grid: &FilledHeightGrid) -> Option<Self> {
        Self::of_samples(grid.samples())
    }

    /// Summary of the emitted `z` coordinates, i.e. after axis scaling.
    pub fn of_surface(surface: &StructuredSurface) -> Option<Self> {
        let z: Array1<f64> = surface.points().iter().map(|point| point.z).collect();
        Self::of_values(z)
    }

    fn of_samples(samples: ArrayView2<f32>) -> Option<Self> {
        let values: Array1<f64> = samples.iter().map(|&value| value as f64).collect();
        Self::of_values(values)
    }

    fn of_values(values: Array1<f64>) -> Option<Self> {
        let min = *values.min().ok()?;
        let max = *values.max().ok()?;
        let mean = values.mean()?;
        Some(ElevationSummary { min, max, mean })
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use crate::gapfilling::fill;
    use crate::model::{AxisScale, HeightGrid};
    use crate::surface::SurfaceBuilder;
    use super::*;

    #[test]
    fn test_summary() {
        let grid = fill(HeightGrid::from_array(array![[1.0, 2.0], [3.0, 6.0]]).unwrap()).unwrap();
        let summary = ElevationSummary::of(&grid).unwrap();
        assert_relative_eq!(summary.min, 1.0);
        assert_relative_eq!(summary.max, 6.0);
        assert_relative_eq!(summary.mean, 3.0);
        assert_relative_eq!(summary.range(), 5.0);
    }

    #[test]
    fn test_surface_summary_follows_scale() {
        let grid = fill(HeightGrid::from_array(array![[1.0, 2.0], [3.0, 6.0]]).unwrap()).unwrap();
        let surface = SurfaceBuilder::new().with_scale(AxisScale::new(1.0, 1.0, 2.0)).build(&grid);
        let summary = ElevationSummary::of_surface(&surface).unwrap();
        assert_relative_eq!(summary.min, 2.0);
        assert_relative_eq!(summary.max, 12.0);
    }
}
