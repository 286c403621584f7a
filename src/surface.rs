//! Surface grid builder: filled elevations to a structured 3D point set.

use crate::model::{AxisScale, FilledHeightGrid, ScalarArray, StructuredSurface, SurfacePoint};

pub const DEFAULT_SCALAR_NAME: &str = "Elevation";

#[derive(Clone, Debug)]
pub struct SurfaceBuilder {
    scale: AxisScale,
    scalar_name: Option<String>
}

impl SurfaceBuilder {
    pub fn new() -> Self {
        SurfaceBuilder {
            scale: AxisScale::IDENTITY,
            scalar_name: Some(DEFAULT_SCALAR_NAME.to_string())
        }
    }

    pub fn with_scale(mut self, scale: AxisScale) -> Self {
        self.scale = scale;
        self
    }

    /// Name of the emitted elevation attribute, `None` to emit points only.
    pub fn with_scalar_name(mut self, name: Option<String>) -> Self {
        self.scalar_name = name;
        self
    }

    pub fn scale(&self) -> AxisScale {
        self.scale
    }

    /// Points in row-major order, `y` varying slowest. The scalar array keeps the
    /// unscaled elevations.
    pub fn build(&self, grid: &FilledHeightGrid) -> StructuredSurface {
        let (rows, cols) = grid.dim();
        let samples = grid.samples();
        let mut points = Vec::with_capacity(rows * cols);
        for ((y, x), &z) in samples.indexed_iter() {
            points.push(SurfacePoint {
                x: x as f64 * self.scale.x,
                y: y as f64 * self.scale.y,
                z: z as f64 * self.scale.z
            });
        }
        let scalars = self.scalar_name.as_ref().map(|name| ScalarArray {
            name: name.clone(),
            values: samples.iter().copied().collect()
        });
        StructuredSurface::new(points, (cols, rows), scalars)
    }
}

impl Default for SurfaceBuilder {
    fn default() -> Self {
        SurfaceBuilder::new()
    }
}

/// Builds with identity scaling and the default scalar name.
pub fn build(grid: &FilledHeightGrid) -> StructuredSurface {
    SurfaceBuilder::new().build(grid)
}
