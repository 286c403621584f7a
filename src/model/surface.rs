use serde::{Deserialize, Serialize};

/// Per-axis multipliers applied to emitted points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisScale {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl AxisScale {
    pub const IDENTITY: AxisScale = AxisScale { x: 1.0, y: 1.0, z: 1.0 };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        AxisScale { x, y, z }
    }

    pub fn is_identity(&self) -> bool {
        *self == AxisScale::IDENTITY
    }
}

impl Default for AxisScale {
    fn default() -> Self {
        AxisScale::IDENTITY
    }
}

/// Grid coordinates `x = column`, `y = row` and the filled elevation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

impl SurfacePoint {
    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Named per-point attribute, aligned index-for-index with the points.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalarArray {
    pub name: String,
    pub values: Vec<f32>
}

/// Row-major point set with implicit rectangular topology, `index = y * cols + x`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SurfaceParts")]
pub struct StructuredSurface {
    points: Vec<SurfacePoint>,
    /// `(cols, rows)`
    dimensions: (usize, usize),
    scalars: Option<ScalarArray>
}

/// Unchecked serialized form, validated into a `StructuredSurface`.
#[derive(Deserialize)]
struct SurfaceParts {
    points: Vec<SurfacePoint>,
    dimensions: (usize, usize),
    scalars: Option<ScalarArray>
}

impl TryFrom<SurfaceParts> for StructuredSurface {
    type Error = String;

    fn try_from(parts: SurfaceParts) -> Result<Self, Self::Error> {
        let (cols, rows) = parts.dimensions;
        if cols == 0 || rows == 0 {
            return Err(format!("surface dimensions must be positive, got {}x{}", cols, rows));
        }
        let expected = cols.checked_mul(rows).ok_or_else(|| format!("surface dimensions {}x{} overflow", cols, rows))?;
        if parts.points.len() != expected {
            return Err(format!("{}x{} surface needs {} points, got {}", cols, rows, expected, parts.points.len()));
        }
        if let Some(scalars) = &parts.scalars {
            if scalars.values.len() != expected {
                return Err(format!("scalar array {:?} has {} values for {} points", scalars.name, scalars.values.len(), expected));
            }
        }
        Ok(StructuredSurface { points: parts.points, dimensions: parts.dimensions, scalars: parts.scalars })
    }
}

impl StructuredSurface {
    pub(crate) fn new(points: Vec<SurfacePoint>, dimensions: (usize, usize), scalars: Option<ScalarArray>) -> Self {
        debug_assert_eq!(points.len(), dimensions.0 * dimensions.1);
        StructuredSurface { points, dimensions, scalars }
    }

    pub fn points(&self) -> &[SurfacePoint] {
        &self.points
    }

    /// Topology descriptor `(cols, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        self.dimensions
    }

    pub fn cols(&self) -> usize {
        self.dimensions.0
    }

    pub fn rows(&self) -> usize {
        self.dimensions.1
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.cols() + x
    }

    pub fn point(&self, x: usize, y: usize) -> Option<&SurfacePoint> {
        if x >= self.cols() || y >= self.rows() {
            return None;
        }
        self.points.get(self.index(x, y))
    }

    pub fn scalars(&self) -> Option<&ScalarArray> {
        self.scalars.as_ref()
    }

    /// Scalar values limited to `[min, max]`, e.g. for a colour range. Points are untouched.
    pub fn clamped_scalars(&self, min: f32, max: f32) -> Option<Vec<f32>> {
        if min.is_nan() || max.is_nan() {
            return self.scalars.as_ref().map(|scalars| scalars.values.clone());
        }
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.scalars.as_ref().map(|scalars| scalars.values.iter().map(|value| value.clamp(low, high)).collect())
    }

    /// Elevation rows, `rows` vectors of `cols` values each.
    pub fn z_rows(&self) -> Vec<Vec<f64>> {
        self.points.chunks(self.cols()).map(|row| row.iter().map(|point| point.z).collect()).collect()
    }
}
