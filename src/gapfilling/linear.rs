use delaunator::{triangulate, Point};
use ndarray::Array2;
use crate::gapfilling::filler::Sample;

/// Piecewise-linear interpolant over a Delaunay triangulation of the valid samples.
pub(crate) struct LinearInterpolator<'a> {
    samples: &'a [Sample],
    triangles: Vec<usize>
}

impl<'a> LinearInterpolator<'a> {
    pub(crate) fn new(samples: &'a [Sample]) -> Self {
        let points: Vec<Point> = samples.iter()
            .map(|sample| Point { x: sample.col as f64, y: sample.row as f64 })
            .collect();
        // Collinear or fewer than three samples give no triangles at all.
        let triangles = triangulate(&points).triangles;
        LinearInterpolator { samples, triangles }
    }

    pub(crate) fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Evaluates the interpolant at every pending cell inside the convex hull.
    ///
    /// Resolved cells are written to `target` and cleared in `pending`. Cells on an
    /// edge shared by two triangles take the value of the first triangle in order.
    pub(crate) fn fill(&self, target: &mut Array2<f32>, pending: &mut Array2<bool>) -> usize {
        let mut resolved = 0;
        for triangle in self.triangles.chunks_exact(3) {
            let a = &self.samples[triangle[0]];
            let b = &self.samples[triangle[1]];
            let c = &self.samples[triangle[2]];
            let Some(barycentric) = Barycentric::new(a, b, c) else {
                continue;
            };

            let row_range = a.row.min(b.row).min(c.row)..=a.row.max(b.row).max(c.row);
            let col_range = a.col.min(b.col).min(c.col)..=a.col.max(b.col).max(c.col);
            for row in row_range {
                for col in col_range.clone() {
                    if !pending[[row, col]] {
                        continue;
                    }
                    if let Some(value) = barycentric.evaluate(row, col) {
                        target[[row, col]] = value;
                        pending[[row, col]] = false;
                        resolved += 1;
                    }
                }
            }
        }
        resolved
    }
}

/// Barycentric weights on integer grid coordinates. All sign tests run on exact
/// integer determinants, so the inside test has no rounding tolerance.
struct Barycentric {
    a: (i64, i64, f64),
    b: (i64, i64, f64),
    c: (i64, i64, f64),
    det: i64
}

impl Barycentric {
    fn new(a: &Sample, b: &Sample, c: &Sample) -> Option<Self> {
        let a = (a.col as i64, a.row as i64, a.z as f64);
        let b = (b.col as i64, b.row as i64, b.z as f64);
        let c = (c.col as i64, c.row as i64, c.z as f64);
        let det = (b.1 - c.1) * (a.0 - c.0) + (c.0 - b.0) * (a.1 - c.1);
        if det == 0 {
            return None;
        }
        Some(Barycentric { a, b, c, det })
    }

    fn evaluate(&self, row: usize, col: usize) -> Option<f32> {
        let (a, b, c) = (self.a, self.b, self.c);
        let (px, py) = (col as i64, row as i64);
        let wa = (b.1 - c.1) * (px - c.0) + (c.0 - b.0) * (py - c.1);
        let wb = (c.1 - a.1) * (px - c.0) + (a.0 - c.0) * (py - c.1);
        let wc = self.det - wa - wb;
        let inside = if self.det > 0 {
            wa >= 0 && wb >= 0 && wc >= 0
        } else {
            wa <= 0 && wb <= 0 && wc <= 0
        };
        if !inside {
            return None;
        }
        let value = (wa as f64 * a.2 + wb as f64 * b.2 + wc as f64 * c.2) / self.det as f64;
        // keep rounding inside the triangle's value range
        let low = a.2.min(b.2).min(c.2);
        let high = a.2.max(b.2).max(c.2);
        Some(value.clamp(low, high) as f32)
    }
}
