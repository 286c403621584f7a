use ndarray::{Array2, ArrayView2};
use crate::error::Result;
use crate::model::dimensions::Dimensions;

/// Size of one little-endian `f32` sample in a raw capture.
pub const SAMPLE_BYTES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleClass {
    Valid,
    /// Decodes to not-a-number, nothing was measured.
    Missing,
    /// Decodes to positive or negative infinity.
    NonFinite
}

impl SampleClass {
    pub fn of(value: f32) -> Self {
        if value.is_nan() {
            SampleClass::Missing
        } else if value.is_infinite() {
            SampleClass::NonFinite
        } else {
            SampleClass::Valid
        }
    }

    pub fn is_valid(self) -> bool {
        self == SampleClass::Valid
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub valid: usize,
    pub missing: usize,
    pub non_finite: usize
}

impl ClassCounts {
    /// Cells the gap filler has to repair.
    pub fn invalid(&self) -> usize {
        self.missing + self.non_finite
    }
}

/// Raw elevation samples, `(rows, cols) = (height, width)`. The shape never changes.
#[derive(Clone, Debug, PartialEq)]
pub struct HeightGrid {
    samples: Array2<f32>,
    dimensions: Dimensions
}

impl HeightGrid {
    pub fn from_array(samples: Array2<f32>) -> Result<Self> {
        let (rows, cols) = samples.dim();
        let dimensions = Dimensions::new(cols, rows)?;
        Ok(HeightGrid { samples, dimensions })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn dim(&self) -> (usize, usize) {
        self.samples.dim()
    }

    pub fn samples(&self) -> ArrayView2<f32> {
        self.samples.view()
    }

    pub fn classify(&self, row: usize, col: usize) -> SampleClass {
        SampleClass::of(self.samples[[row, col]])
    }

    pub fn class_counts(&self) -> ClassCounts {
        let mut counts = ClassCounts::default();
        for &value in self.samples.iter() {
            match SampleClass::of(value) {
                SampleClass::Valid => counts.valid += 1,
                SampleClass::Missing => counts.missing += 1,
                SampleClass::NonFinite => counts.non_finite += 1
            }
        }
        counts
    }

    pub fn mask(&self) -> ValidityMask {
        ValidityMask::from_grid(self)
    }

    pub(crate) fn into_samples(self) -> Array2<f32> {
        self.samples
    }
}

/// `true` where the sample at the same position is usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidityMask {
    valid: Array2<bool>,
    valid_count: usize
}

impl ValidityMask {
    fn from_grid(grid: &HeightGrid) -> Self {
        let valid = grid.samples.mapv(|value| SampleClass::of(value).is_valid());
        let valid_count = valid.iter().filter(|&&is_valid| is_valid).count();
        ValidityMask { valid, valid_count }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.valid.dim()
    }

    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.valid[[row, col]]
    }

    pub fn valid_count(&self) -> usize {
        self.valid_count
    }

    pub fn invalid_count(&self) -> usize {
        self.valid.len() - self.valid_count
    }

    pub fn view(&self) -> ArrayView2<bool> {
        self.valid.view()
    }

    /// Valid cells as `(row, col)`, in row-major scan order.
    pub fn valid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.valid.indexed_iter().filter(|&(_, &is_valid)| is_valid).map(|(index, _)| index)
    }

    /// Cells that need repair as `(row, col)`, in row-major scan order.
    pub fn invalid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.valid.indexed_iter().filter(|&(_, &is_valid)| !is_valid).map(|(index, _)| index)
    }
}

/// How many cells each fill step resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairSummary {
    pub interpolated: usize,
    pub nearest: usize
}

impl RepairSummary {
    pub fn total(&self) -> usize {
        self.interpolated + self.nearest
    }
}

/// A height grid without missing or non-finite samples.
#[derive(Clone, Debug, PartialEq)]
pub struct FilledHeightGrid {
    samples: Array2<f32>,
    repairs: RepairSummary
}

impl FilledHeightGrid {
    pub(crate) fn new(samples: Array2<f32>, repairs: RepairSummary) -> Self {
        debug_assert!(samples.iter().all(|value| value.is_finite()));
        FilledHeightGrid { samples, repairs }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.samples.dim()
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.samples[[row, col]]
    }

    pub fn samples(&self) -> ArrayView2<f32> {
        self.samples.view()
    }

    pub fn repairs(&self) -> RepairSummary {
        self.repairs
    }

    pub fn into_array(self) -> Array2<f32> {
        self.samples
    }
}
