use crate::error::{ReconstructionError, Result};
use crate::model::grid::SAMPLE_BYTES;

/// Declared size of a capture. Both sides are positive and `width * height * 4` fits in `usize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: usize,
    height: usize
}

impl Dimensions {
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ReconstructionError::DimensionMismatch {
                width,
                height,
                reason: "both dimensions must be positive".to_string()
            });
        }
        let byte_len = width.checked_mul(height).and_then(|cells| cells.checked_mul(SAMPLE_BYTES));
        if byte_len.is_none() {
            return Err(ReconstructionError::DimensionMismatch {
                width,
                height,
                reason: "byte length overflows".to_string()
            });
        }
        Ok(Dimensions { width, height })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Bytes a complete capture of this size occupies.
    pub fn byte_len(&self) -> usize {
        self.cells() * SAMPLE_BYTES
    }

    /// Array shape, `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }
}

/// Source of the declared capture size, e.g. a metadata file next to the raw layer.
pub trait DimensionOracle {
    fn dimensions(&self) -> Result<Dimensions>;
}

impl DimensionOracle for Dimensions {
    fn dimensions(&self) -> Result<Dimensions> {
        Ok(*self)
    }
}
