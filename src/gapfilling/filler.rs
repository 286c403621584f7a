use serde::{Deserialize, Serialize};
use crate::error::{ReconstructionError, Result};
use crate::gapfilling::linear::LinearInterpolator;
use crate::gapfilling::nearest::NearestSampler;
use crate::model::{FilledHeightGrid, HeightGrid, RepairSummary};

/// A valid cell used as interpolation support.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Sample {
    pub row: usize,
    pub col: usize,
    pub z: f32
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStrategy {
    /// Linear interpolation inside the hull of valid samples, nearest sample elsewhere.
    #[default]
    LinearThenNearest,
    /// Every invalid cell takes its nearest valid sample.
    NearestOnly
}

/// Replaces missing and non-finite samples with estimates from the valid ones.
#[derive(Clone, Copy, Debug, Default)]
pub struct GapFiller {
    strategy: FillStrategy
}

impl GapFiller {
    pub fn new() -> Self {
        GapFiller::default()
    }

    pub fn with_strategy(mut self, strategy: FillStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn strategy(&self) -> FillStrategy {
        self.strategy
    }

    pub fn fill(&self, grid: HeightGrid) -> Result<FilledHeightGrid> {
        let mask = grid.mask();
        if mask.invalid_count() == 0 {
            return Ok(FilledHeightGrid::new(grid.into_samples(), RepairSummary::default()));
        }
        if mask.valid_count() == 0 {
            return Err(ReconstructionError::NoValidSamples);
        }

        let samples: Vec<Sample> = {
            let values = grid.samples();
            mask.valid_cells().map(|(row, col)| Sample { row, col, z: values[[row, col]] }).collect()
        };
        let mut pending = mask.view().mapv(|is_valid| !is_valid);
        // valid cells are never written below, only pending ones
        let mut target = grid.into_samples();
        let mut repairs = RepairSummary::default();

        if self.strategy == FillStrategy::LinearThenNearest {
            repairs.interpolated = LinearInterpolator::new(&samples).fill(&mut target, &mut pending);
        }
        if repairs.interpolated < mask.invalid_count() {
            repairs.nearest = NearestSampler::new(&samples).fill(&mut target, &mut pending);
        }
        debug_assert_eq!(repairs.total(), mask.invalid_count());

        Ok(FilledHeightGrid::new(target, repairs))
    }
}

/// Fills with the default strategy.
pub fn fill(grid: HeightGrid) -> Result<FilledHeightGrid> {
    GapFiller::default().fill(grid)
}
