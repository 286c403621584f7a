use ndarray::Array2;
use rstar::primitives::GeomWithData;
use rstar::{PointDistance, RTree};
use crate::gapfilling::filler::Sample;

/// Sample position `[row, col]` tagged with its row-major rank among the valid samples.
type RankedSample = GeomWithData<[f64; 2], usize>;

/// Nearest valid sample under Euclidean distance in `(row, col)` space.
pub(crate) struct NearestSampler<'a> {
    samples: &'a [Sample],
    tree: RTree<RankedSample>
}

impl<'a> NearestSampler<'a> {
    pub(crate) fn new(samples: &'a [Sample]) -> Self {
        let ranked = samples.iter()
            .enumerate()
            .map(|(rank, sample)| RankedSample::new([sample.row as f64, sample.col as f64], rank))
            .collect();
        NearestSampler { samples, tree: RTree::bulk_load(ranked) }
    }

    /// Rank of the closest sample. Equidistant samples resolve to the one first in row-major order.
    pub(crate) fn nearest(&self, row: usize, col: usize) -> Option<usize> {
        let query = [row as f64, col as f64];
        let closest = self.tree.nearest_neighbor(&query)?;
        // squared distances between integer coordinates are exact
        let distance_2 = closest.distance_2(&query);
        self.tree.locate_within_distance(query, distance_2)
            .map(|candidate| candidate.data)
            .min()
    }

    /// Assigns every pending cell the value of its nearest sample.
    pub(crate) fn fill(&self, target: &mut Array2<f32>, pending: &mut Array2<bool>) -> usize {
        let mut resolved = 0;
        for ((row, col), is_pending) in pending.indexed_iter_mut() {
            if !*is_pending {
                continue;
            }
            if let Some(rank) = self.nearest(row, col) {
                target[[row, col]] = self.samples[rank].z;
                *is_pending = false;
                resolved += 1;
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(row: usize, col: usize, z: f32) -> Sample {
        Sample { row, col, z }
    }

    #[test]
    fn test_nearest() {
        let samples = vec![sample(0, 0, 1.0), sample(5, 5, 2.0), sample(9, 0, 3.0)];
        let sampler = NearestSampler::new(&samples);
        assert_eq!(sampler.nearest(1, 1), Some(0));
        assert_eq!(sampler.nearest(4, 6), Some(1));
        assert_eq!(sampler.nearest(8, 1), Some(2));
    }

    #[test]
    fn test_tie_break_prefers_row_major_first() {
        // (1,1) is at distance 1 from all four samples
        let samples = vec![sample(0, 1, 10.0), sample(1, 0, 20.0), sample(1, 2, 30.0), sample(2, 1, 40.0)];
        let sampler = NearestSampler::new(&samples);
        assert_eq!(sampler.nearest(1, 1), Some(0));

        let samples = vec![sample(1, 0, 20.0), sample(1, 2, 30.0), sample(2, 1, 40.0)];
        let sampler = NearestSampler::new(&samples);
        assert_eq!(sampler.nearest(1, 1), Some(0));
    }

    #[test]
    fn test_fill_only_pending() {
        let samples = vec![sample(0, 0, 1.0), sample(0, 3, 4.0)];
        let sampler = NearestSampler::new(&samples);
        let mut target = Array2::from_shape_vec((1, 4), vec![1.0, f32::NAN, 9.0, 4.0]).unwrap();
        let mut pending = Array2::from_shape_vec((1, 4), vec![false, true, false, false]).unwrap();
        assert_eq!(sampler.fill(&mut target, &mut pending), 1);
        assert_eq!(target.into_raw_vec(), vec![1.0, 1.0, 9.0, 4.0]);
        assert!(pending.iter().all(|&p| !p));
    }

    #[test]
    fn test_empty_tree() {
        let samples: Vec<Sample> = vec![];
        let sampler = NearestSampler::new(&samples);
        assert_eq!(sampler.nearest(0, 0), None);
    }
}
