use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::rc::Rc;
use rerun::RecordingStream;
use crate::config::{ReconstructionConfig, TruncationPolicy};
use crate::error::{ReconstructionError, Result};
use crate::gapfilling::GapFiller;
use crate::loader;
use crate::model::{DimensionOracle, Dimensions, FilledHeightGrid, HeightGrid, StructuredSurface};
use crate::statistics::ElevationSummary;
use crate::stream::Stream;
use crate::surface::SurfaceBuilder;

/// Output of one loader → filler → builder run.
pub struct Reconstruction {
    pub filled: FilledHeightGrid,
    pub surface: StructuredSurface,
    pub summary: Option<ElevationSummary>
}

pub struct ReconstructionBuilder {
    dimensions: Dimensions,
    truncation: TruncationPolicy,
    filler: GapFiller,
    surface_builder: SurfaceBuilder,
    rerun_stream: Option<Rc<RecordingStream>>
}

impl ReconstructionBuilder {
    pub fn new(dimensions: Dimensions) -> Self {
        ReconstructionBuilder {
            dimensions,
            truncation: TruncationPolicy::default(),
            filler: GapFiller::default(),
            surface_builder: SurfaceBuilder::default(),
            rerun_stream: None
        }
    }

    pub fn from_config(config: &ReconstructionConfig) -> Result<Self> {
        Ok(ReconstructionBuilder::new(config.dimensions()?)
            .with_truncation(config.truncation)
            .with_gap_filler(config.gap_filler())
            .with_surface_builder(config.surface_builder()))
    }

    pub fn with_truncation(mut self, truncation: TruncationPolicy) -> Self {
        self.truncation = truncation;
        self
    }

    pub fn with_gap_filler(mut self, filler: GapFiller) -> Self {
        self.filler = filler;
        self
    }

    pub fn with_surface_builder(mut self, surface_builder: SurfaceBuilder) -> Self {
        self.surface_builder = surface_builder;
        self
    }

    pub fn with_rerun_stream(mut self, stream: Rc<RecordingStream>) -> Self {
        self.rerun_stream = Some(stream);
        self
    }

    /// Reads the whole file and closes it before any processing.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<Reconstruction> {
        let path = path.as_ref();
        let mut buffer = Vec::new();
        File::open(path)?.read_to_end(&mut buffer)?;
        log::info!("Read {} bytes from {}", buffer.len(), path.display());
        self.run_bytes(&buffer)
    }

    pub fn run_bytes(&self, buffer: &[u8]) -> Result<Reconstruction> {
        let grid = self.load(buffer)?;
        let counts = grid.class_counts();
        log::info!(
            "Loaded {}x{} grid: {} missing, {} non-finite",
            self.dimensions.width(), self.dimensions.height(), counts.missing, counts.non_finite
        );
        self.stream("reconstruction/invalid", |s, path| s.stream_scalar(path, counts.invalid() as f64));

        let filled = self.filler.fill(grid)?;
        let repairs = filled.repairs();
        if repairs.total() > 0 {
            log::info!("Repaired {} cells: {} interpolated, {} nearest", repairs.total(), repairs.interpolated, repairs.nearest);
        } else {
            log::debug!("No cells to repair");
        }

        let surface = self.surface_builder.build(&filled);
        let summary = ElevationSummary::of(&filled);
        if let Some(summary) = &summary {
            log::info!("Elevation range [{}, {}], mean {}", summary.min, summary.max, summary.mean);
        }
        self.stream("reconstruction/surface", |s, path| s.stream_surface(path, &surface));

        Ok(Reconstruction { filled, surface, summary })
    }

    fn load(&self, buffer: &[u8]) -> Result<HeightGrid> {
        match loader::load(buffer, self.dimensions) {
            Err(ReconstructionError::TruncatedInput { expected, actual }) if self.truncation == TruncationPolicy::BestEffort => {
                log::warn!("Input truncated: expected {} bytes, got {}. Treating the tail as missing", expected, actual);
                self.stream("reconstruction/log", |s, path| {
                    s.stream_message(path, &format!("truncated input: {} of {} bytes", actual, expected))
                });
                loader::load_available(buffer, self.dimensions)
            }
            result => result
        }
    }

    /// Streaming is best effort, a failing viewer never fails the run.
    /// `f` receives the entity path so a failure is reported where it was logged.
    fn stream<F>(&self, path: &str, f: F)
    where
        F: FnOnce(&Option<Rc<RecordingStream>>, &str) -> rerun::RecordingStreamResult<()>
    {
        if let Err(e) = f(&self.rerun_stream, path) {
            log::warn!("Failed to stream {}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::gapfilling::FillStrategy;
    use crate::model::AxisScale;
    use super::*;

    fn to_bytes(values: &[f32]) -> Vec<u8> {
        values.iter().flat_map(|value| value.to_le_bytes()).collect()
    }

    #[test]
    fn test_clean_capture() {
        let values = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5];
        let builder = ReconstructionBuilder::new(Dimensions::new(3, 2).unwrap());
        let reconstruction = builder.run_bytes(&to_bytes(&values)).unwrap();
        assert_eq!(reconstruction.filled.repairs().total(), 0);
        assert_eq!(reconstruction.surface.len(), 6);
        assert_eq!(reconstruction.surface.dimensions(), (3, 2));
        let z: Vec<f64> = reconstruction.surface.points().iter().map(|point| point.z).collect();
        assert_eq!(z, values.iter().map(|&v| v as f64).collect::<Vec<_>>());
        assert_relative_eq!(reconstruction.summary.unwrap().mean, 3.0);
    }

    #[test]
    fn test_all_missing_stops_before_build() {
        let builder = ReconstructionBuilder::new(Dimensions::new(2, 2).unwrap());
        let result = builder.run_bytes(&to_bytes(&[f32::NAN; 4]));
        assert!(matches!(result, Err(ReconstructionError::NoValidSamples)));
    }

    #[test]
    fn test_truncation_policies() {
        let dims = Dimensions::new(2, 2).unwrap();
        let buffer = to_bytes(&[1.0, 2.0, 3.0]);

        let rejected = ReconstructionBuilder::new(dims).run_bytes(&buffer);
        assert!(matches!(rejected, Err(ReconstructionError::TruncatedInput { expected: 16, actual: 12 })));

        let recovered = ReconstructionBuilder::new(dims)
            .with_truncation(TruncationPolicy::BestEffort)
            .run_bytes(&buffer)
            .unwrap();
        // (1,1) lies outside the hull of the three samples, nearest is (0,1)
        assert_eq!(recovered.filled.get(1, 1), 2.0);
        assert_eq!(recovered.filled.repairs().nearest, 1);
    }

    #[test]
    fn test_from_config() {
        let config = ReconstructionConfig {
            width: Some(2),
            height: Some(1),
            scale: AxisScale::new(2.0, 1.0, 10.0),
            fill_strategy: FillStrategy::NearestOnly,
            scalar_name: Some("Height".to_string()),
            ..Default::default()
        };
        let reconstruction = ReconstructionBuilder::from_config(&config).unwrap()
            .run_bytes(&to_bytes(&[f32::INFINITY, 3.0]))
            .unwrap();
        let points = reconstruction.surface.points();
        assert_eq!(points[0].z, 30.0);
        assert_eq!(points[1].x, 2.0);
        assert_eq!(reconstruction.surface.scalars().unwrap().name, "Height");
        assert_eq!(reconstruction.surface.scalars().unwrap().values, vec![3.0, 3.0]);
    }

    #[test]
    fn test_streams_to_recording() {
        let (recording, _storage) = rerun::RecordingStreamBuilder::new("heightfield-test").memory().unwrap();
        let reconstruction = ReconstructionBuilder::new(Dimensions::new(2, 2).unwrap())
            .with_truncation(TruncationPolicy::BestEffort)
            .with_rerun_stream(Rc::new(recording))
            .run_bytes(&to_bytes(&[1.0, 2.0, 3.0]))
            .unwrap();
        assert_eq!(reconstruction.surface.len(), 4);
    }

    #[test]
    fn test_from_config_needs_dimensions() {
        assert!(ReconstructionBuilder::from_config(&ReconstructionConfig::default()).is_err());
    }

    #[test]
    fn test_run_file() {
        let path = std::env::temp_dir().join(format!("heightfield-pipeline-{}.raw", std::process::id()));
        std::fs::write(&path, to_bytes(&[1.0, f32::NAN, 3.0, 4.0, 5.0, 6.0, 0.0])).unwrap();
        let reconstruction = ReconstructionBuilder::new(Dimensions::new(3, 2).unwrap()).run_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(reconstruction.filled.samples().iter().all(|value| value.is_finite()));
        assert_eq!(reconstruction.filled.get(1, 2), 6.0);
    }

    #[test]
    fn test_missing_file() {
        let builder = ReconstructionBuilder::new(Dimensions::new(1, 1).unwrap());
        assert!(matches!(builder.run_file("/nonexistent/LAYER_0.raw"), Err(ReconstructionError::Io(_))));
    }
}
