pub mod dimensions;
pub mod grid;
pub mod surface;

pub use dimensions::{DimensionOracle, Dimensions};
pub use grid::{ClassCounts, FilledHeightGrid, HeightGrid, RepairSummary, SampleClass, ValidityMask, SAMPLE_BYTES};
pub use surface::{AxisScale, ScalarArray, StructuredSurface, SurfacePoint};
