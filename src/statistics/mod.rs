pub mod elevation;

pub use elevation::ElevationSummary;
